//! Structured error reporting for line and program assembly.

use thiserror::Error;

/// Classification of a line that could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum EncodeErrorKind {
    /// First token is not a known mnemonic.
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    /// A register operand names no register.
    #[error("unknown register `{0}`")]
    UnknownRegister(String),
    /// A numeric operand could not be parsed.
    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),
    /// The mnemonic is known but the operands fit none of its forms.
    #[error("operands do not match any form of `{0}`")]
    NoMatchingForm(String),
}

/// Failure to encode one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{kind}")]
pub struct EncodeError {
    /// What went wrong.
    pub kind: EncodeErrorKind,
}

impl EncodeError {
    /// Wraps an error kind.
    #[must_use]
    pub const fn new(kind: EncodeErrorKind) -> Self {
        Self { kind }
    }
}

impl From<EncodeErrorKind> for EncodeError {
    fn from(kind: EncodeErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Failure to assemble a multi-line program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("line {line}: {error}")]
pub struct AssembleError {
    /// 1-indexed source line of the first failing instruction.
    pub line: usize,
    /// Encode failure on that line.
    #[source]
    pub error: EncodeError,
}
