//! Combinational arithmetic/logic unit.
//!
//! A 4-bit control code selects the operation: bits 3..2 pick the category
//! (shift, set-less-than, add/sub, logic) and bits 1..0 the sub-operation.
//!
//! Eleven codes are defined. The set-less-than category accepts only
//! sub-selector 0 and add/sub only 0 and 1, so codes `0b0101..=0b0111` and
//! `0b1010..=0b1011` are rejected with [`Fault::InvalidAluControl`] instead of
//! aliasing a neighbouring operation.

use crate::Fault;

/// Named ALU control codes used by the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AluOp {
    /// Pass `X` through unchanged.
    NoShift = 0b0000,
    /// `X << Y`.
    ShiftLeftLogical = 0b0001,
    /// `X >> Y`, zero filling.
    ShiftRightLogical = 0b0010,
    /// `X >> Y`, sign filling.
    ShiftRightArithmetic = 0b0011,
    /// `1` when `X < Y`, else `0`.
    SetLessThan = 0b0100,
    /// `X + Y`, wrapping.
    Add = 0b1000,
    /// `X - Y`, wrapping.
    Subtract = 0b1001,
    /// `X & Y`.
    And = 0b1100,
    /// `X | Y`.
    Or = 0b1101,
    /// `X ^ Y`.
    Xor = 0b1110,
    /// `!(X | Y)`.
    Nor = 0b1111,
}

impl AluOp {
    /// All defined operations in control-code order.
    pub const ALL: [Self; 11] = [
        Self::NoShift,
        Self::ShiftLeftLogical,
        Self::ShiftRightLogical,
        Self::ShiftRightArithmetic,
        Self::SetLessThan,
        Self::Add,
        Self::Subtract,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Nor,
    ];

    /// Returns the raw 4-bit control code.
    #[must_use]
    pub const fn control(self) -> u8 {
        self as u8
    }

    /// Decodes a control code into its operation.
    ///
    /// The set-less-than category only defines sub-selector 0 and the
    /// add/sub category only sub-selectors 0 and 1.
    #[must_use]
    pub const fn from_control(code: u8) -> Option<Self> {
        let category = (code >> 2) & 0b11;
        let select = code & 0b11;
        if code > 0b1111 {
            return None;
        }
        match (category, select) {
            (0, 0) => Some(Self::NoShift),
            (0, 1) => Some(Self::ShiftLeftLogical),
            (0, 2) => Some(Self::ShiftRightLogical),
            (0, _) => Some(Self::ShiftRightArithmetic),
            (1, 0) => Some(Self::SetLessThan),
            (2, 0) => Some(Self::Add),
            (2, 1) => Some(Self::Subtract),
            (3, 0) => Some(Self::And),
            (3, 1) => Some(Self::Or),
            (3, 2) => Some(Self::Xor),
            (3, _) => Some(Self::Nor),
            _ => None,
        }
    }

    /// Applies this operation to two operands.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub const fn apply(self, x: u32, y: u32) -> u32 {
        match self {
            Self::NoShift => x,
            Self::ShiftLeftLogical => x.wrapping_shl(y),
            Self::ShiftRightLogical => x.wrapping_shr(y),
            Self::ShiftRightArithmetic => (x as i32).wrapping_shr(y) as u32,
            Self::SetLessThan => (x < y) as u32,
            Self::Add => x.wrapping_add(y),
            Self::Subtract => x.wrapping_sub(y),
            Self::And => x & y,
            Self::Or => x | y,
            Self::Xor => x ^ y,
            Self::Nor => !(x | y),
        }
    }
}

/// Evaluates the ALU for a raw control code.
///
/// # Errors
///
/// Returns [`Fault::InvalidAluControl`] for the five control codes without a
/// defined operation.
pub const fn alu(x: u32, y: u32, control: u8) -> Result<u32, Fault> {
    match AluOp::from_control(control) {
        Some(op) => Ok(op.apply(x, y)),
        None => Err(Fault::InvalidAluControl { code: control }),
    }
}
