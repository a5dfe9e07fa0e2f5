use thiserror::Error;

/// Fault classes used for console reporting and caller policy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// ALU was driven with an undefined control code.
    Operation,
    /// Register index outside the 32-entry file.
    Register,
    /// Address outside the three mapped segments.
    Memory,
    /// Fetched word does not name a supported operation.
    Instruction,
}

/// Runtime fault taxonomy.
///
/// None of these abort the machine: the execution engine records them on the
/// console error channel and carries on with the next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// ALU control code outside the defined operation table.
    #[error("invalid alu control code {code:#x}")]
    InvalidAluControl {
        /// Raw 4-bit control code.
        code: u8,
    },
    /// Register index outside `0..32`.
    #[error("invalid register index {index}")]
    InvalidRegister {
        /// Offending index.
        index: usize,
    },
    /// Segment selector is not one of the program, data, or stack selectors.
    #[error("memory access to unmapped address {address:#010x}")]
    UnmappedAddress {
        /// Full 32-bit address.
        address: u32,
    },
    /// Multi-byte access would run past the end of its segment.
    #[error("{size}-byte access at {address:#010x} runs past the end of its segment")]
    SegmentOverrun {
        /// Address of the first byte.
        address: u32,
        /// Access width in bytes.
        size: u8,
    },
    /// Opcode/funct combination has no execution semantics.
    #[error("unknown instruction {word:#010x}")]
    UnknownInstruction {
        /// Raw instruction word.
        word: u32,
    },
    /// `div` with a zero divisor.
    #[error("division by zero")]
    DivideByZero,
}

impl Fault {
    /// Returns the reporting class for this fault.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::InvalidAluControl { .. } | Self::DivideByZero => FaultClass::Operation,
            Self::InvalidRegister { .. } => FaultClass::Register,
            Self::UnmappedAddress { .. } | Self::SegmentOverrun { .. } => FaultClass::Memory,
            Self::UnknownInstruction { .. } => FaultClass::Instruction,
        }
    }
}
