//! Instruction field extraction and opcode/funct dispatch.
//!
//! The decoder is pure: it splits a 32-bit word into its canonical field views
//! and classifies it against the opcode and funct tables. Both the
//! disassembler and the execution engine consume its output.

use crate::encoding::{Funct, Opcode};
use crate::Fault;

/// The canonical field views of one instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionFields {
    /// The raw word.
    pub word: u32,
    /// Bits 31..26.
    pub opcode: u8,
    /// Bits 25..21.
    pub rs: u8,
    /// Bits 20..16.
    pub rt: u8,
    /// Bits 15..11.
    pub rd: u8,
    /// Bits 10..6.
    pub shamt: u8,
    /// Bits 5..0.
    pub funct: u8,
    /// Bits 15..0, unextended.
    pub immediate: u16,
    /// Bits 25..0.
    pub target: u32,
}

impl InstructionFields {
    /// Splits a word into its field views.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn extract(word: u32) -> Self {
        Self {
            word,
            opcode: (word >> 26) as u8,
            rs: ((word >> 21) & 0x1F) as u8,
            rt: ((word >> 16) & 0x1F) as u8,
            rd: ((word >> 11) & 0x1F) as u8,
            shamt: ((word >> 6) & 0x1F) as u8,
            funct: (word & 0x3F) as u8,
            immediate: (word & 0xFFFF) as u16,
            target: word & 0x03FF_FFFF,
        }
    }

    /// Immediate as a signed 16-bit value.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn signed_immediate(self) -> i16 {
        self.immediate as i16
    }

    /// Immediate sign-extended to 32 bits (offsets, `addi`, `slti`).
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn sign_extended_immediate(self) -> u32 {
        self.signed_immediate() as i32 as u32
    }

    /// Immediate zero-extended to 32 bits (logical masks, `lui`).
    #[must_use]
    pub const fn zero_extended_immediate(self) -> u32 {
        self.immediate as u32
    }
}

/// Operation selected by a word's opcode, or by its funct for R-format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// R-format word (`opcode == 0`).
    Register(Funct),
    /// I- or J-format word.
    Primary(Opcode),
}

/// A classified instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedInstruction {
    /// Operation to perform.
    pub operation: Operation,
    /// Field views of the source word.
    pub fields: InstructionFields,
}

/// Instruction decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Classifies a 32-bit word.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnknownInstruction`] when the opcode, or the funct of
    /// an R-format word, is unassigned.
    pub fn decode(word: u32) -> Result<DecodedInstruction, Fault> {
        let fields = InstructionFields::extract(word);
        let unknown = Fault::UnknownInstruction { word };

        let operation = match Opcode::from_u6(fields.opcode).ok_or(unknown)? {
            Opcode::Special => Operation::Register(Funct::from_u6(fields.funct).ok_or(unknown)?),
            opcode => Operation::Primary(opcode),
        };

        Ok(DecodedInstruction { operation, fields })
    }
}
