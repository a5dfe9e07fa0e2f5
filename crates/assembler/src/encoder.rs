//! Form matching and field packing.
//!
//! Each instruction family is described by one [`Form`]: the mnemonics it
//! covers and the ordered operand slots it expects. Forms are tried in
//! table order and the first whose operand shapes match syntactically is
//! packed. Packing fails as a whole if any operand does not resolve.

use crate::errors::{EncodeError, EncodeErrorKind};
use crate::mnemonic::{resolve_mnemonic, resolve_register};
use crate::parser::{normalize, parse_literal, split_memory, tokenize, OperandShape};

/// Bit positions of the instruction fields.
mod field {
    pub const RS_SHIFT: u32 = 21;
    pub const RT_SHIFT: u32 = 16;
    pub const RD_SHIFT: u32 = 11;
    pub const SHAMT_SHIFT: u32 = 6;

    pub const SHAMT_MASK: u32 = 0x1F;
    pub const IMMEDIATE_MASK: u32 = 0xFFFF;
    pub const TARGET_MASK: u32 = 0x03FF_FFFF;
}

/// Where an operand token lands in the instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Rd,
    Rs,
    Rt,
    Shamt,
    Target,
    Imm,
    /// `imm(rs)`: the offset fills the immediate, the base fills `rs`.
    Memory,
}

impl Slot {
    const fn shape(self) -> OperandShape {
        match self {
            Self::Rd | Self::Rs | Self::Rt => OperandShape::Register,
            Self::Shamt | Self::Target => OperandShape::Unsigned,
            Self::Imm => OperandShape::Signed,
            Self::Memory => OperandShape::Memory,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Form {
    mnemonics: &'static [&'static str],
    slots: &'static [Slot],
}

impl Form {
    fn accepts(&self, mnemonic: &str, operands: &[&str]) -> bool {
        self.mnemonics.contains(&mnemonic)
            && self.slots.len() == operands.len()
            && self
                .slots
                .iter()
                .zip(operands)
                .all(|(slot, token)| slot.shape().matches(token))
    }
}

const FORMS: &[Form] = &[
    Form {
        mnemonics: &["sll", "srl", "sra"],
        slots: &[Slot::Rd, Slot::Rt, Slot::Shamt],
    },
    Form {
        mnemonics: &["jr"],
        slots: &[Slot::Rs],
    },
    Form {
        mnemonics: &["syscall"],
        slots: &[],
    },
    Form {
        mnemonics: &["mfhi", "mflo"],
        slots: &[Slot::Rd],
    },
    Form {
        mnemonics: &["div", "add", "sub", "and", "or", "xor", "nor", "slt"],
        slots: &[Slot::Rd, Slot::Rs, Slot::Rt],
    },
    Form {
        mnemonics: &["j", "jal"],
        slots: &[Slot::Target],
    },
    Form {
        mnemonics: &["bltz"],
        slots: &[Slot::Rs, Slot::Imm],
    },
    Form {
        mnemonics: &["beq", "bne"],
        slots: &[Slot::Rs, Slot::Rt, Slot::Imm],
    },
    Form {
        mnemonics: &["addi", "addiu", "slti", "sltiu", "andi", "ori", "xori"],
        slots: &[Slot::Rt, Slot::Rs, Slot::Imm],
    },
    Form {
        mnemonics: &["lui"],
        slots: &[Slot::Rt, Slot::Imm],
    },
    Form {
        mnemonics: &["lw", "sw", "lb", "sb", "lbu"],
        slots: &[Slot::Rt, Slot::Memory],
    },
    Form {
        mnemonics: &["mul"],
        slots: &[Slot::Rs, Slot::Rt],
    },
    // Disassembler output for mul.
    Form {
        mnemonics: &["mul"],
        slots: &[Slot::Rd, Slot::Rs, Slot::Rt],
    },
];

/// Encodes one line of assembly into an instruction word.
///
/// # Errors
///
/// Returns [`EncodeErrorKind::UnknownMnemonic`] when the first token names no
/// instruction, [`EncodeErrorKind::NoMatchingForm`] when the operands fit no
/// form of that instruction, and [`EncodeErrorKind::UnknownRegister`] or
/// [`EncodeErrorKind::InvalidLiteral`] when a matched operand does not
/// resolve. No partial word is ever returned.
pub fn encode(line: &str) -> Result<u32, EncodeError> {
    let normalized = normalize(line);
    let Some(tokens) = tokenize(&normalized) else {
        return Err(EncodeErrorKind::UnknownMnemonic(String::new()).into());
    };
    let mnemonic = resolve_mnemonic(tokens.mnemonic)
        .ok_or_else(|| EncodeErrorKind::UnknownMnemonic(tokens.mnemonic.to_owned()))?;
    let form = FORMS
        .iter()
        .find(|form| form.accepts(tokens.mnemonic, &tokens.operands))
        .ok_or_else(|| EncodeErrorKind::NoMatchingForm(tokens.mnemonic.to_owned()))?;

    form.slots
        .iter()
        .zip(&tokens.operands)
        .try_fold(mnemonic.base_word(), |word, (slot, token)| {
            Ok(word | pack(*slot, token)?)
        })
}

/// Encodes one line, returning `None` on any failure.
#[must_use]
pub fn assemble_line(line: &str) -> Option<u32> {
    encode(line).ok()
}

fn pack(slot: Slot, token: &str) -> Result<u32, EncodeError> {
    let bits = match slot {
        Slot::Rd => register(token)? << field::RD_SHIFT,
        Slot::Rs => register(token)? << field::RS_SHIFT,
        Slot::Rt => register(token)? << field::RT_SHIFT,
        Slot::Shamt => literal(token, field::SHAMT_MASK)? << field::SHAMT_SHIFT,
        Slot::Target => literal(token, field::TARGET_MASK)?,
        Slot::Imm => literal(token, field::IMMEDIATE_MASK)?,
        Slot::Memory => {
            let (offset, base) = split_memory(token)
                .ok_or_else(|| EncodeErrorKind::InvalidLiteral(token.to_owned()))?;
            (register(base)? << field::RS_SHIFT) | literal(offset, field::IMMEDIATE_MASK)?
        }
    };
    Ok(bits)
}

fn register(token: &str) -> Result<u32, EncodeError> {
    resolve_register(token)
        .map(u32::from)
        .ok_or_else(|| EncodeErrorKind::UnknownRegister(token.to_owned()).into())
}

fn literal(token: &str, mask: u32) -> Result<u32, EncodeError> {
    parse_literal(token)
        .map(|value| low_bits(value, mask))
        .ok_or_else(|| EncodeErrorKind::InvalidLiteral(token.to_owned()).into())
}

/// Two's-complement truncation of `value` to the bits set in `mask`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn low_bits(value: i64, mask: u32) -> u32 {
    (value as u32) & mask
}
