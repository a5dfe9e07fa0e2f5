//! Address arithmetic and ALU routing shared by the instruction handlers.

use crate::alu::{alu, AluOp};
use crate::decoder::InstructionFields;
use crate::encoding::Funct;
use crate::Fault;

/// Load/store address: `base` plus the sign-extended immediate, wrapping.
#[must_use]
pub const fn effective_address(base: u32, fields: InstructionFields) -> u32 {
    base.wrapping_add(fields.sign_extended_immediate())
}

/// Taken-branch target: the already advanced `PC` plus `imm * 4`, wrapping.
#[must_use]
pub const fn branch_target(pc: u32, fields: InstructionFields) -> u32 {
    pc.wrapping_add(fields.sign_extended_immediate() << 2)
}

/// `j`/`jal` target: `((PC + 4) & 0xF000_0000) | (target << 2)`.
///
/// `pc` has already been advanced past the jump by fetch, so the region bits
/// come from the jump's address plus 8.
#[must_use]
pub const fn jump_target(pc: u32, target: u32) -> u32 {
    (pc.wrapping_add(4) & 0xF000_0000) | ((target & 0x03FF_FFFF) << 2)
}

/// `slti`/`sltiu` result for an unsigned `rs` against the signed immediate.
///
/// A negative immediate is below every register value, so it yields 0
/// without going through the ALU's unsigned compare.
///
/// # Errors
///
/// Propagates an ALU control fault.
pub const fn set_less_than_immediate(rs: u32, fields: InstructionFields) -> Result<u32, Fault> {
    if fields.signed_immediate() < 0 {
        return Ok(0);
    }
    alu(rs, fields.zero_extended_immediate(), AluOp::SetLessThan.control())
}

/// ALU operation behind an R-format arithmetic, logic, or shift funct.
#[must_use]
pub const fn alu_op_for(funct: Funct) -> Option<AluOp> {
    match funct {
        Funct::Sll => Some(AluOp::ShiftLeftLogical),
        Funct::Srl => Some(AluOp::ShiftRightLogical),
        Funct::Sra => Some(AluOp::ShiftRightArithmetic),
        Funct::Add => Some(AluOp::Add),
        Funct::Sub => Some(AluOp::Subtract),
        Funct::And => Some(AluOp::And),
        Funct::Or => Some(AluOp::Or),
        Funct::Xor => Some(AluOp::Xor),
        Funct::Nor => Some(AluOp::Nor),
        Funct::Slt => Some(AluOp::SetLessThan),
        Funct::Jr
        | Funct::Syscall
        | Funct::Mfhi
        | Funct::Mflo
        | Funct::Mul
        | Funct::Div => None,
    }
}
