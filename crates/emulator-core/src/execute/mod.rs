//! Fetch-decode-execute engine.
//!
//! One step is:
//! 1. Fetch the word at `PC` and advance `PC` by 4
//! 2. Halt if the word is the all-zero terminator
//! 3. Decode opcode/funct
//! 4. Execute against the machine's registers, memory, and console
//!
//! Faults never stop the machine. They are recorded on the console error
//! channel and returned as [`StepOutcome::Faulted`]; the next step fetches
//! from the already advanced `PC`.

mod helpers;
mod syscall;

pub use helpers::{
    alu_op_for, branch_target, effective_address, jump_target, set_less_than_immediate,
};
pub use syscall::SyscallService;

use crate::alu::{alu, AluOp};
use crate::decoder::{DecodedInstruction, Decoder, InstructionFields, Operation};
use crate::disasm::disassemble;
use crate::encoding::{Funct, Opcode, REG_A0, REG_RA, REG_V0};
use crate::{Fault, HaltReason, Machine, RunBoundary, RunOutcome, StepOutcome};

/// Control flow requested by an executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Exit,
}

/// Reads the word at `PC` and advances `PC` by 4.
///
/// `PC` advances even when the read faults.
///
/// # Errors
///
/// Returns the memory fault raised by the word read.
pub fn fetch(machine: &mut Machine) -> Result<u32, Fault> {
    let pc = machine.registers.pc;
    machine.registers.pc = pc.wrapping_add(4);
    machine.memory.get_word(pc)
}

/// Executes one instruction.
pub fn step(machine: &mut Machine) -> StepOutcome {
    let word = match fetch(machine) {
        Ok(word) => word,
        Err(fault) => return report(machine, fault),
    };

    if machine.config.debug_trace {
        machine
            .console
            .print_debug(format!("[DEBUG] executed: {}", disassemble(word)));
    }

    // sll $zero $zero 0 shares this encoding; it always ends the program.
    if word == 0 {
        return StepOutcome::Halted(HaltReason::ZeroWord);
    }

    match Decoder::decode(word).and_then(|decoded| execute(machine, decoded)) {
        Ok(Flow::Next) => StepOutcome::Continue,
        Ok(Flow::Exit) => StepOutcome::Halted(HaltReason::Exit),
        Err(fault) => report(machine, fault),
    }
}

/// Steps until the program halts.
///
/// There is no step limit: a program that never reaches a terminator or
/// `syscall` 10 runs forever. Use [`run_bounded`] for interactive callers.
pub fn run(machine: &mut Machine) -> RunOutcome {
    let mut steps = 0u64;
    loop {
        let outcome = step(machine);
        steps += 1;
        if outcome.is_halted() {
            return RunOutcome {
                steps,
                final_step: outcome,
            };
        }
    }
}

/// Steps until the program halts, `max_steps` have run, or (with
/// [`RunBoundary::Fault`]) a step faults.
pub fn run_bounded(machine: &mut Machine, max_steps: u64, boundary: RunBoundary) -> RunOutcome {
    let mut outcome = RunOutcome {
        steps: 0,
        final_step: StepOutcome::Continue,
    };

    while outcome.steps < max_steps {
        let result = step(machine);
        outcome.steps += 1;
        outcome.final_step = result;

        match (result, boundary) {
            (StepOutcome::Halted(_), _) | (StepOutcome::Faulted(_), RunBoundary::Fault) => break,
            _ => {}
        }
    }

    outcome
}

fn report(machine: &mut Machine, fault: Fault) -> StepOutcome {
    machine.console.print_error(format!("[ERROR] {fault}"));
    StepOutcome::Faulted(fault)
}

fn execute(machine: &mut Machine, decoded: DecodedInstruction) -> Result<Flow, Fault> {
    match decoded.operation {
        Operation::Register(funct) => execute_register(machine, funct, decoded.fields),
        Operation::Primary(opcode) => execute_primary(machine, opcode, decoded.fields),
    }
}

fn execute_register(
    machine: &mut Machine,
    funct: Funct,
    fields: InstructionFields,
) -> Result<Flow, Fault> {
    let registers = &mut machine.registers;
    let rs = registers.r[usize::from(fields.rs)];
    let rt = registers.r[usize::from(fields.rt)];
    let rd = usize::from(fields.rd);

    match funct {
        Funct::Sll | Funct::Srl | Funct::Sra => {
            let op = alu_op_for(funct).ok_or(Fault::UnknownInstruction { word: fields.word })?;
            registers.r[rd] = alu(rt, u32::from(fields.shamt), op.control())?;
        }
        Funct::Jr => registers.jump(rs),
        Funct::Syscall => return Ok(execute_syscall(machine)),
        Funct::Mfhi => registers.r[rd] = registers.hi,
        Funct::Mflo => registers.r[rd] = registers.lo,
        Funct::Mul => {
            let product = u64::from(rs) * u64::from(rt);
            #[allow(clippy::cast_possible_truncation)]
            let (high, low) = ((product >> 32) as u32, product as u32);
            registers.hi = high;
            registers.lo = low;
        }
        Funct::Div => {
            if rt == 0 {
                return Err(Fault::DivideByZero);
            }
            registers.lo = rs / rt;
            registers.hi = rs % rt;
        }
        Funct::Add
        | Funct::Sub
        | Funct::And
        | Funct::Or
        | Funct::Xor
        | Funct::Nor
        | Funct::Slt => {
            let op = alu_op_for(funct).ok_or(Fault::UnknownInstruction { word: fields.word })?;
            registers.r[rd] = alu(rs, rt, op.control())?;
        }
    }

    Ok(Flow::Next)
}

fn execute_syscall(machine: &mut Machine) -> Flow {
    let service = machine.registers.r[REG_V0];
    let argument = machine.registers.r[REG_A0];

    match SyscallService::from_v0(service) {
        Some(SyscallService::PrintInt) => machine.console.print(argument.to_string()),
        Some(SyscallService::PrintChar) => machine.console.print(syscall::char_text(argument)),
        Some(SyscallService::Exit) => {
            machine.console.print("program exited");
            return Flow::Exit;
        }
        None => machine
            .console
            .print_debug(format!("[DEBUG] ignored syscall service {service}")),
    }

    Flow::Next
}

fn execute_primary(
    machine: &mut Machine,
    opcode: Opcode,
    fields: InstructionFields,
) -> Result<Flow, Fault> {
    let registers = &mut machine.registers;
    let pc = registers.pc;
    let rs = registers.r[usize::from(fields.rs)];
    let rt_index = usize::from(fields.rt);
    let rt = registers.r[rt_index];
    let signed = fields.sign_extended_immediate();
    let unsigned = fields.zero_extended_immediate();

    match opcode {
        Opcode::J => registers.jump(jump_target(pc, fields.target)),
        Opcode::Jal => {
            registers.r[REG_RA] = pc;
            registers.jump(jump_target(pc, fields.target));
        }
        Opcode::Bltz => {
            if rs < rt {
                registers.jump(branch_target(pc, fields));
            }
        }
        Opcode::Beq => {
            if rs == rt {
                registers.jump(branch_target(pc, fields));
            }
        }
        Opcode::Bne => {
            if rs != rt {
                registers.jump(branch_target(pc, fields));
            }
        }
        Opcode::Addi | Opcode::Addiu => {
            registers.r[rt_index] = alu(rs, signed, AluOp::Add.control())?;
        }
        Opcode::Slti | Opcode::Sltiu => {
            registers.r[rt_index] = set_less_than_immediate(rs, fields)?;
        }
        Opcode::Andi => registers.r[rt_index] = alu(rs, unsigned, AluOp::And.control())?,
        Opcode::Ori => registers.r[rt_index] = alu(rs, unsigned, AluOp::Or.control())?,
        Opcode::Xori => registers.r[rt_index] = alu(rs, unsigned, AluOp::Xor.control())?,
        Opcode::Lui => registers.r[rt_index] = unsigned << 16,
        // lb does not sign-extend; it loads exactly like lbu.
        Opcode::Lb | Opcode::Lbu => {
            let value = machine.memory.get_byte(effective_address(rs, fields))?;
            machine.registers.r[rt_index] = value;
        }
        Opcode::Lw => {
            let value = machine.memory.get_word(effective_address(rs, fields))?;
            machine.registers.r[rt_index] = value;
        }
        Opcode::Sb => machine.memory.set_byte(effective_address(rs, fields), rt)?,
        Opcode::Sw => machine.memory.set_word(effective_address(rs, fields), rt)?,
        Opcode::Special => return Err(Fault::UnknownInstruction { word: fields.word }),
    }

    Ok(Flow::Next)
}
