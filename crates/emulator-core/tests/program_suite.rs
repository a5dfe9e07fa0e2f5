//! End-to-end programs, control flow, and property coverage for the engine.

#![allow(clippy::pedantic, clippy::nursery, clippy::unreadable_literal)]

use mips_emulator_core::{
    disassemble, run, run_bounded, step, Channel, Decoder, Fault, HaltReason, Machine,
    MachineConfig, RunBoundary, StepOutcome, DATA_BASE, PROGRAM_BASE, REGISTER_NAMES,
};
use proptest::prelude::*;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;

const fn r_format(rs: u32, rt: u32, rd: u32, shamt: u32, funct: u32) -> u32 {
    (rs << 21) | (rt << 16) | (rd << 11) | (shamt << 6) | funct
}

const fn i_format(opcode: u32, rs: u32, rt: u32, imm: u16) -> u32 {
    (opcode << 26) | (rs << 21) | (rt << 16) | imm as u32
}

const fn j_format(opcode: u32, target: u32) -> u32 {
    (opcode << 26) | (target & 0x03FF_FFFF)
}

fn reg(name: &str) -> u32 {
    REGISTER_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| index as u32)
        .expect("known register")
}

fn machine_with(words: &[u32]) -> Machine {
    let mut machine = Machine::new();
    machine.load_program(words).expect("program fits");
    machine
}

#[test]
fn integration_add_program_halts_via_exit_syscall() {
    let program = [
        i_format(13, reg("$zero"), reg("$t0"), 5),
        i_format(13, reg("$zero"), reg("$t1"), 7),
        r_format(reg("$t0"), reg("$t1"), reg("$t2"), 0, 32),
        i_format(13, reg("$zero"), reg("$v0"), 10),
        r_format(0, 0, 0, 0, 12),
    ];
    assert_eq!(program[3], 0x3402_000a);

    let mut machine = machine_with(&program);
    let outcome = run(&mut machine);

    assert_eq!(outcome.final_step, StepOutcome::Halted(HaltReason::Exit));
    assert_eq!(machine.registers.r[reg("$t2") as usize], 12);
    assert_eq!(machine.registers.pc, PROGRAM_BASE + 20);
}

#[test]
fn integration_word_copy_moves_value_four_bytes_forward() {
    let program = [
        i_format(15, 0, reg("$t2"), 0x1000),         // lui $t2 4096
        i_format(35, reg("$t2"), reg("$s0"), 0),     // lw $s0 0($t2)
        i_format(43, reg("$t2"), reg("$s0"), 4),     // sw $s0 4($t2)
    ];
    let mut machine = machine_with(&program);
    machine.memory.set_word(DATA_BASE, 0x0BAD_CAFE).expect("mapped");

    let outcome = run(&mut machine);

    assert_eq!(outcome.final_step, StepOutcome::Halted(HaltReason::ZeroWord));
    assert_eq!(outcome.steps, 4);
    assert_eq!(machine.memory.get_word(DATA_BASE + 4), Ok(0x0BAD_CAFE));
    assert_eq!(machine.memory.get_word(DATA_BASE), Ok(0x0BAD_CAFE));
}

#[test]
fn integration_jump_from_program_base_lands_at_double_incremented_target() {
    let mut machine = machine_with(&[j_format(2, 0x10_0008)]);
    assert_eq!(machine.registers.pc, 0x0040_0000);
    assert_eq!(step(&mut machine), StepOutcome::Continue);
    assert_eq!(machine.registers.pc, 0x0040_0020);
}

#[test]
fn integration_call_and_return_through_ra() {
    let mut machine = machine_with(&[
        j_format(3, 0x10_0004),            // 0x00: jal 0x100004
        i_format(13, 0, reg("$v0"), 10),   // 0x04: ori $v0 $zero 10
        r_format(0, 0, 0, 0, 12),          // 0x08: syscall
        0,                                 // 0x0c
        i_format(13, 0, reg("$t0"), 9),    // 0x10: ori $t0 $zero 9
        r_format(reg("$ra"), 0, 0, 0, 8),  // 0x14: jr $ra
    ]);

    assert_eq!(step(&mut machine), StepOutcome::Continue);
    assert_eq!(machine.registers.pc, PROGRAM_BASE + 0x10);
    assert_eq!(machine.registers.r[31], PROGRAM_BASE + 4);

    let outcome = run(&mut machine);

    assert_eq!(outcome.steps, 4);
    assert_eq!(outcome.final_step, StepOutcome::Halted(HaltReason::Exit));
    assert_eq!(machine.registers.r[reg("$t0") as usize], 9);
}

#[test]
fn integration_countdown_loop_prints_each_value() {
    // $t0 = 3; loop: print $t0; $t0 -= 1; bne $t0 $zero loop; exit
    let t0 = reg("$t0");
    let a0 = reg("$a0");
    let v0 = reg("$v0");
    let program = [
        i_format(13, 0, t0, 3),                 // ori $t0 $zero 3
        i_format(13, 0, v0, 1),                 // ori $v0 $zero 1
        r_format(t0, 0, a0, 0, 32),             // add $a0 $t0 $zero
        r_format(0, 0, 0, 0, 12),               // syscall
        i_format(8, t0, t0, 0xFFFF),            // addi $t0 $t0 -1
        i_format(5, t0, 0, (-4i16) as u16),     // bne $t0 $zero -4
        i_format(13, 0, v0, 10),                // ori $v0 $zero 10
        r_format(0, 0, 0, 0, 12),               // syscall
    ];
    let config = MachineConfig {
        debug_trace: false,
        ..MachineConfig::default()
    };
    let mut machine = Machine::with_config(&config);
    machine.load_program(&program).expect("fits");

    let outcome = run_bounded(&mut machine, 1_000, RunBoundary::Fault);

    assert_eq!(outcome.final_step, StepOutcome::Halted(HaltReason::Exit));
    assert_eq!(
        machine.console.channel(Channel::Normal).collect::<Vec<_>>(),
        ["3", "2", "1", "program exited"]
    );
    assert_eq!(machine.console.channel(Channel::Debug).count(), 0);
}

#[test]
fn integration_stack_push_and_pop_through_sp() {
    let sp = reg("$sp");
    let s0 = reg("$s0");
    let s1 = reg("$s1");
    let mut machine = machine_with(&[
        i_format(15, 0, sp, 0x7FF0),              // lui $sp 0x7ff0
        i_format(13, sp, sp, 0x0100),             // ori $sp $sp 0x100
        i_format(13, 0, s0, 0x1234),              // ori $s0 $zero 0x1234
        i_format(8, sp, sp, (-4i16) as u16),      // addi $sp $sp -4
        i_format(43, sp, s0, 0),                  // sw $s0 0($sp)
        i_format(35, sp, s1, 0),                  // lw $s1 0($sp)
        i_format(8, sp, sp, 4),                   // addi $sp $sp 4
    ]);

    run(&mut machine);

    assert_eq!(machine.registers.r[s1 as usize], 0x1234);
    assert_eq!(machine.registers.sp(), 0x7FF0_0100);
    assert_eq!(machine.memory.get_word(0x7FF0_00FC), Ok(0x1234));
}

#[rstest]
#[case::unmapped_store(i_format(43, 0, 8, 0), Fault::UnmappedAddress { address: 0 })]
#[case::unknown_opcode(0xFC00_0000, Fault::UnknownInstruction { word: 0xFC00_0000 })]
#[case::unknown_funct(0x0000_0001, Fault::UnknownInstruction { word: 0x0000_0001 })]
#[case::divide_by_zero(r_format(8, 9, 10, 0, 26), Fault::DivideByZero)]
fn faults_are_reported_and_execution_continues(#[case] word: u32, #[case] fault: Fault) {
    let mut machine = machine_with(&[word, i_format(13, 0, reg("$t3"), 1)]);

    let outcome = run(&mut machine);

    assert_eq!(outcome.steps, 3);
    assert_eq!(outcome.final_step, StepOutcome::Halted(HaltReason::ZeroWord));
    assert_eq!(machine.registers.r[reg("$t3") as usize], 1);
    assert_eq!(
        machine.console.channel(Channel::Error).collect::<Vec<_>>(),
        [format!("[ERROR] {fault}")]
    );
}

#[test]
fn fetch_outside_mapped_segments_keeps_advancing() {
    let mut machine = Machine::new();
    machine.registers.pc = 0x0000_0000;

    let outcome = run_bounded(&mut machine, 4, RunBoundary::Halted);

    assert_eq!(outcome.steps, 4);
    assert_eq!(machine.registers.pc, 0x10);
    assert_eq!(machine.console.channel(Channel::Error).count(), 4);
}

#[test]
fn machines_are_independent() {
    let mut first = machine_with(&[i_format(13, 0, reg("$t0"), 1)]);
    let mut second = machine_with(&[i_format(13, 0, reg("$t0"), 2)]);

    step(&mut first);
    step(&mut second);

    assert_eq!(first.registers.r[8], 1);
    assert_eq!(second.registers.r[8], 2);
}

proptest! {
    #[test]
    fn property_decoder_and_disassembler_are_total(word in any::<u32>()) {
        let text = disassemble(word);
        match Decoder::decode(word) {
            Ok(_) => prop_assert!(!text.starts_with("Unknown Instruction")),
            Err(fault) => {
                prop_assert_eq!(fault, Fault::UnknownInstruction { word });
                prop_assert_eq!(text, format!("Unknown Instruction 0x{word:x}"));
            }
        }
    }

    #[test]
    fn property_single_step_never_panics(word in any::<u32>(), seed in any::<u32>()) {
        let mut machine = machine_with(&[word]);
        for (index, register) in machine.registers.r.iter_mut().enumerate() {
            *register = seed.rotate_left(index as u32);
        }
        let outcome = step(&mut machine);
        if word == 0 {
            prop_assert_eq!(outcome, StepOutcome::Halted(HaltReason::ZeroWord));
        }
        prop_assert!(machine.console.channel(Channel::Debug).next().is_some());
    }

    #[test]
    fn property_addi_matches_wrapping_add(start in any::<u32>(), imm in any::<i16>()) {
        let mut machine = machine_with(&[i_format(8, reg("$s0"), reg("$s1"), imm as u16)]);
        machine.registers.r[16] = start;
        prop_assert_eq!(step(&mut machine), StepOutcome::Continue);
        prop_assert_eq!(machine.registers.r[17], start.wrapping_add(imm as i32 as u32));
    }
}
