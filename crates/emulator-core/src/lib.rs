//! Functional simulator core for a reduced MIPS instruction set.
//!
//! The crate owns the instruction tables, the decoder and disassembler, the
//! ALU, the register file, segmented memory, and the fetch-decode-execute
//! engine. A [`Machine`] bundles all mutable state; nothing is global.

/// Combinational ALU driven by 4-bit control codes.
pub mod alu;
pub use alu::{alu, AluOp};

/// Append-only console sink with normal, error, and debug channels.
pub mod console;
pub use console::{Channel, Console, ConsoleLine};

/// Machine aggregate, configuration, and step/run outcomes.
pub mod api;
pub use api::{HaltReason, Machine, MachineConfig, RunBoundary, RunOutcome, StepOutcome};

/// Segmented big-endian memory.
pub mod memory;
pub use memory::{
    translate, AccessSize, Memory, MemoryView, SegmentKind, DATA_BASE, PROGRAM_BASE,
    SEGMENT_BYTES, STACK_BASE,
};

/// Architectural register state.
pub mod state;
pub use state::{
    RegisterChange, RegisterDiff, RegisterEntry, RegisterFile, RegisterSnapshot,
    STACK_POINTER_RESET,
};

/// Opcode, funct, and register name tables.
pub mod encoding;
pub use encoding::{
    register_index, register_name, Funct, Opcode, FUNCT_TABLE, OPCODE_TABLE, REGISTER_COUNT,
    REGISTER_NAMES,
};

/// Instruction field extraction and classification.
pub mod decoder;
pub use decoder::{DecodedInstruction, Decoder, InstructionFields, Operation};

/// Word to mnemonic text.
pub mod disasm;
pub use disasm::{disassemble, disassemble_range, DisassemblyRow};

/// Runtime fault taxonomy.
pub mod fault;
pub use fault::{Fault, FaultClass};

/// Instruction execution engine.
pub mod execute;
pub use execute::{fetch, run, run_bounded, step, SyscallService};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
