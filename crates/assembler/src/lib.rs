//! Line assembler for the reduced MIPS simulator.
//!
//! Lines are normalized, matched against an ordered list of instruction
//! forms, and packed into 32-bit words. Mnemonic and register names come
//! from the emulator core tables so the assembler and disassembler agree.

/// Multi-line program assembly.
pub mod assembler;
pub use assembler::assemble_program;

/// Form matching and instruction word packing.
pub mod encoder;
pub use encoder::{assemble_line, encode};

/// Structured encode and assembly errors.
pub mod errors;
pub use errors::{AssembleError, EncodeError, EncodeErrorKind};

/// Mnemonic and register resolution against the emulator core tables.
pub mod mnemonic;
pub use mnemonic::{resolve_mnemonic, resolve_register, Mnemonic};

/// Line normalization and operand shapes.
pub mod parser;
pub use parser::{normalize, parse_literal, tokenize, OperandShape, TokenizedLine};

#[cfg(test)]
use proptest as _;
