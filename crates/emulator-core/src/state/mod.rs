//! Architectural register state.

/// Register file storage, inspection, and snapshot diffing.
pub mod registers;

pub use registers::{
    RegisterChange, RegisterDiff, RegisterEntry, RegisterFile, RegisterSnapshot,
    SNAPSHOT_ENTRY_COUNT, STACK_POINTER_RESET,
};
