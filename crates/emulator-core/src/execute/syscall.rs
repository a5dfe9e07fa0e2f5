//! `syscall` services selected by `$v0`.

/// Services understood by the `syscall` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SyscallService {
    /// Print `$a0` as an unsigned decimal.
    PrintInt = 1,
    /// Stop the program.
    Exit = 10,
    /// Print `$a0` as one character.
    PrintChar = 11,
}

impl SyscallService {
    /// Resolves a `$v0` value.
    #[must_use]
    pub const fn from_v0(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::PrintInt),
            10 => Some(Self::Exit),
            11 => Some(Self::PrintChar),
            _ => None,
        }
    }
}

/// Text printed for `syscall` 11.
///
/// Only the low 16 bits select the character. Surrogate code units print the
/// replacement character.
#[must_use]
pub fn char_text(value: u32) -> String {
    char::from_u32(value & 0xFFFF)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}
