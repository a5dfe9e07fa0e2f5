/// Number of general-purpose registers in the register file.
pub const REGISTER_COUNT: usize = 32;

/// Canonical register names indexed by register number.
///
/// Register 15 is printed as `$t7`. The assembler also accepts `$g7` for it.
pub const REGISTER_NAMES: [&str; REGISTER_COUNT] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3", "$t4",
    "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$t8", "$t9",
    "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

/// `$zero`, constant zero by convention only.
pub const REG_ZERO: usize = 0;
/// `$v0`, syscall service selector.
pub const REG_V0: usize = 2;
/// `$a0`, syscall argument.
pub const REG_A0: usize = 4;
/// `$sp`, stack pointer.
pub const REG_SP: usize = 29;
/// `$ra`, return address written by `jal`.
pub const REG_RA: usize = 31;

/// Returns the index of a canonical register name (`"$t0"` -> 8).
#[must_use]
pub fn register_index(name: &str) -> Option<usize> {
    REGISTER_NAMES.iter().position(|candidate| *candidate == name)
}

/// Returns the canonical register name for a 5-bit register field.
#[must_use]
pub const fn register_name(index: u8) -> &'static str {
    REGISTER_NAMES[(index & 0x1F) as usize]
}

/// Primary opcodes (instruction bits 31..26) with assigned semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    /// R-format; the operation is selected by [`Funct`].
    Special = 0,
    Bltz = 1,
    J = 2,
    Jal = 3,
    Beq = 4,
    Bne = 5,
    Addi = 8,
    Addiu = 9,
    Slti = 10,
    Sltiu = 11,
    Andi = 12,
    Ori = 13,
    Xori = 14,
    Lui = 15,
    Lb = 32,
    Lw = 35,
    Lbu = 36,
    Sb = 40,
    Sw = 43,
}

/// Single source-of-truth opcode table.
///
/// Any 6-bit value not listed here is unrecognized.
pub const OPCODE_TABLE: &[(u8, Opcode)] = &[
    (0, Opcode::Special),
    (1, Opcode::Bltz),
    (2, Opcode::J),
    (3, Opcode::Jal),
    (4, Opcode::Beq),
    (5, Opcode::Bne),
    (8, Opcode::Addi),
    (9, Opcode::Addiu),
    (10, Opcode::Slti),
    (11, Opcode::Sltiu),
    (12, Opcode::Andi),
    (13, Opcode::Ori),
    (14, Opcode::Xori),
    (15, Opcode::Lui),
    (32, Opcode::Lb),
    (35, Opcode::Lw),
    (36, Opcode::Lbu),
    (40, Opcode::Sb),
    (43, Opcode::Sw),
];

impl Opcode {
    /// Converts a 6-bit opcode field into an assigned opcode.
    #[must_use]
    pub fn from_u6(value: u8) -> Option<Self> {
        OPCODE_TABLE
            .iter()
            .find_map(|(entry, opcode)| (*entry == value).then_some(*opcode))
    }

    /// Returns the raw 6-bit field value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Special => "r-format",
            Self::Bltz => "bltz",
            Self::J => "j",
            Self::Jal => "jal",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Addi => "addi",
            Self::Addiu => "addiu",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Xori => "xori",
            Self::Lui => "lui",
            Self::Lb => "lb",
            Self::Lw => "lw",
            Self::Lbu => "lbu",
            Self::Sb => "sb",
            Self::Sw => "sw",
        }
    }
}

/// R-format function codes (instruction bits 5..0) with assigned semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Funct {
    Sll = 0,
    Srl = 2,
    Sra = 3,
    Jr = 8,
    Syscall = 12,
    Mfhi = 16,
    Mflo = 18,
    Mul = 24,
    Div = 26,
    Add = 32,
    Sub = 34,
    And = 36,
    Or = 37,
    Xor = 38,
    Nor = 39,
    Slt = 42,
}

/// Single source-of-truth funct table for `Opcode::Special` words.
pub const FUNCT_TABLE: &[(u8, Funct)] = &[
    (0, Funct::Sll),
    (2, Funct::Srl),
    (3, Funct::Sra),
    (8, Funct::Jr),
    (12, Funct::Syscall),
    (16, Funct::Mfhi),
    (18, Funct::Mflo),
    (24, Funct::Mul),
    (26, Funct::Div),
    (32, Funct::Add),
    (34, Funct::Sub),
    (36, Funct::And),
    (37, Funct::Or),
    (38, Funct::Xor),
    (39, Funct::Nor),
    (42, Funct::Slt),
];

impl Funct {
    /// Converts a 6-bit funct field into an assigned function code.
    #[must_use]
    pub fn from_u6(value: u8) -> Option<Self> {
        FUNCT_TABLE
            .iter()
            .find_map(|(entry, funct)| (*entry == value).then_some(*funct))
    }

    /// Returns the raw 6-bit field value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Jr => "jr",
            Self::Syscall => "syscall",
            Self::Mfhi => "mfhi",
            Self::Mflo => "mflo",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nor => "nor",
            Self::Slt => "slt",
        }
    }
}
