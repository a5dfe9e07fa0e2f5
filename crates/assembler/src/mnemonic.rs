//! Mnemonic and register resolution derived from the emulator core tables.

use std::sync::OnceLock;

use mips_emulator_core::{register_index, Funct, Opcode, FUNCT_TABLE, OPCODE_TABLE};

/// What a mnemonic encodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// R-format operation selected by funct; opcode field is zero.
    Register(Funct),
    /// I- or J-format operation selected by opcode.
    Primary(Opcode),
}

impl Mnemonic {
    /// Opcode and funct bits contributed by the mnemonic alone.
    #[must_use]
    pub fn base_word(self) -> u32 {
        match self {
            Self::Register(funct) => u32::from(funct.value()),
            Self::Primary(opcode) => u32::from(opcode.value()) << 26,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MnemonicEntry {
    name: &'static str,
    value: u8,
    mnemonic: Mnemonic,
}

const MNEMONIC_ENTRIES: &[MnemonicEntry] = &[
    MnemonicEntry {
        name: "sll",
        value: 0,
        mnemonic: Mnemonic::Register(Funct::Sll),
    },
    MnemonicEntry {
        name: "srl",
        value: 2,
        mnemonic: Mnemonic::Register(Funct::Srl),
    },
    MnemonicEntry {
        name: "sra",
        value: 3,
        mnemonic: Mnemonic::Register(Funct::Sra),
    },
    MnemonicEntry {
        name: "jr",
        value: 8,
        mnemonic: Mnemonic::Register(Funct::Jr),
    },
    MnemonicEntry {
        name: "syscall",
        value: 12,
        mnemonic: Mnemonic::Register(Funct::Syscall),
    },
    MnemonicEntry {
        name: "mfhi",
        value: 16,
        mnemonic: Mnemonic::Register(Funct::Mfhi),
    },
    MnemonicEntry {
        name: "mflo",
        value: 18,
        mnemonic: Mnemonic::Register(Funct::Mflo),
    },
    MnemonicEntry {
        name: "mul",
        value: 24,
        mnemonic: Mnemonic::Register(Funct::Mul),
    },
    MnemonicEntry {
        name: "div",
        value: 26,
        mnemonic: Mnemonic::Register(Funct::Div),
    },
    MnemonicEntry {
        name: "add",
        value: 32,
        mnemonic: Mnemonic::Register(Funct::Add),
    },
    MnemonicEntry {
        name: "sub",
        value: 34,
        mnemonic: Mnemonic::Register(Funct::Sub),
    },
    MnemonicEntry {
        name: "and",
        value: 36,
        mnemonic: Mnemonic::Register(Funct::And),
    },
    MnemonicEntry {
        name: "or",
        value: 37,
        mnemonic: Mnemonic::Register(Funct::Or),
    },
    MnemonicEntry {
        name: "xor",
        value: 38,
        mnemonic: Mnemonic::Register(Funct::Xor),
    },
    MnemonicEntry {
        name: "nor",
        value: 39,
        mnemonic: Mnemonic::Register(Funct::Nor),
    },
    MnemonicEntry {
        name: "slt",
        value: 42,
        mnemonic: Mnemonic::Register(Funct::Slt),
    },
    MnemonicEntry {
        name: "bltz",
        value: 1,
        mnemonic: Mnemonic::Primary(Opcode::Bltz),
    },
    MnemonicEntry {
        name: "j",
        value: 2,
        mnemonic: Mnemonic::Primary(Opcode::J),
    },
    MnemonicEntry {
        name: "jal",
        value: 3,
        mnemonic: Mnemonic::Primary(Opcode::Jal),
    },
    MnemonicEntry {
        name: "beq",
        value: 4,
        mnemonic: Mnemonic::Primary(Opcode::Beq),
    },
    MnemonicEntry {
        name: "bne",
        value: 5,
        mnemonic: Mnemonic::Primary(Opcode::Bne),
    },
    MnemonicEntry {
        name: "addi",
        value: 8,
        mnemonic: Mnemonic::Primary(Opcode::Addi),
    },
    MnemonicEntry {
        name: "addiu",
        value: 9,
        mnemonic: Mnemonic::Primary(Opcode::Addiu),
    },
    MnemonicEntry {
        name: "slti",
        value: 10,
        mnemonic: Mnemonic::Primary(Opcode::Slti),
    },
    MnemonicEntry {
        name: "sltiu",
        value: 11,
        mnemonic: Mnemonic::Primary(Opcode::Sltiu),
    },
    MnemonicEntry {
        name: "andi",
        value: 12,
        mnemonic: Mnemonic::Primary(Opcode::Andi),
    },
    MnemonicEntry {
        name: "ori",
        value: 13,
        mnemonic: Mnemonic::Primary(Opcode::Ori),
    },
    MnemonicEntry {
        name: "xori",
        value: 14,
        mnemonic: Mnemonic::Primary(Opcode::Xori),
    },
    MnemonicEntry {
        name: "lui",
        value: 15,
        mnemonic: Mnemonic::Primary(Opcode::Lui),
    },
    MnemonicEntry {
        name: "lb",
        value: 32,
        mnemonic: Mnemonic::Primary(Opcode::Lb),
    },
    MnemonicEntry {
        name: "lw",
        value: 35,
        mnemonic: Mnemonic::Primary(Opcode::Lw),
    },
    MnemonicEntry {
        name: "lbu",
        value: 36,
        mnemonic: Mnemonic::Primary(Opcode::Lbu),
    },
    MnemonicEntry {
        name: "sb",
        value: 40,
        mnemonic: Mnemonic::Primary(Opcode::Sb),
    },
    MnemonicEntry {
        name: "sw",
        value: 43,
        mnemonic: Mnemonic::Primary(Opcode::Sw),
    },
];

/// Register spellings accepted in addition to the canonical names.
const REGISTER_ALIASES: &[(&str, u8)] = &[("$g7", 15)];

fn entries_verified_against_core() -> &'static [MnemonicEntry] {
    static VERIFIED_ENTRIES: OnceLock<Vec<MnemonicEntry>> = OnceLock::new();
    VERIFIED_ENTRIES.get_or_init(|| {
        for entry in MNEMONIC_ENTRIES {
            let matches_core = match entry.mnemonic {
                Mnemonic::Register(funct) => FUNCT_TABLE
                    .iter()
                    .any(|(value, core)| *value == entry.value && *core == funct)
                    && funct.mnemonic() == entry.name,
                Mnemonic::Primary(opcode) => OPCODE_TABLE
                    .iter()
                    .any(|(value, core)| *value == entry.value && *core == opcode)
                    && opcode.mnemonic() == entry.name,
            };
            assert!(
                matches_core,
                "mnemonic table diverged from emulator-core table"
            );
        }
        MNEMONIC_ENTRIES.to_vec()
    })
}

/// Resolves a lowercase mnemonic.
#[must_use]
pub fn resolve_mnemonic(name: &str) -> Option<Mnemonic> {
    entries_verified_against_core()
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.mnemonic)
}

/// Resolves a lowercase register name, including aliases, to its index.
#[must_use]
pub fn resolve_register(name: &str) -> Option<u8> {
    register_index(name)
        .and_then(|index| u8::try_from(index).ok())
        .or_else(|| {
            REGISTER_ALIASES
                .iter()
                .find_map(|(alias, index)| (*alias == name).then_some(*index))
        })
}
