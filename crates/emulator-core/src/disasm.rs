//! Instruction disassembly.
//!
//! Converts raw words into the same space-separated mnemonic text the
//! assembler accepts. Disassembly is total: words without an assigned
//! operation render as `Unknown Instruction 0x<hex>`.

use crate::decoder::{Decoder, Operation};
use crate::encoding::{register_name, Funct, Opcode};
use crate::memory::Memory;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single disassembled memory word.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisassemblyRow {
    /// Address the word was read from.
    pub address: u32,
    /// Raw instruction word.
    pub word: u32,
    /// Disassembled text.
    pub text: String,
}

/// Renders one instruction word as assembly text.
#[must_use]
pub fn disassemble(word: u32) -> String {
    let Ok(decoded) = Decoder::decode(word) else {
        return unknown(word);
    };
    let fields = decoded.fields;
    let rs = register_name(fields.rs);
    let rt = register_name(fields.rt);
    let rd = register_name(fields.rd);
    let imm = fields.signed_immediate();

    match decoded.operation {
        Operation::Register(funct) => {
            let name = funct.mnemonic();
            match funct {
                Funct::Sll | Funct::Srl | Funct::Sra => {
                    format!("{name} {rd} {rt} {}", fields.shamt)
                }
                Funct::Jr => format!("{name} {rs}"),
                Funct::Syscall => name.to_owned(),
                Funct::Mfhi | Funct::Mflo => format!("{name} {rd}"),
                Funct::Mul
                | Funct::Div
                | Funct::Add
                | Funct::Sub
                | Funct::And
                | Funct::Or
                | Funct::Xor
                | Funct::Nor
                | Funct::Slt => format!("{name} {rd} {rs} {rt}"),
            }
        }
        Operation::Primary(opcode) => {
            let name = opcode.mnemonic();
            match opcode {
                Opcode::J | Opcode::Jal => format!("{name} 0x{:x}", fields.target),
                Opcode::Bltz => format!("{name} {rs} {imm}"),
                Opcode::Beq | Opcode::Bne => format!("{name} {rs} {rt} {imm}"),
                Opcode::Addi
                | Opcode::Addiu
                | Opcode::Slti
                | Opcode::Sltiu
                | Opcode::Andi
                | Opcode::Ori
                | Opcode::Xori => format!("{name} {rt} {rs} {imm}"),
                Opcode::Lui => format!("{name} {rt} {imm}"),
                Opcode::Lb | Opcode::Lw | Opcode::Lbu | Opcode::Sb | Opcode::Sw => {
                    format!("{name} {rt} {imm}({rs})")
                }
                Opcode::Special => unknown(word),
            }
        }
    }
}

fn unknown(word: u32) -> String {
    format!("Unknown Instruction 0x{word:x}")
}

/// Disassembles every word in `start..=end`, stepping by 4.
///
/// Words that cannot be read (unmapped or overrunning a segment) are skipped.
#[must_use]
pub fn disassemble_range(memory: &Memory, start: u32, end: u32) -> Vec<DisassemblyRow> {
    memory
        .view(start, end)
        .filter_map(|(address, word)| {
            word.ok().map(|word| DisassemblyRow {
                address,
                word,
                text: disassemble(word),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{disassemble, disassemble_range};
    use crate::memory::{Memory, PROGRAM_BASE};

    #[rstest]
    #[case(0x3402_000a, "ori $v0 $zero 10")]
    #[case(0x0000_000c, "syscall")]
    #[case(0x0011_4100, "sll $t0 $s1 4")]
    #[case(0x0012_5103, "sra $t2 $s2 4")]
    #[case(0x03e0_0008, "jr $ra")]
    #[case(0x0000_4810, "mfhi $t1")]
    #[case(0x0000_4812, "mflo $t1")]
    #[case(0x0232_4020, "add $t0 $s1 $s2")]
    #[case(0x0109_8022, "sub $s0 $t0 $t1")]
    #[case(0x0211_7027, "nor $t6 $s0 $s1")]
    #[case(0x0810_0008, "j 0x100008")]
    #[case(0x0c10_000a, "jal 0x10000a")]
    #[case(0x1611_0003, "bne $s0 $s1 3")]
    #[case(0x0600_fffe, "bltz $s0 -2")]
    #[case(0x23bd_fffc, "addi $sp $sp -4")]
    #[case(0x3411_aa55, "ori $s1 $zero -21931")]
    #[case(0x3c0a_1000, "lui $t2 4096")]
    #[case(0x8d50_0004, "lw $s0 4($t2)")]
    #[case(0xafbf_0000, "sw $ra 0($sp)")]
    #[case(0x9150_ffff, "lbu $s0 -1($t2)")]
    fn renders_each_instruction_family(#[case] word: u32, #[case] expected: &str) {
        assert_eq!(disassemble(word), expected);
    }

    #[test]
    fn mul_renders_three_register_form() {
        // mul $s0 $s1 packs $s0 into rs and $s1 into rt.
        assert_eq!(disassemble(0x0211_0018), "mul $zero $s0 $s1");
    }

    #[rstest]
    #[case(0xfc00_0000, "Unknown Instruction 0xfc000000")]
    #[case(0x0000_0001, "Unknown Instruction 0x1")]
    #[case(0x1800_0000, "Unknown Instruction 0x18000000")]
    fn unknown_words_fall_back_to_hex(#[case] word: u32, #[case] expected: &str) {
        assert_eq!(disassemble(word), expected);
    }

    #[test]
    fn range_disassembly_reads_program_segment() {
        let mut memory = Memory::new();
        memory.set_word(PROGRAM_BASE, 0x3402_000a).expect("mapped");
        memory.set_word(PROGRAM_BASE + 4, 0x0000_000c).expect("mapped");

        let rows = disassemble_range(&memory, PROGRAM_BASE, PROGRAM_BASE + 4);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address, PROGRAM_BASE);
        assert_eq!(rows[0].text, "ori $v0 $zero 10");
        assert_eq!(rows[1].word, 0x0000_000c);
        assert_eq!(rows[1].text, "syscall");
    }

    #[test]
    fn range_disassembly_skips_unmapped_words() {
        let memory = Memory::new();
        assert!(disassemble_range(&memory, 0x0000_0000, 0x0000_0008).is_empty());
    }
}
