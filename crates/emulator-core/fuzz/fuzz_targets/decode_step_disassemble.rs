#![no_main]

use libfuzzer_sys::fuzz_target;
use mips_emulator_core::{
    disassemble, step, translate, Decoder, Machine, MachineConfig, PROGRAM_BASE,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let word = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let address = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);

    let _ = Decoder::decode(word);
    let _ = disassemble(word);
    let _ = translate(address);

    let config = MachineConfig {
        debug_trace: false,
        ..MachineConfig::default()
    };
    let mut machine = Machine::with_config(&config);
    for (index, register) in machine.registers.r.iter_mut().enumerate() {
        *register = address.rotate_left(u32::try_from(index).unwrap_or(0));
    }
    if machine.load_words(PROGRAM_BASE, &[word]).is_ok() {
        let _ = step(&mut machine);
    }
    let _ = machine.memory.get_word(address);
});
