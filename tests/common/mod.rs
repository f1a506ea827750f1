//! Shared helpers for building synthetic iNES images and driving an
//! `Emulator` instruction-by-instruction in integration tests. There are no
//! real ROM fixtures checked into this repo (no Klaus Dormann or nestest
//! binaries), so every test assembles the exact bytes it needs by hand.

#![allow(dead_code)]

use nes_core::api::Emulator;
use nes_core::controller::ButtonSnapshot;

pub const PRG_BANK: usize = 16 * 1024;
pub const CHR_BANK: usize = 8 * 1024;

/// Build a minimal iNES image: one 16 KiB PRG bank (or more, if `prg` is
/// longer) and one 8 KiB CHR bank, mapper 0, horizontal mirroring.
pub fn build_rom(prg: Vec<u8>, chr: Vec<u8>) -> Vec<u8> {
    assert_eq!(prg.len() % PRG_BANK, 0, "PRG must be a whole number of 16 KiB banks");
    let chr_banks = if chr.is_empty() { 0 } else { (chr.len() / CHR_BANK) as u8 };
    let mut rom = vec![
        0x4E, 0x45, 0x53, 0x1A,
        (prg.len() / PRG_BANK) as u8,
        chr_banks,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];
    rom.extend(prg);
    rom.extend(chr);
    rom
}

/// A 32 KiB PRG image with `program` written at CPU address `$8000` and the
/// reset vector pointed at it. `$FFFA`/`$FFFB` (NMI) and `$FFFE`/`$FFFF`
/// (IRQ/BRK) are left at `$8000` too unless the caller pokes them.
pub fn rom_with_program_at_8000(program: &[u8]) -> Vec<u8> {
    let mut prg = vec![0u8; 2 * PRG_BANK];
    prg[..program.len()].copy_from_slice(program);
    // Reset vector -> $8000.
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    build_rom(prg, vec![0u8; CHR_BANK])
}

/// Same as `rom_with_program_at_8000`, but also points the NMI vector
/// ($FFFA/$FFFB) at `$9000` so a test can drop a short NMI handler there.
pub fn rom_with_program_and_nmi_handler(program: &[u8], nmi_handler: &[u8]) -> Vec<u8> {
    let mut prg = vec![0u8; 2 * PRG_BANK];
    prg[..program.len()].copy_from_slice(program);
    let nmi_offset = 0x9000 - 0x8000;
    prg[nmi_offset..nmi_offset + nmi_handler.len()].copy_from_slice(nmi_handler);
    prg[0x7FFA] = 0x00; // NMI vector -> $9000
    prg[0x7FFB] = 0x90;
    prg[0x7FFC] = 0x00; // reset vector -> $8000
    prg[0x7FFD] = 0x80;
    build_rom(prg, vec![0u8; CHR_BANK])
}

/// Load `rom_bytes` into a fresh `Emulator`. `Emulator::load` already powers
/// the system up (PC loaded from the reset vector, A/X/Y/S at their
/// power-on values), so no separate reset is needed before the first
/// instruction.
pub fn booted_emulator(rom_bytes: &[u8]) -> Emulator {
    let mut emu = Emulator::new();
    emu.load(rom_bytes).expect("test ROM should load");
    emu
}

/// Step one instruction with no buttons held, returning its cycle cost.
pub fn step(emu: &mut Emulator) -> u32 {
    emu.step_instruction(ButtonSnapshot::empty())
}
