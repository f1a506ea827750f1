mod nrom;

pub use nrom::Nrom;

use crate::cartridge::{Cartridge, Mirroring};

/// Translates CPU and PPU addresses through cartridge banks.
///
/// This is the capability set a mapper exposes to the rest of the system:
/// the CPU bus and PPU bus never touch cartridge storage directly, they
/// dispatch through this trait. Only mapper 0 (NROM) is implemented; the
/// trait is the seam future mappers would plug into.
pub trait Mapper {
    /// Read from $4020-$FFFF (PRG-RAM/PRG-ROM). Mirrors a 16 KiB PRG image
    /// into both $8000-$BFFF and $C000-$FFFF.
    fn cpu_read(&mut self, addr: u16) -> u8;
    fn cpu_write(&mut self, addr: u16, val: u8);

    /// Read/write the pattern tables, $0000-$1FFF on the PPU bus.
    fn ppu_read(&mut self, addr: u16) -> u8;
    fn ppu_write(&mut self, addr: u16, val: u8);

    /// Nametable mirroring arrangement, used by the PPU bus to fold the
    /// 4 logical 1 KiB nametables onto 2 KiB of physical VRAM.
    fn mirroring(&self) -> Mirroring;
}

/// Build the mapper implementation named by a parsed cartridge.
///
/// The cartridge loader already rejected unsupported mapper numbers, so
/// this always succeeds for a `Cartridge` that made it past `Cartridge::parse`.
pub fn make_mapper(cartridge: Cartridge) -> Box<dyn Mapper> {
    match cartridge.mapper {
        0 => Box::new(Nrom::new(cartridge)),
        n => unreachable!("unsupported mapper {n} should have been rejected at load time"),
    }
}
