use crate::cartridge::Mirroring;

/// Maps a nametable address ($2000-$2FFF, already masked to 12 bits) onto
/// one of the two physical 1 KiB nametables the PPU actually owns, following
/// the cartridge's mirroring mode.
pub fn mirror_nametable_addr(mirroring: Mirroring, addr: u16) -> usize {
    let addr = addr & 0x0FFF;
    let table = addr / 0x0400;
    let offset = (addr % 0x0400) as usize;
    let physical_table = match mirroring {
        Mirroring::Horizontal => table / 2,
        Mirroring::Vertical => table % 2,
        Mirroring::FourScreen => table,
    };
    (physical_table as usize % 2) * 0x0400 + offset
}

/// Folds a palette-RAM address into its 32-byte index, applying the
/// background-color mirrors at $10/$14/$18/$1C onto $00/$04/$08/$0C.
pub fn palette_index(addr: u16) -> usize {
    let mut index = (addr & 0x1F) as usize;
    if index >= 0x10 && index % 4 == 0 {
        index -= 0x10;
    }
    index
}
