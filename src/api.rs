use crate::cartridge::Cartridge;
use crate::controller::ButtonSnapshot;
use crate::error::LoadError;
use crate::framebuffer::Framebuffer;
use crate::system::{FrameStats, System};

/// The public surface this core exposes to a host front-end: load a ROM
/// image, power it up, and drive it frame by frame with a button snapshot
/// and a framebuffer to paint into.
///
/// Calling `step_frame`/`reset` before a successful `load` is a contract
/// violation the core survives: it logs and returns a no-op result rather
/// than panicking, consistent with how the bus layers handle other runtime
/// anomalies.
#[derive(Default)]
pub struct Emulator {
    system: Option<System>,
}

impl Emulator {
    pub fn new() -> Self {
        Emulator { system: None }
    }

    /// Parse an iNES image and power up a fresh `System` for it. Replaces
    /// any previously loaded cartridge.
    pub fn load(&mut self, rom_bytes: &[u8]) -> Result<(), LoadError> {
        let cartridge = Cartridge::parse(rom_bytes)?;
        self.system = Some(System::new(cartridge));
        Ok(())
    }

    pub fn reset(&mut self) {
        match &mut self.system {
            Some(system) => system.reset(),
            None => log::warn!("reset called with no cartridge loaded"),
        }
    }

    /// Run CPU/PPU until the next frame completes, consuming `buttons` as
    /// the controller's input snapshot for the duration.
    pub fn step_frame(&mut self, buttons: ButtonSnapshot, framebuffer: &mut Framebuffer) -> FrameStats {
        match &mut self.system {
            Some(system) => system.step_frame(buttons, framebuffer),
            None => {
                log::error!("step_frame called before a ROM was loaded");
                FrameStats::default()
            }
        }
    }

    /// Advance by a single CPU instruction (or NMI service sequence).
    /// Returns its cycle cost. Used by headless CPU conformance tests that
    /// need instruction-level granularity instead of a whole frame.
    pub fn step_instruction(&mut self, buttons: ButtonSnapshot) -> u32 {
        match &mut self.system {
            Some(system) => system.step_instruction(buttons),
            None => {
                log::error!("step_instruction called before a ROM was loaded");
                0
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.system = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.system.is_some()
    }

    /// Read-only view of the loaded `System`, for introspection by test
    /// harnesses and tracers. `None` if no cartridge is loaded.
    pub fn system(&self) -> Option<&System> {
        self.system.as_ref()
    }

    /// Force the CPU program counter. Used by headless CPU conformance
    /// tests (e.g. nestest) that start execution at a fixed address rather
    /// than the cartridge's reset vector.
    pub fn set_program_counter(&mut self, pc: u16) {
        if let Some(system) = &mut self.system {
            system.set_program_counter(pc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::test::{build_rom, TestRom};

    fn sample_rom() -> Vec<u8> {
        build_rom(TestRom {
            header: vec![
                0x4E, 0x45, 0x53, 0x1A, 0x02, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            ],
            trainer: None,
            prg_rom: vec![0; 2 * 16384],
            chr_rom: vec![0; 8192],
        })
    }

    #[test]
    fn test_load_then_step_frame() {
        let mut emu = Emulator::new();
        emu.load(&sample_rom()).unwrap();
        assert!(emu.is_loaded());
        let mut fb = Framebuffer::new();
        let stats = emu.step_frame(ButtonSnapshot::empty(), &mut fb);
        assert_eq!(stats.frame, 1);
    }

    #[test]
    fn test_step_frame_before_load_is_a_harmless_no_op() {
        let mut emu = Emulator::new();
        let mut fb = Framebuffer::new();
        let stats = emu.step_frame(ButtonSnapshot::empty(), &mut fb);
        assert_eq!(stats.cpu_cycles, 0);
    }

    #[test]
    fn test_bad_rom_rejected() {
        let mut emu = Emulator::new();
        let err = emu.load(&[0u8; 4]).unwrap_err();
        assert_eq!(err, LoadError::Truncated);
        assert!(!emu.is_loaded());
    }
}
