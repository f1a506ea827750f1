use crate::cartridge::Cartridge;
use crate::controller::{ButtonSnapshot, Controller};
use crate::cpu::bus::CpuBus;
use crate::cpu::engine::step_instruction as run_instruction;
use crate::cpu::interrupt::RESET_VECTOR;
use crate::cpu::CpuState;
use crate::framebuffer::Framebuffer;
use crate::mapper::{make_mapper, Mapper};
use crate::ppu::PpuState;

/// What one `step_frame` call advanced, handed back to the host for pacing
/// and diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub cpu_cycles: u64,
    pub ppu_dots: u64,
    pub frame: u64,
}

/// The whole console: CPU/PPU state, 2 KiB of work RAM, the loaded
/// cartridge's mapper, and one controller port. Owns everything the CPU and
/// PPU buses borrow a view into for the span of a single instruction/dot.
pub struct System {
    ram: [u8; 0x800],
    apuio: [u8; 0x20],
    cpu: CpuState,
    ppu: PpuState,
    mapper: Box<dyn Mapper>,
    controller: Controller,
}

impl System {
    pub fn new(cartridge: Cartridge) -> Self {
        let mut system = System {
            ram: [0; 0x800],
            apuio: [0; 0x20],
            cpu: CpuState::new(),
            ppu: PpuState::new(),
            mapper: make_mapper(cartridge),
            controller: Controller::new(),
        };
        system.power_up();
        system
    }

    fn load_reset_vector(&mut self) -> u16 {
        let lo = self.mapper.cpu_read(RESET_VECTOR) as u16;
        let hi = self.mapper.cpu_read(RESET_VECTOR + 1) as u16;
        (hi << 8) | lo
    }

    /// Cold boot: zero RAM and registers, set up the power-on P/S values,
    /// and load PC from the reset vector.
    pub fn power_up(&mut self) {
        self.ram = [0; 0x800];
        self.apuio = [0; 0x20];
        self.cpu = CpuState::new();
        self.ppu.power_up();
        self.controller = Controller::new();
        self.cpu.program_counter = self.load_reset_vector();
    }

    /// Warm reset: RAM and most PPU state survive. Stack pointer drops by 3,
    /// IRQs are disabled, and PC reloads from the reset vector, matching the
    /// 2A03's reset-line behavior.
    pub fn reset(&mut self) {
        self.cpu.stack_pointer = self.cpu.stack_pointer.wrapping_sub(3);
        self.cpu
            .status
            .insert(crate::cpu::CpuStatus::INT_DISABLE);
        self.cpu.program_counter = self.load_reset_vector();
    }

    fn bus(&mut self, buttons: ButtonSnapshot) -> CpuBus<'_> {
        CpuBus::new(
            &mut self.ram,
            &mut self.cpu,
            &mut self.ppu,
            self.mapper.as_mut(),
            &mut self.controller,
            &mut self.apuio,
            buttons,
        )
    }

    pub fn step_instruction(&mut self, buttons: ButtonSnapshot) -> u32 {
        let mut bus = self.bus(buttons);
        run_instruction(&mut bus)
    }

    /// Read-only view of the CPU register file, for tracing/debugging and
    /// for integration tests that check emulator state against a reference
    /// log (nestest-style).
    pub fn cpu_state(&self) -> &CpuState {
        &self.cpu
    }

    /// Read-only view of the PPU's register file and dot/scanline counters.
    pub fn ppu_state(&self) -> &PpuState {
        &self.ppu
    }

    /// Force the program counter, bypassing the reset vector. Used by
    /// headless CPU test harnesses (nestest) that start execution at a
    /// fixed address instead of the cartridge's declared entry point.
    pub fn set_program_counter(&mut self, pc: u16) {
        self.cpu.program_counter = pc;
    }

    /// Run CPU instructions, interleaving 3 PPU dots per CPU cycle, until a
    /// full PPU frame (341x262 dots) has elapsed.
    pub fn step_frame(&mut self, buttons: ButtonSnapshot, framebuffer: &mut Framebuffer) -> FrameStats {
        let start_cycles = self.cpu.cycle_counter;
        loop {
            let cycles = self.step_instruction(buttons);
            let mut frame_done = false;
            for _ in 0..(cycles * 3) {
                let events = self.ppu.tick(self.mapper.as_mut(), framebuffer);
                if events.nmi {
                    self.cpu.nmi_pending = true;
                }
                frame_done |= events.frame_complete;
            }
            if frame_done {
                break;
            }
        }
        FrameStats {
            cpu_cycles: self.cpu.cycle_counter - start_cycles,
            ppu_dots: (self.cpu.cycle_counter - start_cycles) * 3,
            frame: self.ppu.frame,
        }
    }
}
