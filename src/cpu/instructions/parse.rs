use crate::common::Memory;
use crate::cpu::bus::CpuBus;

use super::{AddressingMode, Operand};

/// Resolve an addressing mode into the operand location, advancing the
/// program counter past whatever operand bytes the mode consumes and
/// setting `cpu.page_crossed` for the indexed modes that can cross one.
pub fn resolve_operand(bus: &mut CpuBus, mode: AddressingMode) -> Operand {
    use AddressingMode::*;

    let pc = bus.cpu.program_counter;
    match mode {
        Accumulator => Operand::Accumulator,
        Implied => Operand::Implied,
        Immediate => {
            bus.cpu.program_counter = pc.wrapping_add(1);
            Operand::Address(pc)
        }
        ZeroPage => {
            let addr = bus.read_byte(pc) as u16;
            bus.cpu.program_counter = pc.wrapping_add(1);
            Operand::Address(addr)
        }
        ZeroPageX => {
            let base = bus.read_byte(pc);
            bus.cpu.program_counter = pc.wrapping_add(1);
            Operand::Address(base.wrapping_add(bus.cpu.reg_x) as u16)
        }
        ZeroPageY => {
            let base = bus.read_byte(pc);
            bus.cpu.program_counter = pc.wrapping_add(1);
            Operand::Address(base.wrapping_add(bus.cpu.reg_y) as u16)
        }
        Absolute => {
            let addr = bus.read_two_bytes(pc);
            bus.cpu.program_counter = pc.wrapping_add(2);
            Operand::Address(addr)
        }
        AbsoluteX => {
            let base = bus.read_two_bytes(pc);
            bus.cpu.program_counter = pc.wrapping_add(2);
            let addr = base.wrapping_add(bus.cpu.reg_x as u16);
            bus.cpu.page_crossed = (base & 0xFF00) != (addr & 0xFF00);
            Operand::Address(addr)
        }
        AbsoluteY => {
            let base = bus.read_two_bytes(pc);
            bus.cpu.program_counter = pc.wrapping_add(2);
            let addr = base.wrapping_add(bus.cpu.reg_y as u16);
            bus.cpu.page_crossed = (base & 0xFF00) != (addr & 0xFF00);
            Operand::Address(addr)
        }
        Indirect => {
            let ptr = bus.read_two_bytes(pc);
            bus.cpu.program_counter = pc.wrapping_add(2);
            // Hardware bug: JMP ($xxFF) fetches the high byte from $xx00,
            // not $(xx+1)00, because the indirect fetch never carries into
            // the high byte of the pointer.
            let addr = if ptr & 0x00FF == 0x00FF {
                let lo = bus.read_byte(ptr) as u16;
                let hi = bus.read_byte(ptr & 0xFF00) as u16;
                (hi << 8) | lo
            } else {
                bus.read_two_bytes(ptr)
            };
            Operand::Address(addr)
        }
        IndexedIndirect => {
            let base = bus.read_byte(pc);
            bus.cpu.program_counter = pc.wrapping_add(1);
            let ptr = base.wrapping_add(bus.cpu.reg_x);
            Operand::Address(bus.read_two_page_bytes(ptr as u16))
        }
        IndirectIndexed => {
            let ptr = bus.read_byte(pc);
            bus.cpu.program_counter = pc.wrapping_add(1);
            let base = bus.read_two_page_bytes(ptr as u16);
            let addr = base.wrapping_add(bus.cpu.reg_y as u16);
            bus.cpu.page_crossed = (base & 0xFF00) != (addr & 0xFF00);
            Operand::Address(addr)
        }
        Relative => {
            let offset = bus.read_byte(pc) as i8;
            bus.cpu.program_counter = pc.wrapping_add(1);
            let next_pc = bus.cpu.program_counter;
            let target = next_pc.wrapping_add(offset as u16);
            bus.cpu.page_crossed = (next_pc & 0xFF00) != (target & 0xFF00);
            Operand::Address(target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::test::test_cartridge;
    use crate::controller::{ButtonSnapshot, Controller};
    use crate::cpu::CpuState;
    use crate::mapper::make_mapper;
    use crate::ppu::PpuState;

    #[allow(clippy::too_many_arguments)]
    fn fresh_bus<'a>(
        ram: &'a mut [u8; 0x800],
        cpu: &'a mut CpuState,
        ppu: &'a mut PpuState,
        mapper: &'a mut dyn crate::mapper::Mapper,
        controller: &'a mut Controller,
        apuio: &'a mut [u8; 0x20],
    ) -> CpuBus<'a> {
        CpuBus::new(ram, cpu, ppu, mapper, controller, apuio, ButtonSnapshot::empty())
    }

    #[test]
    fn test_indirect_jmp_page_boundary_bug() {
        let mut ram = [0u8; 0x800];
        let mut cpu = CpuState::new();
        let mut ppu = PpuState::new();
        let mut mapper = make_mapper(test_cartridge());
        let mut controller = Controller::new();
        let mut apuio = [0u8; 0x20];
        let mut bus = fresh_bus(&mut ram, &mut cpu, &mut ppu, mapper.as_mut(), &mut controller, &mut apuio);
        // Pointer $00FF/$0000: low byte at $00FF, high byte wraps to $0000
        // instead of carrying into $0100.
        bus.write_byte(0x00FF, 0x80);
        bus.write_byte(0x0000, 0x42);
        bus.cpu.program_counter = 0x0300;
        bus.write_byte(0x0300, 0xFF);
        bus.write_byte(0x0301, 0x00);
        let operand = resolve_operand(&mut bus, AddressingMode::Indirect);
        match operand {
            Operand::Address(addr) => assert_eq!(addr, 0x4280),
            _ => panic!("expected address operand"),
        }
    }

    #[test]
    fn test_absolute_x_page_cross_flag() {
        let mut ram = [0u8; 0x800];
        let mut cpu = CpuState::new();
        let mut ppu = PpuState::new();
        let mut mapper = make_mapper(test_cartridge());
        let mut controller = Controller::new();
        cpu.reg_x = 0xFF;
        cpu.program_counter = 0x0000;
        let mut apuio = [0u8; 0x20];
        let mut bus = fresh_bus(&mut ram, &mut cpu, &mut ppu, mapper.as_mut(), &mut controller, &mut apuio);
        bus.write_byte(0x0000, 0x01);
        bus.write_byte(0x0001, 0x02); // base = $0201, + $FF -> $0300, crosses page
        resolve_operand(&mut bus, AddressingMode::AbsoluteX);
        assert!(bus.cpu.page_crossed);
    }
}
