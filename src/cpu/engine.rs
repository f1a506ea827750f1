use crate::common::Memory;

use super::bus::CpuBus;
use super::instructions::{decode, execute, extra_cycles, resolve_operand};
use super::interrupt::NMI_VECTOR;
use super::state::CpuStatus;

const NMI_CYCLES: u32 = 7;

/// Service a pending NMI: push PC and status (with B clear, bit 5 set),
/// disable further IRQs, and vector through $FFFA/$FFFB. Costs 7 cycles,
/// same shape as BRK/IRQ but without pushing the B flag.
fn service_nmi(bus: &mut CpuBus) {
    let pc = bus.cpu.program_counter;
    bus.push_to_stack((pc >> 8) as u8);
    bus.push_to_stack((pc & 0xFF) as u8);
    let mut status = bus.cpu.status;
    status.remove(CpuStatus::BRK);
    status.insert(CpuStatus::ALWAYS);
    bus.push_to_stack(status.bits());
    bus.cpu.status.insert(CpuStatus::INT_DISABLE);
    let lo = bus.read_byte(NMI_VECTOR) as u16;
    let hi = bus.read_byte(NMI_VECTOR + 1) as u16;
    bus.cpu.program_counter = (hi << 8) | lo;
}

/// Run one step of the instruction engine: service a pending NMI if one is
/// latched, otherwise fetch-decode-execute one instruction. Returns the
/// number of CPU cycles it cost, including any OAMDMA stall it triggered.
pub fn step_instruction(bus: &mut CpuBus) -> u32 {
    let cycles = if bus.cpu.nmi_pending {
        bus.cpu.nmi_pending = false;
        service_nmi(bus);
        NMI_CYCLES
    } else {
        bus.cpu.page_crossed = false;
        bus.cpu.branch_taken = false;

        let opcode_byte = bus.read_byte(bus.cpu.program_counter);
        bus.cpu.program_counter = bus.cpu.program_counter.wrapping_add(1);

        let instr = decode(opcode_byte);
        let operand = resolve_operand(bus, instr.mode);
        execute(bus, instr, operand);

        instr.base_cycles as u32 + extra_cycles(&instr, bus.cpu) as u32
    };

    let total = cycles + bus.dma_stall;
    bus.dma_stall = 0;
    bus.cpu.cycle_counter += total as u64;
    total
}
