use crate::common::Memory;
use crate::cpu::bus::CpuBus;
use crate::cpu::interrupt::IRQ_VECTOR;
use crate::cpu::state::CpuStatus;

use super::{Instruction, Opcode, Operand};

fn load(bus: &mut CpuBus, operand: Operand) -> u8 {
    match operand {
        Operand::Accumulator => bus.cpu.reg_a,
        Operand::Address(addr) => bus.read_byte(addr),
        Operand::Implied => unreachable!("instruction with no operand tried to load one"),
    }
}

fn store(bus: &mut CpuBus, operand: Operand, value: u8) {
    match operand {
        Operand::Accumulator => bus.cpu.reg_a = value,
        Operand::Address(addr) => bus.write_byte(addr, value),
        Operand::Implied => unreachable!("instruction with no operand tried to store one"),
    }
}

fn compare(bus: &mut CpuBus, register: u8, operand: Operand) {
    let value = load(bus, operand);
    let result = register.wrapping_sub(value);
    bus.cpu.status.set(CpuStatus::CARRY, register >= value);
    bus.cpu.status.set_zero_negative(result);
}

fn branch_if(bus: &mut CpuBus, condition: bool, operand: Operand) {
    bus.cpu.branch_taken = condition;
    if condition {
        match operand {
            Operand::Address(addr) => bus.cpu.program_counter = addr,
            _ => unreachable!("branch instruction always resolves an address"),
        }
    }
}

/// Execute one already-decoded instruction against its resolved operand.
/// Mutates `bus.cpu`'s registers/flags/program counter and performs any
/// memory reads/writes the operation implies.
pub fn execute(bus: &mut CpuBus, instr: Instruction, operand: Operand) {
    use Opcode::*;

    match instr.opcode {
        Adc => {
            let a = bus.cpu.reg_a;
            let m = load(bus, operand);
            let carry_in = u16::from(bus.cpu.status.contains(CpuStatus::CARRY));
            let sum = a as u16 + m as u16 + carry_in;
            let result = sum as u8;
            bus.cpu.status.set(CpuStatus::CARRY, sum > 0xFF);
            bus.cpu
                .status
                .set(CpuStatus::OVERFLOW, (!(a ^ m) & (a ^ result) & 0x80) != 0);
            bus.cpu.reg_a = result;
            bus.cpu.status.set_zero_negative(result);
        }
        Sbc => {
            let a = bus.cpu.reg_a;
            let m = !load(bus, operand);
            let carry_in = u16::from(bus.cpu.status.contains(CpuStatus::CARRY));
            let sum = a as u16 + m as u16 + carry_in;
            let result = sum as u8;
            bus.cpu.status.set(CpuStatus::CARRY, sum > 0xFF);
            bus.cpu
                .status
                .set(CpuStatus::OVERFLOW, (!(a ^ m) & (a ^ result) & 0x80) != 0);
            bus.cpu.reg_a = result;
            bus.cpu.status.set_zero_negative(result);
        }
        And => {
            let m = load(bus, operand);
            bus.cpu.reg_a &= m;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_a);
        }
        Ora => {
            let m = load(bus, operand);
            bus.cpu.reg_a |= m;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_a);
        }
        Eor => {
            let m = load(bus, operand);
            bus.cpu.reg_a ^= m;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_a);
        }
        Asl => {
            let value = load(bus, operand);
            let result = value << 1;
            bus.cpu.status.set(CpuStatus::CARRY, value & 0x80 != 0);
            bus.cpu.status.set_zero_negative(result);
            store(bus, operand, result);
        }
        Lsr => {
            let value = load(bus, operand);
            let result = value >> 1;
            bus.cpu.status.set(CpuStatus::CARRY, value & 0x01 != 0);
            bus.cpu.status.set_zero_negative(result);
            store(bus, operand, result);
        }
        Rol => {
            let value = load(bus, operand);
            let carry_in = u8::from(bus.cpu.status.contains(CpuStatus::CARRY));
            let result = (value << 1) | carry_in;
            bus.cpu.status.set(CpuStatus::CARRY, value & 0x80 != 0);
            bus.cpu.status.set_zero_negative(result);
            store(bus, operand, result);
        }
        Ror => {
            let value = load(bus, operand);
            let carry_in = u8::from(bus.cpu.status.contains(CpuStatus::CARRY));
            let result = (value >> 1) | (carry_in << 7);
            bus.cpu.status.set(CpuStatus::CARRY, value & 0x01 != 0);
            bus.cpu.status.set_zero_negative(result);
            store(bus, operand, result);
        }
        Bit => {
            let value = load(bus, operand);
            bus.cpu.status.set(CpuStatus::ZERO, bus.cpu.reg_a & value == 0);
            bus.cpu.status.set(CpuStatus::OVERFLOW, value & 0x40 != 0);
            bus.cpu.status.set(CpuStatus::NEGATIVE, value & 0x80 != 0);
        }
        Cmp => compare(bus, bus.cpu.reg_a, operand),
        Cpx => compare(bus, bus.cpu.reg_x, operand),
        Cpy => compare(bus, bus.cpu.reg_y, operand),
        Dec => {
            let result = load(bus, operand).wrapping_sub(1);
            store(bus, operand, result);
            bus.cpu.status.set_zero_negative(result);
        }
        Inc => {
            let result = load(bus, operand).wrapping_add(1);
            store(bus, operand, result);
            bus.cpu.status.set_zero_negative(result);
        }
        Dex => {
            bus.cpu.reg_x = bus.cpu.reg_x.wrapping_sub(1);
            bus.cpu.status.set_zero_negative(bus.cpu.reg_x);
        }
        Dey => {
            bus.cpu.reg_y = bus.cpu.reg_y.wrapping_sub(1);
            bus.cpu.status.set_zero_negative(bus.cpu.reg_y);
        }
        Inx => {
            bus.cpu.reg_x = bus.cpu.reg_x.wrapping_add(1);
            bus.cpu.status.set_zero_negative(bus.cpu.reg_x);
        }
        Iny => {
            bus.cpu.reg_y = bus.cpu.reg_y.wrapping_add(1);
            bus.cpu.status.set_zero_negative(bus.cpu.reg_y);
        }
        Jmp => match operand {
            Operand::Address(addr) => bus.cpu.program_counter = addr,
            _ => unreachable!("JMP always resolves an address"),
        },
        Jsr => match operand {
            Operand::Address(addr) => {
                let return_addr = bus.cpu.program_counter.wrapping_sub(1);
                bus.push_to_stack((return_addr >> 8) as u8);
                bus.push_to_stack((return_addr & 0xFF) as u8);
                bus.cpu.program_counter = addr;
            }
            _ => unreachable!("JSR always resolves an address"),
        },
        Rts => {
            let lo = bus.pop_from_stack() as u16;
            let hi = bus.pop_from_stack() as u16;
            bus.cpu.program_counter = ((hi << 8) | lo).wrapping_add(1);
        }
        Brk => {
            let return_pc = bus.cpu.program_counter.wrapping_add(1);
            bus.push_to_stack((return_pc >> 8) as u8);
            bus.push_to_stack((return_pc & 0xFF) as u8);
            let pushed = bus.cpu.status | CpuStatus::BRK | CpuStatus::ALWAYS;
            bus.push_to_stack(pushed.bits());
            bus.cpu.status.insert(CpuStatus::INT_DISABLE);
            let lo = bus.read_byte(IRQ_VECTOR) as u16;
            let hi = bus.read_byte(IRQ_VECTOR + 1) as u16;
            bus.cpu.program_counter = (hi << 8) | lo;
        }
        Rti => {
            let pulled = bus.pop_from_stack();
            let mut status = CpuStatus::from_bits_truncate(pulled);
            status.remove(CpuStatus::BRK);
            status.insert(CpuStatus::ALWAYS);
            bus.cpu.status = status;
            let lo = bus.pop_from_stack() as u16;
            let hi = bus.pop_from_stack() as u16;
            bus.cpu.program_counter = (hi << 8) | lo;
        }
        Pha => bus.push_to_stack(bus.cpu.reg_a),
        Php => {
            let pushed = bus.cpu.status | CpuStatus::BRK | CpuStatus::ALWAYS;
            bus.push_to_stack(pushed.bits());
        }
        Pla => {
            let value = bus.pop_from_stack();
            bus.cpu.reg_a = value;
            bus.cpu.status.set_zero_negative(value);
        }
        Plp => {
            let pulled = bus.pop_from_stack();
            let mut status = CpuStatus::from_bits_truncate(pulled);
            status.remove(CpuStatus::BRK);
            status.insert(CpuStatus::ALWAYS);
            bus.cpu.status = status;
        }
        Clc => bus.cpu.status.remove(CpuStatus::CARRY),
        Sec => bus.cpu.status.insert(CpuStatus::CARRY),
        Cli => bus.cpu.status.remove(CpuStatus::INT_DISABLE),
        Sei => bus.cpu.status.insert(CpuStatus::INT_DISABLE),
        Cld => bus.cpu.status.remove(CpuStatus::DECIMAL),
        Sed => bus.cpu.status.insert(CpuStatus::DECIMAL),
        Clv => bus.cpu.status.remove(CpuStatus::OVERFLOW),
        Lda => {
            let value = load(bus, operand);
            bus.cpu.reg_a = value;
            bus.cpu.status.set_zero_negative(value);
        }
        Ldx => {
            let value = load(bus, operand);
            bus.cpu.reg_x = value;
            bus.cpu.status.set_zero_negative(value);
        }
        Ldy => {
            let value = load(bus, operand);
            bus.cpu.reg_y = value;
            bus.cpu.status.set_zero_negative(value);
        }
        Sta => store(bus, operand, bus.cpu.reg_a),
        Stx => store(bus, operand, bus.cpu.reg_x),
        Sty => store(bus, operand, bus.cpu.reg_y),
        Tax => {
            bus.cpu.reg_x = bus.cpu.reg_a;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_x);
        }
        Tay => {
            bus.cpu.reg_y = bus.cpu.reg_a;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_y);
        }
        Tsx => {
            bus.cpu.reg_x = bus.cpu.stack_pointer;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_x);
        }
        Txa => {
            bus.cpu.reg_a = bus.cpu.reg_x;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_a);
        }
        Txs => bus.cpu.stack_pointer = bus.cpu.reg_x,
        Tya => {
            bus.cpu.reg_a = bus.cpu.reg_y;
            bus.cpu.status.set_zero_negative(bus.cpu.reg_a);
        }
        Bcc => branch_if(bus, !bus.cpu.status.contains(CpuStatus::CARRY), operand),
        Bcs => branch_if(bus, bus.cpu.status.contains(CpuStatus::CARRY), operand),
        Beq => branch_if(bus, bus.cpu.status.contains(CpuStatus::ZERO), operand),
        Bne => branch_if(bus, !bus.cpu.status.contains(CpuStatus::ZERO), operand),
        Bmi => branch_if(bus, bus.cpu.status.contains(CpuStatus::NEGATIVE), operand),
        Bpl => branch_if(bus, !bus.cpu.status.contains(CpuStatus::NEGATIVE), operand),
        Bvc => branch_if(bus, !bus.cpu.status.contains(CpuStatus::OVERFLOW), operand),
        Bvs => branch_if(bus, bus.cpu.status.contains(CpuStatus::OVERFLOW), operand),
        Nop => {}
    }
}
