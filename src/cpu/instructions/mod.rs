mod decode;
mod execute;
mod parse;

pub use decode::decode;
pub use execute::execute;
pub use parse::resolve_operand;

use super::CpuState;

/// The 56 documented 6502 opcodes. Anything the decode table doesn't
/// recognize falls back to `Nop` (Implied, 2 cycles) rather than failing —
/// there is no undefined-opcode behavior to emulate here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny,
    Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror,
    Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Accumulator,
    Implied,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
    Relative,
}

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub opcode: Opcode,
    pub mode: AddressingMode,
    pub base_cycles: u8,
}

/// Where an instruction's operand lives once addressing has been resolved.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    Implied,
    Accumulator,
    Address(u16),
}

/// Cycle cost beyond `Instruction::base_cycles`: taken/page-crossed branches,
/// and page-crossing reads through the indexed addressing modes. Write and
/// read-modify-write instructions already bake their fixed extra cycle into
/// `base_cycles`, so they never add anything here.
pub fn extra_cycles(instr: &Instruction, cpu: &CpuState) -> u8 {
    use AddressingMode::*;
    use Opcode::*;
    match instr.opcode {
        Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs => {
            if cpu.branch_taken {
                1 + u8::from(cpu.page_crossed)
            } else {
                0
            }
        }
        Lda | Ldx | Ldy | Adc | And | Cmp | Eor | Ora | Sbc => {
            let indexed = matches!(instr.mode, AbsoluteX | AbsoluteY | IndirectIndexed);
            u8::from(indexed && cpu.page_crossed)
        }
        _ => 0,
    }
}
