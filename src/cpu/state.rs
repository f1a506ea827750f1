use bitflags::bitflags;

const STACK_POINTER_INIT: u8 = 0xFD;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuStatus: u8 {
        const CARRY =       0b0000_0001;
        const ZERO =        0b0000_0010;
        const INT_DISABLE = 0b0000_0100;
        const DECIMAL =     0b0000_1000;
        const BRK =         0b0001_0000;
        const ALWAYS =      0b0010_0000;
        const OVERFLOW =    0b0100_0000;
        const NEGATIVE =    0b1000_0000;
    }
}

impl CpuStatus {
    pub fn set_zero_negative(&mut self, value: u8) {
        self.set(CpuStatus::ZERO, value == 0);
        self.set(CpuStatus::NEGATIVE, value & 0x80 != 0);
    }
}

/// The 2A03's visible register file plus the bookkeeping the instruction
/// engine and frame scheduler need (cycle counter, pending-NMI flag,
/// page-cross/branch-taken bookkeeping used to compute cycle costs).
#[derive(Debug, Clone, Copy)]
pub struct CpuState {
    pub reg_a: u8,
    pub reg_x: u8,
    pub reg_y: u8,
    pub status: CpuStatus,
    pub stack_pointer: u8,
    pub program_counter: u16,

    /// Set by an indexed-addressing decode when the effective address
    /// crossed a page boundary; consumed when computing instruction cost.
    pub page_crossed: bool,
    /// Set when a branch instruction's condition was true.
    pub branch_taken: bool,

    pub nmi_pending: bool,
    pub cycle_counter: u64,
}

impl Default for CpuState {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuState {
    pub fn new() -> Self {
        CpuState {
            reg_a: 0,
            reg_x: 0,
            reg_y: 0,
            status: CpuStatus::ALWAYS | CpuStatus::BRK | CpuStatus::INT_DISABLE,
            stack_pointer: STACK_POINTER_INIT,
            program_counter: 0,
            page_crossed: false,
            branch_taken: false,
            nmi_pending: false,
            cycle_counter: 0,
        }
    }
}
