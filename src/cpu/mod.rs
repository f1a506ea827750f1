pub mod bus;
pub mod engine;
pub mod instructions;
pub mod interrupt;
pub mod state;

pub use bus::CpuBus;
pub use engine::step_instruction;
pub use state::{CpuState, CpuStatus};
