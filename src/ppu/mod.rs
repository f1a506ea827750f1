mod bus;
mod registers;
mod state;

pub use registers::{PpuCtrl, PpuMask, PpuStatus};
pub use state::{PpuEvents, PpuState};
