//! Simulated RISC-V target for the RSP stub.
//!
//! No instructions are executed. The target is a fixed register dump plus a
//! program counter that moves forward one instruction per single-step.
//!
//! ```
//! use rvstub_target::{BASE_ADDRESS, TargetState};
//!
//! let mut target = TargetState::new();
//! target.advance();
//! assert_eq!(target.current_address(), BASE_ADDRESS + 4);
//! ```

mod description;
mod regs;
mod state;

pub use description::{ARCHITECTURE, FEATURE_NAME, target_xml};
pub use regs::{NUM_REGS, REGISTERS, RegType, Register};
pub use state::{BASE_ADDRESS, FILLER, INSTRUCTION_WIDTH, TargetState};
