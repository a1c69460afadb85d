//! Target register state.

use std::fmt::Write;

use gdbstub::arch::Registers;
use gdbstub_arch::riscv::reg::RiscvCoreRegs;

use crate::NUM_REGS;

/// Program counter at session start.
pub const BASE_ADDRESS: u32 = 0x24;

/// Bytes per instruction; one step moves the pc this far.
pub const INSTRUCTION_WIDTH: u32 = 4;

/// Value reported for every general-purpose register.
pub const FILLER: u32 = 0x1111_1111;

/// Simulated RV32 core: fixed GPRs and a moving program counter.
///
/// Owned by a single session and dropped with it.
#[derive(Debug, Clone)]
pub struct TargetState {
    regs: RiscvCoreRegs<u32>,
    steps: u64,
}

impl TargetState {
    /// Create a target with the pc at [`BASE_ADDRESS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_entry(BASE_ADDRESS)
    }

    /// Create a target with the pc at `entry`.
    #[must_use]
    pub fn with_entry(entry: u32) -> Self {
        let mut regs = RiscvCoreRegs::<u32>::default();
        regs.x = [FILLER; 32];
        regs.pc = entry;
        Self { regs, steps: 0 }
    }

    /// Current program counter.
    #[must_use]
    pub const fn current_address(&self) -> u32 {
        self.regs.pc
    }

    /// Number of completed single-steps.
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.steps
    }

    /// Move the pc forward one instruction. Wraps at 2^32.
    pub const fn advance(&mut self) {
        self.regs.pc = self.regs.pc.wrapping_add(INSTRUCTION_WIDTH);
        self.steps += 1;
    }

    /// Raw register values in dump order (x0..x31, pc).
    #[must_use]
    pub fn registers(&self) -> [u32; NUM_REGS] {
        let mut out = [0u32; NUM_REGS];
        out[..NUM_REGS - 1].copy_from_slice(&self.regs.x);
        out[NUM_REGS - 1] = self.regs.pc;
        out
    }

    /// Register dump as sent in reply to `g`.
    ///
    /// Each register is 8 hex digits of its little-endian bytes, with no
    /// separators.
    #[must_use]
    pub fn dump_registers(&self) -> String {
        let mut out = String::with_capacity(NUM_REGS * 8);
        self.regs.gdb_serialize(|byte| match byte {
            Some(b) => {
                let _ = write!(out, "{b:02x}");
            }
            None => out.push_str("xx"),
        });
        out
    }
}

impl Default for TargetState {
    fn default() -> Self {
        Self::new()
    }
}
