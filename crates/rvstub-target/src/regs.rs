//! Register table for the simulated RV32 core.
//!
//! Order is the wire order of the `g` dump: x0..x31, then pc.

/// Number of registers in a dump (32 GPRs + pc).
pub const NUM_REGS: usize = 33;

/// GDB semantic type of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegType {
    Int,
    CodePtr,
    DataPtr,
}

impl RegType {
    /// Name used in the target description `type` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::CodePtr => "code_ptr",
            Self::DataPtr => "data_ptr",
        }
    }
}

/// One entry of the register table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Register {
    pub name: &'static str,
    pub ty: RegType,
}

const fn reg(name: &'static str, ty: RegType) -> Register {
    Register { name, ty }
}

/// Registers in dump order.
pub const REGISTERS: [Register; NUM_REGS] = [
    reg("zero", RegType::Int),
    reg("ra", RegType::CodePtr),
    reg("sp", RegType::DataPtr),
    reg("gp", RegType::DataPtr),
    reg("tp", RegType::DataPtr),
    reg("t0", RegType::Int),
    reg("t1", RegType::Int),
    reg("t2", RegType::Int),
    reg("fp", RegType::DataPtr),
    reg("s1", RegType::Int),
    reg("a0", RegType::Int),
    reg("a1", RegType::Int),
    reg("a2", RegType::Int),
    reg("a3", RegType::Int),
    reg("a4", RegType::Int),
    reg("a5", RegType::Int),
    reg("a6", RegType::Int),
    reg("a7", RegType::Int),
    reg("s2", RegType::Int),
    reg("s3", RegType::Int),
    reg("s4", RegType::Int),
    reg("s5", RegType::Int),
    reg("s6", RegType::Int),
    reg("s7", RegType::Int),
    reg("s8", RegType::Int),
    reg("s9", RegType::Int),
    reg("s10", RegType::Int),
    reg("s11", RegType::Int),
    reg("t3", RegType::Int),
    reg("t4", RegType::Int),
    reg("t5", RegType::Int),
    reg("t6", RegType::Int),
    reg("pc", RegType::CodePtr),
];
