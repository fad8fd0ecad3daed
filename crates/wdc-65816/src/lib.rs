//! WDC 65C816 CPU core.
//!
//! Instruction-granular: the first `clock()` of an instruction performs all
//! of its bus traffic and register updates, then the remaining cycles of its
//! cost are drained one call at a time. Every one of the 256 opcode bytes
//! has a table entry (see [`OPCODES`]) giving its operation, addressing
//! mode and cost formula.

mod addressing;
mod alu;
mod control;
mod cpu;
pub mod flags;
mod load_store;
mod misc;
mod registers;
mod stack;
mod table;

pub use addressing::Mode;
pub use cpu::Wdc65816;
pub use flags::Status;
pub use registers::Registers;
pub use table::{Cost, Instruction, OPCODES, Op};

/// Interrupt vector locations in bank 0.
pub mod vectors {
    pub const NATIVE_COP: u16 = 0xFFE4;
    pub const NATIVE_BRK: u16 = 0xFFE6;
    pub const NATIVE_NMI: u16 = 0xFFEA;
    pub const NATIVE_IRQ: u16 = 0xFFEE;
    pub const EMULATION_COP: u16 = 0xFFF4;
    pub const EMULATION_NMI: u16 = 0xFFFA;
    pub const RESET: u16 = 0xFFFC;
    /// Shared by IRQ and BRK in emulation mode.
    pub const EMULATION_IRQ: u16 = 0xFFFE;
}
