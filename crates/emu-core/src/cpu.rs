//! CPU core trait.

use crate::Bus;

/// A CPU core driven one cycle at a time.
///
/// The bus is borrowed per call, never owned, so the machine keeps
/// exclusive ownership of its address space.
pub trait Cpu {
    /// Register snapshot type.
    type Registers;

    /// Put the core in its power-on state and load the program counter
    /// from the bus's reset vector.
    fn init<B: Bus>(&mut self, bus: &mut B);

    /// Advance by one cycle.
    ///
    /// A whole instruction executes on the first cycle of its cost; the
    /// following calls only drain the remaining budget. Returns `false`
    /// when the core refuses to continue.
    fn clock<B: Bus>(&mut self, bus: &mut B) -> bool;

    /// Current 24-bit program address (bank in bits 16..24).
    fn pc(&self) -> u32;

    fn registers(&self) -> Self::Registers;

    /// Cycles left before the next instruction is fetched.
    fn cycles_remaining(&self) -> u32;

    /// True while the core is stopped and only `init()` can restart it.
    fn is_halted(&self) -> bool;

    /// Assert the maskable interrupt line.
    fn irq(&mut self);

    /// Latch a non-maskable interrupt.
    fn nmi(&mut self);
}
