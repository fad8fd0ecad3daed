//! Core traits and types for the 65816 emulation crates.
//!
//! The CPU never owns memory. Whoever owns the address space lends it to
//! the CPU for the duration of each `clock()` call through the [`Bus`]
//! trait, and every component exposes its state through [`Observable`].

mod bus;
mod cpu;
mod observable;

pub use bus::{BRK_VECTOR, Bus, COP_VECTOR, FlatBus, RESET_VECTOR, bank_of, long_address, offset_of};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
