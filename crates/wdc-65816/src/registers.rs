//! 65C816 register file.

use emu_core::long_address;

use crate::Status;
use crate::flags::{I, M, X};

/// 65C816 register set.
///
/// Each register is one integer; the 8-bit views (A/B, XL, YL, DL) are
/// accessors over it, so a write through one view is always visible through
/// the other.
///
/// - C: 16-bit accumulator (A = low byte, B = high byte)
/// - X, Y: index registers, high byte forced to zero in 8-bit index mode
/// - D: direct page base
/// - S: stack pointer, bank 0, high byte pinned to $01 in emulation mode
/// - DBR: data bank for absolute and indirect data accesses
/// - K:PC: 24-bit program address
/// - P: status; E: emulation bit (exchanged with carry by XCE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub c: u16,
    pub x: u16,
    pub y: u16,
    pub d: u16,
    pub s: u16,
    pub pc: u16,
    pub dbr: u8,
    pub k: u8,
    pub p: Status,
    pub e: bool,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Power-on state: emulation mode, 8-bit widths, IRQs masked, stack at
    /// $01FF. PC is filled in from the reset vector by `init()`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            c: 0,
            x: 0,
            y: 0,
            d: 0,
            s: 0x01FF,
            pc: 0,
            dbr: 0,
            k: 0,
            p: Status(M | X | I),
            e: true,
        }
    }

    /// Accumulator is 8 bits wide.
    #[must_use]
    pub const fn acc8(&self) -> bool {
        self.p.is_set(M)
    }

    /// Index registers are 8 bits wide.
    #[must_use]
    pub const fn idx8(&self) -> bool {
        self.p.is_set(X)
    }

    #[must_use]
    pub const fn a(&self) -> u8 {
        self.c as u8
    }

    pub fn set_a(&mut self, value: u8) {
        self.c = (self.c & 0xFF00) | u16::from(value);
    }

    #[must_use]
    pub const fn b(&self) -> u8 {
        (self.c >> 8) as u8
    }

    #[must_use]
    pub const fn xl(&self) -> u8 {
        self.x as u8
    }

    #[must_use]
    pub const fn yl(&self) -> u8 {
        self.y as u8
    }

    /// Low byte of the direct page register.
    #[must_use]
    pub const fn dl(&self) -> u8 {
        self.d as u8
    }

    /// Accumulator at the current width.
    #[must_use]
    pub const fn acc(&self) -> u16 {
        if self.acc8() { self.c & 0x00FF } else { self.c }
    }

    /// Write the accumulator at the current width. In 8-bit mode B is left
    /// untouched.
    pub fn set_acc(&mut self, value: u16) {
        if self.acc8() {
            self.set_a(value as u8);
        } else {
            self.c = value;
        }
    }

    /// Write an index register at the current width.
    pub fn set_x(&mut self, value: u16) {
        self.x = if self.idx8() { value & 0x00FF } else { value };
    }

    pub fn set_y(&mut self, value: u16) {
        self.y = if self.idx8() { value & 0x00FF } else { value };
    }

    /// Stack pointer write honouring the emulation-mode page-one pin.
    pub fn set_s(&mut self, value: u16) {
        self.s = if self.e {
            0x0100 | (value & 0x00FF)
        } else {
            value
        };
    }

    /// 24-bit program address.
    #[must_use]
    pub const fn program_address(&self) -> u32 {
        long_address(self.k, self.pc)
    }

    /// Re-derive everything that depends on E, M and X.
    ///
    /// Emulation forces 8-bit widths and the page-one stack; 8-bit index
    /// mode clears the high bytes of X and Y. The accumulator's high byte
    /// is never touched.
    pub fn update_widths(&mut self) {
        if self.e {
            self.p.set(M | X);
            self.s = 0x0100 | (self.s & 0x00FF);
        }
        if self.idx8() {
            self.x &= 0x00FF;
            self.y &= 0x00FF;
        }
    }
}
