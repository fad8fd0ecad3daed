//! Processor status register.

/// Carry.
pub const C: u8 = 0x01;
/// Zero.
pub const Z: u8 = 0x02;
/// IRQ disable.
pub const I: u8 = 0x04;
/// Decimal mode.
pub const D: u8 = 0x08;
/// Index width: set = 8-bit X/Y. Reads as the break bit in emulation mode.
pub const X: u8 = 0x10;
/// Accumulator width: set = 8-bit A. Always set in emulation mode.
pub const M: u8 = 0x20;
/// Overflow.
pub const V: u8 = 0x40;
/// Negative.
pub const N: u8 = 0x80;

/// The P register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status(pub u8);

impl Status {
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// N and Z from an 8-bit result.
    pub fn update_nz8(&mut self, value: u8) {
        self.set_if(Z, value == 0);
        self.set_if(N, value & 0x80 != 0);
    }

    /// N and Z from a 16-bit result.
    pub fn update_nz16(&mut self, value: u16) {
        self.set_if(Z, value == 0);
        self.set_if(N, value & 0x8000 != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nz_follows_width() {
        let mut p = Status::default();
        p.update_nz8(0x80);
        assert!(p.is_set(N));
        assert!(!p.is_set(Z));

        p.update_nz16(0x0080);
        assert!(!p.is_set(N));

        p.update_nz16(0x0000);
        assert!(p.is_set(Z));
    }

    #[test]
    fn set_if_clears() {
        let mut p = Status(0xFF);
        p.set_if(M, false);
        assert_eq!(p.0, 0xDF);
    }
}
