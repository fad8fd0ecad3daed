//! Banked 24-bit memory interface.

/// Bank-0 location of the native reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Bank-0 location of the native BRK vector.
pub const BRK_VECTOR: u16 = 0xFFE6;
/// Bank-0 location of the native COP vector.
pub const COP_VECTOR: u16 = 0xFFE4;

/// Combine a bank and an in-bank offset into a 24-bit address.
#[must_use]
pub const fn long_address(bank: u8, addr: u16) -> u32 {
    ((bank as u32) << 16) | addr as u32
}

/// Bank byte of a 24-bit address.
#[must_use]
pub const fn bank_of(address: u32) -> u8 {
    (address >> 16) as u8
}

/// In-bank offset of a 24-bit address.
#[must_use]
pub const fn offset_of(address: u32) -> u16 {
    address as u16
}

/// Bank-addressed memory bus.
///
/// Every access names a bank and a 16-bit offset. Implementations apply
/// whatever address decoding (mirroring, register windows) the machine
/// needs. Accesses never fail: unmapped reads return whatever the backing
/// store holds and unmapped writes are absorbed.
///
/// Only `read8` and `write8` are required. The wider accessors default to
/// byte-wise access stepping linearly through the 24-bit space; machines
/// with mirroring override them.
pub trait Bus {
    /// Read a byte.
    fn read8(&mut self, bank: u8, addr: u16) -> u8;

    /// Write a byte.
    fn write8(&mut self, bank: u8, addr: u16, value: u8);

    /// Read a little-endian word. The second byte follows the first in the
    /// 24-bit space, so offset `0xFFFF` continues into the next bank.
    fn read16(&mut self, bank: u8, addr: u16) -> u16 {
        let next = long_address(bank, addr).wrapping_add(1) & 0x00FF_FFFF;
        let lo = self.read8(bank, addr);
        let hi = self.read8(bank_of(next), offset_of(next));
        u16::from_le_bytes([lo, hi])
    }

    /// Read a little-endian 24-bit value.
    fn read24(&mut self, bank: u8, addr: u16) -> u32 {
        let next = long_address(bank, addr).wrapping_add(2) & 0x00FF_FFFF;
        let lo = u32::from(self.read16(bank, addr));
        let hi = u32::from(self.read8(bank_of(next), offset_of(next)));
        lo | (hi << 16)
    }

    /// Write a little-endian word.
    ///
    /// With `wrap` set the high byte goes to `addr + 1` within the same
    /// bank (direct-page and stack semantics). Otherwise it follows the low
    /// byte linearly, crossing into the next bank.
    fn write16(&mut self, bank: u8, addr: u16, value: u16, wrap: bool) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(bank, addr, lo);
        if wrap {
            self.write8(bank, addr.wrapping_add(1), hi);
        } else {
            let next = long_address(bank, addr).wrapping_add(1) & 0x00FF_FFFF;
            self.write8(bank_of(next), offset_of(next), hi);
        }
    }

    fn read8_bank0(&mut self, addr: u16) -> u8 {
        self.read8(0, addr)
    }

    fn read16_bank0(&mut self, addr: u16) -> u16 {
        self.read16(0, addr)
    }

    fn read24_bank0(&mut self, addr: u16) -> u32 {
        self.read24(0, addr)
    }

    /// Read the byte at `bank:pc` and advance `pc`, wrapping inside the bank.
    fn read_rom8(&mut self, bank: u8, pc: &mut u16) -> u8 {
        let value = self.read8(bank, *pc);
        *pc = pc.wrapping_add(1);
        value
    }

    /// Instruction-stream word. Each byte is decoded separately.
    fn read_rom16(&mut self, bank: u8, pc: &mut u16) -> u16 {
        let lo = self.read_rom8(bank, pc);
        let hi = self.read_rom8(bank, pc);
        u16::from_le_bytes([lo, hi])
    }

    /// Instruction-stream 24-bit value (little-endian, bank byte last).
    fn read_rom24(&mut self, bank: u8, pc: &mut u16) -> u32 {
        let lo = u32::from(self.read_rom16(bank, pc));
        let hi = u32::from(self.read_rom8(bank, pc));
        lo | (hi << 16)
    }

    /// Initial program counter. Machines may override this to force a
    /// start address.
    fn reset_vector(&mut self) -> u16 {
        self.read16_bank0(RESET_VECTOR)
    }

    fn brk_vector(&mut self) -> u16 {
        self.read16_bank0(BRK_VECTOR)
    }

    fn cop_vector(&mut self) -> u16 {
        self.read16_bank0(COP_VECTOR)
    }
}

/// Flat 16 MiB bus with no address decoding.
///
/// Useful for exercising a CPU in isolation: every bank/offset pair is its
/// own byte.
pub struct FlatBus {
    memory: Vec<u8>,
}

impl FlatBus {
    pub const SIZE: usize = 0x0100_0000;

    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: vec![0; Self::SIZE],
        }
    }

    /// Copy `data` in starting at a 24-bit address. Bytes past the end of
    /// the address space are dropped.
    pub fn load(&mut self, address: u32, data: &[u8]) {
        let start = (address & 0x00FF_FFFF) as usize;
        let end = (start + data.len()).min(Self::SIZE);
        self.memory[start..end].copy_from_slice(&data[..end - start]);
    }

    /// Inspect a byte without side effects.
    #[must_use]
    pub fn peek(&self, address: u32) -> u8 {
        self.memory[(address & 0x00FF_FFFF) as usize]
    }

    pub fn poke(&mut self, address: u32, value: u8) {
        self.memory[(address & 0x00FF_FFFF) as usize] = value;
    }
}

impl Default for FlatBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FlatBus {
    fn read8(&mut self, bank: u8, addr: u16) -> u8 {
        self.memory[long_address(bank, addr) as usize]
    }

    fn write8(&mut self, bank: u8, addr: u16, value: u8) {
        self.memory[long_address(bank, addr) as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read16_crosses_into_next_bank() {
        let mut bus = FlatBus::new();
        bus.poke(0x01_FFFF, 0x34);
        bus.poke(0x02_0000, 0x12);
        assert_eq!(bus.read16(0x01, 0xFFFF), 0x1234);
    }

    #[test]
    fn wrapped_write16_stays_in_bank() {
        let mut bus = FlatBus::new();
        bus.write16(0x00, 0xFFFF, 0xBEEF, true);
        assert_eq!(bus.peek(0x00_FFFF), 0xEF);
        assert_eq!(bus.peek(0x00_0000), 0xBE);
        assert_eq!(bus.peek(0x01_0000), 0x00);
    }

    #[test]
    fn linear_write16_carries_into_next_bank() {
        let mut bus = FlatBus::new();
        bus.write16(0x00, 0xFFFF, 0xBEEF, false);
        assert_eq!(bus.peek(0x01_0000), 0xBE);
        assert_eq!(bus.peek(0x00_0000), 0x00);
    }

    #[test]
    fn rom_reads_wrap_pc_inside_bank() {
        let mut bus = FlatBus::new();
        bus.load(0x05_FFFE, &[0x11, 0x22]);
        bus.poke(0x05_0000, 0x33);
        let mut pc = 0xFFFE;
        assert_eq!(bus.read_rom24(0x05, &mut pc), 0x33_2211);
        assert_eq!(pc, 0x0001);
    }

    #[test]
    fn vectors_read_from_bank_zero() {
        let mut bus = FlatBus::new();
        bus.load(0x00_FFE4, &[0x00, 0x90, 0x00, 0xA0]);
        bus.load(0x00_FFFC, &[0x00, 0x80]);
        assert_eq!(bus.cop_vector(), 0x9000);
        assert_eq!(bus.brk_vector(), 0xA000);
        assert_eq!(bus.reset_vector(), 0x8000);
    }

    #[test]
    fn bank_zero_reads_ignore_other_banks() {
        let mut bus = FlatBus::new();
        bus.load(0x00_1000, &[0x56, 0x34, 0x12]);
        bus.load(0x01_1000, &[0xFF, 0xFF, 0xFF]);
        assert_eq!(bus.read8_bank0(0x1000), 0x56);
        assert_eq!(bus.read16_bank0(0x1000), 0x3456);
        assert_eq!(bus.read24_bank0(0x1000), 0x12_3456);
    }

    #[test]
    fn long_address_helpers() {
        let address = long_address(0x7E, 0x1234);
        assert_eq!(address, 0x7E_1234);
        assert_eq!(bank_of(address), 0x7E);
        assert_eq!(offset_of(address), 0x1234);
    }
}
