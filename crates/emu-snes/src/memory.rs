//! The 24-bit SNES address space.
//!
//! Every access goes through [`mirror`] first. Decoding rules, applied in
//! order (a later match overrides an earlier one):
//!
//! | Bank | Offset | Goes to |
//! |------|--------|---------|
//! | $00-$3F, $80-$BF | $0000-$1FFF | $7E (low work RAM) |
//! | $00-$7D | $8000-$FFFF | bank + $80 (ROM) |
//! | $00-$3F, $80-$BF | $2100-$21FF | $00 (PPU registers) |
//! | $00-$3F, $80-$BF | $4200-$43FF | $00 (CPU registers) |
//!
//! Wide accesses step through the requested 24-bit address and decode every
//! byte, so a word read always agrees with two byte reads. A word at
//! `$00:7FFF` takes its low byte from `$00:7FFF` and its high byte from ROM
//! at `$80:8000`; one at `$7E:FFFF` ends in `$7F:0000`. Wrapped word writes
//! keep the second byte in the requested bank.

use emu_core::{Bus, RESET_VECTOR, long_address};

const SIZE: usize = 0x0100_0000;
const ADDRESS_MASK: u32 = 0x00FF_FFFF;

/// True for the banks that see low RAM and the I/O windows.
const fn is_system_bank(bank: u8) -> bool {
    matches!(bank, 0x00..=0x3F | 0x80..=0xBF)
}

/// Apply the LoROM decoding rules to a bank/offset pair.
#[must_use]
pub const fn mirror(bank: u8, addr: u16) -> (u8, u16) {
    let system = is_system_bank(bank);
    let mut target = bank;
    if system && addr < 0x2000 {
        target = 0x7E;
    }
    if addr >= 0x8000 && bank <= 0x7D {
        target = bank + 0x80;
    }
    if system && matches!(addr, 0x2100..=0x21FF | 0x4200..=0x43FF) {
        target = 0x00;
    }
    (target, addr)
}

/// Flat index of a decoded access.
const fn index(bank: u8, addr: u16) -> usize {
    let (bank, addr) = mirror(bank, addr);
    long_address(bank, addr) as usize
}

/// 16 MiB of banked memory behind the LoROM mirroring rules.
pub struct SnesMemory {
    data: Box<[u8]>,
    reset_vector: Option<u16>,
}

impl SnesMemory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: vec![0; SIZE].into_boxed_slice(),
            reset_vector: None,
        }
    }

    /// Copy `bytes` into the flat store starting at a 24-bit address,
    /// bypassing decoding. Bytes past `$FF:FFFF` are dropped.
    pub fn load(&mut self, address: u32, bytes: &[u8]) {
        let start = (address & ADDRESS_MASK) as usize;
        let end = (start + bytes.len()).min(SIZE);
        self.data[start..end].copy_from_slice(&bytes[..end - start]);
    }

    /// Decoded read with no side effects.
    #[must_use]
    pub fn peek(&self, bank: u8, addr: u16) -> u8 {
        self.data[index(bank, addr)]
    }

    /// Raw read of the flat store, no decoding.
    #[must_use]
    pub fn peek_flat(&self, address: u32) -> u8 {
        self.data[(address & ADDRESS_MASK) as usize]
    }

    /// Force the value [`Bus::reset_vector`] reports. `None` goes back to
    /// reading `$00:FFFC`.
    pub fn set_reset_vector_override(&mut self, vector: Option<u16>) {
        self.reset_vector = vector;
    }

    #[must_use]
    pub fn reset_vector_override(&self) -> Option<u16> {
        self.reset_vector
    }
}

impl Default for SnesMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SnesMemory {
    fn read8(&mut self, bank: u8, addr: u16) -> u8 {
        self.data[index(bank, addr)]
    }

    fn write8(&mut self, bank: u8, addr: u16, value: u8) {
        self.data[index(bank, addr)] = value;
    }

    fn reset_vector(&mut self) -> u16 {
        match self.reset_vector {
            Some(vector) => vector,
            None => self.read16_bank0(RESET_VECTOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::{bank_of, offset_of};
    use proptest::prelude::*;

    #[test]
    fn low_ram_mirrors_into_bank_7e() {
        assert_eq!(mirror(0x00, 0x0000), (0x7E, 0x0000));
        assert_eq!(mirror(0x3F, 0x1FFF), (0x7E, 0x1FFF));
        assert_eq!(mirror(0x80, 0x1234), (0x7E, 0x1234));
        assert_eq!(mirror(0xBF, 0x0100), (0x7E, 0x0100));
        assert_eq!(mirror(0x40, 0x1000), (0x40, 0x1000));
        assert_eq!(mirror(0xC0, 0x1000), (0xC0, 0x1000));
    }

    #[test]
    fn upper_half_of_low_banks_is_rom() {
        assert_eq!(mirror(0x00, 0x8000), (0x80, 0x8000));
        assert_eq!(mirror(0x45, 0xFFFF), (0xC5, 0xFFFF));
        assert_eq!(mirror(0x7D, 0x9000), (0xFD, 0x9000));
        assert_eq!(mirror(0x7E, 0x9000), (0x7E, 0x9000));
        assert_eq!(mirror(0x7F, 0x9000), (0x7F, 0x9000));
        assert_eq!(mirror(0x80, 0x8000), (0x80, 0x8000));
    }

    #[test]
    fn io_windows_fold_to_bank_zero() {
        assert_eq!(mirror(0x12, 0x2100), (0x00, 0x2100));
        assert_eq!(mirror(0x85, 0x21FF), (0x00, 0x21FF));
        assert_eq!(mirror(0xBF, 0x4200), (0x00, 0x4200));
        assert_eq!(mirror(0x01, 0x43FF), (0x00, 0x43FF));
        assert_eq!(mirror(0x01, 0x2200), (0x01, 0x2200));
        assert_eq!(mirror(0x01, 0x4400), (0x01, 0x4400));
        assert_eq!(mirror(0x40, 0x2100), (0x40, 0x2100));
    }

    #[test]
    fn writes_are_visible_through_every_mirror() {
        let mut memory = SnesMemory::new();
        memory.write8(0x00, 0x0042, 0x99);
        assert_eq!(memory.read8(0x7E, 0x0042), 0x99);
        assert_eq!(memory.read8(0x3F, 0x0042), 0x99);
        assert_eq!(memory.read8(0x9A, 0x0042), 0x99);
        assert_eq!(memory.peek_flat(0x7E_0042), 0x99);
    }

    #[test]
    fn word_read_matches_byte_reads_across_low_ram_edge() {
        let mut memory = SnesMemory::new();
        memory.write8(0x00, 0x1FFF, 0xCD);
        memory.write8(0x00, 0x2000, 0xAB);
        let lo = memory.read8(0x00, 0x1FFF);
        let hi = memory.read8(0x00, 0x2000);
        assert_eq!(memory.read16(0x00, 0x1FFF), u16::from_le_bytes([lo, hi]));
        assert_eq!(memory.read16(0x00, 0x1FFF), 0xABCD);
    }

    #[test]
    fn word_read_matches_byte_reads_across_rom_edge() {
        let mut memory = SnesMemory::new();
        memory.write8(0x00, 0x7FFF, 0x34);
        memory.load(0x80_8000, &[0x5A, 0x12]);
        assert_eq!(memory.read16(0x00, 0x7FFF), 0x5A34);
        assert_eq!(memory.read24(0x00, 0x7FFF), 0x0012_5A34);
    }

    #[test]
    fn unwrapped_word_write_decodes_high_byte() {
        let mut memory = SnesMemory::new();
        memory.write16(0x00, 0x7FFF, 0xBEEF, false);
        assert_eq!(memory.read8(0x00, 0x7FFF), 0xEF);
        assert_eq!(memory.read8(0x00, 0x8000), 0xBE);
        assert_eq!(memory.peek_flat(0x80_8000), 0xBE);
        assert_eq!(memory.peek_flat(0x00_8000), 0x00);
    }

    #[test]
    fn bank_zero_long_read_is_decoded() {
        let mut memory = SnesMemory::new();
        memory.load(0x80_FFE0, &[0x01, 0x02, 0x03]);
        assert_eq!(memory.read24_bank0(0xFFE0), 0x0003_0201);
    }

    #[test]
    fn wide_read_crosses_into_next_bank() {
        let mut memory = SnesMemory::new();
        memory.load(0x7E_FFFF, &[0xCD, 0xAB]);
        assert_eq!(memory.read16(0x7E, 0xFFFF), 0xABCD);
    }

    #[test]
    fn unwrapped_word_write_crosses_banks() {
        let mut memory = SnesMemory::new();
        memory.write16(0x7E, 0xFFFF, 0xBEEF, false);
        assert_eq!(memory.peek_flat(0x7E_FFFF), 0xEF);
        assert_eq!(memory.peek_flat(0x7F_0000), 0xBE);
    }

    #[test]
    fn wrapped_word_write_stays_in_requested_bank() {
        let mut memory = SnesMemory::new();
        memory.write16(0x00, 0xFFFF, 0xBEEF, true);
        // $00:FFFF decodes to ROM bank $80; $00:0000 decodes to low RAM.
        assert_eq!(memory.peek_flat(0x80_FFFF), 0xEF);
        assert_eq!(memory.peek_flat(0x7E_0000), 0xBE);
        assert_eq!(memory.peek_flat(0x81_0000), 0x00);
        assert_eq!(memory.peek_flat(0x01_0000), 0x00);
    }

    #[test]
    fn rom_relative_reads_decode_each_byte() {
        let mut memory = SnesMemory::new();
        memory.load(0x80_FFFF, &[0x11]);
        memory.load(0x7E_0000, &[0x22]);
        let mut pc = 0xFFFF;
        assert_eq!(memory.read_rom16(0x00, &mut pc), 0x2211);
        assert_eq!(pc, 0x0001);
    }

    #[test]
    fn reset_vector_reads_rom_unless_overridden() {
        let mut memory = SnesMemory::new();
        memory.load(0x80_FFFC, &[0x34, 0x92]);
        assert_eq!(memory.reset_vector(), 0x9234);

        memory.set_reset_vector_override(Some(0x8000));
        assert_eq!(memory.reset_vector(), 0x8000);

        memory.set_reset_vector_override(None);
        assert_eq!(memory.reset_vector(), 0x9234);
    }

    proptest! {
        #[test]
        fn word_read_agrees_with_byte_reads(
            bank in any::<u8>(),
            addr in any::<u16>(),
            lo in any::<u8>(),
            hi in any::<u8>(),
        ) {
            let mut memory = SnesMemory::new();
            let next = long_address(bank, addr).wrapping_add(1) & ADDRESS_MASK;
            let (next_bank, next_addr) = (bank_of(next), offset_of(next));
            memory.write8(next_bank, next_addr, hi);
            memory.write8(bank, addr, lo);
            let expected = u16::from_le_bytes([
                memory.read8(bank, addr),
                memory.read8(next_bank, next_addr),
            ]);
            prop_assert_eq!(memory.read16(bank, addr), expected);
        }

        #[test]
        fn mirroring_never_moves_the_offset(bank in any::<u8>(), addr in any::<u16>()) {
            prop_assert_eq!(mirror(bank, addr).1, addr);
        }

        #[test]
        fn mirroring_is_idempotent(bank in any::<u8>(), addr in any::<u16>()) {
            let once = mirror(bank, addr);
            prop_assert_eq!(mirror(once.0, once.1), once);
        }

        #[test]
        fn high_banks_are_untouched(bank in 0xC0u8..=0xFF, addr in any::<u16>()) {
            prop_assert_eq!(mirror(bank, addr), (bank, addr));
        }

        #[test]
        fn low_ram_is_shared_by_system_banks(
            a in prop_oneof![0x00u8..=0x3F, 0x80u8..=0xBF],
            b in prop_oneof![0x00u8..=0x3F, 0x80u8..=0xBF],
            addr in 0u16..0x2000,
            value in any::<u8>(),
        ) {
            let mut memory = SnesMemory::new();
            memory.write8(a, addr, value);
            prop_assert_eq!(memory.read8(b, addr), value);
        }
    }
}
