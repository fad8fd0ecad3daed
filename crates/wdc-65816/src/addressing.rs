//! Addressing-mode resolution and operand access.
//!
//! A mode procedure consumes the operand bytes that follow the opcode and
//! leaves either an immediate value, a 24-bit effective address or a jump
//! target in the scratch state. Operations then read or write through
//! [`Wdc65816::load`] and [`Wdc65816::store`] at whatever width they need.

use emu_core::{Bus, bank_of, long_address, offset_of};

use crate::Wdc65816;

/// 65C816 addressing modes, in assembler notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No operand, or the accumulator.
    Implied,
    /// `#const`, one byte with an 8-bit accumulator, two otherwise.
    ImmediateM,
    /// `#const` sized by the index width.
    ImmediateX,
    /// One operand byte: REP/SEP masks, branch displacements, signatures.
    Immediate8,
    /// Two operand bytes: PEA, PER, BRL, block-move bank pairs.
    Immediate16,
    /// `d`
    Direct,
    /// `d,X`
    DirectX,
    /// `d,Y`
    DirectY,
    /// `(d)`
    DirectIndirect,
    /// `[d]`
    DirectIndirectLong,
    /// `(d,X)`
    DirectXIndirect,
    /// `(d),Y`
    DirectIndirectY,
    /// `[d],Y`
    DirectIndirectLongY,
    /// `a`
    Absolute,
    /// `a,X`
    AbsoluteX,
    /// `a,Y`
    AbsoluteY,
    /// `al`
    AbsoluteLong,
    /// `al,X`
    AbsoluteLongX,
    /// `a` as a jump target in bank K (JMP, JSR).
    AbsoluteJump,
    /// `al` as a jump target (JML, JSL).
    AbsoluteLongJump,
    /// `(a)`, pointer in bank 0.
    AbsoluteIndirect,
    /// `[a]`, 24-bit pointer in bank 0.
    AbsoluteIndirectLong,
    /// `(a,X)`, pointer in bank K.
    AbsoluteXIndirect,
    /// `d,S`
    StackRelative,
    /// `(d,S),Y`
    StackRelativeIndirectY,
}

impl Wdc65816 {
    // =========================================================================
    // Instruction stream
    // =========================================================================

    pub(crate) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        bus.read_rom8(self.regs.k, &mut self.regs.pc)
    }

    pub(crate) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        bus.read_rom16(self.regs.k, &mut self.regs.pc)
    }

    pub(crate) fn fetch24<B: Bus>(&mut self, bus: &mut B) -> u32 {
        bus.read_rom24(self.regs.k, &mut self.regs.pc)
    }

    // =========================================================================
    // Mode procedures
    // =========================================================================

    /// Run the procedure for `mode`, consuming its operand bytes.
    pub(crate) fn resolve<B: Bus>(&mut self, mode: Mode, bus: &mut B) {
        match mode {
            Mode::Implied => {}
            Mode::ImmediateM => {
                let operand = if self.regs.acc8() {
                    u16::from(self.fetch8(bus))
                } else {
                    self.fetch16(bus)
                };
                self.immediate(operand);
            }
            Mode::ImmediateX => {
                let operand = if self.regs.idx8() {
                    u16::from(self.fetch8(bus))
                } else {
                    self.fetch16(bus)
                };
                self.immediate(operand);
            }
            Mode::Immediate8 => {
                let operand = u16::from(self.fetch8(bus));
                self.immediate(operand);
            }
            Mode::Immediate16 => {
                let operand = self.fetch16(bus);
                self.immediate(operand);
            }

            Mode::Direct => {
                let addr = self.direct_offset(bus, 0);
                self.direct_target(addr);
            }
            Mode::DirectX => {
                let addr = self.direct_offset(bus, self.index_x());
                self.direct_target(addr);
            }
            Mode::DirectY => {
                let addr = self.direct_offset(bus, self.index_y());
                self.direct_target(addr);
            }
            Mode::DirectIndirect => {
                let pointer_at = self.direct_offset(bus, 0);
                let pointer = read_direct16(bus, pointer_at);
                self.fetched.address = long_address(self.regs.dbr, pointer);
            }
            Mode::DirectXIndirect => {
                let pointer_at = self.direct_offset(bus, self.index_x());
                let pointer = read_direct16(bus, pointer_at);
                self.fetched.address = long_address(self.regs.dbr, pointer);
            }
            Mode::DirectIndirectY => {
                let pointer_at = self.direct_offset(bus, 0);
                let pointer = read_direct16(bus, pointer_at);
                let base = long_address(self.regs.dbr, pointer);
                self.indexed_target(base, self.index_y());
            }
            Mode::DirectIndirectLong => {
                let pointer_at = self.direct_offset(bus, 0);
                self.fetched.address = read_direct24(bus, pointer_at);
            }
            Mode::DirectIndirectLongY => {
                let pointer_at = self.direct_offset(bus, 0);
                let base = read_direct24(bus, pointer_at);
                self.indexed_target(base, self.index_y());
            }

            Mode::Absolute => {
                let addr = self.fetch16(bus);
                self.fetched.address = long_address(self.regs.dbr, addr);
            }
            Mode::AbsoluteX => {
                let base = long_address(self.regs.dbr, self.fetch16(bus));
                self.indexed_target(base, self.index_x());
            }
            Mode::AbsoluteY => {
                let base = long_address(self.regs.dbr, self.fetch16(bus));
                self.indexed_target(base, self.index_y());
            }
            Mode::AbsoluteLong => {
                self.fetched.address = self.fetch24(bus);
            }
            Mode::AbsoluteLongX => {
                let base = self.fetch24(bus);
                self.fetched.address = base.wrapping_add(u32::from(self.index_x())) & 0x00FF_FFFF;
            }

            Mode::AbsoluteJump => {
                let addr = self.fetch16(bus);
                self.fetched.jump = long_address(self.regs.k, addr);
            }
            Mode::AbsoluteLongJump => {
                self.fetched.jump = self.fetch24(bus);
            }
            Mode::AbsoluteIndirect => {
                let pointer_at = self.fetch16(bus);
                let target = read_direct16(bus, pointer_at);
                self.fetched.jump = long_address(self.regs.k, target);
            }
            Mode::AbsoluteIndirectLong => {
                let pointer_at = self.fetch16(bus);
                self.fetched.jump = read_direct24(bus, pointer_at);
            }
            Mode::AbsoluteXIndirect => {
                let pointer_at = self.fetch16(bus).wrapping_add(self.index_x());
                let k = self.regs.k;
                let lo = bus.read8(k, pointer_at);
                let hi = bus.read8(k, pointer_at.wrapping_add(1));
                self.fetched.jump = long_address(k, u16::from_le_bytes([lo, hi]));
            }

            Mode::StackRelative => {
                let offset = u16::from(self.fetch8(bus));
                self.fetched.address = u32::from(self.regs.s.wrapping_add(offset));
                self.fetched.wrap = true;
            }
            Mode::StackRelativeIndirectY => {
                let offset = u16::from(self.fetch8(bus));
                let pointer_at = self.regs.s.wrapping_add(offset);
                let pointer = read_direct16(bus, pointer_at);
                let base = long_address(self.regs.dbr, pointer);
                self.indexed_target(base, self.index_y());
            }
        }
    }

    fn immediate(&mut self, operand: u16) {
        self.fetched.operand = operand;
        self.fetched.immediate = true;
    }

    /// D + operand byte + index, wrapped to bank 0.
    fn direct_offset<B: Bus>(&mut self, bus: &mut B, index: u16) -> u16 {
        let offset = u16::from(self.fetch8(bus));
        self.fetched.direct_unaligned = self.regs.dl() != 0;
        self.regs.d.wrapping_add(offset).wrapping_add(index)
    }

    fn direct_target(&mut self, addr: u16) {
        self.fetched.address = u32::from(addr);
        self.fetched.wrap = true;
    }

    /// Add an index over the full 24 bits, noting a change of bank.
    fn indexed_target(&mut self, base: u32, index: u16) {
        let address = base.wrapping_add(u32::from(index)) & 0x00FF_FFFF;
        self.fetched.boundary_crossed = bank_of(address) != bank_of(base);
        self.fetched.address = address;
    }

    fn index_x(&self) -> u16 {
        if self.regs.idx8() { self.regs.x & 0x00FF } else { self.regs.x }
    }

    fn index_y(&self) -> u16 {
        if self.regs.idx8() { self.regs.y & 0x00FF } else { self.regs.y }
    }

    // =========================================================================
    // Operand access
    // =========================================================================

    /// Read the operand at 8 or 16 bits and remember it.
    pub(crate) fn load<B: Bus>(&mut self, bus: &mut B, wide: bool) -> u16 {
        let value = if self.fetched.immediate {
            self.fetched.operand
        } else {
            let bank = bank_of(self.fetched.address);
            let addr = offset_of(self.fetched.address);
            match (wide, self.fetched.wrap) {
                (false, _) => u16::from(bus.read8(bank, addr)),
                (true, true) => {
                    let lo = bus.read8(bank, addr);
                    let hi = bus.read8(bank, addr.wrapping_add(1));
                    u16::from_le_bytes([lo, hi])
                }
                (true, false) => bus.read16(bank, addr),
            }
        };
        self.fetched.operand = value;
        value
    }

    pub(crate) fn store<B: Bus>(&mut self, bus: &mut B, wide: bool, value: u16) {
        let bank = bank_of(self.fetched.address);
        let addr = offset_of(self.fetched.address);
        if wide {
            bus.write16(bank, addr, value, self.fetched.wrap);
        } else {
            bus.write8(bank, addr, value as u8);
        }
    }

    /// Operand at accumulator width.
    pub(crate) fn load_m<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let wide = !self.regs.acc8();
        self.load(bus, wide)
    }

    pub(crate) fn store_m<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let wide = !self.regs.acc8();
        self.store(bus, wide, value);
    }

    /// Operand at index width.
    pub(crate) fn load_x<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let wide = !self.regs.idx8();
        self.load(bus, wide)
    }

    pub(crate) fn store_x<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let wide = !self.regs.idx8();
        self.store(bus, wide, value);
    }
}

/// Bank-0 pointer read; the second byte wraps within the bank.
pub(crate) fn read_direct16<B: Bus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read8_bank0(addr);
    let hi = bus.read8_bank0(addr.wrapping_add(1));
    u16::from_le_bytes([lo, hi])
}

fn read_direct24<B: Bus>(bus: &mut B, addr: u16) -> u32 {
    let lo = u32::from(read_direct16(bus, addr));
    let bank = u32::from(bus.read8_bank0(addr.wrapping_add(2)));
    lo | (bank << 16)
}

#[cfg(test)]
mod tests {
    use emu_core::FlatBus;

    use crate::Wdc65816;

    use super::Mode;

    fn native_cpu(pc: u16) -> Wdc65816 {
        let mut cpu = Wdc65816::new();
        cpu.regs.e = false;
        cpu.regs.p.0 = 0;
        cpu.regs.pc = pc;
        cpu
    }

    #[test]
    fn direct_page_wraps_in_bank_zero() {
        let mut bus = FlatBus::new();
        bus.load(0x00_8000, &[0x20]);
        let mut cpu = native_cpu(0x8000);
        cpu.regs.d = 0xFFF0;
        cpu.resolve(Mode::Direct, &mut bus);
        assert_eq!(cpu.fetched.address, 0x00_0010);
        assert!(cpu.fetched.wrap);
        assert!(cpu.fetched.direct_unaligned);
        assert_eq!(cpu.regs.pc, 0x8001);
    }

    #[test]
    fn indirect_y_notes_bank_crossing() {
        let mut bus = FlatBus::new();
        bus.load(0x00_8000, &[0x10]);
        bus.load(0x00_0010, &[0xF0, 0xFF]);
        let mut cpu = native_cpu(0x8000);
        cpu.regs.dbr = 0x02;
        cpu.regs.y = 0x0020;
        cpu.resolve(Mode::DirectIndirectY, &mut bus);
        assert_eq!(cpu.fetched.address, 0x03_0010);
        assert!(cpu.fetched.boundary_crossed);
        assert!(!cpu.fetched.direct_unaligned);
    }

    #[test]
    fn long_indirect_reads_three_byte_pointer() {
        let mut bus = FlatBus::new();
        bus.load(0x00_8000, &[0x40]);
        bus.load(0x00_0140, &[0x56, 0x34, 0x12]);
        let mut cpu = native_cpu(0x8000);
        cpu.regs.d = 0x0100;
        cpu.resolve(Mode::DirectIndirectLong, &mut bus);
        assert_eq!(cpu.fetched.address, 0x12_3456);
        assert!(!cpu.fetched.wrap);
    }

    #[test]
    fn indexed_indirect_jump_reads_from_program_bank() {
        let mut bus = FlatBus::new();
        bus.load(0x05_8000, &[0x00, 0x90]);
        bus.load(0x05_9004, &[0x34, 0x12]);
        let mut cpu = native_cpu(0x8000);
        cpu.regs.k = 0x05;
        cpu.regs.x = 0x0004;
        cpu.resolve(Mode::AbsoluteXIndirect, &mut bus);
        assert_eq!(cpu.fetched.jump, 0x05_1234);
    }

    #[test]
    fn stack_relative_indirect_applies_data_bank() {
        let mut bus = FlatBus::new();
        bus.load(0x00_8000, &[0x03]);
        bus.load(0x00_1F03, &[0x00, 0x40]);
        let mut cpu = native_cpu(0x8000);
        cpu.regs.s = 0x1F00;
        cpu.regs.dbr = 0x7E;
        cpu.regs.y = 0x0002;
        cpu.resolve(Mode::StackRelativeIndirectY, &mut bus);
        assert_eq!(cpu.fetched.address, 0x7E_4002);
    }

    #[test]
    fn immediate_width_follows_m() {
        let mut bus = FlatBus::new();
        bus.load(0x00_8000, &[0x34, 0x12]);
        let mut cpu = native_cpu(0x8000);
        cpu.resolve(Mode::ImmediateM, &mut bus);
        assert_eq!(cpu.fetched.operand, 0x1234);
        assert_eq!(cpu.regs.pc, 0x8002);

        let mut cpu = native_cpu(0x8000);
        cpu.regs.p.0 = crate::flags::M;
        cpu.resolve(Mode::ImmediateM, &mut bus);
        assert_eq!(cpu.fetched.operand, 0x34);
        assert_eq!(cpu.regs.pc, 0x8001);
    }
}
