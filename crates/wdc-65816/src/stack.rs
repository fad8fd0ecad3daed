//! Stack primitives and push/pull instructions.
//!
//! The stack lives in bank 0. S points at the next free byte; in emulation
//! mode it stays inside page one.

use emu_core::{Bus, offset_of};

use crate::Wdc65816;
use crate::addressing::read_direct16;

impl Wdc65816 {
    pub(crate) fn push8<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.write8(0, self.regs.s, value);
        self.regs.set_s(self.regs.s.wrapping_sub(1));
    }

    /// High byte first, so the word reads back little-endian.
    pub(crate) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push8(bus, hi);
        self.push8(bus, lo);
    }

    pub(crate) fn pull8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.set_s(self.regs.s.wrapping_add(1));
        bus.read8(0, self.regs.s)
    }

    pub(crate) fn pull16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pull8(bus);
        let hi = self.pull8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Push at 8 or 16 bits.
    fn push_sized<B: Bus>(&mut self, bus: &mut B, value: u16, wide: bool) {
        if wide {
            self.push16(bus, value);
        } else {
            self.push8(bus, value as u8);
        }
    }

    fn pull_sized<B: Bus>(&mut self, bus: &mut B, wide: bool) -> u16 {
        if wide {
            self.pull16(bus)
        } else {
            u16::from(self.pull8(bus))
        }
    }

    // =========================================================================
    // Register pushes and pulls
    // =========================================================================

    pub(crate) fn op_pha<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.acc8();
        self.push_sized(bus, self.regs.c, wide);
    }

    pub(crate) fn op_phx<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.idx8();
        self.push_sized(bus, self.regs.x, wide);
    }

    pub(crate) fn op_phy<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.idx8();
        self.push_sized(bus, self.regs.y, wide);
    }

    pub(crate) fn op_pla<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.acc8();
        let value = self.pull_sized(bus, wide);
        self.regs.set_acc(value);
        self.set_nz(value, wide);
    }

    pub(crate) fn op_plx<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.idx8();
        let value = self.pull_sized(bus, wide);
        self.regs.set_x(value);
        self.set_nz(value, wide);
    }

    pub(crate) fn op_ply<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.idx8();
        let value = self.pull_sized(bus, wide);
        self.regs.set_y(value);
        self.set_nz(value, wide);
    }

    /// In emulation mode bits 4 and 5 are always set, so the pushed byte
    /// carries the break flag.
    pub(crate) fn op_php<B: Bus>(&mut self, bus: &mut B) {
        self.push8(bus, self.regs.p.0);
    }

    pub(crate) fn op_plp<B: Bus>(&mut self, bus: &mut B) {
        self.regs.p.0 = self.pull8(bus);
        self.regs.update_widths();
    }

    pub(crate) fn op_phb<B: Bus>(&mut self, bus: &mut B) {
        self.push8(bus, self.regs.dbr);
    }

    pub(crate) fn op_plb<B: Bus>(&mut self, bus: &mut B) {
        self.regs.dbr = self.pull8(bus);
        self.regs.p.update_nz8(self.regs.dbr);
    }

    pub(crate) fn op_phd<B: Bus>(&mut self, bus: &mut B) {
        self.push16(bus, self.regs.d);
    }

    pub(crate) fn op_pld<B: Bus>(&mut self, bus: &mut B) {
        self.regs.d = self.pull16(bus);
        self.regs.p.update_nz16(self.regs.d);
    }

    pub(crate) fn op_phk<B: Bus>(&mut self, bus: &mut B) {
        self.push8(bus, self.regs.k);
    }

    // =========================================================================
    // Effective-address pushes
    // =========================================================================

    pub(crate) fn op_pea<B: Bus>(&mut self, bus: &mut B) {
        self.push16(bus, self.fetched.operand);
    }

    /// Push the word stored at a direct-page address.
    pub(crate) fn op_pei<B: Bus>(&mut self, bus: &mut B) {
        let value = read_direct16(bus, offset_of(self.fetched.address));
        self.fetched.operand = value;
        self.push16(bus, value);
    }

    /// Push PC plus a 16-bit displacement.
    pub(crate) fn op_per<B: Bus>(&mut self, bus: &mut B) {
        let value = self.regs.pc.wrapping_add(self.fetched.operand);
        self.push16(bus, value);
    }
}
