//! Loads, stores and register transfers.
//!
//! Transfers take the destination's width: TAX with 16-bit index registers
//! copies all of C even when the accumulator is 8-bit.

use emu_core::Bus;

use crate::Wdc65816;

impl Wdc65816 {
    pub(crate) fn op_lda<B: Bus>(&mut self, bus: &mut B) {
        let value = self.load_m(bus);
        self.set_nz(value, !self.regs.acc8());
        self.regs.set_acc(value);
    }

    pub(crate) fn op_ldx<B: Bus>(&mut self, bus: &mut B) {
        let value = self.load_x(bus);
        self.regs.set_x(value);
        self.set_nz(value, !self.regs.idx8());
    }

    pub(crate) fn op_ldy<B: Bus>(&mut self, bus: &mut B) {
        let value = self.load_x(bus);
        self.regs.set_y(value);
        self.set_nz(value, !self.regs.idx8());
    }

    pub(crate) fn op_sta<B: Bus>(&mut self, bus: &mut B) {
        let value = self.regs.acc();
        self.store_m(bus, value);
    }

    pub(crate) fn op_stx<B: Bus>(&mut self, bus: &mut B) {
        let value = self.regs.x;
        self.store_x(bus, value);
    }

    pub(crate) fn op_sty<B: Bus>(&mut self, bus: &mut B) {
        let value = self.regs.y;
        self.store_x(bus, value);
    }

    pub(crate) fn op_stz<B: Bus>(&mut self, bus: &mut B) {
        self.store_m(bus, 0);
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    fn nz_index(&mut self, value: u16) {
        self.set_nz(value, !self.regs.idx8());
    }

    fn nz_acc(&mut self) {
        let value = self.regs.acc();
        self.set_nz(value, !self.regs.acc8());
    }

    pub(crate) fn op_tax(&mut self) {
        self.regs.set_x(self.regs.c);
        self.nz_index(self.regs.x);
    }

    pub(crate) fn op_tay(&mut self) {
        self.regs.set_y(self.regs.c);
        self.nz_index(self.regs.y);
    }

    pub(crate) fn op_txa(&mut self) {
        self.regs.set_acc(self.regs.x);
        self.nz_acc();
    }

    pub(crate) fn op_tya(&mut self) {
        self.regs.set_acc(self.regs.y);
        self.nz_acc();
    }

    pub(crate) fn op_txy(&mut self) {
        self.regs.set_y(self.regs.x);
        self.nz_index(self.regs.y);
    }

    pub(crate) fn op_tyx(&mut self) {
        self.regs.set_x(self.regs.y);
        self.nz_index(self.regs.x);
    }

    pub(crate) fn op_tsx(&mut self) {
        self.regs.set_x(self.regs.s);
        self.nz_index(self.regs.x);
    }

    /// No flags.
    pub(crate) fn op_txs(&mut self) {
        self.regs.set_s(self.regs.x);
    }

    pub(crate) fn op_tcd(&mut self) {
        self.regs.d = self.regs.c;
        self.regs.p.update_nz16(self.regs.d);
    }

    pub(crate) fn op_tdc(&mut self) {
        self.regs.c = self.regs.d;
        self.regs.p.update_nz16(self.regs.c);
    }

    /// No flags.
    pub(crate) fn op_tcs(&mut self) {
        self.regs.set_s(self.regs.c);
    }

    pub(crate) fn op_tsc(&mut self) {
        self.regs.c = self.regs.s;
        self.regs.p.update_nz16(self.regs.c);
    }

    /// Swap A and B. Flags always come from the new A.
    pub(crate) fn op_xba(&mut self) {
        self.regs.c = self.regs.c.swap_bytes();
        self.regs.p.update_nz8(self.regs.a());
    }
}
