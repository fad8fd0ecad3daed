//! Branches, jumps, subroutine calls and interrupt entry.

use emu_core::{Bus, bank_of, offset_of};

use crate::Wdc65816;
use crate::flags::{D, I, X};
use crate::vectors;

impl Wdc65816 {
    // =========================================================================
    // Branches
    // =========================================================================

    /// Relative branch. The displacement is from the already-advanced PC
    /// and never leaves bank K.
    pub(crate) fn branch_if(&mut self, condition: bool) {
        if condition {
            let displacement = i16::from(self.fetched.operand as u8 as i8);
            self.regs.pc = self.regs.pc.wrapping_add_signed(displacement);
            self.fetched.branch_taken = true;
        }
    }

    pub(crate) fn op_brl(&mut self) {
        self.regs.pc = self.regs.pc.wrapping_add(self.fetched.operand);
    }

    // =========================================================================
    // Jumps and calls
    // =========================================================================

    pub(crate) fn op_jmp(&mut self) {
        self.regs.pc = offset_of(self.fetched.jump);
    }

    pub(crate) fn op_jml(&mut self) {
        self.regs.k = bank_of(self.fetched.jump);
        self.regs.pc = offset_of(self.fetched.jump);
    }

    /// Pushes the address of the call's last byte.
    pub(crate) fn op_jsr<B: Bus>(&mut self, bus: &mut B) {
        let ret = self.regs.pc.wrapping_sub(1);
        self.push16(bus, ret);
        self.regs.pc = offset_of(self.fetched.jump);
    }

    pub(crate) fn op_jsl<B: Bus>(&mut self, bus: &mut B) {
        let ret = self.regs.pc.wrapping_sub(1);
        self.push8(bus, self.regs.k);
        self.push16(bus, ret);
        self.op_jml();
    }

    pub(crate) fn op_rts<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pull16(bus).wrapping_add(1);
    }

    pub(crate) fn op_rtl<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pull16(bus).wrapping_add(1);
        self.regs.k = self.pull8(bus);
    }

    /// K is only on the stack in native mode.
    pub(crate) fn op_rti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.p.0 = self.pull8(bus);
        self.regs.update_widths();
        self.regs.pc = self.pull16(bus);
        if !self.regs.e {
            self.regs.k = self.pull8(bus);
        }
    }

    // =========================================================================
    // Interrupts
    // =========================================================================

    /// Push K (native only), PC and `status`, leave decimal mode and enter
    /// bank 0.
    fn push_interrupt_frame<B: Bus>(&mut self, bus: &mut B, status: u8) {
        if !self.regs.e {
            self.push8(bus, self.regs.k);
        }
        self.push16(bus, self.regs.pc);
        self.push8(bus, status);
        self.regs.p.clear(D);
        self.regs.k = 0;
    }

    /// Software interrupt entry. BRK and COP leave IRQs unmasked.
    fn software_interrupt<B: Bus>(&mut self, bus: &mut B) {
        let status = self.regs.p.0;
        self.push_interrupt_frame(bus, status);
        self.regs.p.clear(I);
        self.regs.dbr = 0;
    }

    pub(crate) fn op_brk<B: Bus>(&mut self, bus: &mut B) {
        self.software_interrupt(bus);
        self.regs.pc = if self.regs.e {
            bus.read16_bank0(vectors::EMULATION_IRQ)
        } else {
            bus.brk_vector()
        };
    }

    pub(crate) fn op_cop<B: Bus>(&mut self, bus: &mut B) {
        self.software_interrupt(bus);
        self.regs.pc = if self.regs.e {
            bus.read16_bank0(vectors::EMULATION_COP)
        } else {
            bus.cop_vector()
        };
    }

    /// IRQ/NMI entry. Returns the cycles it costs.
    ///
    /// In emulation mode the pushed status has the break bit clear, which is
    /// how a handler sharing $FFFE tells an IRQ from a BRK.
    pub(crate) fn hardware_interrupt<B: Bus>(&mut self, bus: &mut B, native: u16, emulation: u16) -> u32 {
        let status = if self.regs.e {
            self.regs.p.0 & !X
        } else {
            self.regs.p.0
        };
        self.push_interrupt_frame(bus, status);
        self.regs.p.set(I);
        let vector = if self.regs.e { emulation } else { native };
        self.regs.pc = bus.read16_bank0(vector);
        if self.regs.e { 7 } else { 8 }
    }
}
