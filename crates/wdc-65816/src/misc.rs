//! Mode switches and block moves.

use emu_core::Bus;

use crate::Wdc65816;
use crate::flags::C;

impl Wdc65816 {
    /// Clear the P bits set in the operand. M and X survive in emulation.
    pub(crate) fn op_rep(&mut self) {
        self.regs.p.clear(self.fetched.operand as u8);
        self.regs.update_widths();
    }

    pub(crate) fn op_sep(&mut self) {
        self.regs.p.set(self.fetched.operand as u8);
        self.regs.update_widths();
    }

    /// Exchange carry and emulation.
    pub(crate) fn op_xce(&mut self) {
        let carry = self.regs.p.is_set(C);
        self.regs.p.set_if(C, self.regs.e);
        self.regs.e = carry;
        self.regs.update_widths();
    }

    /// MVN (`step` = 1) / MVP (`step` = -1).
    ///
    /// The operand's low byte is the destination bank and its high byte the
    /// source bank. Copies C + 1 bytes from source:X to destination:Y,
    /// stepping X and Y at index width, and leaves C at $FFFF and DBR at
    /// the destination bank.
    pub(crate) fn block_move<B: Bus>(&mut self, bus: &mut B, step: i16) {
        let [destination, source] = self.fetched.operand.to_le_bytes();
        self.regs.dbr = destination;
        let mut moved = 0;
        loop {
            let value = bus.read8(source, self.regs.x);
            bus.write8(destination, self.regs.y, value);
            self.regs.set_x(self.regs.x.wrapping_add_signed(step));
            self.regs.set_y(self.regs.y.wrapping_add_signed(step));
            moved += 1;
            self.regs.c = self.regs.c.wrapping_sub(1);
            if self.regs.c == 0xFFFF {
                break;
            }
        }
        self.fetched.bytes_moved = moved;
    }
}
