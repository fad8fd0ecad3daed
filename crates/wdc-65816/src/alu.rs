//! Arithmetic, logic, shift and compare operations.

use emu_core::Bus;

use crate::Wdc65816;
use crate::flags::{C, D, N, V, Z};

/// All-ones at the given width.
pub(crate) const fn mask(wide: bool) -> u16 {
    if wide { 0xFFFF } else { 0x00FF }
}

const fn sign_bit(wide: bool) -> u16 {
    if wide { 0x8000 } else { 0x0080 }
}

/// Binary add with carry. Returns (result, carry out, signed overflow).
fn binary_add(a: u16, b: u16, carry: bool, wide: bool) -> (u16, bool, bool) {
    let mask = u32::from(mask(wide));
    let sign = u32::from(sign_bit(wide));
    let a = u32::from(a) & mask;
    let b = u32::from(b) & mask;
    let sum = a + b + u32::from(carry);
    let result = sum & mask;
    let overflow = !(a ^ b) & (a ^ result) & sign != 0;
    (result as u16, sum > mask, overflow)
}

/// Packed-BCD byte add. Overflow is taken before the high-nybble
/// correction, as the 65C816 does.
fn bcd_add8(a: u8, b: u8, carry: bool) -> (u8, bool, bool) {
    let mut lo = u16::from(a & 0x0F) + u16::from(b & 0x0F) + u16::from(carry);
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = u16::from(a >> 4) + u16::from(b >> 4) + u16::from(lo > 0x0F);
    let partial = ((hi << 4) | (lo & 0x0F)) as u8;
    let overflow = !(a ^ b) & (a ^ partial) & 0x80 != 0;
    if hi > 0x09 {
        hi += 0x06;
    }
    (((hi << 4) | (lo & 0x0F)) as u8, hi > 0x0F, overflow)
}

/// Packed-BCD byte subtract; `carry` set means no borrow in.
fn bcd_sub8(a: u8, b: u8, carry: bool) -> (u8, bool, bool) {
    let mut lo = i16::from(a & 0x0F) - i16::from(b & 0x0F) - i16::from(!carry);
    let borrow_lo = lo < 0;
    if borrow_lo {
        lo -= 0x06;
    }
    let mut hi = i16::from(a >> 4) - i16::from(b >> 4) - i16::from(borrow_lo);
    let borrow = hi < 0;
    if borrow {
        hi -= 0x06;
    }
    let binary = a.wrapping_sub(b).wrapping_sub(u8::from(!carry));
    let overflow = (a ^ b) & (a ^ binary) & 0x80 != 0;
    ((((hi & 0x0F) << 4) | (lo & 0x0F)) as u8, !borrow, overflow)
}

/// Decimal add, low byte first, carrying into the high byte when wide.
fn decimal_add(a: u16, b: u16, carry: bool, wide: bool) -> (u16, bool, bool) {
    let [al, ah] = a.to_le_bytes();
    let [bl, bh] = b.to_le_bytes();
    let (lo, carry, overflow) = bcd_add8(al, bl, carry);
    if !wide {
        return (u16::from(lo), carry, overflow);
    }
    let (hi, carry, overflow) = bcd_add8(ah, bh, carry);
    (u16::from_le_bytes([lo, hi]), carry, overflow)
}

fn decimal_sub(a: u16, b: u16, carry: bool, wide: bool) -> (u16, bool, bool) {
    let [al, ah] = a.to_le_bytes();
    let [bl, bh] = b.to_le_bytes();
    let (lo, carry, overflow) = bcd_sub8(al, bl, carry);
    if !wide {
        return (u16::from(lo), carry, overflow);
    }
    let (hi, carry, overflow) = bcd_sub8(ah, bh, carry);
    (u16::from_le_bytes([lo, hi]), carry, overflow)
}

impl Wdc65816 {
    // =========================================================================
    // ADC / SBC
    // =========================================================================

    pub(crate) fn op_adc<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_m(bus);
        let wide = !self.regs.acc8();
        let carry = self.regs.p.is_set(C);
        let acc = self.regs.acc();
        let (result, carry, overflow) = if self.regs.p.is_set(D) {
            decimal_add(acc, operand, carry, wide)
        } else {
            binary_add(acc, operand, carry, wide)
        };
        self.finish_arithmetic(result, carry, overflow, wide);
    }

    pub(crate) fn op_sbc<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_m(bus);
        let wide = !self.regs.acc8();
        let carry = self.regs.p.is_set(C);
        let acc = self.regs.acc();
        let (result, carry, overflow) = if self.regs.p.is_set(D) {
            decimal_sub(acc, operand, carry, wide)
        } else {
            binary_add(acc, !operand, carry, wide)
        };
        self.finish_arithmetic(result, carry, overflow, wide);
    }

    fn finish_arithmetic(&mut self, result: u16, carry: bool, overflow: bool, wide: bool) {
        self.regs.p.set_if(C, carry);
        self.regs.p.set_if(V, overflow);
        self.set_nz(result, wide);
        self.regs.set_acc(result);
    }

    // =========================================================================
    // Logic
    // =========================================================================

    pub(crate) fn op_and<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_m(bus);
        self.logic_result(self.regs.acc() & operand);
    }

    pub(crate) fn op_ora<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_m(bus);
        self.logic_result(self.regs.acc() | operand);
    }

    pub(crate) fn op_eor<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_m(bus);
        self.logic_result(self.regs.acc() ^ operand);
    }

    fn logic_result(&mut self, result: u16) {
        let wide = !self.regs.acc8();
        self.set_nz(result, wide);
        self.regs.set_acc(result);
    }

    /// BIT with a memory operand: N and V copy its top two bits.
    pub(crate) fn op_bit<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_m(bus);
        let wide = !self.regs.acc8();
        let sign = sign_bit(wide);
        self.regs.p.set_if(N, operand & sign != 0);
        self.regs.p.set_if(V, operand & (sign >> 1) != 0);
        self.regs.p.set_if(Z, self.regs.acc() & operand == 0);
    }

    /// BIT #imm only affects Z.
    pub(crate) fn op_bit_immediate(&mut self) {
        let operand = self.fetched.operand;
        self.regs.p.set_if(Z, self.regs.acc() & operand == 0);
    }

    pub(crate) fn op_tsb<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.acc8();
        let value = self.load(bus, wide);
        let acc = self.regs.acc();
        self.regs.p.set_if(Z, acc & value == 0);
        self.store(bus, wide, value | acc);
    }

    pub(crate) fn op_trb<B: Bus>(&mut self, bus: &mut B) {
        let wide = !self.regs.acc8();
        let value = self.load(bus, wide);
        let acc = self.regs.acc();
        self.regs.p.set_if(Z, acc & value == 0);
        self.store(bus, wide, value & !acc);
    }

    // =========================================================================
    // Compare
    // =========================================================================

    fn compare(&mut self, register: u16, operand: u16, wide: bool) {
        let register = register & mask(wide);
        let operand = operand & mask(wide);
        self.regs.p.set_if(C, register >= operand);
        self.set_nz(register.wrapping_sub(operand), wide);
    }

    pub(crate) fn op_cmp<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_m(bus);
        self.compare(self.regs.acc(), operand, !self.regs.acc8());
    }

    pub(crate) fn op_cpx<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_x(bus);
        self.compare(self.regs.x, operand, !self.regs.idx8());
    }

    pub(crate) fn op_cpy<B: Bus>(&mut self, bus: &mut B) {
        let operand = self.load_x(bus);
        self.compare(self.regs.y, operand, !self.regs.idx8());
    }

    // =========================================================================
    // Shifts, rotates, increments
    // =========================================================================

    /// Read-modify-write on memory at accumulator width.
    pub(crate) fn modify_memory<B: Bus>(&mut self, bus: &mut B, f: fn(&mut Self, u16, bool) -> u16) {
        let wide = !self.regs.acc8();
        let value = self.load(bus, wide);
        let result = f(self, value, wide);
        self.store(bus, wide, result);
    }

    pub(crate) fn modify_accumulator(&mut self, f: fn(&mut Self, u16, bool) -> u16) {
        let wide = !self.regs.acc8();
        let value = self.regs.acc();
        let result = f(self, value, wide);
        self.regs.set_acc(result);
    }

    pub(crate) fn asl(&mut self, value: u16, wide: bool) -> u16 {
        let result = (value << 1) & mask(wide);
        self.regs.p.set_if(C, value & sign_bit(wide) != 0);
        self.set_nz(result, wide);
        result
    }

    pub(crate) fn lsr(&mut self, value: u16, wide: bool) -> u16 {
        let result = (value & mask(wide)) >> 1;
        self.regs.p.set_if(C, value & 1 != 0);
        self.set_nz(result, wide);
        result
    }

    pub(crate) fn rol(&mut self, value: u16, wide: bool) -> u16 {
        let carry_in = u16::from(self.regs.p.is_set(C));
        let result = ((value << 1) | carry_in) & mask(wide);
        self.regs.p.set_if(C, value & sign_bit(wide) != 0);
        self.set_nz(result, wide);
        result
    }

    pub(crate) fn ror(&mut self, value: u16, wide: bool) -> u16 {
        let carry_in = if self.regs.p.is_set(C) { sign_bit(wide) } else { 0 };
        let result = ((value & mask(wide)) >> 1) | carry_in;
        self.regs.p.set_if(C, value & 1 != 0);
        self.set_nz(result, wide);
        result
    }

    pub(crate) fn inc(&mut self, value: u16, wide: bool) -> u16 {
        let result = value.wrapping_add(1) & mask(wide);
        self.set_nz(result, wide);
        result
    }

    pub(crate) fn dec(&mut self, value: u16, wide: bool) -> u16 {
        let result = value.wrapping_sub(1) & mask(wide);
        self.set_nz(result, wide);
        result
    }

    pub(crate) fn op_inx(&mut self) {
        let wide = !self.regs.idx8();
        let result = self.inc(self.regs.x, wide);
        self.regs.set_x(result);
    }

    pub(crate) fn op_iny(&mut self) {
        let wide = !self.regs.idx8();
        let result = self.inc(self.regs.y, wide);
        self.regs.set_y(result);
    }

    pub(crate) fn op_dex(&mut self) {
        let wide = !self.regs.idx8();
        let result = self.dec(self.regs.x, wide);
        self.regs.set_x(result);
    }

    pub(crate) fn op_dey(&mut self) {
        let wide = !self.regs.idx8();
        let result = self.dec(self.regs.y, wide);
        self.regs.set_y(result);
    }
}
