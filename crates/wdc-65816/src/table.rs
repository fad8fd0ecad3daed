//! Opcode dispatch table.
//!
//! One entry per opcode byte. Each entry pairs the operation with its
//! addressing mode and cost formula; the table is total, so decode can
//! never fail.

use crate::Registers;
use crate::addressing::Mode;
use crate::cpu::Fetched;

/// Operations. Accumulator forms of the read-modify-write instructions and
/// immediate BIT get their own variants because their flag behaviour
/// differs from the memory forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Adc,
    And,
    Asl,
    AslA,
    Bcc,
    Bcs,
    Beq,
    Bit,
    BitImmediate,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Brl,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cop,
    Cpx,
    Cpy,
    Dec,
    DecA,
    Dex,
    Dey,
    Eor,
    Inc,
    IncA,
    Inx,
    Iny,
    Jml,
    Jmp,
    Jsl,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    LsrA,
    Mvn,
    Mvp,
    Nop,
    Ora,
    Pea,
    Pei,
    Per,
    Pha,
    Phb,
    Phd,
    Phk,
    Php,
    Phx,
    Phy,
    Pla,
    Plb,
    Pld,
    Plp,
    Plx,
    Ply,
    Rep,
    Rol,
    RolA,
    Ror,
    RorA,
    Rti,
    Rtl,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sep,
    Sta,
    Stp,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Tcd,
    Tcs,
    Tdc,
    Trb,
    Tsb,
    Tsc,
    Tsx,
    Txa,
    Txs,
    Txy,
    Tya,
    Tyx,
    Wai,
    Wdm,
    Xba,
    Xce,
}

impl Op {
    /// Assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Op::Adc => "ADC",
            Op::And => "AND",
            Op::Asl | Op::AslA => "ASL",
            Op::Bcc => "BCC",
            Op::Bcs => "BCS",
            Op::Beq => "BEQ",
            Op::Bit | Op::BitImmediate => "BIT",
            Op::Bmi => "BMI",
            Op::Bne => "BNE",
            Op::Bpl => "BPL",
            Op::Bra => "BRA",
            Op::Brk => "BRK",
            Op::Brl => "BRL",
            Op::Bvc => "BVC",
            Op::Bvs => "BVS",
            Op::Clc => "CLC",
            Op::Cld => "CLD",
            Op::Cli => "CLI",
            Op::Clv => "CLV",
            Op::Cmp => "CMP",
            Op::Cop => "COP",
            Op::Cpx => "CPX",
            Op::Cpy => "CPY",
            Op::Dec | Op::DecA => "DEC",
            Op::Dex => "DEX",
            Op::Dey => "DEY",
            Op::Eor => "EOR",
            Op::Inc | Op::IncA => "INC",
            Op::Inx => "INX",
            Op::Iny => "INY",
            Op::Jml => "JML",
            Op::Jmp => "JMP",
            Op::Jsl => "JSL",
            Op::Jsr => "JSR",
            Op::Lda => "LDA",
            Op::Ldx => "LDX",
            Op::Ldy => "LDY",
            Op::Lsr | Op::LsrA => "LSR",
            Op::Mvn => "MVN",
            Op::Mvp => "MVP",
            Op::Nop => "NOP",
            Op::Ora => "ORA",
            Op::Pea => "PEA",
            Op::Pei => "PEI",
            Op::Per => "PER",
            Op::Pha => "PHA",
            Op::Phb => "PHB",
            Op::Phd => "PHD",
            Op::Phk => "PHK",
            Op::Php => "PHP",
            Op::Phx => "PHX",
            Op::Phy => "PHY",
            Op::Pla => "PLA",
            Op::Plb => "PLB",
            Op::Pld => "PLD",
            Op::Plp => "PLP",
            Op::Plx => "PLX",
            Op::Ply => "PLY",
            Op::Rep => "REP",
            Op::Rol | Op::RolA => "ROL",
            Op::Ror | Op::RorA => "ROR",
            Op::Rti => "RTI",
            Op::Rtl => "RTL",
            Op::Rts => "RTS",
            Op::Sbc => "SBC",
            Op::Sec => "SEC",
            Op::Sed => "SED",
            Op::Sei => "SEI",
            Op::Sep => "SEP",
            Op::Sta => "STA",
            Op::Stp => "STP",
            Op::Stx => "STX",
            Op::Sty => "STY",
            Op::Stz => "STZ",
            Op::Tax => "TAX",
            Op::Tay => "TAY",
            Op::Tcd => "TCD",
            Op::Tcs => "TCS",
            Op::Tdc => "TDC",
            Op::Trb => "TRB",
            Op::Tsb => "TSB",
            Op::Tsc => "TSC",
            Op::Tsx => "TSX",
            Op::Txa => "TXA",
            Op::Txs => "TXS",
            Op::Txy => "TXY",
            Op::Tya => "TYA",
            Op::Tyx => "TYX",
            Op::Wai => "WAI",
            Op::Wdm => "WDM",
            Op::Xba => "XBA",
            Op::Xce => "XCE",
        }
    }
}

/// Cycle cost formula.
///
/// Evaluated after the addressing mode and operation have run, since the
/// bank-crossing, branch and block-move terms depend on what they did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    /// Cycles with 8-bit registers, no penalties.
    pub base: u8,
    /// Extra cycles when the accumulator is 16-bit.
    pub wide_m: u8,
    /// Extra cycles when the index registers are 16-bit.
    pub wide_x: u8,
    /// +1 when a direct-page mode ran with DL != 0.
    pub direct: bool,
    /// +1 when indexing carried into another bank.
    pub boundary: bool,
    /// +1 when a conditional branch was taken.
    pub branch: bool,
    /// +1 in native mode (the extra stack byte for K).
    pub native: bool,
    /// `base` is charged per byte moved (MVN, MVP).
    pub per_byte: bool,
}

impl Cost {
    #[must_use]
    pub const fn new(base: u8) -> Self {
        Self {
            base,
            wide_m: 0,
            wide_x: 0,
            direct: false,
            boundary: false,
            branch: false,
            native: false,
            per_byte: false,
        }
    }

    #[must_use]
    pub const fn m(mut self, cycles: u8) -> Self {
        self.wide_m = cycles;
        self
    }

    #[must_use]
    pub const fn x(mut self, cycles: u8) -> Self {
        self.wide_x = cycles;
        self
    }

    #[must_use]
    pub const fn direct(mut self) -> Self {
        self.direct = true;
        self
    }

    #[must_use]
    pub const fn cross(mut self) -> Self {
        self.boundary = true;
        self
    }

    #[must_use]
    pub const fn taken(mut self) -> Self {
        self.branch = true;
        self
    }

    #[must_use]
    pub const fn native(mut self) -> Self {
        self.native = true;
        self
    }

    #[must_use]
    pub const fn per_byte(mut self) -> Self {
        self.per_byte = true;
        self
    }

    /// Cycles charged for an instruction that has just executed.
    pub(crate) fn evaluate(self, regs: &Registers, fetched: &Fetched) -> u32 {
        let mut cycles = u32::from(self.base);
        if self.per_byte {
            cycles *= fetched.bytes_moved;
        }
        if !regs.acc8() {
            cycles += u32::from(self.wide_m);
        }
        if !regs.idx8() {
            cycles += u32::from(self.wide_x);
        }
        cycles += u32::from(self.direct && fetched.direct_unaligned);
        cycles += u32::from(self.boundary && fetched.boundary_crossed);
        cycles += u32::from(self.branch && fetched.branch_taken);
        cycles += u32::from(self.native && !regs.e);
        cycles
    }
}

/// A decoded opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub mode: Mode,
    pub cost: Cost,
}

impl Instruction {
    #[must_use]
    pub const fn new(op: Op, mode: Mode, cost: Cost) -> Self {
        Self { op, mode, cost }
    }
}

/// Every opcode byte, indexed by value.
pub const OPCODES: [Instruction; 256] = [
    // 0x00
    Instruction::new(Op::Brk, Mode::Immediate8, Cost::new(7).native()),
    // 0x01
    Instruction::new(Op::Ora, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0x02
    Instruction::new(Op::Cop, Mode::Immediate8, Cost::new(7).native()),
    // 0x03
    Instruction::new(Op::Ora, Mode::StackRelative, Cost::new(4).m(1)),
    // 0x04
    Instruction::new(Op::Tsb, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0x05
    Instruction::new(Op::Ora, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0x06
    Instruction::new(Op::Asl, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0x07
    Instruction::new(Op::Ora, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0x08
    Instruction::new(Op::Php, Mode::Implied, Cost::new(3)),
    // 0x09
    Instruction::new(Op::Ora, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0x0A
    Instruction::new(Op::AslA, Mode::Implied, Cost::new(2)),
    // 0x0B
    Instruction::new(Op::Phd, Mode::Implied, Cost::new(4)),
    // 0x0C
    Instruction::new(Op::Tsb, Mode::Absolute, Cost::new(6).m(2)),
    // 0x0D
    Instruction::new(Op::Ora, Mode::Absolute, Cost::new(4).m(1)),
    // 0x0E
    Instruction::new(Op::Asl, Mode::Absolute, Cost::new(6).m(2)),
    // 0x0F
    Instruction::new(Op::Ora, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0x10
    Instruction::new(Op::Bpl, Mode::Immediate8, Cost::new(2).taken()),
    // 0x11
    Instruction::new(Op::Ora, Mode::DirectIndirectY, Cost::new(5).m(1).direct().cross()),
    // 0x12
    Instruction::new(Op::Ora, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0x13
    Instruction::new(Op::Ora, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0x14
    Instruction::new(Op::Trb, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0x15
    Instruction::new(Op::Ora, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0x16
    Instruction::new(Op::Asl, Mode::DirectX, Cost::new(6).m(2).direct()),
    // 0x17
    Instruction::new(Op::Ora, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0x18
    Instruction::new(Op::Clc, Mode::Implied, Cost::new(2)),
    // 0x19
    Instruction::new(Op::Ora, Mode::AbsoluteY, Cost::new(4).m(1).cross()),
    // 0x1A
    Instruction::new(Op::IncA, Mode::Implied, Cost::new(2)),
    // 0x1B
    Instruction::new(Op::Tcs, Mode::Implied, Cost::new(2)),
    // 0x1C
    Instruction::new(Op::Trb, Mode::Absolute, Cost::new(6).m(2)),
    // 0x1D
    Instruction::new(Op::Ora, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0x1E
    Instruction::new(Op::Asl, Mode::AbsoluteX, Cost::new(7).m(2)),
    // 0x1F
    Instruction::new(Op::Ora, Mode::AbsoluteLongX, Cost::new(5).m(1)),
    // 0x20
    Instruction::new(Op::Jsr, Mode::AbsoluteJump, Cost::new(6)),
    // 0x21
    Instruction::new(Op::And, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0x22
    Instruction::new(Op::Jsl, Mode::AbsoluteLongJump, Cost::new(8)),
    // 0x23
    Instruction::new(Op::And, Mode::StackRelative, Cost::new(4).m(1)),
    // 0x24
    Instruction::new(Op::Bit, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0x25
    Instruction::new(Op::And, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0x26
    Instruction::new(Op::Rol, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0x27
    Instruction::new(Op::And, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0x28
    Instruction::new(Op::Plp, Mode::Implied, Cost::new(4)),
    // 0x29
    Instruction::new(Op::And, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0x2A
    Instruction::new(Op::RolA, Mode::Implied, Cost::new(2)),
    // 0x2B
    Instruction::new(Op::Pld, Mode::Implied, Cost::new(5)),
    // 0x2C
    Instruction::new(Op::Bit, Mode::Absolute, Cost::new(4).m(1)),
    // 0x2D
    Instruction::new(Op::And, Mode::Absolute, Cost::new(4).m(1)),
    // 0x2E
    Instruction::new(Op::Rol, Mode::Absolute, Cost::new(6).m(2)),
    // 0x2F
    Instruction::new(Op::And, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0x30
    Instruction::new(Op::Bmi, Mode::Immediate8, Cost::new(2).taken()),
    // 0x31
    Instruction::new(Op::And, Mode::DirectIndirectY, Cost::new(5).m(1).direct().cross()),
    // 0x32
    Instruction::new(Op::And, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0x33
    Instruction::new(Op::And, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0x34
    Instruction::new(Op::Bit, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0x35
    Instruction::new(Op::And, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0x36
    Instruction::new(Op::Rol, Mode::DirectX, Cost::new(6).m(2).direct()),
    // 0x37
    Instruction::new(Op::And, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0x38
    Instruction::new(Op::Sec, Mode::Implied, Cost::new(2)),
    // 0x39
    Instruction::new(Op::And, Mode::AbsoluteY, Cost::new(4).m(1).cross()),
    // 0x3A
    Instruction::new(Op::DecA, Mode::Implied, Cost::new(2)),
    // 0x3B
    Instruction::new(Op::Tsc, Mode::Implied, Cost::new(2)),
    // 0x3C
    Instruction::new(Op::Bit, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0x3D
    Instruction::new(Op::And, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0x3E
    Instruction::new(Op::Rol, Mode::AbsoluteX, Cost::new(7).m(2)),
    // 0x3F
    Instruction::new(Op::And, Mode::AbsoluteLongX, Cost::new(5).m(1)),
    // 0x40
    Instruction::new(Op::Rti, Mode::Implied, Cost::new(6).native()),
    // 0x41
    Instruction::new(Op::Eor, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0x42
    Instruction::new(Op::Wdm, Mode::Immediate8, Cost::new(2)),
    // 0x43
    Instruction::new(Op::Eor, Mode::StackRelative, Cost::new(4).m(1)),
    // 0x44
    Instruction::new(Op::Mvp, Mode::Immediate16, Cost::new(7).per_byte()),
    // 0x45
    Instruction::new(Op::Eor, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0x46
    Instruction::new(Op::Lsr, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0x47
    Instruction::new(Op::Eor, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0x48
    Instruction::new(Op::Pha, Mode::Implied, Cost::new(3).m(1)),
    // 0x49
    Instruction::new(Op::Eor, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0x4A
    Instruction::new(Op::LsrA, Mode::Implied, Cost::new(2)),
    // 0x4B
    Instruction::new(Op::Phk, Mode::Implied, Cost::new(3)),
    // 0x4C
    Instruction::new(Op::Jmp, Mode::AbsoluteJump, Cost::new(3)),
    // 0x4D
    Instruction::new(Op::Eor, Mode::Absolute, Cost::new(4).m(1)),
    // 0x4E
    Instruction::new(Op::Lsr, Mode::Absolute, Cost::new(6).m(2)),
    // 0x4F
    Instruction::new(Op::Eor, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0x50
    Instruction::new(Op::Bvc, Mode::Immediate8, Cost::new(2).taken()),
    // 0x51
    Instruction::new(Op::Eor, Mode::DirectIndirectY, Cost::new(5).m(1).direct().cross()),
    // 0x52
    Instruction::new(Op::Eor, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0x53
    Instruction::new(Op::Eor, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0x54
    Instruction::new(Op::Mvn, Mode::Immediate16, Cost::new(7).per_byte()),
    // 0x55
    Instruction::new(Op::Eor, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0x56
    Instruction::new(Op::Lsr, Mode::DirectX, Cost::new(6).m(2).direct()),
    // 0x57
    Instruction::new(Op::Eor, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0x58
    Instruction::new(Op::Cli, Mode::Implied, Cost::new(2)),
    // 0x59
    Instruction::new(Op::Eor, Mode::AbsoluteY, Cost::new(4).m(1).cross()),
    // 0x5A
    Instruction::new(Op::Phy, Mode::Implied, Cost::new(3).x(1)),
    // 0x5B
    Instruction::new(Op::Tcd, Mode::Implied, Cost::new(2)),
    // 0x5C
    Instruction::new(Op::Jml, Mode::AbsoluteLongJump, Cost::new(4)),
    // 0x5D
    Instruction::new(Op::Eor, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0x5E
    Instruction::new(Op::Lsr, Mode::AbsoluteX, Cost::new(7).m(2)),
    // 0x5F
    Instruction::new(Op::Eor, Mode::AbsoluteLongX, Cost::new(5).m(1)),
    // 0x60
    Instruction::new(Op::Rts, Mode::Implied, Cost::new(6)),
    // 0x61
    Instruction::new(Op::Adc, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0x62
    Instruction::new(Op::Per, Mode::Immediate16, Cost::new(6)),
    // 0x63
    Instruction::new(Op::Adc, Mode::StackRelative, Cost::new(4).m(1)),
    // 0x64
    Instruction::new(Op::Stz, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0x65
    Instruction::new(Op::Adc, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0x66
    Instruction::new(Op::Ror, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0x67
    Instruction::new(Op::Adc, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0x68
    Instruction::new(Op::Pla, Mode::Implied, Cost::new(4).m(1)),
    // 0x69
    Instruction::new(Op::Adc, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0x6A
    Instruction::new(Op::RorA, Mode::Implied, Cost::new(2)),
    // 0x6B
    Instruction::new(Op::Rtl, Mode::Implied, Cost::new(6)),
    // 0x6C
    Instruction::new(Op::Jmp, Mode::AbsoluteIndirect, Cost::new(5)),
    // 0x6D
    Instruction::new(Op::Adc, Mode::Absolute, Cost::new(4).m(1)),
    // 0x6E
    Instruction::new(Op::Ror, Mode::Absolute, Cost::new(6).m(2)),
    // 0x6F
    Instruction::new(Op::Adc, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0x70
    Instruction::new(Op::Bvs, Mode::Immediate8, Cost::new(2).taken()),
    // 0x71
    Instruction::new(Op::Adc, Mode::DirectIndirectY, Cost::new(5).m(1).direct().cross()),
    // 0x72
    Instruction::new(Op::Adc, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0x73
    Instruction::new(Op::Adc, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0x74
    Instruction::new(Op::Stz, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0x75
    Instruction::new(Op::Adc, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0x76
    Instruction::new(Op::Ror, Mode::DirectX, Cost::new(6).m(2).direct()),
    // 0x77
    Instruction::new(Op::Adc, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0x78
    Instruction::new(Op::Sei, Mode::Implied, Cost::new(2)),
    // 0x79
    Instruction::new(Op::Adc, Mode::AbsoluteY, Cost::new(4).m(1).cross()),
    // 0x7A
    Instruction::new(Op::Ply, Mode::Implied, Cost::new(4).x(1)),
    // 0x7B
    Instruction::new(Op::Tdc, Mode::Implied, Cost::new(2)),
    // 0x7C
    Instruction::new(Op::Jmp, Mode::AbsoluteXIndirect, Cost::new(6)),
    // 0x7D
    Instruction::new(Op::Adc, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0x7E
    Instruction::new(Op::Ror, Mode::AbsoluteX, Cost::new(7).m(2)),
    // 0x7F
    Instruction::new(Op::Adc, Mode::AbsoluteLongX, Cost::new(5).m(1)),
    // 0x80
    Instruction::new(Op::Bra, Mode::Immediate8, Cost::new(3)),
    // 0x81
    Instruction::new(Op::Sta, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0x82
    Instruction::new(Op::Brl, Mode::Immediate16, Cost::new(4)),
    // 0x83
    Instruction::new(Op::Sta, Mode::StackRelative, Cost::new(4).m(1)),
    // 0x84
    Instruction::new(Op::Sty, Mode::Direct, Cost::new(3).x(1).direct()),
    // 0x85
    Instruction::new(Op::Sta, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0x86
    Instruction::new(Op::Stx, Mode::Direct, Cost::new(3).x(1).direct()),
    // 0x87
    Instruction::new(Op::Sta, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0x88
    Instruction::new(Op::Dey, Mode::Implied, Cost::new(2)),
    // 0x89
    Instruction::new(Op::BitImmediate, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0x8A
    Instruction::new(Op::Txa, Mode::Implied, Cost::new(2)),
    // 0x8B
    Instruction::new(Op::Phb, Mode::Implied, Cost::new(3)),
    // 0x8C
    Instruction::new(Op::Sty, Mode::Absolute, Cost::new(4).x(1)),
    // 0x8D
    Instruction::new(Op::Sta, Mode::Absolute, Cost::new(4).m(1)),
    // 0x8E
    Instruction::new(Op::Stx, Mode::Absolute, Cost::new(4).x(1)),
    // 0x8F
    Instruction::new(Op::Sta, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0x90
    Instruction::new(Op::Bcc, Mode::Immediate8, Cost::new(2).taken()),
    // 0x91
    Instruction::new(Op::Sta, Mode::DirectIndirectY, Cost::new(6).m(1).direct()),
    // 0x92
    Instruction::new(Op::Sta, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0x93
    Instruction::new(Op::Sta, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0x94
    Instruction::new(Op::Sty, Mode::DirectX, Cost::new(4).x(1).direct()),
    // 0x95
    Instruction::new(Op::Sta, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0x96
    Instruction::new(Op::Stx, Mode::DirectY, Cost::new(4).x(1).direct()),
    // 0x97
    Instruction::new(Op::Sta, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0x98
    Instruction::new(Op::Tya, Mode::Implied, Cost::new(2)),
    // 0x99
    Instruction::new(Op::Sta, Mode::AbsoluteY, Cost::new(5).m(1)),
    // 0x9A
    Instruction::new(Op::Txs, Mode::Implied, Cost::new(2)),
    // 0x9B
    Instruction::new(Op::Txy, Mode::Implied, Cost::new(2)),
    // 0x9C
    Instruction::new(Op::Stz, Mode::Absolute, Cost::new(4).m(1)),
    // 0x9D
    Instruction::new(Op::Sta, Mode::AbsoluteX, Cost::new(5).m(1)),
    // 0x9E
    Instruction::new(Op::Stz, Mode::AbsoluteX, Cost::new(5).m(1)),
    // 0x9F
    Instruction::new(Op::Sta, Mode::AbsoluteLongX, Cost::new(5).m(1)),
    // 0xA0
    Instruction::new(Op::Ldy, Mode::ImmediateX, Cost::new(2).x(1)),
    // 0xA1
    Instruction::new(Op::Lda, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0xA2
    Instruction::new(Op::Ldx, Mode::ImmediateX, Cost::new(2).x(1)),
    // 0xA3
    Instruction::new(Op::Lda, Mode::StackRelative, Cost::new(4).m(1)),
    // 0xA4
    Instruction::new(Op::Ldy, Mode::Direct, Cost::new(3).x(1).direct()),
    // 0xA5
    Instruction::new(Op::Lda, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0xA6
    Instruction::new(Op::Ldx, Mode::Direct, Cost::new(3).x(1).direct()),
    // 0xA7
    Instruction::new(Op::Lda, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0xA8
    Instruction::new(Op::Tay, Mode::Implied, Cost::new(2)),
    // 0xA9
    Instruction::new(Op::Lda, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0xAA
    Instruction::new(Op::Tax, Mode::Implied, Cost::new(2)),
    // 0xAB
    Instruction::new(Op::Plb, Mode::Implied, Cost::new(4)),
    // 0xAC
    Instruction::new(Op::Ldy, Mode::Absolute, Cost::new(4).x(1)),
    // 0xAD
    Instruction::new(Op::Lda, Mode::Absolute, Cost::new(4).m(1)),
    // 0xAE
    Instruction::new(Op::Ldx, Mode::Absolute, Cost::new(4).x(1)),
    // 0xAF
    Instruction::new(Op::Lda, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0xB0
    Instruction::new(Op::Bcs, Mode::Immediate8, Cost::new(2).taken()),
    // 0xB1
    Instruction::new(Op::Lda, Mode::DirectIndirectY, Cost::new(5).m(1).direct().cross()),
    // 0xB2
    Instruction::new(Op::Lda, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0xB3
    Instruction::new(Op::Lda, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0xB4
    Instruction::new(Op::Ldy, Mode::DirectX, Cost::new(4).x(1).direct()),
    // 0xB5
    Instruction::new(Op::Lda, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0xB6
    Instruction::new(Op::Ldx, Mode::DirectY, Cost::new(4).x(1).direct()),
    // 0xB7
    Instruction::new(Op::Lda, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0xB8
    Instruction::new(Op::Clv, Mode::Implied, Cost::new(2)),
    // 0xB9
    Instruction::new(Op::Lda, Mode::AbsoluteY, Cost::new(4).m(1).cross()),
    // 0xBA
    Instruction::new(Op::Tsx, Mode::Implied, Cost::new(2)),
    // 0xBB
    Instruction::new(Op::Tyx, Mode::Implied, Cost::new(2)),
    // 0xBC
    Instruction::new(Op::Ldy, Mode::AbsoluteX, Cost::new(4).x(1).cross()),
    // 0xBD
    Instruction::new(Op::Lda, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0xBE
    Instruction::new(Op::Ldx, Mode::AbsoluteY, Cost::new(4).x(1).cross()),
    // 0xBF
    Instruction::new(Op::Lda, Mode::AbsoluteLongX, Cost::new(5).m(1)),
    // 0xC0
    Instruction::new(Op::Cpy, Mode::ImmediateX, Cost::new(2).x(1)),
    // 0xC1
    Instruction::new(Op::Cmp, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0xC2
    Instruction::new(Op::Rep, Mode::Immediate8, Cost::new(3)),
    // 0xC3
    Instruction::new(Op::Cmp, Mode::StackRelative, Cost::new(4).m(1)),
    // 0xC4
    Instruction::new(Op::Cpy, Mode::Direct, Cost::new(3).x(1).direct()),
    // 0xC5
    Instruction::new(Op::Cmp, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0xC6
    Instruction::new(Op::Dec, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0xC7
    Instruction::new(Op::Cmp, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0xC8
    Instruction::new(Op::Iny, Mode::Implied, Cost::new(2)),
    // 0xC9
    Instruction::new(Op::Cmp, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0xCA
    Instruction::new(Op::Dex, Mode::Implied, Cost::new(2)),
    // 0xCB
    Instruction::new(Op::Wai, Mode::Implied, Cost::new(3)),
    // 0xCC
    Instruction::new(Op::Cpy, Mode::Absolute, Cost::new(4).x(1)),
    // 0xCD
    Instruction::new(Op::Cmp, Mode::Absolute, Cost::new(4).m(1)),
    // 0xCE
    Instruction::new(Op::Dec, Mode::Absolute, Cost::new(6).m(2)),
    // 0xCF
    Instruction::new(Op::Cmp, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0xD0
    Instruction::new(Op::Bne, Mode::Immediate8, Cost::new(2).taken()),
    // 0xD1
    Instruction::new(Op::Cmp, Mode::DirectIndirectY, Cost::new(5).m(1).direct().cross()),
    // 0xD2
    Instruction::new(Op::Cmp, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0xD3
    Instruction::new(Op::Cmp, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0xD4
    Instruction::new(Op::Pei, Mode::Direct, Cost::new(6).direct()),
    // 0xD5
    Instruction::new(Op::Cmp, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0xD6
    Instruction::new(Op::Dec, Mode::DirectX, Cost::new(6).m(2).direct()),
    // 0xD7
    Instruction::new(Op::Cmp, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0xD8
    Instruction::new(Op::Cld, Mode::Implied, Cost::new(2)),
    // 0xD9
    Instruction::new(Op::Cmp, Mode::AbsoluteY, Cost::new(4).m(1).cross()),
    // 0xDA
    Instruction::new(Op::Phx, Mode::Implied, Cost::new(3).x(1)),
    // 0xDB
    Instruction::new(Op::Stp, Mode::Implied, Cost::new(3)),
    // 0xDC
    Instruction::new(Op::Jml, Mode::AbsoluteIndirectLong, Cost::new(6)),
    // 0xDD
    Instruction::new(Op::Cmp, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0xDE
    Instruction::new(Op::Dec, Mode::AbsoluteX, Cost::new(7).m(2)),
    // 0xDF
    Instruction::new(Op::Cmp, Mode::AbsoluteLongX, Cost::new(5).m(1)),
    // 0xE0
    Instruction::new(Op::Cpx, Mode::ImmediateX, Cost::new(2).x(1)),
    // 0xE1
    Instruction::new(Op::Sbc, Mode::DirectXIndirect, Cost::new(6).m(1).direct()),
    // 0xE2
    Instruction::new(Op::Sep, Mode::Immediate8, Cost::new(3)),
    // 0xE3
    Instruction::new(Op::Sbc, Mode::StackRelative, Cost::new(4).m(1)),
    // 0xE4
    Instruction::new(Op::Cpx, Mode::Direct, Cost::new(3).x(1).direct()),
    // 0xE5
    Instruction::new(Op::Sbc, Mode::Direct, Cost::new(3).m(1).direct()),
    // 0xE6
    Instruction::new(Op::Inc, Mode::Direct, Cost::new(5).m(2).direct()),
    // 0xE7
    Instruction::new(Op::Sbc, Mode::DirectIndirectLong, Cost::new(6).m(1).direct()),
    // 0xE8
    Instruction::new(Op::Inx, Mode::Implied, Cost::new(2)),
    // 0xE9
    Instruction::new(Op::Sbc, Mode::ImmediateM, Cost::new(2).m(1)),
    // 0xEA
    Instruction::new(Op::Nop, Mode::Implied, Cost::new(2)),
    // 0xEB
    Instruction::new(Op::Xba, Mode::Implied, Cost::new(3)),
    // 0xEC
    Instruction::new(Op::Cpx, Mode::Absolute, Cost::new(4).x(1)),
    // 0xED
    Instruction::new(Op::Sbc, Mode::Absolute, Cost::new(4).m(1)),
    // 0xEE
    Instruction::new(Op::Inc, Mode::Absolute, Cost::new(6).m(2)),
    // 0xEF
    Instruction::new(Op::Sbc, Mode::AbsoluteLong, Cost::new(5).m(1)),
    // 0xF0
    Instruction::new(Op::Beq, Mode::Immediate8, Cost::new(2).taken()),
    // 0xF1
    Instruction::new(Op::Sbc, Mode::DirectIndirectY, Cost::new(5).m(1).direct().cross()),
    // 0xF2
    Instruction::new(Op::Sbc, Mode::DirectIndirect, Cost::new(5).m(1).direct()),
    // 0xF3
    Instruction::new(Op::Sbc, Mode::StackRelativeIndirectY, Cost::new(7).m(1)),
    // 0xF4
    Instruction::new(Op::Pea, Mode::Immediate16, Cost::new(5)),
    // 0xF5
    Instruction::new(Op::Sbc, Mode::DirectX, Cost::new(4).m(1).direct()),
    // 0xF6
    Instruction::new(Op::Inc, Mode::DirectX, Cost::new(6).m(2).direct()),
    // 0xF7
    Instruction::new(Op::Sbc, Mode::DirectIndirectLongY, Cost::new(6).m(1).direct()),
    // 0xF8
    Instruction::new(Op::Sed, Mode::Implied, Cost::new(2)),
    // 0xF9
    Instruction::new(Op::Sbc, Mode::AbsoluteY, Cost::new(4).m(1).cross()),
    // 0xFA
    Instruction::new(Op::Plx, Mode::Implied, Cost::new(4).x(1)),
    // 0xFB
    Instruction::new(Op::Xce, Mode::Implied, Cost::new(2)),
    // 0xFC
    Instruction::new(Op::Jsr, Mode::AbsoluteXIndirect, Cost::new(8)),
    // 0xFD
    Instruction::new(Op::Sbc, Mode::AbsoluteX, Cost::new(4).m(1).cross()),
    // 0xFE
    Instruction::new(Op::Inc, Mode::AbsoluteX, Cost::new(7).m(2)),
    // 0xFF
    Instruction::new(Op::Sbc, Mode::AbsoluteLongX, Cost::new(5).m(1)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{M, X};
    use crate::Status;

    fn native16() -> Registers {
        let mut regs = Registers::new();
        regs.e = false;
        regs.p = Status(0);
        regs
    }

    #[test]
    fn spot_check_entries() {
        assert_eq!(OPCODES[0xA9].op, Op::Lda);
        assert_eq!(OPCODES[0xA9].mode, Mode::ImmediateM);
        assert_eq!(OPCODES[0x54].op, Op::Mvn);
        assert_eq!(OPCODES[0x44].op, Op::Mvp);
        assert_eq!(OPCODES[0xFB].op, Op::Xce);
        assert_eq!(OPCODES[0xEE].mode, Mode::Absolute);
        assert_eq!(OPCODES[0xE6].mode, Mode::Direct);
        assert_eq!(OPCODES[0xDC].mode, Mode::AbsoluteIndirectLong);
        assert_eq!(OPCODES[0xFC].op, Op::Jsr);
        assert_eq!(OPCODES[0x89].op, Op::BitImmediate);
    }

    #[test]
    fn every_mnemonic_is_present() {
        let mut mnemonics: Vec<&str> = OPCODES.iter().map(|i| i.op.mnemonic()).collect();
        mnemonics.sort_unstable();
        mnemonics.dedup();
        assert_eq!(mnemonics.len(), 92);
    }

    #[test]
    fn width_terms() {
        let lda_abs = OPCODES[0xAD].cost;
        let mut regs = native16();
        let fetched = Fetched::default();
        assert_eq!(lda_abs.evaluate(&regs, &fetched), 5);
        regs.p = Status(M | X);
        assert_eq!(lda_abs.evaluate(&regs, &fetched), 4);

        let asl_abs = OPCODES[0x0E].cost;
        regs.p = Status(0);
        assert_eq!(asl_abs.evaluate(&regs, &fetched), 8);

        let ldx_imm = OPCODES[0xA2].cost;
        regs.p = Status(M);
        assert_eq!(ldx_imm.evaluate(&regs, &fetched), 3);
    }

    #[test]
    fn penalty_terms() {
        let regs = {
            let mut regs = native16();
            regs.p = Status(M | X);
            regs
        };
        let fetched = Fetched {
            direct_unaligned: true,
            boundary_crossed: true,
            branch_taken: true,
            ..Fetched::default()
        };
        assert_eq!(OPCODES[0xA5].cost.evaluate(&regs, &fetched), 4);
        assert_eq!(OPCODES[0xBD].cost.evaluate(&regs, &fetched), 5);
        assert_eq!(OPCODES[0x9D].cost.evaluate(&regs, &fetched), 5);
        assert_eq!(OPCODES[0xD0].cost.evaluate(&regs, &fetched), 3);
        assert_eq!(OPCODES[0x80].cost.evaluate(&regs, &fetched), 3);
        assert_eq!(OPCODES[0x00].cost.evaluate(&regs, &fetched), 8);
    }

    #[test]
    fn block_move_charges_per_byte() {
        let regs = native16();
        let fetched = Fetched {
            bytes_moved: 4,
            ..Fetched::default()
        };
        assert_eq!(OPCODES[0x54].cost.evaluate(&regs, &fetched), 28);
    }
}
