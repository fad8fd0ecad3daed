//! 65C816 CPU implementation.
//!
//! Instruction-granular execution. When the cycle budget is empty, `clock()`
//! fetches, resolves and executes a whole instruction and adds its cost to
//! the budget; every call then retires one cycle.

use emu_core::{Bus, Cpu, Observable, Value};
use log::{debug, trace};

use crate::flags::{C, D, I, M, N, V, X, Z};
use crate::table::{OPCODES, Op};
use crate::{Registers, vectors};

/// Execution state between instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    /// WAI: idle until an interrupt line is asserted.
    Waiting,
    /// STP: idle until `init()`.
    Stopped,
}

/// Scratch state filled by the addressing mode and consumed by the
/// operation and the cost formula. Cleared before every fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Fetched {
    /// Immediate operand, or the last value loaded through `load()`.
    pub operand: u16,
    /// 24-bit effective address.
    pub address: u32,
    /// 24-bit jump target.
    pub jump: u32,
    /// `operand` came from the instruction stream; there is no address.
    pub immediate: bool,
    /// The address is in bank 0 and 16-bit accesses wrap there.
    pub wrap: bool,
    pub boundary_crossed: bool,
    pub branch_taken: bool,
    pub direct_unaligned: bool,
    pub bytes_moved: u32,
}

/// The WDC 65C816.
#[derive(Debug)]
pub struct Wdc65816 {
    /// CPU registers.
    pub regs: Registers,

    state: State,

    pub(crate) fetched: Fetched,

    /// Opcode of the instruction currently draining.
    opcode: u8,

    cycles_remaining: u32,

    /// Opcode the CPU refuses to execute (harness stop convention).
    stop_opcode: Option<u8>,

    nmi_pending: bool,
    irq_pending: bool,

    total_cycles: u64,
    instructions: u64,
}

impl Default for Wdc65816 {
    fn default() -> Self {
        Self::new()
    }
}

impl Wdc65816 {
    /// A CPU in power-on state. Call [`Cpu::init`] to load the reset vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            state: State::Running,
            fetched: Fetched::default(),
            opcode: 0,
            cycles_remaining: 0,
            stop_opcode: None,
            nmi_pending: false,
            irq_pending: false,
            total_cycles: 0,
            instructions: 0,
        }
    }

    /// Make `clock()` return `false` instead of executing `opcode`.
    ///
    /// Test ROMs conventionally end with a zero byte; with
    /// `Some(0x00)` the CPU stops there with PC on the BRK rather than
    /// vectoring through an unset BRK handler.
    pub fn set_stop_opcode(&mut self, opcode: Option<u8>) {
        self.stop_opcode = opcode;
    }

    /// Accumulator at the current width.
    #[must_use]
    pub fn accumulator(&self) -> u16 {
        self.regs.acc()
    }

    /// Cycles clocked since construction.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Instructions executed since construction.
    #[must_use]
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Opcode of the most recently fetched instruction.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// True while WAI is waiting for an interrupt.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.state == State::Waiting
    }

    pub(crate) fn wait(&mut self) {
        debug!("WAI at {:06X}", self.regs.program_address());
        self.state = State::Waiting;
    }

    pub(crate) fn stop(&mut self) {
        debug!("STP at {:06X}", self.regs.program_address());
        self.state = State::Stopped;
    }

    /// Run one complete instruction (or interrupt entry) and drain its
    /// cycles. Returns `false` if the CPU refused to continue.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> bool {
        if !self.clock(bus) {
            return false;
        }
        while self.cycles_remaining > 0 {
            self.clock(bus);
        }
        true
    }

    /// Instruction boundary: take an interrupt or execute the next opcode.
    /// Returns `false` when the next opcode is the configured stop opcode.
    fn begin_instruction<B: Bus>(&mut self, bus: &mut B) -> bool {
        self.fetched = Fetched::default();
        self.regs.update_widths();

        if self.state == State::Stopped {
            return true;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            self.state = State::Running;
            let cost = self.hardware_interrupt(bus, vectors::NATIVE_NMI, vectors::EMULATION_NMI);
            self.cycles_remaining += cost;
            return true;
        }

        if self.irq_pending {
            if !self.regs.p.is_set(I) {
                self.irq_pending = false;
                self.state = State::Running;
                let cost = self.hardware_interrupt(bus, vectors::NATIVE_IRQ, vectors::EMULATION_IRQ);
                self.cycles_remaining += cost;
                return true;
            }
            if self.state == State::Waiting {
                // Masked IRQ wakes WAI without being serviced.
                self.irq_pending = false;
                self.state = State::Running;
            }
        }

        if self.state == State::Waiting {
            return true;
        }

        if let Some(stop) = self.stop_opcode {
            if bus.read8(self.regs.k, self.regs.pc) == stop {
                return false;
            }
        }

        let at = self.regs.program_address();
        self.opcode = self.fetch8(bus);
        let instruction = OPCODES[self.opcode as usize];

        self.resolve(instruction.mode, bus);
        self.execute(instruction.op, bus);

        let cost = instruction.cost.evaluate(&self.regs, &self.fetched);
        self.cycles_remaining += cost;
        self.instructions += 1;

        trace!(
            "{at:06X}  {:02X}  {} {:?}  {cost} cycles",
            self.opcode,
            instruction.op.mnemonic(),
            instruction.mode
        );
        true
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn execute<B: Bus>(&mut self, op: Op, bus: &mut B) {
        match op {
            // Arithmetic and logic
            Op::Adc => self.op_adc(bus),
            Op::Sbc => self.op_sbc(bus),
            Op::And => self.op_and(bus),
            Op::Ora => self.op_ora(bus),
            Op::Eor => self.op_eor(bus),
            Op::Bit => self.op_bit(bus),
            Op::BitImmediate => self.op_bit_immediate(),
            Op::Cmp => self.op_cmp(bus),
            Op::Cpx => self.op_cpx(bus),
            Op::Cpy => self.op_cpy(bus),
            Op::Tsb => self.op_tsb(bus),
            Op::Trb => self.op_trb(bus),

            // Read-modify-write
            Op::Asl => self.modify_memory(bus, Self::asl),
            Op::Lsr => self.modify_memory(bus, Self::lsr),
            Op::Rol => self.modify_memory(bus, Self::rol),
            Op::Ror => self.modify_memory(bus, Self::ror),
            Op::Inc => self.modify_memory(bus, Self::inc),
            Op::Dec => self.modify_memory(bus, Self::dec),
            Op::AslA => self.modify_accumulator(Self::asl),
            Op::LsrA => self.modify_accumulator(Self::lsr),
            Op::RolA => self.modify_accumulator(Self::rol),
            Op::RorA => self.modify_accumulator(Self::ror),
            Op::IncA => self.modify_accumulator(Self::inc),
            Op::DecA => self.modify_accumulator(Self::dec),
            Op::Inx => self.op_inx(),
            Op::Iny => self.op_iny(),
            Op::Dex => self.op_dex(),
            Op::Dey => self.op_dey(),

            // Loads, stores, transfers
            Op::Lda => self.op_lda(bus),
            Op::Ldx => self.op_ldx(bus),
            Op::Ldy => self.op_ldy(bus),
            Op::Sta => self.op_sta(bus),
            Op::Stx => self.op_stx(bus),
            Op::Sty => self.op_sty(bus),
            Op::Stz => self.op_stz(bus),
            Op::Tax => self.op_tax(),
            Op::Tay => self.op_tay(),
            Op::Txa => self.op_txa(),
            Op::Tya => self.op_tya(),
            Op::Txy => self.op_txy(),
            Op::Tyx => self.op_tyx(),
            Op::Tsx => self.op_tsx(),
            Op::Txs => self.op_txs(),
            Op::Tcd => self.op_tcd(),
            Op::Tdc => self.op_tdc(),
            Op::Tcs => self.op_tcs(),
            Op::Tsc => self.op_tsc(),
            Op::Xba => self.op_xba(),

            // Stack
            Op::Pha => self.op_pha(bus),
            Op::Phx => self.op_phx(bus),
            Op::Phy => self.op_phy(bus),
            Op::Php => self.op_php(bus),
            Op::Phb => self.op_phb(bus),
            Op::Phd => self.op_phd(bus),
            Op::Phk => self.op_phk(bus),
            Op::Pla => self.op_pla(bus),
            Op::Plx => self.op_plx(bus),
            Op::Ply => self.op_ply(bus),
            Op::Plp => self.op_plp(bus),
            Op::Plb => self.op_plb(bus),
            Op::Pld => self.op_pld(bus),
            Op::Pea => self.op_pea(bus),
            Op::Pei => self.op_pei(bus),
            Op::Per => self.op_per(bus),

            // Control flow
            Op::Bcc => self.branch_if(!self.regs.p.is_set(C)),
            Op::Bcs => self.branch_if(self.regs.p.is_set(C)),
            Op::Bne => self.branch_if(!self.regs.p.is_set(Z)),
            Op::Beq => self.branch_if(self.regs.p.is_set(Z)),
            Op::Bpl => self.branch_if(!self.regs.p.is_set(N)),
            Op::Bmi => self.branch_if(self.regs.p.is_set(N)),
            Op::Bvc => self.branch_if(!self.regs.p.is_set(V)),
            Op::Bvs => self.branch_if(self.regs.p.is_set(V)),
            Op::Bra => self.branch_if(true),
            Op::Brl => self.op_brl(),
            Op::Jmp => self.op_jmp(),
            Op::Jml => self.op_jml(),
            Op::Jsr => self.op_jsr(bus),
            Op::Jsl => self.op_jsl(bus),
            Op::Rts => self.op_rts(bus),
            Op::Rtl => self.op_rtl(bus),
            Op::Rti => self.op_rti(bus),
            Op::Brk => self.op_brk(bus),
            Op::Cop => self.op_cop(bus),
            Op::Wai => self.wait(),
            Op::Stp => self.stop(),

            // Status and mode
            Op::Clc => self.regs.p.clear(C),
            Op::Sec => self.regs.p.set(C),
            Op::Cli => self.regs.p.clear(I),
            Op::Sei => self.regs.p.set(I),
            Op::Cld => self.regs.p.clear(D),
            Op::Sed => self.regs.p.set(D),
            Op::Clv => self.regs.p.clear(V),
            Op::Rep => self.op_rep(),
            Op::Sep => self.op_sep(),
            Op::Xce => self.op_xce(),

            // Block moves and no-ops
            Op::Mvn => self.block_move(bus, 1),
            Op::Mvp => self.block_move(bus, -1),
            Op::Nop | Op::Wdm => {}
        }
    }

    // =========================================================================
    // Flag helpers shared by the operation modules
    // =========================================================================

    /// N and Z from `value` at 8 or 16 bits.
    pub(crate) fn set_nz(&mut self, value: u16, wide: bool) {
        if wide {
            self.regs.p.update_nz16(value);
        } else {
            self.regs.p.update_nz8(value as u8);
        }
    }
}

impl Cpu for Wdc65816 {
    type Registers = Registers;

    fn init<B: Bus>(&mut self, bus: &mut B) {
        self.regs = Registers::new();
        self.regs.pc = bus.reset_vector();
        self.state = State::Running;
        self.fetched = Fetched::default();
        self.cycles_remaining = 0;
        self.nmi_pending = false;
        self.irq_pending = false;
        debug!("reset: PC = {:06X}", self.regs.program_address());
    }

    fn clock<B: Bus>(&mut self, bus: &mut B) -> bool {
        if self.cycles_remaining == 0 && !self.begin_instruction(bus) {
            return false;
        }
        self.cycles_remaining = self.cycles_remaining.saturating_sub(1);
        self.total_cycles += 1;
        true
    }

    fn pc(&self) -> u32 {
        self.regs.program_address()
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn cycles_remaining(&self) -> u32 {
        self.cycles_remaining
    }

    fn is_halted(&self) -> bool {
        self.state == State::Stopped
    }

    fn irq(&mut self) {
        self.irq_pending = true;
    }

    fn nmi(&mut self) {
        self.nmi_pending = true;
    }
}

const QUERY_PATHS: &[&str] = &[
    "pc",
    "k",
    "c",
    "a",
    "b",
    "x",
    "y",
    "s",
    "d",
    "dbr",
    "p",
    "e",
    "flags.c",
    "flags.z",
    "flags.i",
    "flags.d",
    "flags.x",
    "flags.m",
    "flags.v",
    "flags.n",
    "opcode",
    "mnemonic",
    "cycles_remaining",
    "cycles",
    "instructions",
    "waiting",
    "stopped",
];

impl Observable for Wdc65816 {
    fn query(&self, path: &str) -> Option<Value> {
        let regs = &self.regs;
        let value: Value = match path {
            "pc" => regs.program_address().into(),
            "k" => regs.k.into(),
            "c" => regs.c.into(),
            "a" => regs.a().into(),
            "b" => regs.b().into(),
            "x" => regs.x.into(),
            "y" => regs.y.into(),
            "s" => regs.s.into(),
            "d" => regs.d.into(),
            "dbr" => regs.dbr.into(),
            "p" => regs.p.0.into(),
            "e" => regs.e.into(),
            "flags.c" => regs.p.is_set(C).into(),
            "flags.z" => regs.p.is_set(Z).into(),
            "flags.i" => regs.p.is_set(I).into(),
            "flags.d" => regs.p.is_set(D).into(),
            "flags.x" => regs.p.is_set(X).into(),
            "flags.m" => regs.p.is_set(M).into(),
            "flags.v" => regs.p.is_set(V).into(),
            "flags.n" => regs.p.is_set(N).into(),
            "opcode" => self.opcode.into(),
            "mnemonic" => OPCODES[self.opcode as usize].op.mnemonic().into(),
            "cycles_remaining" => self.cycles_remaining.into(),
            "cycles" => self.total_cycles.into(),
            "instructions" => self.instructions.into(),
            "waiting" => (self.state == State::Waiting).into(),
            "stopped" => (self.state == State::Stopped).into(),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
