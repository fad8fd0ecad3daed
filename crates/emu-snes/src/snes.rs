//! Top-level SNES system.
//!
//! Owns the CPU, the address space and the APU port latches. The CPU only
//! sees memory for the length of each `clock()` call.

use emu_core::{Cpu, Observable, Value, bank_of, offset_of};
use log::info;
use wdc_65816::Wdc65816;

use crate::apu_io::ApuPorts;
use crate::cartridge::{self, RomError};
use crate::config::SnesConfig;
use crate::memory::SnesMemory;

/// Opcode the harness stop convention halts in front of (BRK).
const STOP_OPCODE: u8 = 0x00;

/// SNES system.
pub struct Snes {
    cpu: Wdc65816,
    memory: SnesMemory,
    apu_ports: ApuPorts,
}

impl Snes {
    /// Load the configured ROM and reset the CPU.
    ///
    /// # Errors
    ///
    /// Returns an error if the ROM image is empty or too large for LoROM.
    pub fn new(config: &SnesConfig) -> Result<Self, RomError> {
        let mut memory = SnesMemory::new();
        cartridge::load_lorom(&mut memory, &config.rom_data)?;
        memory.set_reset_vector_override(config.reset_vector);

        let mut cpu = Wdc65816::new();
        if config.stop_on_brk {
            cpu.set_stop_opcode(Some(STOP_OPCODE));
        }

        let mut snes = Self {
            cpu,
            memory,
            apu_ports: ApuPorts::new(),
        };
        snes.reset();
        Ok(snes)
    }

    /// Reset the CPU. Memory and port latches keep their contents.
    pub fn reset(&mut self) {
        self.cpu.init(&mut self.memory);
        info!("SNES reset: PC=${:06X}", self.cpu.pc());
    }

    /// Advance one CPU cycle. Returns `false` once the CPU refuses to
    /// continue.
    pub fn clock(&mut self) -> bool {
        self.cpu.clock(&mut self.memory)
    }

    /// Run one whole instruction and drain its cycles.
    pub fn step(&mut self) -> bool {
        self.cpu.step(&mut self.memory)
    }

    /// Clock until the CPU refuses or `max_clocks` have run. Returns the
    /// number of cycles that ran.
    pub fn run(&mut self, max_clocks: u64) -> u64 {
        let mut clocks = 0;
        while clocks < max_clocks && self.clock() {
            clocks += 1;
        }
        clocks
    }

    pub fn irq(&mut self) {
        self.cpu.irq();
    }

    pub fn nmi(&mut self) {
        self.cpu.nmi();
    }

    #[must_use]
    pub fn cpu(&self) -> &Wdc65816 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Wdc65816 {
        &mut self.cpu
    }

    #[must_use]
    pub fn memory(&self) -> &SnesMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut SnesMemory {
        &mut self.memory
    }

    #[must_use]
    pub fn apu_ports(&self) -> &ApuPorts {
        &self.apu_ports
    }

    pub fn apu_ports_mut(&mut self) -> &mut ApuPorts {
        &mut self.apu_ports
    }
}

/// Parse a 24-bit address written as `0x7E0042`, `$7E0042` or decimal.
fn parse_address(text: &str) -> Option<u32> {
    let address = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = text.strip_prefix('$') {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        text.parse().ok()?
    };
    (address <= 0x00FF_FFFF).then_some(address)
}

impl Observable for Snes {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("memory.") {
            let address = parse_address(rest)?;
            Some(Value::U8(self.memory.peek(bank_of(address), offset_of(address))))
        } else if let Some(rest) = path.strip_prefix("apu.to_apu.") {
            let port: usize = rest.parse().ok().filter(|&port| port < 4)?;
            Some(Value::U8(self.apu_ports.apu_read(port)))
        } else if let Some(rest) = path.strip_prefix("apu.to_cpu.") {
            let port: usize = rest.parse().ok().filter(|&port| port < 4)?;
            Some(Value::U8(self.apu_ports.cpu_read(port)))
        } else {
            match path {
                "reset_vector_override" => self.memory.reset_vector_override().map(Value::U16),
                _ => self.cpu.query(path),
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<65816_paths>",
            "memory.<address>",
            "apu.to_apu.<0-3>",
            "apu.to_cpu.<0-3>",
            "reset_vector_override",
        ]
    }
}
