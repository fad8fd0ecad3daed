//! SNES configuration.

use std::path::Path;

use crate::cartridge::{RomError, read_rom_file};

/// SNES configuration.
#[derive(Debug, Clone, Default)]
pub struct SnesConfig {
    /// LoROM image contents.
    pub rom_data: Vec<u8>,
    /// Start here instead of at the address in `$00:FFFC`.
    pub reset_vector: Option<u16>,
    /// Treat opcode `$00` as "end of program": the CPU stops in front of it
    /// instead of taking BRK. Test ROMs use this to finish a run.
    pub stop_on_brk: bool,
}

impl SnesConfig {
    #[must_use]
    pub fn new(rom_data: Vec<u8>) -> Self {
        Self {
            rom_data,
            ..Self::default()
        }
    }

    /// Configuration for the ROM at `path`, with defaults for everything
    /// else.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RomError> {
        read_rom_file(path).map(Self::new)
    }

    #[must_use]
    pub fn with_reset_vector(mut self, vector: u16) -> Self {
        self.reset_vector = Some(vector);
        self
    }

    #[must_use]
    pub fn with_stop_on_brk(mut self, stop: bool) -> Self {
        self.stop_on_brk = stop;
        self
    }
}
