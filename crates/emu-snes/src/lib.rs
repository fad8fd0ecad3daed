//! SNES address space and CPU glue.
//!
//! The console's 24-bit address space is modelled as one flat 16 MiB store
//! behind the LoROM mirroring rules. Only the pieces the 65C816 needs to run
//! are here: work RAM and ROM decoding, cartridge placement and the four
//! CPU/APU port latches. There is no PPU or sound processor.

mod apu_io;
mod cartridge;
mod config;
mod memory;
mod snes;

pub use apu_io::ApuPorts;
pub use cartridge::{LOROM_CAPACITY, RomError, load_lorom, read_rom_file};
pub use config::SnesConfig;
pub use memory::{SnesMemory, mirror};
pub use snes::Snes;
