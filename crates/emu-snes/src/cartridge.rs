//! LoROM cartridge placement.
//!
//! A LoROM image is cut into 32 KiB pages. Page N lands in the upper half
//! of bank `$80 + N`, so the first byte of the image is at `$80:8000` and
//! the reset vector at image offset `$7FFC` reads as `$00:FFFC`.

use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::memory::SnesMemory;

const PAGE_SIZE: usize = 0x8000;
const FIRST_BANK: u32 = 0x80;

/// Bytes of ROM the LoROM window can hold: 128 pages of 32 KiB.
pub const LOROM_CAPACITY: usize = 0x80 * PAGE_SIZE;

/// Failures while getting a ROM image into memory.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("ROM image is {size} bytes, LoROM holds at most {capacity}")]
    TooLarge { size: usize, capacity: usize },

    #[error("ROM image is empty")]
    Empty,

    #[error("cannot read ROM file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Place `image` in memory at `$80:8000` onward, one 32 KiB page per bank.
pub fn load_lorom(memory: &mut SnesMemory, image: &[u8]) -> Result<(), RomError> {
    if image.is_empty() {
        return Err(RomError::Empty);
    }
    if image.len() > LOROM_CAPACITY {
        return Err(RomError::TooLarge {
            size: image.len(),
            capacity: LOROM_CAPACITY,
        });
    }

    let mut pages = 0u32;
    for page in image.chunks(PAGE_SIZE) {
        memory.load(((FIRST_BANK + pages) << 16) | PAGE_SIZE as u32, page);
        pages += 1;
    }
    debug!(
        "LoROM: {} bytes in banks ${:02X}-${:02X}",
        image.len(),
        FIRST_BANK,
        FIRST_BANK + pages - 1
    );
    Ok(())
}

/// Read a ROM image from disk.
pub fn read_rom_file(path: impl AsRef<Path>) -> Result<Vec<u8>, RomError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| RomError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_lands_at_80_8000() {
        let mut memory = SnesMemory::new();
        load_lorom(&mut memory, &[0x18, 0xA9, 0x7F]).expect("load");
        assert_eq!(memory.peek_flat(0x80_8000), 0x18);
        assert_eq!(memory.peek_flat(0x80_8002), 0x7F);
        // Also visible through the bank $00 mirror.
        assert_eq!(memory.peek(0x00, 0x8001), 0xA9);
    }

    #[test]
    fn pages_skip_the_lower_half_of_each_bank() {
        let mut image = vec![0u8; PAGE_SIZE + 2];
        image[PAGE_SIZE - 1] = 0xAA;
        image[PAGE_SIZE] = 0xBB;
        image[PAGE_SIZE + 1] = 0xCC;

        let mut memory = SnesMemory::new();
        load_lorom(&mut memory, &image).expect("load");
        assert_eq!(memory.peek_flat(0x80_FFFF), 0xAA);
        assert_eq!(memory.peek_flat(0x81_0000), 0x00);
        assert_eq!(memory.peek_flat(0x81_8000), 0xBB);
        assert_eq!(memory.peek_flat(0x81_8001), 0xCC);
    }

    #[test]
    fn full_window_reaches_bank_ff() {
        let mut image = vec![0u8; LOROM_CAPACITY];
        image[LOROM_CAPACITY - 1] = 0x5A;
        let mut memory = SnesMemory::new();
        load_lorom(&mut memory, &image).expect("load");
        assert_eq!(memory.peek_flat(0xFF_FFFF), 0x5A);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut memory = SnesMemory::new();
        let image = vec![0u8; LOROM_CAPACITY + 1];
        match load_lorom(&mut memory, &image) {
            Err(RomError::TooLarge { size, capacity }) => {
                assert_eq!(size, LOROM_CAPACITY + 1);
                assert_eq!(capacity, LOROM_CAPACITY);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
        assert_eq!(memory.peek_flat(0x80_8000), 0x00);
    }

    #[test]
    fn empty_image_is_rejected() {
        let mut memory = SnesMemory::new();
        assert!(matches!(load_lorom(&mut memory, &[]), Err(RomError::Empty)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_rom_file("/nonexistent/rom.sfc").expect_err("should fail");
        assert!(matches!(err, RomError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/rom.sfc"));
    }
}
