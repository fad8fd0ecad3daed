//! CPU/APU communication ports.
//!
//! Four one-byte mailboxes, each with a separate latch per direction: what
//! the CPU writes only the APU reads, and the reverse. Port numbers wrap
//! modulo 4, matching the repeated `$2140-$2143` decoding on hardware.

const APU_TO_CPU: usize = 0;
const CPU_TO_APU: usize = 1;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApuPorts {
    ports: [[u8; 2]; 4],
}

impl ApuPorts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cpu_write(&mut self, port: usize, value: u8) {
        self.ports[port & 3][CPU_TO_APU] = value;
    }

    #[must_use]
    pub fn cpu_read(&self, port: usize) -> u8 {
        self.ports[port & 3][APU_TO_CPU]
    }

    pub fn apu_write(&mut self, port: usize, value: u8) {
        self.ports[port & 3][APU_TO_CPU] = value;
    }

    #[must_use]
    pub fn apu_read(&self, port: usize) -> u8 {
        self.ports[port & 3][CPU_TO_APU]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_do_not_alias() {
        let mut ports = ApuPorts::new();
        ports.cpu_write(0, 0xAA);
        ports.apu_write(0, 0xBB);
        assert_eq!(ports.apu_read(0), 0xAA);
        assert_eq!(ports.cpu_read(0), 0xBB);
    }

    #[test]
    fn ports_are_independent() {
        let mut ports = ApuPorts::new();
        for port in 0..4 {
            ports.cpu_write(port, port as u8 + 1);
        }
        for port in 0..4 {
            assert_eq!(ports.apu_read(port), port as u8 + 1);
            assert_eq!(ports.cpu_read(port), 0);
        }
    }

    #[test]
    fn port_numbers_wrap() {
        let mut ports = ApuPorts::new();
        ports.apu_write(6, 0x42);
        assert_eq!(ports.cpu_read(2), 0x42);
    }
}
