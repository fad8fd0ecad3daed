//! Property-based tests for arithmetic and register-width invariants.

use emu_core::{Cpu, FlatBus};
use proptest::prelude::*;
use wdc_65816::{Status, Wdc65816, flags};

/// CPU and bus with `program` at $00:8000.
fn setup(program: &[u8]) -> (Wdc65816, FlatBus) {
    let mut bus = FlatBus::new();
    bus.load(0x00_FFFC, &[0x00, 0x80]);
    bus.load(0x00_8000, program);
    let mut cpu = Wdc65816::new();
    cpu.init(&mut bus);
    (cpu, bus)
}

fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

proptest! {
    /// CLC; ADC #b; SEC; SBC #b gives back the starting accumulator.
    #[test]
    fn adc_then_sbc_restores_a(a in any::<u8>(), b in any::<u8>()) {
        let (mut cpu, mut bus) = setup(&[0x18, 0x69, b, 0x38, 0xE9, b]);
        cpu.regs.set_a(a);
        for _ in 0..4 {
            prop_assert!(cpu.step(&mut bus));
        }
        prop_assert_eq!(cpu.regs.a(), a);
    }

    #[test]
    fn adc_then_sbc_restores_c(a in any::<u16>(), b in any::<u16>()) {
        let [lo, hi] = b.to_le_bytes();
        let (mut cpu, mut bus) = setup(&[0x18, 0x69, lo, hi, 0x38, 0xE9, lo, hi]);
        cpu.regs.e = false;
        cpu.regs.p = Status(0);
        cpu.regs.c = a;
        for _ in 0..4 {
            prop_assert!(cpu.step(&mut bus));
        }
        prop_assert_eq!(cpu.regs.c, a);
    }

    #[test]
    fn decimal_adc_then_sbc_restores_a(a in 0u8..100, b in 0u8..100) {
        let (a, b) = (to_bcd(a), to_bcd(b));
        // SED; CLC; ADC #b; SEC; SBC #b
        let (mut cpu, mut bus) = setup(&[0xF8, 0x18, 0x69, b, 0x38, 0xE9, b]);
        cpu.regs.set_a(a);
        for _ in 0..5 {
            prop_assert!(cpu.step(&mut bus));
        }
        prop_assert_eq!(cpu.regs.a(), a);
    }

    /// A 16-bit store at direct-page address $FFFF wraps to $0000 of bank 0.
    #[test]
    fn direct_page_word_store_stays_in_bank_zero(d in 0xFF01u16..=0xFFFF, value in any::<u16>()) {
        let offset = (0xFFFF - d) as u8;
        let (mut cpu, mut bus) = setup(&[0x85, offset]);
        cpu.regs.e = false;
        cpu.regs.p = Status(flags::X);
        cpu.regs.d = d;
        cpu.regs.c = value;
        prop_assert!(cpu.step(&mut bus));

        let [lo, hi] = value.to_le_bytes();
        prop_assert_eq!(bus.peek(0x00_FFFF), lo);
        prop_assert_eq!(bus.peek(0x00_0000), hi);
        prop_assert_eq!(bus.peek(0x01_0000), 0);
    }

    /// Whatever runs, emulation mode keeps 8-bit widths and a page-one
    /// stack, and 8-bit index mode keeps X/Y high bytes clear.
    #[test]
    fn width_invariants_hold_after_any_opcode(
        opcode in any::<u8>(),
        operands in any::<[u8; 3]>(),
        p in any::<u8>(),
        emulation in any::<bool>(),
        x in any::<u16>(),
        y in any::<u16>(),
    ) {
        let (mut cpu, mut bus) = setup(&[opcode, operands[0], operands[1], operands[2]]);
        cpu.regs.e = emulation;
        cpu.regs.p = Status(p);
        cpu.regs.x = x;
        cpu.regs.y = y;
        cpu.regs.s = 0x1FF0;
        cpu.regs.update_widths();

        prop_assert!(cpu.step(&mut bus));

        let regs = cpu.registers();
        if regs.e {
            prop_assert!(regs.acc8() && regs.idx8());
            prop_assert_eq!(regs.s >> 8, 0x01);
        }
        if regs.idx8() {
            prop_assert!(regs.x <= 0xFF && regs.y <= 0xFF);
        }
    }
}
