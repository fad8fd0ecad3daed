//! Cycle accounting across the whole opcode table.
//!
//! An instruction does all of its work on the first `clock()` and then only
//! drains its budget, so for every opcode the budget must hit zero exactly
//! on the Nth call with no register changes after the first.

use emu_core::{Cpu, FlatBus};
use wdc_65816::{OPCODES, Status, Wdc65816, flags};

/// Register configurations every opcode is timed under.
#[derive(Debug, Clone, Copy)]
enum Config {
    Emulation,
    Native8,
    Native16,
}

fn cpu_for(config: Config) -> Wdc65816 {
    let mut cpu = Wdc65816::new();
    match config {
        Config::Emulation => {}
        Config::Native8 => {
            cpu.regs.e = false;
            cpu.regs.p = Status(flags::M | flags::X);
            cpu.regs.s = 0x1FFF;
        }
        Config::Native16 => {
            cpu.regs.e = false;
            cpu.regs.p = Status(0);
            cpu.regs.s = 0x1FFF;
        }
    }
    cpu.regs.pc = 0x8000;
    cpu
}

/// Execute `opcode` once under `config` and return the cycles it took.
fn time_opcode(opcode: u8, config: Config) -> u32 {
    let mut bus = FlatBus::new();
    bus.load(0x00_8000, &[opcode, 0x10, 0x20, 0x30]);
    let mut cpu = cpu_for(config);

    assert!(cpu.clock(&mut bus), "{opcode:02X} refused under {config:?}");
    let cost = cpu.cycles_remaining() + 1;
    let after_execute = cpu.registers();

    for cycle in 1..cost {
        assert_ne!(cpu.cycles_remaining(), 0, "{opcode:02X} drained early at cycle {cycle}");
        assert!(cpu.clock(&mut bus));
        assert_eq!(
            cpu.registers(),
            after_execute,
            "{opcode:02X} under {config:?} changed state while draining"
        );
    }
    assert_eq!(cpu.cycles_remaining(), 0);
    cost
}

#[test]
fn every_opcode_drains_its_cost() {
    for config in [Config::Emulation, Config::Native8, Config::Native16] {
        for opcode in 0..=255u8 {
            let cost = time_opcode(opcode, config);
            assert!(
                (2..=9).contains(&cost),
                "{opcode:02X} ({}) costs {cost} under {config:?}",
                OPCODES[opcode as usize].op.mnemonic()
            );
        }
    }
}

#[test]
fn known_costs_in_emulation_mode() {
    let expected: &[(u8, u32)] = &[
        (0xA9, 2), // LDA #
        (0xA5, 3), // LDA dp
        (0xAD, 4), // LDA abs
        (0xAF, 5), // LDA long
        (0xB2, 5), // LDA (dp)
        (0xA7, 6), // LDA [dp]
        (0xB3, 7), // LDA (sr,S),Y
        (0x8D, 4), // STA abs
        (0x9D, 5), // STA abs,X
        (0x0E, 6), // ASL abs
        (0x1E, 7), // ASL abs,X
        (0x0A, 2), // ASL A
        (0x20, 6), // JSR abs
        (0x22, 8), // JSL long
        (0x4C, 3), // JMP abs
        (0x5C, 4), // JML long
        (0x6C, 5), // JMP (abs)
        (0xFC, 8), // JSR (abs,X)
        (0x00, 7), // BRK
        (0x40, 6), // RTI
        (0x48, 3), // PHA
        (0x68, 4), // PLA
        (0x0B, 4), // PHD
        (0x2B, 5), // PLD
        (0xC2, 3), // REP
        (0xEB, 3), // XBA
        (0xFB, 2), // XCE
        (0x54, 7), // MVN, one byte with C = 0
    ];
    for &(opcode, cycles) in expected {
        assert_eq!(time_opcode(opcode, Config::Emulation), cycles, "{opcode:02X}");
    }
}

#[test]
fn sixteen_bit_widths_add_cycles() {
    let expected: &[(u8, u32, u32)] = &[
        // opcode, 8-bit native, 16-bit native
        (0xA9, 2, 3), // LDA #
        (0xAD, 4, 5), // LDA abs
        (0x0E, 6, 8), // ASL abs
        (0xE6, 5, 7), // INC dp
        (0x04, 5, 7), // TSB dp
        (0xA2, 2, 3), // LDX #
        (0xEC, 4, 5), // CPX abs
        (0x48, 3, 4), // PHA
        (0xDA, 3, 4), // PHX
        (0xFA, 4, 5), // PLX
        (0x00, 8, 8), // BRK
        (0x40, 7, 7), // RTI
        (0xEA, 2, 2), // NOP
    ];
    for &(opcode, narrow, wide) in expected {
        assert_eq!(time_opcode(opcode, Config::Native8), narrow, "{opcode:02X} 8-bit");
        assert_eq!(time_opcode(opcode, Config::Native16), wide, "{opcode:02X} 16-bit");
    }
}
