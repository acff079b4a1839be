//! Tests for operand forwarding and load-use hazard detection.

use pipeline_sim::core::arch::{ForwardingTable, RegisterFile};
use pipeline_sim::core::pipeline::hazards::{
    forward_rs, need_stall_load_use, read_operand, OperandSource,
};
use pipeline_sim::core::pipeline::{LatchEntry, StageLatch};
use pipeline_sim::isa::{Instruction, Opcode};

/// Creates a latch entry at `pc` for `inst`.
fn entry(pc: i32, inst: Instruction) -> LatchEntry {
    LatchEntry::new(pc, inst)
}

/// Tests that a non-pending register is read from the register file.
#[test]
fn test_read_operand_from_regfile() {
    let mut regs = RegisterFile::new();
    let mut fwd = ForwardingTable::new();
    regs.write(2, 10).unwrap();
    fwd.publish(2, 99).unwrap();

    assert_eq!(
        read_operand(&regs, &fwd, 2).unwrap(),
        (10, OperandSource::RegFile)
    );
}

/// Tests that a pending register is read from the forwarding table.
#[test]
fn test_read_operand_forwarded() {
    let mut regs = RegisterFile::new();
    let mut fwd = ForwardingTable::new();
    regs.write(2, 10).unwrap();
    regs.mark_pending(2).unwrap();
    fwd.publish(2, 99).unwrap();

    assert_eq!(
        read_operand(&regs, &fwd, 2).unwrap(),
        (99, OperandSource::Forwarded)
    );
}

/// Tests that only the sources an instruction uses are materialized.
#[test]
fn test_forward_rs_respects_used_sources() {
    let mut regs = RegisterFile::new();
    let mut fwd = ForwardingTable::new();
    regs.write(1, 7).unwrap();
    regs.write(2, 3).unwrap();
    regs.mark_pending(2).unwrap();
    fwd.publish(2, 30).unwrap();

    let add = entry(4000, Instruction::rrr(Opcode::Add, 3, 1, 2));
    assert_eq!(forward_rs(&add, &regs, &fwd).unwrap(), (7, 30));

    let addi = entry(4004, Instruction::rri(Opcode::Addi, 3, 2, 1));
    assert_eq!(forward_rs(&addi, &regs, &fwd).unwrap(), (30, 0));

    let movc = entry(4008, Instruction::movc(3, 1));
    assert_eq!(forward_rs(&movc, &regs, &fwd).unwrap(), (0, 0));
}

/// Tests that an out-of-range source register faults.
#[test]
fn test_forward_rs_register_fault() {
    let regs = RegisterFile::new();
    let fwd = ForwardingTable::new();
    let bad = entry(4000, Instruction::rrr(Opcode::Add, 1, 17, 2));
    assert!(forward_rs(&bad, &regs, &fwd).is_err());
}

/// Tests load-use detection against each source position.
#[test]
fn test_load_use_detected() {
    let load = StageLatch::occupied(entry(4000, Instruction::rri(Opcode::Load, 3, 0, 8)));

    let uses_rs1 = entry(4004, Instruction::rri(Opcode::Addi, 4, 3, 1));
    let uses_rs2 = entry(4004, Instruction::rrr(Opcode::Sub, 4, 1, 3));
    let unrelated = entry(4004, Instruction::rrr(Opcode::Add, 4, 1, 2));

    assert!(need_stall_load_use(&load, &uses_rs1));
    assert!(need_stall_load_use(&load, &uses_rs2));
    assert!(!need_stall_load_use(&load, &unrelated));
}

/// Tests that STORE stalls on a loaded value in either source.
#[test]
fn test_load_use_store_sources() {
    let load = StageLatch::occupied(entry(4000, Instruction::rri(Opcode::Load, 3, 0, 8)));
    let store_value = entry(4004, Instruction::store(3, 1, 0));
    let store_base = entry(4004, Instruction::store(1, 3, 0));

    assert!(need_stall_load_use(&load, &store_value));
    assert!(need_stall_load_use(&load, &store_base));
}

/// Tests that only LOAD in Execute triggers the stall.
#[test]
fn test_load_use_other_producers() {
    let consumer = entry(4004, Instruction::rri(Opcode::Addi, 4, 3, 1));

    let ldr = StageLatch::occupied(entry(4000, Instruction::rrr(Opcode::Ldr, 3, 1, 2)));
    let add = StageLatch::occupied(entry(4000, Instruction::rrr(Opcode::Add, 3, 1, 2)));

    assert!(!need_stall_load_use(&ldr, &consumer));
    assert!(!need_stall_load_use(&add, &consumer));
    assert!(!need_stall_load_use(&StageLatch::bubble(), &consumer));
}

/// Tests that an instruction not reading the loaded register never stalls.
#[test]
fn test_load_use_ignores_unused_fields() {
    let load = StageLatch::occupied(entry(4000, Instruction::rri(Opcode::Load, 0, 1, 8)));
    // MOVC leaves rs1 and rs2 at R0 but reads neither.
    let movc = entry(4004, Instruction::movc(5, 1));
    assert!(!need_stall_load_use(&load, &movc));
}
