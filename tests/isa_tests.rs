//! Tests for opcodes, instruction records, the program store and control signals.

use pipeline_sim::common::{AccessFault, SimError};
use pipeline_sim::core::pipeline::signals::{AluOp, ControlSignals, OpASrc, OpBSrc};
use pipeline_sim::isa::{Instruction, Opcode, Program};
use rstest::rstest;

/// Tests that every mnemonic parses back to its opcode.
#[test]
fn test_opcode_mnemonic_roundtrip() {
    for op in Opcode::ALL {
        assert_eq!(op.mnemonic().parse::<Opcode>(), Ok(op));
        assert_eq!(op.to_string(), op.mnemonic());
    }
}

/// Tests case-insensitive parsing and the EX-OR spelling.
#[rstest]
#[case("movc", Opcode::Movc)]
#[case("Add", Opcode::Add)]
#[case("EX-OR", Opcode::Xor)]
#[case("ex-or", Opcode::Xor)]
#[case("XOR", Opcode::Xor)]
#[case(" bnz ", Opcode::Bnz)]
fn test_opcode_parse_variants(#[case] text: &str, #[case] expected: Opcode) {
    assert_eq!(text.parse::<Opcode>(), Ok(expected));
}

/// Tests that unknown mnemonics are rejected with a readable message.
#[test]
fn test_opcode_parse_unknown() {
    let err = " div ".parse::<Opcode>().unwrap_err();
    assert_eq!(err.to_string(), "unknown opcode 'div'");
    assert!("".parse::<Opcode>().is_err());
}

/// Tests assembly formatting of each instruction shape.
#[test]
fn test_instruction_display() {
    assert_eq!(Instruction::movc(1, 5).to_string(), "MOVC,R1,#5");
    assert_eq!(
        Instruction::rrr(Opcode::Xor, 3, 1, 2).to_string(),
        "XOR,R3,R1,R2"
    );
    assert_eq!(
        Instruction::rri(Opcode::Load, 4, 2, -8).to_string(),
        "LOAD,R4,R2,#-8"
    );
    assert_eq!(Instruction::store(1, 2, 0).to_string(), "STORE,R1,R2,#0");
    assert_eq!(Instruction::jump(0, 4008).to_string(), "JUMP,R0,#4008");
    assert_eq!(
        Instruction::branch(Opcode::Bz, -12).to_string(),
        "BZ,#-12"
    );
    assert_eq!(Instruction::halt().to_string(), "HALT");
    assert_eq!(Instruction::nop().to_string(), "NOP");
}

/// Creates a three-instruction program at the default base.
fn sample_program() -> Program {
    Program::new(vec![
        Instruction::movc(1, 1),
        Instruction::halt(),
        Instruction::movc(2, 2),
    ])
}

/// Tests mapping between program counters and store indices.
#[test]
fn test_program_index_of() {
    let program = sample_program();
    assert_eq!(program.base(), 4000);
    assert_eq!(program.index_of(4000), Some(0));
    assert_eq!(program.index_of(4008), Some(2));
    assert_eq!(program.index_of(4012), Some(3), "past-the-end is still an index");
    assert_eq!(program.index_of(3996), None);
    assert_eq!(program.index_of(4002), None);
    assert_eq!(program.pc_of(2), Some(4008));
}

/// Tests that addresses past the top of the address space are not produced.
#[test]
fn test_program_pc_of_overflow() {
    let program = Program::with_base(i32::MAX - 3, vec![Instruction::halt()]);
    assert_eq!(program.pc_of(0), Some(i32::MAX - 3));
    assert_eq!(program.pc_of(1), None);
    assert_eq!(sample_program().pc_of(usize::MAX), None);
}

/// Tests fetch inside, past, and outside the store.
#[test]
fn test_program_fetch() {
    let program = sample_program();
    assert_eq!(program.fetch(4004), Ok(Some(Instruction::halt())));
    assert_eq!(program.fetch(4012), Ok(None));
    assert_eq!(
        program.fetch(3000),
        Err(SimError::OutOfRangeAccess(AccessFault::InstructionFetch(3000)))
    );
    assert_eq!(
        program.fetch(4001),
        Err(SimError::OutOfRangeAccess(AccessFault::InstructionFetch(4001)))
    );
}

/// Tests that the HALT policy rewrites only later instructions.
#[test]
fn test_program_nop_after() {
    let mut program = sample_program();
    program.nop_after(1);
    assert_eq!(program.get(0), Some(&Instruction::movc(1, 1)));
    assert_eq!(program.get(1), Some(&Instruction::halt()));
    assert_eq!(program.get(2), Some(&Instruction::nop()));
    assert_eq!(program.len(), 3);
}

/// Tests operand selection for the address-computing opcodes.
#[test]
fn test_control_signals_operands() {
    let store = ControlSignals::for_opcode(Opcode::Store);
    assert!(store.mem_write && !store.reg_write);
    assert_eq!((store.a_src, store.b_src), (OpASrc::Reg2, OpBSrc::Imm));

    let ldr = ControlSignals::for_opcode(Opcode::Ldr);
    assert!(ldr.mem_read && ldr.reg_write);
    assert_eq!((ldr.a_src, ldr.b_src), (OpASrc::Reg1, OpBSrc::Reg2));

    let movc = ControlSignals::for_opcode(Opcode::Movc);
    assert_eq!((movc.a_src, movc.b_src), (OpASrc::Zero, OpBSrc::Imm));
    assert!(!movc.uses_rs1 && !movc.uses_rs2);

    let bz = ControlSignals::for_opcode(Opcode::Bz);
    assert!(bz.branch);
    assert_eq!(bz.a_src, OpASrc::Pc);

    assert_eq!(ControlSignals::for_opcode(Opcode::Mul).alu, AluOp::Mul);
    assert!(ControlSignals::for_opcode(Opcode::Jump).jump);
}

/// Tests which opcodes write a destination register.
#[test]
fn test_control_signals_reg_write() {
    let writers = [
        Opcode::Movc,
        Opcode::Add,
        Opcode::Addi,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Load,
        Opcode::Ldr,
    ];
    for op in Opcode::ALL {
        assert_eq!(
            ControlSignals::for_opcode(op).reg_write,
            writers.contains(&op),
            "reg_write for {}",
            op
        );
    }
}
