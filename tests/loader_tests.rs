//! Tests for the program text loader.

use std::io::Write;

use pipeline_sim::common::{InitError, LoadError};
use pipeline_sim::config::Config;
use pipeline_sim::core::Cpu;
use pipeline_sim::isa::{Instruction, Opcode};
use pipeline_sim::sim::loader;
use tempfile::NamedTempFile;

/// Helper function to create a temporary program file for testing.
fn create_temp_program(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Tests parsing of every operand layout.
#[test]
fn test_parse_all_layouts() {
    let text = "\
MOVC,R1,#5
ADD,R3,R1,R2
ADDI,R4,R3,#-2
LOAD,R5,R0,#12
LDR,R6,R1,R2
STORE,R1,R2,#8
EX-OR,R7,R1,R2
JUMP,R0,#4000
BZ,#8
BNZ,#-8
NOP
HALT
";
    let program = loader::parse_program(text).unwrap();
    assert_eq!(
        program.instructions(),
        &[
            Instruction::movc(1, 5),
            Instruction::rrr(Opcode::Add, 3, 1, 2),
            Instruction::rri(Opcode::Addi, 4, 3, -2),
            Instruction::rri(Opcode::Load, 5, 0, 12),
            Instruction::rrr(Opcode::Ldr, 6, 1, 2),
            Instruction::store(1, 2, 8),
            Instruction::rrr(Opcode::Xor, 7, 1, 2),
            Instruction::jump(0, 4000),
            Instruction::branch(Opcode::Bz, 8),
            Instruction::branch(Opcode::Bnz, -8),
            Instruction::nop(),
            Instruction::halt(),
        ]
    );
}

/// Tests whitespace separators, lower case, blank lines and comments.
#[test]
fn test_parse_free_form() {
    let text = "
; setup
movc r1, #7     // seven

  mul R2 R1 R1
halt ; done
";
    let program = loader::parse_program(text).unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program.get(1), Some(&Instruction::rrr(Opcode::Mul, 2, 1, 1)));
}

/// Tests that an unknown mnemonic reports its line.
#[test]
fn test_parse_unknown_opcode() {
    let err = loader::parse_program("MOVC,R1,#1\nDIV,R1,R2,R3\n").unwrap_err();
    match err {
        LoadError::UnknownOpcode { line, mnemonic } => {
            assert_eq!(line, 2);
            assert_eq!(mnemonic, "DIV");
        }
        other => panic!("expected UnknownOpcode, got {:?}", other),
    }
}

/// Tests the malformed-operand cases.
#[test]
fn test_parse_malformed() {
    let cases = [
        "ADD,R1,R2",
        "MOVC,R1,5",
        "MOVC,X1,#5",
        "MOVC,R16,#5",
        "HALT,R1",
        "BZ,#abc",
    ];
    for text in cases {
        let err = loader::parse_program(text).unwrap_err();
        assert!(
            matches!(err, LoadError::Malformed { line: 1, .. }),
            "'{}' should be malformed, got {:?}",
            text,
            err
        );
    }
}

/// Tests loading a program from disk.
#[test]
fn test_load_program_file() {
    let file = create_temp_program("MOVC,R1,#5\nHALT\n");
    let program = loader::load_program(file.path()).unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program.base(), 4000);
}

/// Tests that a missing file surfaces as an IO error.
#[test]
fn test_load_program_missing_file() {
    let err = loader::load_program("/nonexistent/program.asm").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

/// Tests that construction from an unreadable or empty file fails.
#[test]
fn test_cpu_from_file_failures() {
    let config = Config::default();

    let missing = Cpu::from_file("/nonexistent/program.asm", &config);
    assert!(matches!(missing, Err(InitError::Load(LoadError::Io { .. }))));

    let empty = create_temp_program("; nothing here\n\n");
    let result = Cpu::from_file(empty.path(), &config);
    assert!(matches!(result, Err(InitError::EmptyProgram)));
}

/// Tests a file-loaded program running to completion.
#[test]
fn test_cpu_from_file_runs() {
    let file = create_temp_program("MOVC,R2,#21\nADD,R3,R2,R2\nHALT\n");
    let mut cpu = Cpu::from_file(file.path(), &Config::default()).unwrap();
    cpu.run(100, Default::default()).unwrap();
    assert_eq!(cpu.regs.read(3).unwrap(), 42);
}
