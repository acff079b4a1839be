//! Unit tests for ALU operations.

use pipeline_sim::core::pipeline::signals::AluOp;
use pipeline_sim::core::units::alu::Alu;
use rstest::rstest;

/// Tests each operation on ordinary operands.
#[rstest]
#[case(AluOp::Add, 10, 20, 30)]
#[case(AluOp::Add, -5, 3, -2)]
#[case(AluOp::Sub, 30, 10, 20)]
#[case(AluOp::Sub, 0, 1, -1)]
#[case(AluOp::Mul, 3, 4, 12)]
#[case(AluOp::Mul, -6, 7, -42)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
fn test_alu_basic(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] expected: i32) {
    assert_eq!(Alu::execute(op, a, b), expected, "{:?}({}, {})", op, a, b);
}

/// Tests that arithmetic wraps at 32 bits instead of panicking.
#[rstest]
#[case(AluOp::Add, i32::MAX, 1, i32::MIN)]
#[case(AluOp::Sub, i32::MIN, 1, i32::MAX)]
#[case(AluOp::Mul, 0x1000_0000, 16, 0)]
#[case(AluOp::Mul, i32::MIN, -1, i32::MIN)]
fn test_alu_wraps(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] expected: i32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

/// Tests bitwise operations on negative operands.
#[test]
fn test_alu_bitwise_negative() {
    assert_eq!(Alu::execute(AluOp::And, -1, 0x55), 0x55);
    assert_eq!(Alu::execute(AluOp::Or, -2, 1), -1);
    assert_eq!(Alu::execute(AluOp::Xor, -1, -1), 0);
}
