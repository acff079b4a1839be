//! Unit tests for architectural state: registers, forwarding, data memory.

use pipeline_sim::common::{AccessFault, SimError};
use pipeline_sim::core::arch::{DataMemory, ForwardingTable, RegisterFile};

/// Tests that a fresh register file is all zero and valid.
#[test]
fn test_register_file_reset_state() {
    let regs = RegisterFile::new();
    assert_eq!(regs.values(), [0; 16]);
    assert_eq!(regs.validity(), [true; 16]);
}

/// Tests that R0 is an ordinary, writable register.
#[test]
fn test_register_r0_is_writable() {
    let mut regs = RegisterFile::new();
    regs.write(0, 42).unwrap();
    assert_eq!(regs.read(0).unwrap(), 42, "R0 must hold written values");
}

/// Tests the pending mark lifecycle from execute to retirement.
#[test]
fn test_register_pending_until_commit() {
    let mut regs = RegisterFile::new();
    regs.mark_pending(3).unwrap();
    assert!(regs.is_pending(3).unwrap());
    assert!(!regs.validity()[3]);

    regs.commit(3, 99).unwrap();
    assert!(!regs.is_pending(3).unwrap());
    assert_eq!(regs.read(3).unwrap(), 99);
}

/// Tests that a register stays pending while a second writer is in flight.
#[test]
fn test_register_overlapping_writers() {
    let mut regs = RegisterFile::new();
    regs.mark_pending(5).unwrap();
    regs.mark_pending(5).unwrap();

    regs.commit(5, 1).unwrap();
    assert!(
        regs.is_pending(5).unwrap(),
        "younger writer has not retired yet"
    );

    regs.commit(5, 2).unwrap();
    assert!(!regs.is_pending(5).unwrap());
    assert_eq!(regs.read(5).unwrap(), 2);
}

/// Tests that every register accessor rejects ids past R15.
#[test]
fn test_register_out_of_range() {
    let mut regs = RegisterFile::new();
    let fault = Err(SimError::OutOfRangeAccess(AccessFault::Register(16)));
    assert_eq!(regs.read(16), fault.clone().map(|()| 0));
    assert_eq!(regs.write(16, 1), fault.clone());
    assert_eq!(regs.mark_pending(16), fault.clone());
    assert_eq!(regs.commit(16, 1), fault.clone());
    assert_eq!(regs.is_pending(16), fault.map(|()| false));
}

/// Tests publish and read on the forwarding table.
#[test]
fn test_forwarding_publish_read() {
    let mut fwd = ForwardingTable::new();
    assert_eq!(fwd.read(7).unwrap(), 0);
    fwd.publish(7, -12).unwrap();
    assert_eq!(fwd.read(7).unwrap(), -12);
    fwd.publish(7, 8).unwrap();
    assert_eq!(fwd.read(7).unwrap(), 8, "latest publication wins");
}

/// Tests that the forwarding table rejects ids past R15.
#[test]
fn test_forwarding_out_of_range() {
    let mut fwd = ForwardingTable::new();
    assert_eq!(
        fwd.publish(20, 1),
        Err(SimError::OutOfRangeAccess(AccessFault::Register(20)))
    );
    assert!(fwd.read(16).is_err());
}

/// Tests data memory reads and writes at the edges of its capacity.
#[test]
fn test_data_memory_bounds() {
    let mut mem = DataMemory::new(4000);
    assert_eq!(mem.len(), 4000);

    mem.write(0, 11).unwrap();
    mem.write(3999, 22).unwrap();
    assert_eq!(mem.read(0).unwrap(), 11);
    assert_eq!(mem.read(3999).unwrap(), 22);

    assert_eq!(
        mem.write(4000, 1),
        Err(SimError::OutOfRangeAccess(AccessFault::DataMemory(4000)))
    );
    assert_eq!(
        mem.read(-1),
        Err(SimError::OutOfRangeAccess(AccessFault::DataMemory(-1)))
    );
}

/// Tests that the dump head is clamped to the memory size.
#[test]
fn test_data_memory_head() {
    let mut mem = DataMemory::new(8);
    mem.write(2, 5).unwrap();
    assert_eq!(mem.head(4), &[0, 0, 5, 0]);
    assert_eq!(mem.head(100).len(), 8);
}
