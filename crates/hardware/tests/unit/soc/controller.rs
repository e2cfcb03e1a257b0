//! Handshake Port Tests.
//!
//! Timing contract of the latency ports: `good` exactly N cycles after a
//! request is accepted, `ready` low while busy, stores visible only after the
//! completing cycle's clock.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::core::units::lsu::MemWidth;
use rvpipe_core::soc::memory::controller::{
    LatencyDataMemory, LatencyInstructionMemory, MemoryController,
};
use rvpipe_core::soc::memory::{Memory, SharedMemory};
use rvpipe_core::soc::traits::{
    DataOp, DataPort, DataRequest, FetchRequest, InstructionPort,
};

fn ram() -> SharedMemory {
    Memory::shared(256)
}

fn read(addr: u64, width: MemWidth) -> DataRequest {
    DataRequest {
        addr,
        op: DataOp::Read,
        width,
        data: 0,
    }
}

fn write(addr: u64, width: MemWidth, data: u64) -> DataRequest {
    DataRequest {
        addr,
        op: DataOp::Write,
        width,
        data,
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
fn good_exactly_latency_cycles_after_accept(#[case] latency: u64) {
    let mem = ram();
    let _ = mem.borrow_mut().write(0x20, 8, 0x1122_3344_5566_7788);
    let mut port = LatencyDataMemory::with_latency(mem, latency);
    let req = read(0x20, MemWidth::Double);

    for cycle in 0..=latency {
        let resp = port.evaluate(Some(req));
        assert_eq!(resp.ready, cycle == 0, "ready in cycle {cycle}");
        if cycle == latency {
            assert!(resp.good);
            assert_eq!(resp.addr, 0x20);
            assert_eq!(resp.data, 0x1122_3344_5566_7788);
        } else {
            assert!(!resp.good, "early good in cycle {cycle}");
        }
        port.clock();
    }

    let idle = port.evaluate(None);
    assert!(idle.ready && !idle.good);
}

#[test]
fn store_is_applied_at_clock() {
    let mem = ram();
    let mut port = LatencyDataMemory::with_latency(mem.clone(), 0);

    let resp = port.evaluate(Some(write(0x10, MemWidth::Word, 0xFFFF_FFFF_CAFE_F00D)));
    assert!(resp.good && !resp.fault);
    assert_eq!(mem.borrow().read_u64(0x10), Some(0), "store visible before clock");

    port.clock();
    assert_eq!(mem.borrow().read_u64(0x10), Some(0xCAFE_F00D));
}

#[test]
fn reevaluating_a_cycle_drops_an_uncommitted_store() {
    let mem = ram();
    let mut port = LatencyDataMemory::with_latency(mem.clone(), 0);
    let _ = port.evaluate(Some(write(0x10, MemWidth::Byte, 0xAB)));
    let _ = port.evaluate(None);
    port.clock();
    assert_eq!(mem.borrow().read(0x10, 1), Some(0));
}

#[test]
fn out_of_range_access_faults() {
    let mut port = LatencyDataMemory::with_latency(ram(), 0);
    let resp = port.evaluate(Some(read(252, MemWidth::Double)));
    assert!(resp.good && resp.fault);

    let resp = port.evaluate(Some(write(256, MemWidth::Byte, 1)));
    assert!(resp.good && resp.fault);
}

#[rstest]
#[case::last_doubleword(248, MemWidth::Double, true)]
#[case::straddles_end(252, MemWidth::Double, false)]
#[case::last_byte(255, MemWidth::Byte, true)]
#[case::past_end(256, MemWidth::Byte, false)]
#[case::address_wraps(u64::MAX - 3, MemWidth::Double, false)]
fn store_lands_only_when_in_range(#[case] addr: u64, #[case] width: MemWidth, #[case] in_range: bool) {
    let mem = ram();
    assert_eq!(mem.borrow().contains(addr, width.bytes()), in_range);

    let mut port = LatencyDataMemory::with_latency(mem.clone(), 1);
    let req = write(addr, width, u64::MAX);
    assert!(!port.evaluate(Some(req)).good);
    port.clock();
    let resp = port.evaluate(Some(req));
    assert!(resp.good);
    assert_eq!(resp.fault, !in_range);
    port.clock();

    let written = mem.borrow().read(addr, width.bytes());
    if in_range {
        assert_eq!(written, Some(width.mask()));
    } else {
        assert_eq!(written, None);
        assert_eq!(mem.borrow().read_u64(248), Some(0));
    }
}

#[test]
fn fetch_word_packs_two_instructions() {
    let mem = ram();
    mem.borrow_mut()
        .load(0x8, &[0x13, 0x00, 0x00, 0x00, 0x73, 0x00, 0x00, 0x00])
        .unwrap();
    let mut port = LatencyInstructionMemory::with_latency(mem, 0);
    let resp = port.evaluate(Some(FetchRequest { addr: 0x8 }));
    assert!(resp.good && !resp.fault);
    assert_eq!(resp.word, 0x0000_0073_0000_0013);
}

#[test]
fn fetch_beyond_ram_faults() {
    let mut port = LatencyInstructionMemory::with_latency(ram(), 2);
    assert!(!port.evaluate(Some(FetchRequest { addr: 0x100 })).good);
    port.clock();
    assert!(!port.evaluate(Some(FetchRequest { addr: 0x100 })).good);
    port.clock();
    let resp = port.evaluate(Some(FetchRequest { addr: 0x100 }));
    assert!(resp.good && resp.fault);
    assert_eq!(resp.addr, 0x100);
}

#[test]
fn busy_port_finishes_the_accepted_request() {
    let mem = ram();
    let _ = mem.borrow_mut().write(0x0, 8, 1);
    let _ = mem.borrow_mut().write(0x8, 8, 2);
    let mut port = LatencyInstructionMemory::with_latency(mem, 1);

    let _ = port.evaluate(Some(FetchRequest { addr: 0x0 }));
    port.clock();
    // The core moved on; the port still answers for the old address.
    let resp = port.evaluate(Some(FetchRequest { addr: 0x8 }));
    assert!(resp.good);
    assert_eq!(resp.addr, 0x0);
    assert_eq!(resp.word, 1);
}

/// Latency that depends on the address: slow above 0x80.
struct Banked;

impl MemoryController for Banked {
    fn access_latency(&mut self, addr: u64) -> u64 {
        if addr >= 0x80 { 3 } else { 0 }
    }
}

#[test]
fn custom_controller_sets_latency_per_access() {
    let mut port = LatencyDataMemory::new(ram(), Box::new(Banked));
    assert!(port.evaluate(Some(read(0x10, MemWidth::Byte))).good);
    port.clock();

    let mut cycles = 0;
    while !port.evaluate(Some(read(0x90, MemWidth::Byte))).good {
        port.clock();
        cycles += 1;
    }
    assert_eq!(cycles, 3);
}
