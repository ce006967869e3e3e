/*!
 * Fragmentation Tests
 * Release without coalescing and reuse of freed partitions
 */

use partition_sim::core::types::{Pid, Size};
use partition_sim::memory::{Heap, Strategy};
use partition_sim::process::Process;
use pretty_assertions::assert_eq;

fn sizes(heap: &Heap) -> Vec<(Size, bool)> {
    heap.blocks().iter().map(|b| (b.size, b.available)).collect()
}

#[test]
fn test_adjacent_free_blocks_are_not_coalesced() {
    let mut heap = Heap::with_partitions(&[300], 16).unwrap();
    let mut a = Process::new(Pid(0), 100, 1).unwrap();
    let mut b = Process::new(Pid(1), 100, 1).unwrap();

    assert!(heap.allocate(&mut a, Strategy::FirstFit));
    assert!(heap.allocate(&mut b, Strategy::FirstFit));
    assert_eq!(sizes(&heap), vec![(100, false), (100, false), (100, true)]);

    heap.deallocate(&mut a);
    heap.deallocate(&mut b);

    assert_eq!(sizes(&heap), vec![(100, true), (100, true), (100, true)]);
    assert!(!a.is_allocated());
    assert!(!b.is_allocated());

    // 300 units free, but no single block can hold 150
    let mut big = Process::new(Pid(2), 150, 1).unwrap();
    assert!(!heap.allocate(&mut big, Strategy::BestFit));

    let stats = heap.stats();
    assert_eq!(stats.free_size, 300);
    assert_eq!(stats.largest_free_block, 100);
    assert!((stats.external_fragmentation - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_freed_block_keeps_its_size_and_is_reused() {
    let mut heap = Heap::with_partitions(&[216, 250, 330, 256], 16).unwrap();
    let mut p = Process::new(Pid(0), 200, 1).unwrap();
    heap.allocate(&mut p, Strategy::FirstFit);
    let id = p.block().unwrap();

    heap.deallocate(&mut p);
    let block = heap.block(id).unwrap();
    assert_eq!(block.size(), 200);
    assert!(block.is_available());
    assert!(block.occupant().is_none());

    // Best fit now prefers the shrunken 200 block for a 190 request
    let mut q = Process::new(Pid(1), 190, 1).unwrap();
    assert!(heap.allocate(&mut q, Strategy::BestFit));
    assert_eq!(q.block(), Some(id));
}

#[test]
fn test_repeated_splits_grow_block_count_only() {
    let mut heap = Heap::with_partitions(&[1000], 16).unwrap();
    let mut processes: Vec<Process> = (0..5)
        .map(|i| Process::new(Pid(i), 100, 1).unwrap())
        .collect();

    for p in processes.iter_mut() {
        assert!(heap.allocate(p, Strategy::FirstFit));
    }
    assert_eq!(heap.block_count(), 6);

    for p in processes.iter_mut() {
        heap.deallocate(p);
    }
    assert_eq!(heap.block_count(), 6);
    assert_eq!(heap.stats().free_size, 1000);
    assert!(heap.validate().is_ok());
}

#[test]
#[should_panic(expected = "is not allocated")]
fn test_double_release_panics() {
    let mut heap = Heap::default();
    let mut p = Process::new(Pid(0), 10, 1).unwrap();
    heap.allocate(&mut p, Strategy::FirstFit);
    heap.deallocate(&mut p);
    heap.deallocate(&mut p);
}
