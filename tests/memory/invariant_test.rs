/*!
 * Invariant Tests
 * Property checks over random allocate/release sequences
 */

use partition_sim::core::types::{Pid, Size};
use partition_sim::memory::{Heap, SplitPolicy, Strategy as Placement};
use partition_sim::process::Process;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Allocate { size: Size, strategy: Placement },
    Release { index: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1usize..400, prop::bool::ANY).prop_map(|(size, best)| Op::Allocate {
            size,
            strategy: if best { Placement::BestFit } else { Placement::FirstFit },
        }),
        (0usize..64).prop_map(|index| Op::Release { index }),
    ]
}

proptest! {
    #[test]
    fn prop_capacity_and_occupancy_hold(
        partitions in prop::collection::vec(1usize..500, 1..8),
        overhead in 0usize..32,
        inclusive in prop::bool::ANY,
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let policy = if inclusive { SplitPolicy::Inclusive } else { SplitPolicy::Strict };
        let mut heap = Heap::with_partitions(&partitions, overhead)
            .unwrap()
            .with_split_policy(policy);
        let total: Size = partitions.iter().sum();
        let mut live: Vec<Process> = Vec::new();
        let mut next_pid = 0;

        for op in ops {
            match op {
                Op::Allocate { size, strategy } => {
                    let mut process = Process::new(Pid(next_pid), size, 1).unwrap();
                    next_pid += 1;
                    let before = heap.blocks();
                    if heap.allocate(&mut process, strategy) {
                        live.push(process);
                    } else {
                        prop_assert_eq!(heap.blocks(), before);
                        prop_assert!(!process.is_allocated());
                    }
                }
                Op::Release { index } => {
                    if !live.is_empty() {
                        let mut process = live.remove(index % live.len());
                        heap.deallocate(&mut process);
                    }
                }
            }

            prop_assert!(heap.validate().is_ok());
            let covered: Size = heap.blocks().iter().map(|b| b.size).sum();
            prop_assert_eq!(covered, total);
            prop_assert_eq!(heap.total_size(), total);

            for view in heap.blocks() {
                prop_assert_eq!(view.available, view.occupant.is_none());
            }
            for process in &live {
                let block = heap.block(process.block().unwrap()).unwrap();
                prop_assert_eq!(block.occupant(), Some(process.pid()));
                prop_assert!(block.size() >= process.size());
            }
            let occupied = heap.blocks().iter().filter(|b| !b.available).count();
            prop_assert_eq!(occupied, live.len());
        }
    }

    #[test]
    fn prop_split_only_above_threshold(
        block in 1usize..1000,
        request in 1usize..1000,
        overhead in 0usize..64,
        inclusive in prop::bool::ANY,
    ) {
        prop_assume!(request <= block);
        let policy = if inclusive { SplitPolicy::Inclusive } else { SplitPolicy::Strict };
        let mut heap = Heap::with_partitions(&[block], overhead)
            .unwrap()
            .with_split_policy(policy);
        let mut process = Process::new(Pid(0), request, 1).unwrap();

        prop_assert!(heap.allocate(&mut process, Placement::FirstFit));
        let leftover = block - request;
        let splits = match policy {
            SplitPolicy::Strict => leftover > overhead,
            SplitPolicy::Inclusive => leftover > 0 && leftover >= overhead,
        };
        let expected_blocks = if splits { 2 } else { 1 };
        prop_assert_eq!(heap.block_count(), expected_blocks);
    }
}
