/*!
 * Partition Heap
 *
 * Fixed-size pool made of partitions kept in one ordered, doubly-linked
 * sequence. Every unit of the pool belongs to exactly one block at all times.
 *
 * ## Allocation
 *
 * - **Placement**: first-fit or best-fit over the sequence (see [`Strategy`])
 * - **Splitting**: the tail of an oversized block becomes a new free block
 *   when it clears the control overhead (see [`SplitPolicy`]); otherwise it
 *   stays with the occupant as slack
 * - **Release**: freed blocks are marked available in place. Adjacent free
 *   blocks are never merged.
 *
 * ## Layout
 *
 * Blocks sit in an arena and link by [`BlockId`]. Partitions added at setup
 * are prepended, so the traversal order is the reverse of supply order.
 */

mod allocator;
mod free_list;
mod inspect;
mod placement;

pub use placement::Strategy;

use super::types::{Block, BlockId, MemoryError, MemoryResult, SplitPolicy};
use crate::core::limits::{DEFAULT_CONTROL_OVERHEAD, DEFAULT_PARTITIONS};
use crate::core::types::Size;
use free_list::BlockList;
use log::info;

/// Simulated memory pool
#[derive(Debug, Clone)]
pub struct Heap {
    blocks: BlockList,
    total_size: Size,
    control_overhead: Size,
    split_policy: SplitPolicy,
}

impl Heap {
    /// Empty heap with the given bookkeeping overhead and strict splitting
    pub fn new(control_overhead: Size) -> Self {
        Self {
            blocks: BlockList::new(),
            total_size: 0,
            control_overhead,
            split_policy: SplitPolicy::default(),
        }
    }

    /// Heap built from `partitions` in supply order
    pub fn with_partitions(partitions: &[Size], control_overhead: Size) -> MemoryResult<Self> {
        let mut heap = Self::new(control_overhead);
        for &size in partitions {
            heap.add(size)?;
        }
        info!(
            "Heap initialized with {} partitions, {} units total (control overhead {})",
            heap.block_count(),
            heap.total_size,
            control_overhead
        );
        Ok(heap)
    }

    pub fn with_split_policy(mut self, policy: SplitPolicy) -> Self {
        self.split_policy = policy;
        self
    }

    /// Add a free partition at the head of the sequence
    ///
    /// Meant for pool construction. The pool total grows by `size`.
    pub fn add(&mut self, size: Size) -> MemoryResult<BlockId> {
        if size == 0 {
            return Err(MemoryError::ZeroSizedPartition);
        }
        let id = self.blocks.push_front(Block::new(size));
        self.total_size += size;
        Ok(id)
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    pub fn control_overhead(&self) -> Size {
        self.control_overhead
    }

    pub fn split_policy(&self) -> SplitPolicy {
        self.split_policy
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Blocks in traversal order
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> + '_ {
        self.blocks.iter()
    }
}

impl Default for Heap {
    fn default() -> Self {
        let mut heap = Self::new(DEFAULT_CONTROL_OVERHEAD);
        for size in DEFAULT_PARTITIONS {
            let added = heap.add(size);
            debug_assert!(added.is_ok(), "default partition sizes must be positive");
        }
        heap
    }
}
