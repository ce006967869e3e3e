/*!
 * Heap Allocator Implementation
 * Allocation and deallocation logic
 */

use super::placement::Strategy;
use super::Heap;
use crate::core::types::Size;
use crate::memory::types::BlockId;
use crate::process::Process;
use log::{debug, info, warn};

impl Heap {
    /// Place `process` using `strategy`
    ///
    /// Returns `false` when no available block is large enough; the heap is
    /// left untouched in that case.
    ///
    /// # Panics
    /// If `process` already holds a block.
    pub fn allocate(&mut self, process: &mut Process, strategy: Strategy) -> bool {
        assert!(
            !process.is_allocated(),
            "process {} already holds block {:?}",
            process.pid(),
            process.block()
        );

        let size = process.size();
        let Some(id) = strategy.select(&self.blocks, size) else {
            warn!(
                "Insufficient memory for PID {}: no free block of {} units ({})",
                process.pid(),
                size,
                strategy
            );
            return false;
        };

        self.split(id, size);

        if let Some(block) = self.blocks.get_mut(id) {
            block.occupant = Some(process.pid());
            block.demand = size;
            info!(
                "Allocated block {} ({} units) to PID {} requesting {} [{}]",
                id,
                block.size,
                process.pid(),
                size,
                strategy
            );
        }
        process.attach(id);
        true
    }

    /// Release the block held by `process`
    ///
    /// The block becomes available in place and keeps its size; neighbouring
    /// free blocks stay separate.
    ///
    /// # Panics
    /// If `process` holds no block, or its block is occupied by someone else.
    pub fn deallocate(&mut self, process: &mut Process) {
        let pid = process.pid();
        let id = process
            .detach()
            .unwrap_or_else(|| panic!("process {} is not allocated", pid));

        let block = self
            .blocks
            .get_mut(id)
            .unwrap_or_else(|| panic!("process {} refers to unknown block {}", pid, id));
        assert_eq!(
            block.occupant,
            Some(pid),
            "block {} is not occupied by process {}",
            id,
            pid
        );

        block.occupant = None;
        block.demand = 0;
        info!(
            "Deallocated block {} ({} units) from PID {}",
            id, block.size, pid
        );
    }

    /// Shrink block `id` to `keep` units when the leftover is worth a block
    ///
    /// Returns the new free block, if one was created.
    pub(super) fn split(&mut self, id: BlockId, keep: Size) -> Option<BlockId> {
        let size = self.blocks.get(id)?.size;
        let leftover = size.checked_sub(keep)?;

        if !self
            .split_policy
            .should_split(leftover, self.control_overhead)
        {
            if leftover > 0 {
                debug!(
                    "Kept {} units of slack in block {} (overhead {}, {} policy)",
                    leftover, id, self.control_overhead, self.split_policy
                );
            }
            return None;
        }

        let new_id = self.blocks.split_off(id, keep)?;
        info!(
            "Split block {}: keeping {} units, new free block {} of {} units",
            id, keep, new_id, leftover
        );
        Some(new_id)
    }
}
