/*!
 * Heap Inspection
 * Read-only snapshots, statistics and consistency checks
 */

use super::Heap;
use crate::memory::types::{BlockView, HeapStats, MemoryError, MemoryResult};
use std::fmt;

impl Heap {
    /// Snapshot of every block in traversal order
    pub fn blocks(&self) -> Vec<BlockView> {
        self.blocks
            .iter()
            .map(|(id, block)| BlockView {
                id,
                size: block.size,
                available: block.is_available(),
                split_origin: block.split_origin,
                occupant: block.occupant,
            })
            .collect()
    }

    pub fn stats(&self) -> HeapStats {
        let mut used_size = 0;
        let mut free_size = 0;
        let mut free_blocks = 0;
        let mut largest_free_block = 0;
        let mut internal_slack = 0;

        for (_, block) in self.blocks.iter() {
            if block.is_available() {
                free_size += block.size;
                free_blocks += 1;
                largest_free_block = largest_free_block.max(block.size);
            } else {
                used_size += block.size;
                internal_slack += block.size.saturating_sub(block.demand);
            }
        }

        let external_fragmentation = if free_size == 0 {
            0.0
        } else {
            1.0 - largest_free_block as f64 / free_size as f64
        };

        HeapStats {
            total_size: self.total_size,
            used_size,
            free_size,
            block_count: self.blocks.len(),
            free_blocks,
            largest_free_block,
            internal_slack,
            external_fragmentation,
        }
    }

    /// Verify link consistency and the capacity invariant
    pub fn validate(&self) -> MemoryResult<()> {
        let mut prev = None;
        let mut visited = 0;
        let mut covered = 0;

        let mut cursor = self.blocks.head();
        while let Some(id) = cursor {
            let node = self.blocks.node(id).ok_or(MemoryError::UnknownBlock(id))?;
            if node.prev != prev || visited >= self.blocks.len() {
                return Err(MemoryError::BrokenLink(id));
            }
            visited += 1;
            covered += node.block.size;
            prev = Some(id);
            cursor = node.next;
        }

        if visited != self.blocks.len() || covered != self.total_size {
            return Err(MemoryError::CapacityMismatch {
                covered,
                total: self.total_size,
            });
        }
        Ok(())
    }
}

/// Layout line such as `[| 200* | 56 | 330 | 250 | 216 |]`; `*` marks
/// occupied blocks
impl fmt::Display for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[|")?;
        for (_, block) in self.blocks.iter() {
            let mark = if block.is_available() { "" } else { "*" };
            write!(f, " {}{} |", block.size, mark)?;
        }
        f.write_str("]")
    }
}
