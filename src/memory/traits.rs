/*!
 * Memory Traits
 * Read-only view of a partitioned pool
 */

use super::types::{BlockView, HeapStats};
use crate::core::types::Size;

/// Read-only pool inspection, the surface consumed by renderers and loggers
pub trait HeapInfo {
    /// Blocks in traversal order
    fn blocks(&self) -> Vec<BlockView>;

    /// Aggregate statistics
    fn stats(&self) -> HeapStats;

    /// Pool capacity fixed at construction
    fn total_size(&self) -> Size {
        self.stats().total_size
    }

    /// One-line layout for logs
    fn layout(&self) -> String;
}
