/*!
 * Memory Module
 * Partitioned pool, placement and release
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::{Heap, Strategy};
pub use traits::*;
pub use types::*;

use crate::core::types::Size;

impl HeapInfo for Heap {
    fn blocks(&self) -> Vec<BlockView> {
        Heap::blocks(self)
    }

    fn stats(&self) -> HeapStats {
        Heap::stats(self)
    }

    fn total_size(&self) -> Size {
        Heap::total_size(self)
    }

    fn layout(&self) -> String {
        self.to_string()
    }
}
