/*!
 * Monitoring
 * Tracing setup and heap reporting
 */

mod tracer;

pub use tracer::{init_tracing, StepSpan, ENV_TRACE_JSON};

use crate::memory::HeapInfo;
use tracing::info;

/// Emit the current layout and aggregate statistics of a pool
pub fn log_heap(heap: &impl HeapInfo) {
    let stats = heap.stats();
    info!(
        layout = %heap.layout(),
        total = stats.total_size,
        used = stats.used_size,
        free = stats.free_size,
        blocks = stats.block_count,
        free_blocks = stats.free_blocks,
        largest_free = stats.largest_free_block,
        slack = stats.internal_slack,
        fragmentation = format_args!("{:.2}", stats.external_fragmentation),
        usage = format_args!("{:.1}%", stats.usage_percentage()),
        "Heap"
    );
}
