/*!
 * Simulator Defaults and Constants
 *
 * Centralized location for the pool layout and bookkeeping constants.
 */

use super::types::Size;

// =============================================================================
// POOL LAYOUT
// =============================================================================

/// Partition sizes supplied at startup, in supply order.
/// Partitions are prepended, so traversal order is the reverse of this list.
pub const DEFAULT_PARTITIONS: [Size; 4] = [216, 250, 330, 256];

/// Per-block bookkeeping overhead (the control block size).
/// A leftover that does not clear this threshold is kept as slack instead of
/// becoming its own free block.
pub const DEFAULT_CONTROL_OVERHEAD: Size = 16;

// =============================================================================
// DRIVER
// =============================================================================

/// Period of the simulation clock in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Upper bound on steps the demo driver will run before giving up
pub const DEFAULT_MAX_STEPS: u64 = 10_000;
