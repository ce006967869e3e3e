/*!
 * Process Module
 * Processes competing for pool partitions
 */

pub mod types;

// Re-export for convenience
pub use types::{Process, ProcessError, ProcessInfo, ProcessResult, ProcessState};
