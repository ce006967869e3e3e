/*!
 * Partition Simulator Library
 * Fixed-size pool with first-fit/best-fit placement, splitting and release
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{ConfigError, SimError, SimResult};
pub use memory::{BlockId, BlockView, Heap, HeapInfo, HeapStats, MemoryError, SplitPolicy, Strategy};
pub use monitoring::{init_tracing, log_heap};
pub use process::{Process, ProcessError, ProcessInfo, ProcessState};
pub use simulation::{
    RetryPolicy, RunSummary, SharedSimulation, Simulation, SimulationConfig, StepReport,
    SubmitOutcome, Workload,
};
