/*!
 * Simulation Module
 *
 * Step-driven driver around the heap. Owns the clock, the active process
 * list and the pid counter; the heap itself only ever sees allocate and
 * deallocate calls.
 *
 * Each step:
 * 1. the clock advances by one
 * 2. every active process is visited in submission order
 *    - pending processes are retried if the [`RetryPolicy`] allows (a process
 *      placed this way does not age on the same step)
 *    - allocated processes tick; when their lifetime reaches zero their block
 *      is released and they leave the active list
 */

pub mod config;
pub mod driver;
pub mod shared;
pub mod types;
pub mod workload;

pub use config::SimulationConfig;
pub use driver::{run, RunSummary};
pub use shared::SharedSimulation;
pub use types::{RetryPolicy, StepReport, SubmitOutcome};
pub use workload::{Submission, Workload};

use crate::core::errors::SimResult;
use crate::core::types::{Lifetime, Pid, Size, Tick};
use crate::memory::{Heap, MemoryError, MemoryResult, Strategy};
use crate::monitoring::StepSpan;
use crate::process::{Process, ProcessError, ProcessInfo, ProcessResult};
use tracing::{debug, info, warn};

/// Explicit simulation context
#[derive(Debug, Clone)]
pub struct Simulation {
    heap: Heap,
    processes: Vec<Process>,
    next_pid: u32,
    clock: Tick,
    strategy: Strategy,
    retry_policy: RetryPolicy,
}

impl Simulation {
    pub fn new(heap: Heap, strategy: Strategy, retry_policy: RetryPolicy) -> Self {
        Self {
            heap,
            processes: Vec::new(),
            next_pid: 0,
            clock: 0,
            strategy,
            retry_policy,
        }
    }

    /// Build the heap and policies described by `config`
    pub fn from_config(config: &SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        let heap = Heap::with_partitions(&config.partitions, config.control_overhead)?
            .with_split_policy(config.split_policy);
        info!(
            strategy = %config.strategy,
            split_policy = %config.split_policy,
            retry_policy = %config.retry_policy,
            "Simulation configured"
        );
        Ok(Self::new(heap, config.strategy, config.retry_policy))
    }

    /// Create a process and try to place it once
    ///
    /// Fails without consuming a pid when `size` is 0 or the id space is used up.
    pub fn submit(&mut self, size: Size, lifetime: Lifetime) -> ProcessResult<SubmitOutcome> {
        let pid = Pid(self.next_pid);
        let next_pid = self
            .next_pid
            .checked_add(1)
            .ok_or(ProcessError::PidsExhausted)?;
        let mut process = Process::new(pid, size, lifetime)?;
        self.next_pid = next_pid;

        info!(pid = %pid, size, lifetime, "Requesting");

        let outcome = if self.heap.allocate(&mut process, self.strategy) {
            let block = process.block();
            self.processes.push(process);
            match block {
                Some(block) => SubmitOutcome::Allocated { pid, block },
                None => SubmitOutcome::Pending { pid },
            }
        } else if self.retry_policy.admits_pending() {
            self.processes.push(process);
            SubmitOutcome::Pending { pid }
        } else {
            warn!(pid = %pid, size, "Insufficient memory, process rejected");
            SubmitOutcome::Rejected { pid }
        };

        debug!(layout = %self.heap, "Heap after submission");
        Ok(outcome)
    }

    /// Advance simulated time by one step
    pub fn step(&mut self) -> StepReport {
        self.clock += 1;
        let span = StepSpan::new(self.clock);
        let _entered = span.enter();
        let mut report = StepReport::new(self.clock);

        let heap = &mut self.heap;
        let strategy = self.strategy;
        let retry = self.retry_policy.retries();

        self.processes.retain_mut(|process| {
            let pid = process.pid();

            if !process.is_allocated() {
                if retry && heap.allocate(process, strategy) {
                    report.allocated.push(pid);
                } else {
                    report.pending.push(pid);
                }
                return true;
            }

            process.tick();
            if process.is_expired() {
                heap.deallocate(process);
                report.expired.push(pid);
                return false;
            }
            true
        });

        span.record_counts(report.allocated.len(), report.expired.len());
        if !report.is_quiet() {
            info!(
                clock = self.clock,
                allocated = ?report.allocated,
                expired = ?report.expired,
                layout = %self.heap,
                "Step"
            );
        }
        report
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Active processes in submission order
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid() == pid)
    }

    /// Process table rows
    pub fn process_table(&self) -> Vec<ProcessInfo> {
        self.processes.iter().map(Process::info).collect()
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// True when nothing is active
    pub fn is_idle(&self) -> bool {
        self.processes.is_empty()
    }

    /// True when active processes remain but none can ever make progress:
    /// all are pending and the policy never retries them
    pub fn is_stalled(&self) -> bool {
        !self.retry_policy.retries()
            && !self.processes.is_empty()
            && self.processes.iter().all(|p| !p.is_allocated())
    }

    /// Heap consistency plus agreement between processes and occupied blocks
    pub fn validate(&self) -> MemoryResult<()> {
        self.heap.validate()?;

        for process in &self.processes {
            if let Some(id) = process.block() {
                let block = self.heap.block(id).ok_or(MemoryError::UnknownBlock(id))?;
                if block.occupant() != Some(process.pid()) {
                    return Err(MemoryError::OccupantMismatch {
                        block: id,
                        pid: process.pid(),
                    });
                }
            }
        }

        for (id, block) in self.heap.iter() {
            if let Some(pid) = block.occupant() {
                let holds = self
                    .process(pid)
                    .map_or(false, |p| p.block() == Some(id));
                if !holds {
                    return Err(MemoryError::OccupantMismatch { block: id, pid });
                }
            }
        }
        Ok(())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Heap::default(), Strategy::default(), RetryPolicy::default())
    }
}
