/*!
 * Clock Driver
 * Runs a workload against a shared simulation on a tokio interval
 */

use super::shared::SharedSimulation;
use super::types::SubmitOutcome;
use super::workload::Workload;
use crate::core::types::Tick;
use crate::memory::HeapStats;
use serde::Serialize;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Totals for a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub steps: Tick,
    pub admitted: usize,
    pub rejected: usize,
    pub invalid: usize,
    pub completed: usize,
    /// Processes left over when the run stopped (stalled or step cap)
    pub unfinished: usize,
    pub final_stats: HeapStats,
}

/// Submit each workload entry when the clock reaches its step, then step
///
/// With `tick` set, steps are paced by a `tokio::time::interval`; with
/// `None` they run back to back. Stops once the workload is exhausted and
/// nothing is left that can make progress, or after `max_steps`.
pub async fn run(
    sim: &SharedSimulation,
    workload: &Workload,
    tick: Option<Duration>,
    max_steps: Tick,
) -> RunSummary {
    let mut interval = tick.map(|period| {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });
    let last_step = workload.last_step().unwrap_or(0);

    let mut admitted = 0;
    let mut rejected = 0;
    let mut invalid = 0;
    let mut completed = 0;

    loop {
        let clock = sim.clock();

        for submission in workload.due(clock) {
            match sim.submit(submission.size, submission.lifetime) {
                Ok(SubmitOutcome::Rejected { .. }) => rejected += 1,
                Ok(_) => admitted += 1,
                Err(e) => {
                    warn!(error = %e, at_step = clock, "Skipping invalid submission");
                    invalid += 1;
                }
            }
        }

        if clock >= last_step {
            let (idle, stalled) = sim.with(|s| (s.is_idle(), s.is_stalled()));
            if idle {
                break;
            }
            if stalled {
                warn!(clock, "Remaining processes are pending with no retry, stopping");
                break;
            }
        }
        if clock >= max_steps {
            warn!(clock, max_steps, "Step limit reached, stopping");
            break;
        }

        match interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => tokio::task::yield_now().await,
        }

        completed += sim.step().expired.len();
    }

    let (steps, unfinished, final_stats) =
        sim.with(|s| (s.clock(), s.processes().len(), s.heap().stats()));

    info!(
        steps,
        admitted,
        rejected,
        completed,
        unfinished,
        used = final_stats.used_size,
        free_blocks = final_stats.free_blocks,
        "Run finished"
    );

    RunSummary {
        steps,
        admitted,
        rejected,
        invalid,
        completed,
        unfinished,
        final_stats,
    }
}
