/*!
 * Partition Simulator - Main Entry Point
 *
 * Usage: partition-sim [config.json] [workload.json]
 *
 * Without a config argument the configuration comes from the environment
 * (see `SimulationConfig::from_env`). Without a workload argument a built-in
 * demo workload is used.
 */

use miette::{IntoDiagnostic, Result};
use partition_sim::core::limits::DEFAULT_MAX_STEPS;
use partition_sim::simulation::run;
use partition_sim::{
    init_tracing, log_heap, SharedSimulation, SimError, Simulation, SimulationConfig, Workload,
};
use std::time::Duration;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => SimulationConfig::from_file(path),
        None => SimulationConfig::from_env(),
    }
    .map_err(SimError::from)?;

    let workload = match args.next() {
        Some(path) => Workload::from_file(path).map_err(SimError::from)?,
        None => Workload::demo(),
    };

    info!(
        partitions = ?config.partitions,
        control_overhead = config.control_overhead,
        strategy = %config.strategy,
        submissions = workload.submissions.len(),
        "Partition simulator starting"
    );

    let sim = SharedSimulation::new(Simulation::from_config(&config)?);
    sim.with(|s| log_heap(s.heap()));

    // Periodic stats while the clock runs
    let reporter = {
        let sim = sim.clone();
        let period = config
            .tick_interval()
            .map_or(Duration::from_millis(250), |tick| tick * 5);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let stats = sim.stats();
                info!(
                    clock = sim.clock(),
                    used = stats.used_size,
                    free = stats.free_size,
                    usage = format_args!("{:.1}%", stats.usage_percentage()),
                    "Pool usage"
                );
            }
        })
    };

    let summary = tokio::select! {
        summary = run(&sim, &workload, config.tick_interval(), DEFAULT_MAX_STEPS) => summary,
        signal = tokio::signal::ctrl_c() => {
            signal.into_diagnostic()?;
            info!("Interrupted, stopping simulation");
            reporter.abort();
            sim.with(|s| log_heap(s.heap()));
            return Ok(());
        }
    };
    reporter.abort();

    sim.with(|s| log_heap(s.heap()));
    info!(
        summary = %serde_json::to_string(&summary).into_diagnostic()?,
        "Simulation complete"
    );
    Ok(())
}
