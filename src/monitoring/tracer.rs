/*!
 * Structured Tracing
 * Subscriber setup and per-step spans using the tracing crate
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable switching the subscriber to JSON output
pub const ENV_TRACE_JSON: &str = "SIM_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SIM_TRACE_JSON: Enable JSON output (default: false)
///
/// Records emitted through the `log` facade are forwarded to the same
/// subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one simulation step
///
/// Records how many processes were placed and released, and warns when a
/// step takes unusually long (large pools scanned linearly).
pub struct StepSpan {
    span: tracing::Span,
    start: Instant,
    clock: u64,
}

impl StepSpan {
    /// Steps slower than this are reported at warn level
    const SLOW_STEP_MS: u128 = 10;

    pub fn new(clock: u64) -> Self {
        let span = span!(
            Level::DEBUG,
            "step",
            clock,
            allocated = tracing::field::Empty,
            expired = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
            clock,
        }
    }

    pub fn record_counts(&self, allocated: usize, expired: usize) {
        self.span.record("allocated", allocated);
        self.span.record("expired", expired);
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for StepSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros());
        let _entered = self.span.enter();

        if duration.as_millis() > Self::SLOW_STEP_MS {
            warn!(
                clock = self.clock,
                duration_ms = duration.as_millis(),
                slow = true,
                "slow step detected"
            );
        } else {
            debug!(clock = self.clock, duration_us = duration.as_micros(), "step completed");
        }
    }
}
