/*!
 * Simulation Types
 * Driver policies and per-step reports
 */

use crate::core::types::{Pid, Tick};
use crate::memory::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the driver does with a process that could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Drop the process at submission if it does not fit right away
    Reject,
    /// Keep it pending and retry placement on every step
    #[default]
    EveryStep,
    /// Keep it pending but never retry. A process that misses its first
    /// placement never runs and never expires; kept only to reproduce that
    /// behaviour, it is almost never what you want.
    Never,
}

impl RetryPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::EveryStep => "every_step",
            Self::Never => "never",
        }
    }

    #[inline]
    pub const fn admits_pending(self) -> bool {
        !matches!(self, Self::Reject)
    }

    #[inline]
    pub const fn retries(self) -> bool {
        matches!(self, Self::EveryStep)
    }
}

impl FromStr for RetryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(Self::Reject),
            "every_step" | "retry" => Ok(Self::EveryStep),
            "never" | "once" => Ok(Self::Never),
            _ => Err(format!(
                "Invalid retry policy '{}'. Valid: reject, every_step, never",
                s
            )),
        }
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of submitting a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Placed immediately
    Allocated { pid: Pid, block: BlockId },
    /// Admitted without a block
    Pending { pid: Pid },
    /// Did not fit and was discarded; the pid is still consumed
    Rejected { pid: Pid },
}

impl SubmitOutcome {
    pub fn pid(&self) -> Pid {
        match *self {
            Self::Allocated { pid, .. } | Self::Pending { pid } | Self::Rejected { pid } => pid,
        }
    }

    pub fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated { .. })
    }
}

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StepReport {
    pub clock: Tick,
    /// Pending processes placed by a retry this step
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allocated: Vec<Pid>,
    /// Processes whose lifetime ran out and whose blocks were released
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expired: Vec<Pid>,
    /// Processes still without a block after this step
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pending: Vec<Pid>,
}

impl StepReport {
    pub fn new(clock: Tick) -> Self {
        Self {
            clock,
            ..Default::default()
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.allocated.is_empty() && self.expired.is_empty()
    }
}
