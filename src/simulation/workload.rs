/*!
 * Workload
 * Scripted process submissions keyed by step
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::types::{Lifetime, Size, Tick};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One process to submit once the clock reaches `at_step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Submission {
    pub at_step: Tick,
    pub size: Size,
    pub lifetime: Lifetime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Workload {
    pub submissions: Vec<Submission>,
}

impl Workload {
    pub fn new(submissions: Vec<Submission>) -> Self {
        Self { submissions }
    }

    /// Small scripted run over the default pool. Exercises splitting, slack
    /// kept below the overhead, a pending process placed by a later retry,
    /// and reuse of released blocks without coalescing.
    pub fn demo() -> Self {
        let s = |at_step: Tick, size: Size, lifetime: Lifetime| Submission {
            at_step,
            size,
            lifetime,
        };
        Self::new(vec![
            s(0, 200, 4),
            s(0, 120, 6),
            s(1, 240, 3),
            s(2, 216, 2),
            s(3, 50, 5),
            s(3, 220, 2),
            s(6, 100, 3),
        ])
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Submissions scheduled for `step`, in file order
    pub fn due(&self, step: Tick) -> impl Iterator<Item = &Submission> + '_ {
        self.submissions.iter().filter(move |s| s.at_step == step)
    }

    /// Last step with a scheduled submission
    pub fn last_step(&self) -> Option<Tick> {
        self.submissions.iter().map(|s| s.at_step).max()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}
