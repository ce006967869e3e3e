/*!
 * Simulation Configuration
 *
 * Loaded from JSON, with environment overrides:
 * - `SIM_CONFIG`: path to a JSON config file
 * - `SIM_STRATEGY`: `first_fit` | `best_fit`
 * - `SIM_SPLIT_POLICY`: `strict` | `inclusive`
 * - `SIM_RETRY_POLICY`: `reject` | `every_step` | `never`
 * - `SIM_TICK_INTERVAL_MS`: clock period, `0` to step without waiting
 */

use super::types::RetryPolicy;
use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{DEFAULT_CONTROL_OVERHEAD, DEFAULT_PARTITIONS, DEFAULT_TICK_INTERVAL_MS};
use crate::core::types::Size;
use crate::memory::{SplitPolicy, Strategy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "SIM_CONFIG";
pub const ENV_STRATEGY: &str = "SIM_STRATEGY";
pub const ENV_SPLIT_POLICY: &str = "SIM_SPLIT_POLICY";
pub const ENV_RETRY_POLICY: &str = "SIM_RETRY_POLICY";
pub const ENV_TICK_INTERVAL_MS: &str = "SIM_TICK_INTERVAL_MS";

/// Pool layout and driver policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Partition sizes in supply order
    pub partitions: Vec<Size>,
    /// Bookkeeping overhead used as the split threshold
    pub control_overhead: Size,
    pub strategy: Strategy,
    pub split_policy: SplitPolicy,
    pub retry_policy: RetryPolicy,
    /// Clock period in milliseconds (0 = as fast as possible)
    pub tick_interval_ms: u64,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            partitions: DEFAULT_PARTITIONS.to_vec(),
            control_overhead: DEFAULT_CONTROL_OVERHEAD,
            strategy: Strategy::FirstFit,
            split_policy: SplitPolicy::Strict,
            retry_policy: RetryPolicy::EveryStep,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_split_policy(mut self, policy: SplitPolicy) -> Self {
        self.split_policy = policy;
        self
    }

    pub fn with_partitions(mut self, partitions: Vec<Size>) -> Self {
        self.partitions = partitions;
        self
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Defaults, or the file named by `SIM_CONFIG`, with per-field overrides
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::new(),
        };

        if let Some(strategy) = env_override(ENV_STRATEGY)? {
            config.strategy = strategy;
        }
        if let Some(policy) = env_override(ENV_SPLIT_POLICY)? {
            config.split_policy = policy;
        }
        if let Some(policy) = env_override(ENV_RETRY_POLICY)? {
            config.retry_policy = policy;
        }
        if let Some(ms) = env_override(ENV_TICK_INTERVAL_MS)? {
            config.tick_interval_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.partitions.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        if let Some(index) = self.partitions.iter().position(|&size| size == 0) {
            return Err(ConfigError::ZeroPartition { index });
        }
        Ok(())
    }

    /// `None` means step without waiting
    pub fn tick_interval(&self) -> Option<Duration> {
        (self.tick_interval_ms > 0).then(|| Duration::from_millis(self.tick_interval_ms))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_override<T>(key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: ToString,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
