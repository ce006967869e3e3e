/*!
 * Process Types
 * Units of demand placed into the pool
 */

use crate::core::types::{Lifetime, Pid, Size};
use crate::memory::BlockId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Invalid process size: {0} (must be positive)")]
    InvalidSize(Size),

    #[error("Process id space exhausted")]
    PidsExhausted,
}

/// Process state, derived from the block reference and remaining lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Waiting for a block
    Pending,
    /// Holding a block and ticking down
    Allocated,
    /// Lifetime exhausted; will be released on the current step
    Expired,
}

/// A request for `size` contiguous units that lives for `time_left` steps
///
/// The block reference is non-owning: the heap owns every block, and the
/// process only records which one it sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    size: Size,
    time_left: Lifetime,
    block: Option<BlockId>,
}

impl Process {
    /// Create an unallocated process
    ///
    /// Pid uniqueness is the caller's responsibility; `Simulation` hands out
    /// monotonically increasing pids.
    pub fn new(pid: Pid, size: Size, lifetime: Lifetime) -> ProcessResult<Self> {
        if size == 0 {
            return Err(ProcessError::InvalidSize(size));
        }
        Ok(Self {
            pid,
            size,
            time_left: lifetime,
            block: None,
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn time_left(&self) -> Lifetime {
        self.time_left
    }

    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.block.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.time_left == 0
    }

    pub fn state(&self) -> ProcessState {
        match (self.is_allocated(), self.is_expired()) {
            (false, _) => ProcessState::Pending,
            (true, false) => ProcessState::Allocated,
            (true, true) => ProcessState::Expired,
        }
    }

    /// Advance one step. Only allocated processes age.
    pub fn tick(&mut self) -> Lifetime {
        if self.is_allocated() {
            self.time_left = self.time_left.saturating_sub(1);
        }
        self.time_left
    }

    pub(crate) fn attach(&mut self, block: BlockId) {
        self.block = Some(block);
    }

    pub(crate) fn detach(&mut self) -> Option<BlockId> {
        self.block.take()
    }

    pub fn info(&self) -> ProcessInfo {
        ProcessInfo {
            pid: self.pid,
            size: self.size,
            time_left: self.time_left,
            state: self.state(),
            block: self.block,
        }
    }
}

/// Serializable process snapshot, one row of the process table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub pid: Pid,
    pub size: Size,
    pub time_left: Lifetime,
    pub state: ProcessState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockId>,
}
