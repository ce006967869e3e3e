/*!
 * Memory Types
 * Common types for the partition heap
 */

use crate::core::types::{Pid, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Partition size must be positive")]
    ZeroSizedPartition,

    #[error("Capacity mismatch: blocks cover {covered} units, pool total is {total}")]
    CapacityMismatch { covered: Size, total: Size },

    #[error("Broken link at block {0}: prev/next pointers disagree")]
    BrokenLink(BlockId),

    #[error("Block {block} lists occupant {pid} which does not point back to it")]
    OccupantMismatch { block: BlockId, pid: Pid },

    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),
}

/// Stable handle to a block inside the heap arena
///
/// Handles are never invalidated: blocks are only ever created (by `add` or a
/// split), never destroyed, because the heap does not coalesce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub(crate) usize);

impl BlockId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A contiguous partition of the pool, free or occupied by one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(crate) size: Size,
    pub(crate) occupant: Option<Pid>,
    /// Units the occupant actually asked for; 0 while free
    pub(crate) demand: Size,
    pub(crate) split_origin: bool,
}

impl Block {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size,
            occupant: None,
            demand: 0,
            split_origin: false,
        }
    }

    pub(crate) fn from_split(size: Size) -> Self {
        Self {
            size,
            occupant: None,
            demand: 0,
            split_origin: true,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn occupant(&self) -> Option<Pid> {
        self.occupant
    }

    /// Derived from the occupant, so availability and occupancy cannot drift
    #[inline]
    pub fn is_available(&self) -> bool {
        self.occupant.is_none()
    }

    /// True for blocks carved out of a larger block by a split
    pub fn is_split_origin(&self) -> bool {
        self.split_origin
    }

    #[inline]
    pub(crate) fn fits(&self, size: Size) -> bool {
        self.is_available() && self.size >= size
    }
}

/// Read-only snapshot of one block, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub id: BlockId,
    pub size: Size,
    pub available: bool,
    pub split_origin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<Pid>,
}

/// When a leftover is large enough to become its own free block
///
/// The two historical variants disagree on the boundary (`>` vs `>=` against
/// the control overhead), so the comparison is an explicit setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Split only when the leftover strictly exceeds the overhead
    #[default]
    Strict,
    /// Split when the leftover meets or exceeds the overhead
    Inclusive,
}

impl SplitPolicy {
    /// Whether `leftover` units deserve a block of their own
    #[inline]
    pub const fn should_split(self, leftover: Size, overhead: Size) -> bool {
        if leftover == 0 {
            return false;
        }
        match self {
            Self::Strict => leftover > overhead,
            Self::Inclusive => leftover >= overhead,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Inclusive => "inclusive",
        }
    }
}

impl FromStr for SplitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "gt" => Ok(Self::Strict),
            "inclusive" | "ge" => Ok(Self::Inclusive),
            _ => Err(format!("Invalid split policy '{}'. Valid: strict, inclusive", s)),
        }
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heap statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapStats {
    pub total_size: Size,
    pub used_size: Size,
    pub free_size: Size,
    pub block_count: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
    /// Capacity held by occupied blocks beyond what their occupants asked for
    pub internal_slack: Size,
    /// `1 - largest_free / free`; 0.0 when free space is one block or none
    pub external_fragmentation: f64,
}

impl HeapStats {
    pub fn usage_percentage(&self) -> f64 {
        if self.total_size == 0 {
            return 0.0;
        }
        (self.used_size as f64 / self.total_size as f64) * 100.0
    }
}
