/*!
 * Placement Strategies
 * First-fit and best-fit block selection
 */

use super::free_list::BlockList;
use crate::memory::types::BlockId;
use crate::core::types::Size;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Placement policy used to pick a free block for a request
///
/// Both policies scan the block sequence linearly; no size index is kept, so
/// every attempt is O(n) in the number of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// First available block large enough, in traversal order
    #[default]
    FirstFit,
    /// Available block leaving the least leftover; earliest wins ties
    BestFit,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::FirstFit, Strategy::BestFit];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstFit => "first_fit",
            Self::BestFit => "best_fit",
        }
    }

    /// Pick a block for `size` units without mutating anything
    pub(super) fn select(self, blocks: &BlockList, size: Size) -> Option<BlockId> {
        match self {
            Self::FirstFit => first_fit(blocks, size),
            Self::BestFit => best_fit(blocks, size),
        }
    }
}

fn first_fit(blocks: &BlockList, size: Size) -> Option<BlockId> {
    blocks
        .iter()
        .find(|(_, block)| block.fits(size))
        .map(|(id, _)| id)
}

fn best_fit(blocks: &BlockList, size: Size) -> Option<BlockId> {
    let mut best: Option<(BlockId, Size)> = None;

    for (id, block) in blocks.iter() {
        if !block.fits(size) {
            continue;
        }
        let leftover = block.size - size;
        // Strict comparison keeps the earliest candidate on ties
        if best.map_or(true, |(_, min)| leftover < min) {
            best = Some((id, leftover));
            if leftover == 0 {
                break;
            }
        }
    }

    best.map(|(id, _)| id)
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "first_fit" | "firstfit" | "first" => Ok(Self::FirstFit),
            "best_fit" | "bestfit" | "best" => Ok(Self::BestFit),
            _ => Err(format!("Invalid strategy '{}'. Valid: first_fit, best_fit", s)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Strategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
