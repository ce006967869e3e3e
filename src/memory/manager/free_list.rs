/*!
 * Block List
 * Arena-backed doubly-linked sequence of partitions
 */

use super::super::types::{Block, BlockId};
use crate::core::types::Size;

/// Arena slot: the block plus its integer links
#[derive(Debug, Clone)]
pub(super) struct BlockNode {
    pub block: Block,
    pub prev: Option<BlockId>,
    pub next: Option<BlockId>,
}

/// Ordered sequence of blocks covering the whole pool
///
/// Nodes live in a `Vec` and link to each other by index, so a split never
/// moves or invalidates an existing `BlockId`. Traversal follows the links
/// from `head`, not arena order.
#[derive(Debug, Clone, Default)]
pub(super) struct BlockList {
    nodes: Vec<BlockNode>,
    head: Option<BlockId>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<BlockId> {
        self.head
    }

    pub fn node(&self, id: BlockId) -> Option<&BlockNode> {
        self.nodes.get(id.0)
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.nodes.get(id.0).map(|n| &n.block)
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.nodes.get_mut(id.0).map(|n| &mut n.block)
    }

    fn push_node(&mut self, node: BlockNode) -> BlockId {
        let id = BlockId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Link `block` in as the new head
    pub fn push_front(&mut self, block: Block) -> BlockId {
        let old_head = self.head;
        let id = self.push_node(BlockNode {
            block,
            prev: None,
            next: old_head,
        });
        if let Some(old) = old_head {
            self.nodes[old.0].prev = Some(id);
        }
        self.head = Some(id);
        id
    }

    /// Link `block` immediately after `at`
    ///
    /// Returns `None` if `at` is not a live block.
    pub fn insert_after(&mut self, at: BlockId, block: Block) -> Option<BlockId> {
        let after = self.nodes.get(at.0)?.next;
        let id = self.push_node(BlockNode {
            block,
            prev: Some(at),
            next: after,
        });
        if let Some(next) = after {
            self.nodes[next.0].prev = Some(id);
        }
        self.nodes[at.0].next = Some(id);
        Some(id)
    }

    /// Carve `block.size - keep` units off the tail of `id` into a new free
    /// block linked right after it. The caller decides whether the leftover is
    /// worth a block; this only performs the cut.
    pub fn split_off(&mut self, id: BlockId, keep: Size) -> Option<BlockId> {
        let size = self.get(id)?.size;
        if keep >= size {
            return None;
        }
        let leftover = size - keep;
        let new_id = self.insert_after(id, Block::from_split(leftover))?;
        self.nodes[id.0].block.size = keep;
        Some(new_id)
    }

    /// Iterate blocks in link order starting at the head
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

/// Link-order iterator over `(BlockId, &Block)`
pub(super) struct Iter<'a> {
    list: &'a BlockList,
    cursor: Option<BlockId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.nodes.get(id.0)?;
        self.cursor = node.next;
        Some((id, &node.block))
    }
}
