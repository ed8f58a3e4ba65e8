use serde_json::Value;
use std::sync::Arc;

use crate::content::default_content;
use crate::models::{Block, BlockId, BlockType, PageId};
use crate::store::MemoryStore;

/// A block with default content at a given position
pub fn block_at(page_id: PageId, kind: BlockType, order: u32) -> Block {
    let content = default_content(&kind);
    Block::new(page_id, kind, content, order)
}

/// A block with explicit raw content
pub fn block_with(page_id: PageId, kind: BlockType, content: Value, order: u32) -> Block {
    Block::new(page_id, kind, content, order)
}

/// A memory store holding one page with `kinds` at orders `1..=N`
pub async fn seeded_store(kinds: &[BlockType]) -> (Arc<MemoryStore>, PageId, Vec<BlockId>) {
    let page_id = PageId::new();
    let blocks: Vec<Block> = kinds
        .iter()
        .enumerate()
        .map(|(index, kind)| block_at(page_id, kind.clone(), index as u32 + 1))
        .collect();
    let ids = blocks.iter().map(|block| block.id).collect();
    (Arc::new(MemoryStore::with_blocks(blocks)), page_id, ids)
}
