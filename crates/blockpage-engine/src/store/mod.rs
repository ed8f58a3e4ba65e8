//! Durable store collaborator.
//!
//! The engine never owns persistence; it issues calls through
//! [`BlockStore`] and treats any failure as reported, never retried.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

use crate::models::{Block, BlockId, BlockPatch, BlockType, PageId};

pub use file::JsonFileStore;
pub use memory::{MemoryStore, StoreOp};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Block not found: {0}")]
    NotFound(BlockId),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode store file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Every block of the page, in no particular order
    async fn list_blocks(&self, page_id: PageId) -> Result<Vec<Block>, StoreError>;

    async fn create_block(
        &self,
        page_id: PageId,
        kind: BlockType,
        content: Value,
        order: u32,
    ) -> Result<Block, StoreError>;

    async fn update_block(&self, id: BlockId, patch: BlockPatch) -> Result<(), StoreError>;

    async fn delete_block(&self, id: BlockId) -> Result<(), StoreError>;
}

/// Canonical in-memory ordering of stored rows: by position, ties by id
pub fn sort_blocks(blocks: &mut [Block]) {
    blocks.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
}
