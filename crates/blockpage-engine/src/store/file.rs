use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{BlockStore, StoreError};
use crate::catalog::{ProductCatalog, arrange_products};
use crate::models::{Block, BlockId, BlockPatch, BlockType, PageId, ProductRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: PageId,
    #[serde(default)]
    pub title: String,
}

/// On-disk document of a [`JsonFileStore`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub pages: Vec<PageRecord>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// Block store backed by a single pretty-printed JSON file.
///
/// Every call reads the file, applies the change and writes it back. A
/// missing file reads as an empty document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn pages(&self) -> Result<Vec<PageRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.pages)
    }

    /// Register a page, creating the file if needed
    pub async fn create_page(&self, title: &str) -> Result<PageRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let page = PageRecord {
            id: PageId::new(),
            title: title.to_string(),
        };
        document.pages.push(page.clone());
        self.write(&document).await?;
        Ok(page)
    }

    pub async fn add_product(&self, product: ProductRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        document.products.push(product);
        self.write(&document).await
    }

    async fn read(&self) -> Result<StoreDocument, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        let json = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, json).await.map_err(io_error)
    }
}

#[async_trait]
impl BlockStore for JsonFileStore {
    async fn list_blocks(&self, page_id: PageId) -> Result<Vec<Block>, StoreError> {
        let _guard = self.lock.lock().await;
        let document = self.read().await?;
        Ok(document
            .blocks
            .into_iter()
            .filter(|block| block.page_id == page_id)
            .collect())
    }

    async fn create_block(
        &self,
        page_id: PageId,
        kind: BlockType,
        content: Value,
        order: u32,
    ) -> Result<Block, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let block = Block::new(page_id, kind, content, order);
        document.blocks.push(block.clone());
        self.write(&document).await?;
        Ok(block)
    }

    async fn update_block(&self, id: BlockId, patch: BlockPatch) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let block = document
            .blocks
            .iter_mut()
            .find(|block| block.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply_to(block);
        self.write(&document).await
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let before = document.blocks.len();
        document.blocks.retain(|block| block.id != id);
        if document.blocks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.write(&document).await
    }
}

#[async_trait]
impl ProductCatalog for JsonFileStore {
    async fn list_active_products(
        &self,
        page_id: PageId,
        limit: u16,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let document = self.read().await?;
        let records = document
            .products
            .into_iter()
            .filter(|product| product.page_id == page_id)
            .collect();
        Ok(arrange_products(records, limit))
    }
}
