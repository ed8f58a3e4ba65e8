//! Product catalog collaborator for `products` blocks.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::content::products::LIMIT_RANGE;
use crate::models::{PageId, ProductRecord};
use crate::store::StoreError;

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Active products of a page, arranged and truncated to `limit`
    async fn list_active_products(
        &self,
        page_id: PageId,
        limit: u16,
    ) -> Result<Vec<ProductRecord>, StoreError>;
}

/// Keep active records, order by sort key ascending then newest first, and
/// truncate to `limit` clamped into the allowed range
pub fn arrange_products(mut records: Vec<ProductRecord>, limit: u16) -> Vec<ProductRecord> {
    let limit = i64::from(limit).clamp(LIMIT_RANGE.0, LIMIT_RANGE.1) as usize;
    records.retain(|product| product.active);
    records.sort_by(|a, b| {
        a.sort_key
            .cmp(&b.sort_key)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    records.truncate(limit);
    records
}

/// Catalog for sites without products
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProducts;

#[async_trait]
impl ProductCatalog for NoProducts {
    async fn list_active_products(
        &self,
        _page_id: PageId,
        _limit: u16,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    records: Mutex<Vec<ProductRecord>>,
}

impl MemoryCatalog {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn push(&self, record: ProductRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn list_active_products(
        &self,
        page_id: PageId,
        limit: u16,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("product catalog lock poisoned".to_string()))?
            .iter()
            .filter(|product| product.page_id == page_id)
            .cloned()
            .collect();
        Ok(arrange_products(records, limit))
    }
}
