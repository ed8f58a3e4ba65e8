//! Ordered block list of one page.
//!
//! The engine keeps two lists. `canonical` mirrors what the store last
//! confirmed; `optimistic` is what the editor sees and is mutated before
//! the store is called. A successful operation promotes the optimistic list
//! to canonical. Any store failure replaces both with a fresh read of the
//! store, or with the last canonical list if that read fails too.

use std::sync::Arc;

use crate::content::default_content;
use crate::models::{Block, BlockId, BlockPatch, BlockType, PageId};
use crate::store::{BlockStore, StoreError, sort_blocks};

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Block {0} is not on this page")]
    UnknownBlock(BlockId),
    #[error("Failed to persist block order: {source}")]
    Store {
        source: StoreError,
        /// The list was replaced by a fresh read of the store
        reloaded: bool,
    },
}

/// Durable effects of one successful operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderChange {
    /// Position writes, in the order they were issued
    pub writes: Vec<(BlockId, u32)>,
    pub created: Option<BlockId>,
    pub removed: Option<BlockId>,
}

impl OrderChange {
    pub fn wrote(&self, id: BlockId) -> bool {
        self.writes.iter().any(|(written, _)| *written == id)
    }
}

pub struct OrderEngine<S: BlockStore + ?Sized> {
    store: Arc<S>,
    page_id: PageId,
    canonical: Vec<Block>,
    optimistic: Vec<Block>,
}

impl<S: BlockStore + ?Sized> OrderEngine<S> {
    /// Read a page's blocks and order them by `(order, id)`
    pub async fn load(store: Arc<S>, page_id: PageId) -> Result<Self, OrderError> {
        let blocks = fetch(store.as_ref(), page_id)
            .await
            .map_err(|source| OrderError::Store {
                source,
                reloaded: false,
            })?;
        let engine = Self {
            store,
            page_id,
            canonical: blocks.clone(),
            optimistic: blocks,
        };
        if !engine.is_dense() {
            log::warn!(
                "page {page_id} has non-dense block order {:?}, will renumber on next change",
                engine.orders()
            );
        }
        Ok(engine)
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// The list the editor sees
    pub fn blocks(&self) -> &[Block] {
        &self.optimistic
    }

    /// The list last confirmed by the store
    pub fn canonical(&self) -> &[Block] {
        &self.canonical
    }

    pub fn len(&self) -> usize {
        self.optimistic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.optimistic.is_empty()
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.optimistic.iter().position(|block| block.id == id)
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.optimistic.iter().find(|block| block.id == id)
    }

    pub fn orders(&self) -> Vec<u32> {
        self.optimistic.iter().map(|block| block.order).collect()
    }

    /// Whether the positions are exactly `1..=N` in list order
    pub fn is_dense(&self) -> bool {
        self.optimistic
            .iter()
            .enumerate()
            .all(|(index, block)| block.order as usize == index + 1)
    }

    /// Replace both lists with the store's current rows
    pub async fn reload(&mut self) -> Result<(), OrderError> {
        let blocks = fetch(self.store.as_ref(), self.page_id)
            .await
            .map_err(|source| OrderError::Store {
                source,
                reloaded: false,
            })?;
        self.canonical = blocks.clone();
        self.optimistic = blocks;
        Ok(())
    }

    /// Create a block of `kind` with default content after the current last
    /// position, then move it to `index`
    pub async fn insert_at(
        &mut self,
        index: usize,
        kind: BlockType,
    ) -> Result<OrderChange, OrderError> {
        let next = self
            .optimistic
            .iter()
            .map(|block| block.order)
            .max()
            .unwrap_or(0)
            + 1;
        let content = default_content(&kind);
        let created = match self
            .store
            .create_block(self.page_id, kind, content, next)
            .await
        {
            Ok(block) => block,
            Err(source) => return Err(self.reconcile(source).await),
        };
        log::info!(
            "created {} block {} on page {} at order {next}",
            created.kind,
            created.id,
            self.page_id
        );

        let id = created.id;
        self.optimistic.push(created.clone());
        // The created row is durable even if the move below fails.
        self.canonical.push(created);

        let mut change = self.place(id, index).await?;
        change.created = Some(id);
        Ok(change)
    }

    /// Move a block to `target` (clamped to the list) and renumber
    pub async fn move_to(&mut self, id: BlockId, target: usize) -> Result<OrderChange, OrderError> {
        self.place(id, target).await
    }

    /// Delete a block and renumber the rest
    pub async fn remove(&mut self, id: BlockId) -> Result<OrderChange, OrderError> {
        let index = self.position(id).ok_or(OrderError::UnknownBlock(id))?;
        self.optimistic.remove(index);
        if let Err(source) = self.store.delete_block(id).await {
            return Err(self.reconcile(source).await);
        }
        log::info!("deleted block {id} from page {}", self.page_id);
        self.canonical.retain(|block| block.id != id);

        let mut change = self.renumber().await?;
        change.removed = Some(id);
        Ok(change)
    }

    /// Toggle visibility. Positions are left alone.
    pub async fn set_hidden(&mut self, id: BlockId, hidden: bool) -> Result<(), OrderError> {
        let index = self.position(id).ok_or(OrderError::UnknownBlock(id))?;
        if self.optimistic[index].hidden == hidden {
            return Ok(());
        }
        self.optimistic[index].hidden = hidden;
        if let Err(source) = self.store.update_block(id, BlockPatch::hidden(hidden)).await {
            return Err(self.reconcile(source).await);
        }
        log::info!("set hidden={hidden} on block {id}");
        self.canonical = self.optimistic.clone();
        Ok(())
    }

    /// Replace a block in both lists after an edit made elsewhere was persisted
    pub fn replace(&mut self, block: Block) {
        for list in [&mut self.optimistic, &mut self.canonical] {
            if let Some(slot) = list.iter_mut().find(|existing| existing.id == block.id) {
                *slot = block.clone();
            }
        }
    }

    async fn place(&mut self, id: BlockId, target: usize) -> Result<OrderChange, OrderError> {
        let from = self.position(id).ok_or(OrderError::UnknownBlock(id))?;
        let block = self.optimistic.remove(from);
        let target = target.min(self.optimistic.len());
        self.optimistic.insert(target, block);
        self.renumber().await
    }

    /// Assign every block its 1-based list index and write the ones that changed
    async fn renumber(&mut self) -> Result<OrderChange, OrderError> {
        let mut change = OrderChange::default();
        for (index, block) in self.optimistic.iter_mut().enumerate() {
            let order = index as u32 + 1;
            if block.order != order {
                block.order = order;
                change.writes.push((block.id, order));
            }
        }

        for (id, order) in &change.writes {
            if let Err(source) = self.store.update_block(*id, BlockPatch::order(*order)).await {
                return Err(self.reconcile(source).await);
            }
        }
        if !change.writes.is_empty() {
            log::info!(
                "renumbered {} blocks on page {}",
                change.writes.len(),
                self.page_id
            );
        }

        self.canonical = self.optimistic.clone();
        Ok(change)
    }

    /// Discard the optimistic list after a failed write
    async fn reconcile(&mut self, source: StoreError) -> OrderError {
        log::warn!(
            "store write failed on page {}: {source}; reloading block order",
            self.page_id
        );
        match fetch(self.store.as_ref(), self.page_id).await {
            Ok(blocks) => {
                self.canonical = blocks.clone();
                self.optimistic = blocks;
                OrderError::Store {
                    source,
                    reloaded: true,
                }
            }
            Err(reload_error) => {
                log::warn!("reload of page {} failed: {reload_error}", self.page_id);
                self.optimistic = self.canonical.clone();
                OrderError::Store {
                    source,
                    reloaded: false,
                }
            }
        }
    }
}

async fn fetch<S: BlockStore + ?Sized>(store: &S, page_id: PageId) -> Result<Vec<Block>, StoreError> {
    let mut blocks = store.list_blocks(page_id).await?;
    sort_blocks(&mut blocks);
    Ok(blocks)
}
