use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{BlockStore, StoreError, sort_blocks};
use crate::models::{Block, BlockId, BlockPatch, BlockType, PageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Create,
    Update,
    Delete,
}

/// A scheduled failure: let `skip` calls of `op` succeed, then fail one
#[derive(Debug, Clone, Copy)]
struct Fault {
    op: StoreOp,
    skip: usize,
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<Block>,
    faults: Vec<Fault>,
    updates: Vec<(BlockId, BlockPatch)>,
}

impl State {
    fn check(&mut self, op: StoreOp) -> Result<(), StoreError> {
        let Some(index) = self.faults.iter().position(|fault| fault.op == op) else {
            return Ok(());
        };
        if self.faults[index].skip > 0 {
            self.faults[index].skip -= 1;
            return Ok(());
        }
        self.faults.remove(index);
        Err(StoreError::Unavailable(format!("injected {op:?} failure")))
    }
}

/// In-process store used by tests and as a scratch backend.
///
/// Failures can be scheduled per operation to exercise the engine's
/// reconciliation path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            state: Mutex::new(State {
                rows: blocks,
                ..State::default()
            }),
        }
    }

    /// Fail the next call of `op`
    pub async fn fail_next(&self, op: StoreOp) {
        self.fail_after(op, 0).await;
    }

    /// Let `successes` calls of `op` through, then fail one
    pub async fn fail_after(&self, op: StoreOp, successes: usize) {
        self.state.lock().await.faults.push(Fault {
            op,
            skip: successes,
        });
    }

    /// Rows of a page in canonical order
    pub async fn rows(&self, page_id: PageId) -> Vec<Block> {
        let state = self.state.lock().await;
        let mut rows: Vec<_> = state
            .rows
            .iter()
            .filter(|block| block.page_id == page_id)
            .cloned()
            .collect();
        sort_blocks(&mut rows);
        rows
    }

    /// Every successful update so far, in call order
    pub async fn updates(&self) -> Vec<(BlockId, BlockPatch)> {
        self.state.lock().await.updates.clone()
    }
}

#[async_trait]
impl BlockStore for MemoryStore {
    async fn list_blocks(&self, page_id: PageId) -> Result<Vec<Block>, StoreError> {
        let mut state = self.state.lock().await;
        state.check(StoreOp::List)?;
        Ok(state
            .rows
            .iter()
            .filter(|block| block.page_id == page_id)
            .cloned()
            .collect())
    }

    async fn create_block(
        &self,
        page_id: PageId,
        kind: BlockType,
        content: Value,
        order: u32,
    ) -> Result<Block, StoreError> {
        let mut state = self.state.lock().await;
        state.check(StoreOp::Create)?;
        let block = Block::new(page_id, kind, content, order);
        state.rows.push(block.clone());
        Ok(block)
    }

    async fn update_block(&self, id: BlockId, patch: BlockPatch) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.check(StoreOp::Update)?;
        let row = state
            .rows
            .iter_mut()
            .find(|block| block.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply_to(row);
        state.updates.push((id, patch));
        Ok(())
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.check(StoreOp::Delete)?;
        let before = state.rows.len();
        state.rows.retain(|block| block.id != id);
        if state.rows.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
