//! Page composition and the editor's content write path.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::ProductCatalog;
use crate::content::{
    CanonicalContent, ContentWarning, FieldValidity, Normalized, normalize, normalize_anchor,
    normalize_block,
};
use crate::models::{Block, BlockId, BlockPatch, BlockType, PageId, RenderContext, SiteContext};
use crate::order::{OrderEngine, OrderError};
use crate::render::html::to_html_document;
use crate::render::{BlockRegistry, VisualNode};
use crate::store::{BlockStore, StoreError, sort_blocks};
use crate::style::{ResolvedStyle, resolve_style};
use crate::tokens::HeroVariant;

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Failed to load page {page_id}: {source}")]
    Load { page_id: PageId, source: StoreError },
    #[error("Block {block_id} has invalid fields: {}", .fields.join(", "))]
    SaveBlocked {
        block_id: BlockId,
        fields: Vec<String>,
    },
    #[error("Failed to save block {block_id}: {source}")]
    Save { block_id: BlockId, source: StoreError },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComposeMode {
    /// Visitor view: hidden blocks and blocks with nothing to show are left out
    #[default]
    Public,
    /// Editor view: every block, in position order
    Editor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedBlock {
    pub id: BlockId,
    pub kind: BlockType,
    pub display_name: String,
    pub order: u32,
    pub hidden: bool,
    pub anchor_id: Option<String>,
    /// `None` when the block has nothing to display
    pub node: Option<VisualNode>,
    pub validity: FieldValidity,
    pub warnings: Vec<ContentWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPage {
    pub page_id: PageId,
    pub mode: ComposeMode,
    pub blocks: Vec<ComposedBlock>,
    /// Anchor ids used by more than one block, sorted
    pub duplicate_anchors: Vec<String>,
}

impl ComposedPage {
    pub fn nodes(&self) -> Vec<&VisualNode> {
        self.blocks
            .iter()
            .filter_map(|block| block.node.as_ref())
            .collect()
    }

    pub fn to_html(&self) -> String {
        to_html_document(&self.nodes())
    }
}

/// An in-progress content edit.
///
/// A blocked or failed save leaves `raw` as the user typed it and keeps the
/// draft marked unsaved.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDraft {
    pub block_id: BlockId,
    pub kind: BlockType,
    pub raw: Value,
    saved: bool,
}

impl ContentDraft {
    pub fn from_block(block: &Block) -> Self {
        Self {
            block_id: block.id,
            kind: block.kind.clone(),
            raw: block.content.clone(),
            saved: true,
        }
    }

    pub fn edit(&mut self, raw: Value) {
        self.raw = raw;
        self.saved = false;
    }

    /// Set one top-level field, turning non-object content into an object
    pub fn set_field(&mut self, key: &str, value: Value) {
        if !self.raw.is_object() {
            self.raw = Value::Object(Default::default());
        }
        if let Value::Object(map) = &mut self.raw {
            map.insert(key.to_string(), value);
        }
        self.saved = false;
    }

    pub fn validate(&self) -> Normalized<CanonicalContent> {
        normalize(&self.kind, &self.raw)
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }
}

pub struct PageComposer<S: BlockStore + ?Sized, C: ProductCatalog + ?Sized> {
    store: Arc<S>,
    catalog: Arc<C>,
    registry: BlockRegistry,
}

impl<S: BlockStore + ?Sized, C: ProductCatalog + ?Sized> PageComposer<S, C> {
    pub fn new(store: Arc<S>, catalog: Arc<C>, registry: BlockRegistry) -> Self {
        Self {
            store,
            catalog,
            registry,
        }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load a page and build its visual tree
    pub async fn compose(
        &self,
        page_id: PageId,
        site: &SiteContext,
        mode: ComposeMode,
    ) -> Result<ComposedPage, ComposeError> {
        let blocks = self
            .store
            .list_blocks(page_id)
            .await
            .map_err(|source| ComposeError::Load { page_id, source })?;

        let mut ctx = RenderContext::new(site.clone());
        if let Some(limit) = product_limit(&blocks, mode) {
            match self.catalog.list_active_products(page_id, limit).await {
                Ok(products) => ctx = ctx.with_products(products),
                Err(e) => log::warn!("product catalog unavailable for page {page_id}: {e}"),
            }
        }

        Ok(self.compose_blocks(page_id, blocks, &ctx, mode))
    }

    /// Build the visual tree from already loaded rows
    pub fn compose_blocks(
        &self,
        page_id: PageId,
        mut blocks: Vec<Block>,
        ctx: &RenderContext,
        mode: ComposeMode,
    ) -> ComposedPage {
        sort_blocks(&mut blocks);

        let mut composed = Vec::with_capacity(blocks.len());
        for block in &blocks {
            if mode == ComposeMode::Public && block.hidden {
                continue;
            }
            let normalized = normalize_block(block);
            let node = self.registry.render_block(block, ctx).map(|node| {
                if block.hidden {
                    node.class("is-hidden").attr("data-hidden", "true")
                } else {
                    node
                }
            });
            if mode == ComposeMode::Public && node.is_none() {
                log::debug!("block {} has nothing to display", block.id);
                continue;
            }
            composed.push(ComposedBlock {
                id: block.id,
                kind: block.kind.clone(),
                display_name: self.registry.display_name(&block.kind).to_string(),
                order: block.order,
                hidden: block.hidden,
                anchor_id: block.anchor_id.clone(),
                node,
                validity: normalized.validity,
                warnings: normalized.warnings,
            });
        }

        let duplicate_anchors = duplicate_anchors(&composed);
        if !duplicate_anchors.is_empty() {
            log::warn!("page {page_id} reuses anchor ids {duplicate_anchors:?}");
        }

        ComposedPage {
            page_id,
            mode,
            blocks: composed,
            duplicate_anchors,
        }
    }

    /// Persist a content draft in canonical form.
    ///
    /// Nothing reaches the store while any field is invalid.
    pub async fn save_content(&self, draft: &mut ContentDraft) -> Result<Value, ComposeError> {
        let normalized = draft.validate();
        if !normalized.is_savable() {
            return Err(ComposeError::SaveBlocked {
                block_id: draft.block_id,
                fields: normalized.validity.invalid_fields(),
            });
        }
        for warning in &normalized.warnings {
            log::debug!("saving block {} with {warning}", draft.block_id);
        }

        let value = normalized.content.to_value();
        self.update(draft.block_id, BlockPatch::content(value.clone()))
            .await?;
        draft.raw = value.clone();
        draft.saved = true;
        Ok(value)
    }

    /// Persist a raw style record and return what it resolves to
    pub async fn save_style(
        &self,
        block_id: BlockId,
        style: Value,
    ) -> Result<ResolvedStyle, ComposeError> {
        let resolved = resolve_style(Some(&style));
        self.update(
            block_id,
            BlockPatch {
                style: Some(style),
                ..BlockPatch::default()
            },
        )
        .await?;
        Ok(resolved)
    }

    /// Persist a block variant. Hero variants are stored as their keyword;
    /// unrecognised or empty input clears the column.
    pub async fn save_variant(
        &self,
        block_id: BlockId,
        kind: &BlockType,
        variant: &str,
    ) -> Result<Option<String>, ComposeError> {
        let variant = match kind {
            BlockType::Hero => HeroVariant::parse(variant).map(|v| v.as_str().to_string()),
            _ => Some(variant.trim().to_string()).filter(|v| !v.is_empty()),
        };
        self.update(
            block_id,
            BlockPatch {
                variant: Some(variant.clone()),
                ..BlockPatch::default()
            },
        )
        .await?;
        Ok(variant)
    }

    /// Normalize and persist an anchor id; input that sanitizes to nothing clears it
    pub async fn set_anchor(
        &self,
        block_id: BlockId,
        raw: &str,
    ) -> Result<Option<String>, ComposeError> {
        let anchor = normalize_anchor(raw);
        self.update(
            block_id,
            BlockPatch {
                anchor_id: Some(anchor.clone()),
                ..BlockPatch::default()
            },
        )
        .await?;
        Ok(anchor)
    }

    /// Ordering operations for one page, sharing this composer's store
    pub async fn order_engine(&self, page_id: PageId) -> Result<OrderEngine<S>, OrderError> {
        OrderEngine::load(self.store.clone(), page_id).await
    }

    async fn update(&self, block_id: BlockId, patch: BlockPatch) -> Result<(), ComposeError> {
        self.store
            .update_block(block_id, patch)
            .await
            .map_err(|source| {
                log::warn!("failed to save block {block_id}: {source}");
                ComposeError::Save { block_id, source }
            })
    }
}

/// Largest product limit among the blocks that will be rendered
fn product_limit(blocks: &[Block], mode: ComposeMode) -> Option<u16> {
    blocks
        .iter()
        .filter(|block| block.kind == BlockType::Products)
        .filter(|block| mode == ComposeMode::Editor || !block.hidden)
        .filter_map(|block| match normalize_block(block).content {
            CanonicalContent::Products(products) => Some(products.limit),
            _ => None,
        })
        .max()
}

fn duplicate_anchors(blocks: &[ComposedBlock]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for anchor in blocks.iter().filter_map(|block| block.anchor_id.as_deref()) {
        *counts.entry(anchor).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(anchor, _)| anchor.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemoryCatalog, NoProducts};
    use crate::models::ProductRecord;
    use crate::store::{MemoryStore, StoreOp};
    use crate::tests::block_with;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    fn composer(store: Arc<MemoryStore>) -> PageComposer<MemoryStore, NoProducts> {
        PageComposer::new(store, Arc::new(NoProducts), BlockRegistry::default())
    }

    fn text_page(page: PageId) -> Vec<Block> {
        let mut hidden = block_with(page, BlockType::Text, json!({ "text": "secret" }), 2);
        hidden.hidden = true;
        vec![
            block_with(page, BlockType::Text, json!({ "text": "third" }), 3),
            hidden,
            block_with(page, BlockType::Text, json!({ "text": "first" }), 1),
            block_with(page, BlockType::Text, json!({ "text": "   " }), 4),
        ]
    }

    #[tokio::test]
    async fn test_public_page_skips_hidden_and_empty_blocks() {
        let page = PageId::new();
        let store = Arc::new(MemoryStore::with_blocks(text_page(page)));

        let composed = composer(store)
            .compose(page, &SiteContext::default(), ComposeMode::Public)
            .await
            .unwrap();

        let texts: Vec<String> = composed.nodes().iter().map(|n| n.text_content()).collect();
        assert_eq!(texts, vec!["first", "third"]);
    }

    #[tokio::test]
    async fn test_editor_page_keeps_every_block() {
        let page = PageId::new();
        let store = Arc::new(MemoryStore::with_blocks(text_page(page)));

        let composed = composer(store)
            .compose(page, &SiteContext::default(), ComposeMode::Editor)
            .await
            .unwrap();

        let orders: Vec<u32> = composed.blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        let secret = &composed.blocks[1];
        assert!(secret.hidden);
        assert!(secret.node.as_ref().unwrap().has_class("is-hidden"));
        assert!(composed.blocks[3].node.is_none());
        assert_eq!(composed.blocks[3].display_name, "Text");
    }

    #[test]
    fn test_duplicate_anchors_are_reported() {
        let page = PageId::new();
        let mut blocks = text_page(page);
        blocks[0].anchor_id = Some("about".to_string());
        blocks[2].anchor_id = Some("about".to_string());
        let store = MemoryStore::with_blocks(blocks.clone());

        let composed = composer(Arc::new(store)).compose_blocks(
            page,
            blocks,
            &RenderContext::default(),
            ComposeMode::Public,
        );

        assert_eq!(composed.duplicate_anchors, vec!["about".to_string()]);
    }

    #[tokio::test]
    async fn test_products_come_from_catalog() {
        let page = PageId::new();
        let block = block_with(page, BlockType::Products, json!({ "limit": 1 }), 1);
        let store = Arc::new(MemoryStore::with_blocks(vec![block]));
        let product = |title: &str, sort_key| ProductRecord {
            id: Uuid::new_v4(),
            page_id: page,
            title: title.to_string(),
            price: Some("$5".to_string()),
            image_url: None,
            url: None,
            active: true,
            sort_key,
            created_at: 0,
        };
        let catalog = Arc::new(MemoryCatalog::new(vec![
            product("second", 2),
            product("first", 1),
        ]));
        let composer = PageComposer::new(store, catalog, BlockRegistry::default());

        let composed = composer
            .compose(page, &SiteContext::default(), ComposeMode::Public)
            .await
            .unwrap();

        let html = composed.to_html();
        assert!(html.contains("first"));
        assert!(!html.contains("second"));
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.fail_next(StoreOp::List).await;

        let result = composer(store)
            .compose(PageId::new(), &SiteContext::default(), ComposeMode::Public)
            .await;

        assert!(matches!(result, Err(ComposeError::Load { .. })));
    }

    #[tokio::test]
    async fn test_save_writes_canonical_content() {
        let page = PageId::new();
        let block = block_with(page, BlockType::Links, json!({}), 1);
        let store = Arc::new(MemoryStore::with_blocks(vec![block.clone()]));
        let composer = composer(store.clone());
        let mut draft = ContentDraft::from_block(&block);

        draft.edit(json!({
            "items": [
                { "title": "T", "url": "" },
                { "title": "", "url": "https://x" },
                { "title": "A", "url": "a.com" },
            ]
        }));
        assert!(!draft.is_saved());
        composer.save_content(&mut draft).await.unwrap();

        assert!(draft.is_saved());
        let stored = &store.rows(page).await[0].content;
        assert_eq!(stored["items"], json!([{ "title": "A", "url": "https://a.com" }]));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_blocked_before_store() {
        let page = PageId::new();
        let block = block_with(page, BlockType::Image, json!({}), 1);
        let store = Arc::new(MemoryStore::with_blocks(vec![block.clone()]));
        let composer = composer(store.clone());
        let mut draft = ContentDraft::from_block(&block);
        draft.set_field("url", json!("not a url at all"));

        let result = composer.save_content(&mut draft).await;

        assert!(matches!(
            result,
            Err(ComposeError::SaveBlocked { ref fields, .. }) if fields == &vec!["url".to_string()]
        ));
        assert!(store.updates().await.is_empty());
        assert!(!draft.is_saved());
        assert_eq!(draft.raw["url"], json!("not a url at all"));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let page = PageId::new();
        let block = block_with(page, BlockType::Text, json!({}), 1);
        let store = Arc::new(MemoryStore::with_blocks(vec![block.clone()]));
        let composer = composer(store.clone());
        let mut draft = ContentDraft::from_block(&block);
        draft.set_field("text", json!("  unsaved words "));
        store.fail_next(StoreOp::Update).await;

        let result = composer.save_content(&mut draft).await;

        assert!(matches!(result, Err(ComposeError::Save { .. })));
        assert!(!draft.is_saved());
        assert_eq!(draft.raw["text"], json!("  unsaved words "));
    }

    #[tokio::test]
    async fn test_variant_and_anchor_edits() {
        let page = PageId::new();
        let block = block_with(page, BlockType::Hero, json!({}), 1);
        let store = Arc::new(MemoryStore::with_blocks(vec![block.clone()]));
        let composer = composer(store.clone());

        let variant = composer
            .save_variant(block.id, &BlockType::Hero, "Split")
            .await
            .unwrap();
        let anchor = composer.set_anchor(block.id, "1 About us!").await.unwrap();

        assert_eq!(variant.as_deref(), Some("split"));
        assert_eq!(anchor.as_deref(), Some("block-1-About-us"));
        let row = &store.rows(page).await[0];
        assert_eq!(row.variant.as_deref(), Some("split"));
        assert_eq!(row.anchor_id.as_deref(), Some("block-1-About-us"));
    }

    #[tokio::test]
    async fn test_save_style_returns_resolution() {
        let page = PageId::new();
        let block = block_with(page, BlockType::Text, json!({ "text": "x" }), 1);
        let store = Arc::new(MemoryStore::with_blocks(vec![block.clone()]));

        let resolved = composer(store.clone())
            .save_style(block.id, json!({ "bg": "muted" }))
            .await
            .unwrap();

        assert_eq!(resolved, resolve_style(Some(&json!({ "background": "muted" }))));
        assert_eq!(store.rows(page).await[0].style, Some(json!({ "bg": "muted" })));
    }
}
