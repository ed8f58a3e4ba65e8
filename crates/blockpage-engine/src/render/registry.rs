//! Block type -> {display name, renderer}.

use crate::content::{CanonicalContent, normalize_block};
use crate::models::{Block, BlockType, RenderContext};
use crate::style::{PresentationTable, ResolvedStyle, resolve_style};

use super::VisualNode;
use super::kinds;

/// Renderer contract: pure in its inputs, `None` when nothing is displayable.
/// Token-driven classes come from the registry's presentation table.
pub type RenderFn =
    fn(&CanonicalContent, &RenderContext, &PresentationTable) -> Option<VisualNode>;

#[derive(Clone)]
pub struct RegistryEntry {
    pub kind: BlockType,
    pub display_name: &'static str,
    render: RenderFn,
}

impl RegistryEntry {
    pub fn new(kind: BlockType, display_name: &'static str, render: RenderFn) -> Self {
        Self {
            kind,
            display_name,
            render,
        }
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("kind", &self.kind)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Dispatches rendering over the block types and wraps each rendered block
/// in its resolved style.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    entries: Vec<RegistryEntry>,
    presentation: PresentationTable,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new(PresentationTable::standard())
    }
}

impl BlockRegistry {
    /// Registry with every built-in block type
    pub fn new(presentation: PresentationTable) -> Self {
        let entries = vec![
            RegistryEntry::new(BlockType::Header, "Header", kinds::header::render),
            RegistryEntry::new(BlockType::Hero, "Hero", kinds::hero::render),
            RegistryEntry::new(BlockType::Links, "Links", kinds::links::render),
            RegistryEntry::new(BlockType::Text, "Text", kinds::text::render),
            RegistryEntry::new(BlockType::Image, "Image", kinds::image::render),
            RegistryEntry::new(BlockType::Divider, "Divider", kinds::divider::render),
            RegistryEntry::new(BlockType::Products, "Products", kinds::products::render),
        ];
        Self {
            entries,
            presentation,
        }
    }

    pub fn presentation(&self) -> &PresentationTable {
        &self.presentation
    }

    pub fn entry(&self, kind: &BlockType) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| &entry.kind == kind)
    }

    pub fn display_name(&self, kind: &BlockType) -> &str {
        self.entry(kind)
            .map(|entry| entry.display_name)
            .unwrap_or("Unknown block")
    }

    /// Types offered by the editor's "add block" menu, in menu order
    pub fn insertable(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Render one block's content.
    ///
    /// Unknown types produce a placeholder node rather than nothing, so a
    /// page never silently loses a block. Known types that have nothing to
    /// show produce `None`.
    pub fn render(
        &self,
        kind: &BlockType,
        content: &CanonicalContent,
        style: &ResolvedStyle,
        ctx: &RenderContext,
    ) -> Option<VisualNode> {
        let Some(entry) = self.entry(kind) else {
            log::debug!("no renderer for block type {kind}, rendering placeholder");
            return Some(self.wrap(kinds::placeholder(kind), kind, style));
        };
        let inner = (entry.render)(content, ctx, &self.presentation)?;
        Some(self.wrap(inner, kind, style))
    }

    /// Normalize, resolve and render a stored block
    pub fn render_block(&self, block: &Block, ctx: &RenderContext) -> Option<VisualNode> {
        let content = normalize_block(block).content;
        let style = resolve_style(block.style.as_ref());
        let node = self.render(&block.kind, &content, &style, ctx)?;
        Some(match &block.anchor_id {
            Some(anchor) => node.attr("id", anchor.clone()),
            None => node,
        })
    }

    /// Outer section carrying the compact classes and the breakpoint-prefixed wide classes
    fn wrap(&self, inner: VisualNode, kind: &BlockType, style: &ResolvedStyle) -> VisualNode {
        let (compact, wide) = style.concrete(&self.presentation);
        VisualNode::new("section")
            .class("block")
            .class(&format!("block-{kind}"))
            .classes(compact.classes(None))
            .classes(wide.classes(Some(self.presentation.wide_breakpoint())))
            .attr("data-block-type", kind.as_str())
            .child(inner)
    }
}
