//! # blockpage engine
//!
//! Turns stored page blocks into an ordered visual tree and keeps the
//! block ordering of a page dense while an editor inserts, moves, hides
//! and deletes blocks.
//!
//! The read path is pure:
//!
//! ```text
//! stored Block rows
//!     -> content::normalize_block   (raw JSON -> CanonicalContent)
//!     -> style::resolve_style       (raw style -> compact + wide descriptors)
//!     -> BlockRegistry::render      (-> Option<VisualNode>)
//!     -> ComposedPage               (ordered, hidden blocks dropped for the public page)
//! ```
//!
//! The write path goes through [`OrderEngine`] for positions and visibility,
//! and through [`PageComposer`] for content, style, variant and anchor edits.
//! Both talk to a [`BlockStore`] collaborator and never leave a divergent
//! ordering visible after a failed write.

pub mod catalog;
pub mod composer;
pub mod content;
pub mod models;
pub mod order;
pub mod render;
pub mod store;
pub mod style;
pub mod tokens;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use catalog::{MemoryCatalog, NoProducts, ProductCatalog, arrange_products};
pub use composer::{
    ComposeError, ComposeMode, ComposedBlock, ComposedPage, ContentDraft, PageComposer,
};
pub use content::{
    CanonicalContent, ContentWarning, FieldState, FieldValidity, Normalized, normalize,
};
pub use models::{
    Block, BlockId, BlockPatch, BlockType, ButtonStyle, LayoutWidth, PageId, ProductRecord,
    RenderContext, SiteContext,
};
pub use order::{OrderChange, OrderEngine, OrderError};
pub use render::{BlockRegistry, VisualNode};
pub use store::{BlockStore, JsonFileStore, MemoryStore, StoreError};
pub use style::{ResolvedStyle, StyleDescriptor, resolve_style};
