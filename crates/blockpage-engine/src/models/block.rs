use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Stable identifier of a block, unchanged across edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Owning page of a block. All positional invariants are scoped per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Block type tag.
///
/// Stored rows may carry tags written by a newer editor; those are kept
/// verbatim in [`BlockType::Unknown`] so the row survives a load/save cycle
/// and renders as an inert placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Header,
    Hero,
    Links,
    Text,
    Image,
    Divider,
    Products,
    Unknown(String),
}

impl BlockType {
    /// Every type the editor knows how to create
    pub const KNOWN: [BlockType; 7] = [
        BlockType::Header,
        BlockType::Hero,
        BlockType::Links,
        BlockType::Text,
        BlockType::Image,
        BlockType::Divider,
        BlockType::Products,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Header => "header",
            BlockType::Hero => "hero",
            BlockType::Links => "links",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Divider => "divider",
            BlockType::Products => "products",
            BlockType::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BlockType::Unknown(_))
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        match tag.trim() {
            "header" => BlockType::Header,
            "hero" => BlockType::Hero,
            "links" => BlockType::Links,
            "text" => BlockType::Text,
            "image" => BlockType::Image,
            "divider" => BlockType::Divider,
            "products" => BlockType::Products,
            _ => BlockType::Unknown(tag.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        BlockType::from(tag.as_str())
    }
}

impl From<BlockType> for String {
    fn from(kind: BlockType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One visual unit of a page, as stored.
///
/// `content` and `style` are kept raw; normalization happens on every read
/// so the rendering path never has to trust stored shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    pub page_id: PageId,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub hidden: bool,
}

impl Block {
    pub fn new(page_id: PageId, kind: BlockType, content: Value, order: u32) -> Self {
        Self {
            id: BlockId::new(),
            page_id,
            kind,
            variant: None,
            content,
            style: None,
            anchor_id: None,
            order,
            hidden: false,
        }
    }
}

/// Partial update of a stored block. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub content: Option<Value>,
    pub style: Option<Value>,
    pub variant: Option<Option<String>>,
    pub anchor_id: Option<Option<String>>,
    pub order: Option<u32>,
    pub hidden: Option<bool>,
}

impl BlockPatch {
    pub fn order(order: u32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    pub fn hidden(hidden: bool) -> Self {
        Self {
            hidden: Some(hidden),
            ..Self::default()
        }
    }

    pub fn content(content: Value) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to an in-memory row; used by store adapters
    pub fn apply_to(&self, block: &mut Block) {
        if let Some(content) = &self.content {
            block.content = content.clone();
        }
        if let Some(style) = &self.style {
            block.style = Some(style.clone());
        }
        if let Some(variant) = &self.variant {
            block.variant = variant.clone();
        }
        if let Some(anchor_id) = &self.anchor_id {
            block.anchor_id = anchor_id.clone();
        }
        if let Some(order) = self.order {
            block.order = order;
        }
        if let Some(hidden) = self.hidden {
            block.hidden = hidden;
        }
    }
}
