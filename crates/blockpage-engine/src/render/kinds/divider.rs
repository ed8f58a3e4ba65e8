use crate::content::CanonicalContent;
use crate::models::RenderContext;
use crate::render::VisualNode;
use crate::style::PresentationTable;

pub fn render(
    content: &CanonicalContent,
    _ctx: &RenderContext,
    _table: &PresentationTable,
) -> Option<VisualNode> {
    match content {
        CanonicalContent::Divider => Some(VisualNode::new("hr").class("border-border/60 my-2")),
        _ => None,
    }
}
