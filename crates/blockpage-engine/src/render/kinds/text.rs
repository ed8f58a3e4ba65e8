use crate::content::CanonicalContent;
use crate::models::RenderContext;
use crate::render::VisualNode;
use crate::style::PresentationTable;
use crate::tokens::TextSize;

use super::text_align_class;

pub fn render(
    content: &CanonicalContent,
    _ctx: &RenderContext,
    table: &PresentationTable,
) -> Option<VisualNode> {
    let CanonicalContent::Text(text) = content else {
        return None;
    };
    if text.text.is_empty() {
        return None;
    }

    let size = match text.size {
        TextSize::Sm => "text-sm",
        TextSize::Md => "text-base",
        TextSize::Lg => "text-lg",
    };
    let node = VisualNode::new("p")
        .class("whitespace-pre-line")
        .class(size)
        .class(text_align_class(table, text.align))
        .text(text.text.clone());

    Some(match &text.color {
        Some(color) => node.attr("style", format!("color: {color}")),
        None => node,
    })
}
