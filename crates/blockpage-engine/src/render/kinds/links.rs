use crate::content::CanonicalContent;
use crate::models::RenderContext;
use crate::render::VisualNode;
use crate::style::PresentationTable;

use super::{button_classes, justify_class, link};

pub fn render(
    content: &CanonicalContent,
    ctx: &RenderContext,
    _table: &PresentationTable,
) -> Option<VisualNode> {
    let CanonicalContent::Links(links) = content else {
        return None;
    };
    if links.items.is_empty() {
        return None;
    }

    let button = button_classes(&ctx.site);
    let rows = links.items.iter().map(|item| {
        let align = item.align.unwrap_or(links.align);
        VisualNode::new("div")
            .class("flex")
            .class(justify_class(align))
            .child(link(&item.url, &item.title).class(&button))
    });

    Some(
        VisualNode::new("nav")
            .class("flex flex-col gap-3")
            .attr("aria-label", "Links")
            .children(rows),
    )
}
