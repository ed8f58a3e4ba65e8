use crate::content::CanonicalContent;
use crate::models::RenderContext;
use crate::render::VisualNode;
use crate::style::PresentationTable;
use crate::tokens::{ImageRatio, ProductLayout};

use super::link;
use crate::content::{is_http_url, is_navigable_url};

pub fn render(
    content: &CanonicalContent,
    ctx: &RenderContext,
    _table: &PresentationTable,
) -> Option<VisualNode> {
    let CanonicalContent::Products(prefs) = content else {
        return None;
    };
    let records: Vec<_> = ctx
        .products
        .iter()
        .filter(|record| record.active)
        .take(usize::from(prefs.limit))
        .collect();
    if records.is_empty() {
        return None;
    }

    let ratio = match prefs.image_ratio {
        ImageRatio::Square => "aspect-square",
        ImageRatio::Portrait => "aspect-[3/4]",
        ImageRatio::Landscape => "aspect-video",
    };
    let list_class = match prefs.layout {
        ProductLayout::Grid => format!("grid gap-4 grid-cols-1 md:grid-cols-{}", prefs.columns),
        ProductLayout::List => "flex flex-col gap-3".to_string(),
    };

    let cards = records.into_iter().map(|record| {
        let mut card = VisualNode::new("article")
            .class("flex flex-col gap-2 rounded-xl border p-3")
            .attr("data-product-id", record.id.to_string());
        if let Some(image_url) = record.image_url.as_deref().filter(|url| is_http_url(url)) {
            card = card.child(
                VisualNode::new("img")
                    .class("w-full rounded-lg object-cover")
                    .class(ratio)
                    .attr("src", image_url)
                    .attr("alt", record.title.clone())
                    .attr("loading", "lazy"),
            );
        }
        let title = match record.url.as_deref().filter(|url| is_navigable_url(url)) {
            Some(url) => link(url, &record.title).class("font-medium hover:underline"),
            None => VisualNode::new("span")
                .class("font-medium")
                .text(record.title.clone()),
        };
        card = card.child(title);
        if prefs.show_price
            && let Some(price) = record.price.as_deref().filter(|price| !price.is_empty())
        {
            card = card.child(
                VisualNode::new("span")
                    .class("text-sm text-muted-foreground")
                    .text(price),
            );
        }
        card
    });

    let mut node = VisualNode::new("section").class("flex flex-col gap-4");
    if !prefs.title.is_empty() {
        node = node.child(
            VisualNode::new("h2")
                .class("text-xl font-semibold")
                .text(prefs.title.clone()),
        );
    }
    Some(node.child(VisualNode::new("div").class(&list_class).children(cards)))
}
