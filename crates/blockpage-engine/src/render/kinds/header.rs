use crate::content::CanonicalContent;
use crate::models::RenderContext;
use crate::render::VisualNode;
use crate::style::PresentationTable;

use super::{button_classes, link};

/// Headers always render: an empty brand falls back to the site name
pub fn render(
    content: &CanonicalContent,
    ctx: &RenderContext,
    _table: &PresentationTable,
) -> Option<VisualNode> {
    let CanonicalContent::Header(header) = content else {
        return None;
    };

    let brand_text = if header.brand_text.is_empty() {
        ctx.site.site_name.clone()
    } else {
        header.brand_text.clone()
    };
    let mut brand = VisualNode::new("a")
        .class("flex items-center gap-2 font-semibold")
        .attr(
            "href",
            if header.brand_url.is_empty() {
                "/"
            } else {
                header.brand_url.as_str()
            },
        );
    if header.has_logo() {
        brand = brand.child(
            VisualNode::new("img")
                .class("h-8 w-8 rounded-full object-cover")
                .attr("src", header.logo_url.clone())
                .attr("alt", brand_text.clone()),
        );
    }
    brand = brand.child(VisualNode::new("span").text(brand_text));

    let mut node = VisualNode::new("header")
        .class("flex flex-wrap items-center justify-between gap-4")
        .child(brand);

    if !header.links.is_empty() {
        node = node.child(
            VisualNode::new("nav").class("flex flex-wrap gap-4 text-sm").children(
                header
                    .links
                    .iter()
                    .map(|nav| link(&nav.url, &nav.label).class("hover:underline")),
            ),
        );
    }
    if let Some(cta) = header.visible_cta() {
        node = node.child(
            link(&cta.url, &cta.label)
                .class(&button_classes(&ctx.site))
                .class("btn-cta w-auto"),
        );
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{HeaderContent, NavLink};
    use crate::models::SiteContext;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_brand_uses_site_name() {
        let ctx = RenderContext::new(SiteContext {
            site_name: "Corner Bakery".to_string(),
            ..SiteContext::default()
        });
        let node = render(
            &CanonicalContent::Header(HeaderContent::default()),
            &ctx,
            &PresentationTable::standard(),
        )
        .unwrap();
        assert_eq!(node.find_all("span")[0].text_content(), "Corner Bakery");
        assert_eq!(
            node.find_all("a")[0].attrs.get("href").map(String::as_str),
            Some("/")
        );
    }

    #[test]
    fn test_cta_hidden_without_flag() {
        let mut header = HeaderContent {
            brand_text: "Bakery".to_string(),
            cta: Some(NavLink {
                label: "Order".to_string(),
                url: "https://order.example.com".to_string(),
            }),
            ..HeaderContent::default()
        };
        let ctx = RenderContext::default();

        let hidden = render(
            &CanonicalContent::Header(header.clone()),
            &ctx,
            &PresentationTable::standard(),
        )
        .unwrap();
        assert!(hidden.find_all("a").iter().all(|a| !a.has_class("btn-cta")));

        header.show_cta = true;
        let shown = render(
            &CanonicalContent::Header(header),
            &ctx,
            &PresentationTable::standard(),
        )
        .unwrap();
        assert_eq!(
            shown
                .find_all("a")
                .iter()
                .filter(|a| a.has_class("btn-cta"))
                .count(),
            1
        );
    }
}
