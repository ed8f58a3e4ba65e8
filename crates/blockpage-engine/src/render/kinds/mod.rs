//! One renderer per block type.
//!
//! Renderers are pure functions of their inputs. They return `None` when the
//! content has nothing displayable, so the page has no empty shells.

pub mod divider;
pub mod header;
pub mod hero;
pub mod image;
pub mod links;
pub mod products;
pub mod text;

use super::VisualNode;
use crate::content::is_http_url;
use crate::models::{BlockType, ButtonStyle, LayoutWidth, SiteContext};
use crate::style::{PresentationTable, Token};
use crate::tokens::Align;

/// Flex alignment for a row of inline items
pub(crate) fn justify_class(align: Align) -> &'static str {
    match align {
        Align::Left => "justify-start",
        Align::Center => "justify-center",
        Align::Right => "justify-end",
    }
}

pub(crate) fn text_align_class(table: &PresentationTable, align: Align) -> &str {
    table.lookup(Token::Align, align.as_str())
}

/// Width and treatment of a button, driven by site-wide settings
pub(crate) fn button_classes(site: &SiteContext) -> String {
    let width = match site.layout_width {
        LayoutWidth::Compact => "w-full max-w-sm",
        LayoutWidth::Wide => "w-full max-w-xl",
        LayoutWidth::Full => "w-full",
    };
    let treatment = match site.button_style {
        ButtonStyle::Solid => "btn-solid",
        ButtonStyle::Outline => "btn-outline",
        ButtonStyle::Soft => "btn-soft",
    };
    format!("btn {treatment} {width}")
}

/// An anchor element; absolute urls open in a new tab
pub(crate) fn link(url: &str, label: &str) -> VisualNode {
    let node = VisualNode::new("a").attr("href", url).text(label);
    if is_http_url(url) {
        node.attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
    } else {
        node
    }
}

/// `url(...)` value for an inline style, or `None` for anything but an
/// absolute http(s) url. Characters that could close the string or the
/// function are percent-encoded.
pub(crate) fn css_url(url: &str) -> Option<String> {
    if !is_http_url(url) {
        return None;
    }
    let mut encoded = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' => encoded.push_str("%27"),
            '"' => encoded.push_str("%22"),
            '(' => encoded.push_str("%28"),
            ')' => encoded.push_str("%29"),
            '\\' => encoded.push_str("%5C"),
            c if c.is_whitespace() => encoded.push_str("%20"),
            c => encoded.push(c),
        }
    }
    Some(format!("url('{encoded}')"))
}

/// Visible but inert stand-in for a block type this build cannot render
pub fn placeholder(kind: &BlockType) -> VisualNode {
    VisualNode::new("div")
        .class("block-unknown rounded-md border border-dashed p-4 text-sm text-muted")
        .attr("data-block-type", kind.as_str())
        .text(format!("Unsupported block type \"{kind}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_button_classes_follow_site_settings() {
        let site = SiteContext {
            layout_width: LayoutWidth::Full,
            button_style: ButtonStyle::Outline,
            ..SiteContext::default()
        };
        assert_eq!(button_classes(&site), "btn btn-outline w-full");
        assert_eq!(
            button_classes(&SiteContext::default()),
            "btn btn-solid w-full max-w-sm"
        );
    }

    #[test]
    fn test_only_absolute_links_open_new_tab() {
        assert_eq!(
            link("https://a.com", "A").attrs.get("target").map(String::as_str),
            Some("_blank")
        );
        assert!(!link("#top", "Top").attrs.contains_key("target"));
        assert!(!link("mailto:a@b.com", "Mail").attrs.contains_key("target"));
    }

    #[test]
    fn test_css_url_cannot_close_the_string() {
        let url = "https://a.com/x.png');background:url('https://evil.example/track";
        assert_eq!(
            css_url(url).as_deref(),
            Some("url('https://a.com/x.png%27%29;background:url%28%27https://evil.example/track')")
        );
        assert_eq!(css_url("javascript:alert(1)"), None);
        assert_eq!(css_url("/local.png"), None);
    }

    #[test]
    fn test_text_align_follows_the_table() {
        let mut table = PresentationTable::standard();
        assert_eq!(text_align_class(&table, Align::Center), "text-center");
        table.set(Token::Align, "center", "text-balance text-center");
        assert_eq!(
            text_align_class(&table, Align::Center),
            "text-balance text-center"
        );
    }

    #[test]
    fn test_placeholder_names_the_type() {
        let node = placeholder(&BlockType::from("nonexistent_type"));
        assert_eq!(
            node.attrs.get("data-block-type").map(String::as_str),
            Some("nonexistent_type")
        );
        assert!(node.text_content().contains("nonexistent_type"));
    }
}
