use crate::content::{CanonicalContent, HeroContent};
use crate::models::RenderContext;
use crate::render::VisualNode;
use crate::style::PresentationTable;
use crate::style::Token;
use crate::tokens::{
    Align, BackgroundHeight, HeroVariant, ImageRatio, ImageSize, Side, TextSize, TitleSize,
    VerticalAlign,
};

use super::{button_classes, css_url, justify_class, link, text_align_class};

pub fn render(
    content: &CanonicalContent,
    ctx: &RenderContext,
    table: &PresentationTable,
) -> Option<VisualNode> {
    let CanonicalContent::Hero(hero) = content else {
        return None;
    };
    let has_text = !hero.title.is_empty() || !hero.subtitle.is_empty();
    let has_buttons = hero.buttons().next().is_some();
    let has_image = hero.has_image() && hero.variant != HeroVariant::Default;
    if !has_text && !has_buttons && !has_image {
        return None;
    }

    Some(match hero.variant {
        HeroVariant::Default => copy(hero, ctx, table).class("py-6"),
        HeroVariant::Split => split(hero, ctx, table),
        HeroVariant::Background => background(hero, ctx, table),
    })
}

/// Title, subtitle and buttons
fn copy(hero: &HeroContent, ctx: &RenderContext, table: &PresentationTable) -> VisualNode {
    let title_size = match hero.title_size {
        TitleSize::Sm => "text-2xl",
        TitleSize::Md => "text-3xl",
        TitleSize::Lg => "text-4xl",
        TitleSize::Xl => "text-5xl",
    };
    let subtitle_size = match hero.subtitle_size {
        TextSize::Sm => "text-sm",
        TextSize::Md => "text-base",
        TextSize::Lg => "text-xl",
    };

    let mut node = VisualNode::new("div")
        .class("flex flex-col gap-4")
        .class(text_align_class(table, hero.align));
    if !hero.title.is_empty() {
        node = node.child(
            VisualNode::new("h1")
                .class("font-bold tracking-tight")
                .class(title_size)
                .text(hero.title.clone()),
        );
    }
    if !hero.subtitle.is_empty() {
        node = node.child(
            VisualNode::new("p")
                .class("text-muted-foreground")
                .class(subtitle_size)
                .text(hero.subtitle.clone()),
        );
    }

    let button = button_classes(&ctx.site);
    let buttons: Vec<_> = hero
        .buttons()
        .enumerate()
        .map(|(index, b)| {
            let rank = if index == 0 { "btn-primary" } else { "btn-secondary" };
            link(&b.url, &b.title).class(&button).class(rank)
        })
        .collect();
    if !buttons.is_empty() {
        node = node.child(
            VisualNode::new("div")
                .class("flex flex-wrap gap-3")
                .class(justify_class(hero.align))
                .children(buttons),
        );
    }
    node
}

fn image(hero: &HeroContent) -> VisualNode {
    let size = match hero.image_size {
        ImageSize::Sm => "max-w-xs",
        ImageSize::Md => "max-w-sm",
        ImageSize::Lg => "max-w-md",
    };
    let ratio = match hero.image_ratio {
        ImageRatio::Square => "aspect-square",
        ImageRatio::Portrait => "aspect-[3/4]",
        ImageRatio::Landscape => "aspect-video",
    };
    VisualNode::new("img")
        .class("w-full rounded-2xl object-cover")
        .class(size)
        .class(ratio)
        .attr("src", hero.image_url.clone())
        .attr("alt", hero.title.clone())
}

fn split(hero: &HeroContent, ctx: &RenderContext, table: &PresentationTable) -> VisualNode {
    let items = match hero.vertical_align {
        VerticalAlign::Top => "items-start",
        VerticalAlign::Center => "items-center",
        VerticalAlign::Bottom => "items-end",
    };
    let mut node = VisualNode::new("div")
        .class("grid gap-8 md:grid-cols-2")
        .class(items)
        .child(copy(hero, ctx, table));
    if hero.has_image() {
        let picture = image(hero);
        node = match hero.image_side {
            Side::Right => node.child(picture),
            // image first on wide screens, text first on narrow ones
            Side::Left => node.child(picture.class("md:order-first")),
        };
    }
    node
}

fn background(hero: &HeroContent, ctx: &RenderContext, table: &PresentationTable) -> VisualNode {
    let height = match hero.background_height {
        BackgroundHeight::Sm => "min-h-[240px]",
        BackgroundHeight::Md => "min-h-[360px]",
        BackgroundHeight::Lg => "min-h-[520px]",
        BackgroundHeight::Screen => "min-h-screen",
    };
    let radius = table.lookup(Token::Radius, hero.background_radius.as_str());
    let justify = match hero.vertical_align {
        VerticalAlign::Top => "justify-start",
        VerticalAlign::Center => "justify-center",
        VerticalAlign::Bottom => "justify-end",
    };

    let mut node = VisualNode::new("div")
        .class("relative flex flex-col overflow-hidden bg-cover bg-center p-8 text-white")
        .class(height)
        .class(radius)
        .class(justify);
    if let Some(image) = css_url(&hero.image_url) {
        node = node.attr("style", format!("background-image: {image}"));
    }
    let overlay = VisualNode::new("div")
        .class("absolute inset-0 bg-black")
        .attr("aria-hidden", "true")
        .attr(
            "style",
            format!("opacity: {:.2}", f32::from(hero.background_overlay) / 100.0),
        );
    let align = if hero.align == Align::Left { "" } else { "mx-auto" };
    node.child(overlay)
        .child(copy(hero, ctx, table).class("relative").class(align))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ButtonLink;
    use pretty_assertions::assert_eq;

    fn hero(variant: HeroVariant) -> HeroContent {
        HeroContent {
            variant,
            title: "Welcome".to_string(),
            subtitle: "Fresh bread daily".to_string(),
            image_url: "https://cdn.example.com/bakery.jpg".to_string(),
            primary_button: ButtonLink {
                title: "Order".to_string(),
                url: "https://order.example.com".to_string(),
            },
            secondary_button: ButtonLink {
                title: "Menu".to_string(),
                url: String::new(),
            },
            ..HeroContent::default()
        }
    }

    #[test]
    fn test_inactive_button_pair_renders_nothing() {
        let content = CanonicalContent::Hero(hero(HeroVariant::Default));
        let node = render(
            &content,
            &RenderContext::default(),
            &PresentationTable::standard(),
        )
        .unwrap();
        let anchors = node.find_all("a");
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].text_content(), "Order");
    }

    #[test]
    fn test_default_variant_ignores_image() {
        let content = CanonicalContent::Hero(hero(HeroVariant::Default));
        let node = render(
            &content,
            &RenderContext::default(),
            &PresentationTable::standard(),
        )
        .unwrap();
        assert!(node.find_all("img").is_empty());
    }

    #[test]
    fn test_split_variant_places_image_by_side() {
        let mut content = hero(HeroVariant::Split);
        content.image_side = Side::Left;
        let node = render(
            &CanonicalContent::Hero(content),
            &RenderContext::default(),
            &PresentationTable::standard(),
        )
        .unwrap();

        let img = node.find_all("img")[0];
        assert!(img.has_class("md:order-first"));
        assert!(img.has_class("aspect-square"));
    }

    #[test]
    fn test_background_variant_uses_overlay() {
        let mut content = hero(HeroVariant::Background);
        content.background_overlay = 25;
        let node = render(
            &CanonicalContent::Hero(content),
            &RenderContext::default(),
            &PresentationTable::standard(),
        )
        .unwrap();

        assert!(node.attrs["style"].contains("bakery.jpg"));
        assert_eq!(
            node.children[0].attrs.get("style").map(String::as_str),
            Some("opacity: 0.25")
        );
    }

    #[test]
    fn test_background_image_cannot_inject_declarations() {
        let mut content = hero(HeroVariant::Background);
        content.image_url =
            "https://a.com/x.png');background:url('https://evil.example/track".to_string();
        let node = render(
            &CanonicalContent::Hero(content),
            &RenderContext::default(),
            &PresentationTable::standard(),
        )
        .unwrap();

        let style = &node.attrs["style"];
        assert!(style.starts_with("background-image: url('https://a.com/x.png%27%29;"));
        assert_eq!(style.matches('\'').count(), 2);
        assert!(!style.contains("');"));
    }

    #[test]
    fn test_themed_radius_reaches_background() {
        let mut table = PresentationTable::standard();
        table.set(Token::Radius, "2xl", "rounded-theme");
        let content = CanonicalContent::Hero(hero(HeroVariant::Background));

        let node = render(&content, &RenderContext::default(), &table).unwrap();

        assert!(node.has_class("rounded-theme"));
        assert!(!node.has_class("rounded-2xl"));
    }

    #[test]
    fn test_empty_hero_renders_nothing() {
        let content = CanonicalContent::Hero(HeroContent::default());
        assert_eq!(
            render(
                &content,
                &RenderContext::default(),
                &PresentationTable::standard(),
            ),
            None
        );
    }
}
