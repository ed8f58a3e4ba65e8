use blockpage_engine::render::html::to_html;
use blockpage_engine::{
    Block, BlockRegistry, BlockType, ButtonStyle, ComposeMode, LayoutWidth, MemoryStore,
    NoProducts, PageComposer, PageId, RenderContext, SiteContext,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn site(layout_width: LayoutWidth, button_style: ButtonStyle) -> SiteContext {
    SiteContext {
        site_name: "Corner Shop".to_string(),
        layout_width,
        button_style,
    }
}

#[test]
fn styled_text_block_html() {
    let mut block = Block::new(
        PageId::new(),
        BlockType::Text,
        json!({ "content": "Hi & bye" }),
        1,
    );
    block.style = Some(json!({ "compact": true, "padding": "sm" }));
    block.anchor_id = Some("intro".to_string());

    let node = BlockRegistry::default()
        .render_block(&block, &RenderContext::default())
        .unwrap();

    insta::assert_snapshot!(
        to_html(&node),
        @r#"<section class="block block-text py-4 mx-auto max-w-2xl bg-transparent rounded-2xl border border-border/50 text-left md:py-4 md:mx-auto md:max-w-2xl md:bg-transparent md:rounded-2xl md:border md:border-border/50 md:text-left" data-block-type="text" id="intro"><p class="whitespace-pre-line text-base text-left">Hi &amp; bye</p></section>"#
    );
}

#[test]
fn desktop_override_only_touches_wide_classes() {
    let mut block = Block::new(PageId::new(), BlockType::Divider, json!({}), 1);
    block.style = Some(json!({
        "width": "full",
        "mobile": { "padding": "sm" },
        "desktop": { "width": "content" },
    }));

    let node = BlockRegistry::default()
        .render_block(&block, &RenderContext::default())
        .unwrap();

    assert!(node.has_class("py-4"));
    assert!(node.has_class("w-full"));
    assert!(node.has_class("md:py-0"));
    assert!(node.has_class("md:max-w-2xl"));
    assert!(!node.has_class("md:w-full"));
}

#[test]
fn button_style_follows_site_context() {
    let block = Block::new(
        PageId::new(),
        BlockType::Links,
        json!({ "items": [{ "title": "Shop", "url": "shop.example.com" }] }),
        1,
    );
    let registry = BlockRegistry::default();

    let render = |site: SiteContext| {
        let node = registry
            .render_block(&block, &RenderContext::new(site))
            .unwrap();
        node.find_all("a")[0].classes.clone()
    };

    let outline = render(site(LayoutWidth::Compact, ButtonStyle::Outline));
    let soft = render(site(LayoutWidth::Full, ButtonStyle::Soft));

    assert!(outline.contains(&"btn-outline".to_string()));
    assert!(soft.contains(&"btn-soft".to_string()));
    assert_ne!(outline, soft);
}

#[test]
fn unknown_and_malformed_blocks_never_break_a_page() {
    let page = PageId::new();
    let blocks = vec![
        Block::new(page, BlockType::from("carousel"), json!({ "slides": 3 }), 1),
        Block::new(page, BlockType::Hero, json!("not an object"), 2),
        Block::new(page, BlockType::Image, json!({ "url": [] }), 3),
        Block::new(page, BlockType::Links, json!({ "items": "nope" }), 4),
    ];
    let composer = PageComposer::new(
        Arc::new(MemoryStore::new()),
        Arc::new(NoProducts),
        BlockRegistry::default(),
    );

    let page_view = composer.compose_blocks(
        page,
        blocks,
        &RenderContext::default(),
        ComposeMode::Public,
    );

    let kinds: Vec<String> = page_view.blocks.iter().map(|b| b.kind.to_string()).collect();
    assert_eq!(kinds, vec!["carousel"]);
    assert!(page_view.to_html().contains("Unsupported block type"));
}

#[tokio::test]
async fn header_brand_falls_back_to_site_name() {
    let page = PageId::new();
    let store = Arc::new(MemoryStore::with_blocks(vec![Block::new(
        page,
        BlockType::Header,
        json!({}),
        1,
    )]));
    let composer = PageComposer::new(store, Arc::new(NoProducts), BlockRegistry::default());

    let composed = composer
        .compose(
            page,
            &site(LayoutWidth::Wide, ButtonStyle::Solid),
            ComposeMode::Public,
        )
        .await
        .unwrap();

    assert!(composed.to_html().contains("Corner Shop"));
}
