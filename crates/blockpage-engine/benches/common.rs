// Shared by several bench targets; each one only uses part of it.
use serde_json::{Value, json};

#[allow(dead_code)]
pub fn messy_links(items: usize) -> Value {
    let rows: Vec<Value> = (0..items)
        .map(|i| match i % 4 {
            0 => json!({ "title": format!("Link {i}"), "url": format!("site{i}.example.com") }),
            1 => json!({ "label": format!("Link {i}"), "href": format!("https://example.com/{i}") }),
            2 => json!({ "title": "", "url": "https://orphan.example.com" }),
            _ => json!({ "title": "Broken", "url": "" }),
        })
        .collect();
    json!({ "links": rows, "align": "CENTER" })
}

#[allow(dead_code)]
pub fn hero_content() -> Value {
    json!({
        "variant": "background",
        "title": "  Welcome  ",
        "subtitle": "Subtitle",
        "imageUrl": "cdn.example.com/hero.png",
        "primaryButton": { "title": "Shop", "url": "/shop" },
        "secondaryButton": { "title": "About", "url": "#about" },
        "backgroundOverlay": "65",
    })
}

#[allow(dead_code)]
pub fn layered_style() -> Value {
    json!({
        "padding": "md",
        "bg": "card",
        "compact": true,
        "radius": "xl",
        "mobile": { "padding": "sm", "align": "center" },
        "desktop": { "width": "full", "border": "strong" },
    })
}
