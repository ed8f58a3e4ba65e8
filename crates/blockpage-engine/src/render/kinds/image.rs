use crate::content::CanonicalContent;
use crate::models::RenderContext;
use crate::render::VisualNode;
use crate::style::PresentationTable;
use crate::tokens::ImageShape;

pub fn render(
    content: &CanonicalContent,
    _ctx: &RenderContext,
    _table: &PresentationTable,
) -> Option<VisualNode> {
    let CanonicalContent::Image(image) = content else {
        return None;
    };
    if !image.has_displayable_url() {
        return None;
    }

    let shape = match image.shape {
        ImageShape::Circle => "h-32 w-32 rounded-full object-cover",
        ImageShape::Rounded => "w-full rounded-2xl object-cover",
        ImageShape::Square => "w-full rounded-none object-cover",
    };
    Some(
        VisualNode::new("div").class("flex justify-center").child(
            VisualNode::new("img")
                .class(shape)
                .attr("src", image.url.clone())
                .attr("alt", image.alt.clone())
                .attr("loading", "lazy"),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageContent;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_url_renders_nothing() {
        let content = CanonicalContent::Image(ImageContent {
            url: "mailto:me@example.com".to_string(),
            ..ImageContent::default()
        });
        assert_eq!(
            render(
                &content,
                &RenderContext::default(),
                &PresentationTable::standard(),
            ),
            None
        );
    }

    #[test]
    fn test_circle_image() {
        let content = CanonicalContent::Image(ImageContent {
            url: "https://cdn.example.com/me.jpg".to_string(),
            alt: "Me".to_string(),
            shape: ImageShape::Circle,
        });

        let node = render(
            &content,
            &RenderContext::default(),
            &PresentationTable::standard(),
        )
        .unwrap();
        let img = node.find_all("img")[0];

        assert!(img.has_class("rounded-full"));
        assert_eq!(img.attrs.get("alt").map(String::as_str), Some("Me"));
    }
}
