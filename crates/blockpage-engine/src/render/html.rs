//! Serialize a [`VisualNode`] tree to HTML.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::VisualNode;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["hr", "img", "br"];

pub fn to_html(node: &VisualNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Render a list of sibling nodes, one per line
pub fn to_html_document(nodes: &[&VisualNode]) -> String {
    nodes
        .iter()
        .map(|node| to_html(node))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_node(node: &VisualNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    if !node.classes.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&encode_double_quoted_attribute(&node.classes.join(" ")));
        out.push('"');
    }
    for (name, value) in &node.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&node.tag.as_str()) {
        return;
    }

    if let Some(text) = &node.text {
        out.push_str(&encode_text(text));
    }
    for child in &node.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node = VisualNode::new("a")
            .class("btn")
            .attr("href", "https://a.com/?q=\"x\"&y=1")
            .text("<Shop> & more");

        insta::assert_snapshot!(
            to_html(&node),
            @r#"<a class="btn" href="https://a.com/?q=&quot;x&quot;&amp;y=1">&lt;Shop&gt; &amp; more</a>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node = VisualNode::new("div").child(VisualNode::new("hr").class("my-4"));
        insta::assert_snapshot!(to_html(&node), @r#"<div><hr class="my-4"></div>"#);
    }
}
