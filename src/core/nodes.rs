// src/core/nodes.rs
//
// Flattens a cell's inner markup into a sequence of classified child
// nodes. Downstream parsers scan these instead of chasing live sibling
// pointers: each node is (kind, text), blocks recurse.

use crate::core::html::{attr_value, element_content_ci, has_class, strip_tags, tag_name};
use crate::core::sanitize::normalize_entities;
use crate::params::{ABILITY_MARKER_CLASS, ALIGN_CLASS};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Bare text run between tags.
    Text(String),
    /// The ability title marker span, with the span's own label text.
    Marker(String),
    /// Any other inline element, reduced to tag name and text content.
    Inline { tag: String, text: String },
    /// An image, reduced to its label (alt) and declared pixel width.
    Img { label: String, width: Option<u32> },
    /// A block-level container; `aligned` marks attack/retreat anchors.
    Block { aligned: bool, nodes: Vec<Node> },
}

impl Node {
    /// Text content, DOM-style: images are empty, blocks concatenate
    /// their children in order.
    pub fn text(&self) -> String {
        match self {
            Node::Text(t) | Node::Marker(t) => t.clone(),
            Node::Inline { text, .. } => text.clone(),
            Node::Img { .. } => s!(),
            Node::Block { nodes, .. } => nodes.iter().map(|n| n.text()).collect(),
        }
    }
}

/// Void tags: nothing to wrap, nothing downstream reads from them
/// (images excepted, which carry their data in attributes).
const VOID_TAGS: [&str; 5] = ["br", "hr", "img", "input", "wbr"];

/// Tokenize a cell's inner markup. Whitespace-only runs are dropped;
/// entities are normalized on the way in.
pub fn tokenize(inner: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut rest = inner;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            push_text(&mut nodes, rest);
            break;
        };
        push_text(&mut nodes, &rest[..lt]);
        rest = &rest[lt..];

        // Stray close tag at this level: drop it and keep scanning.
        if rest.starts_with("</") {
            rest = match rest.find('>') {
                Some(gt) => &rest[gt + 1..],
                None => "",
            };
            continue;
        }

        let Some(gt) = rest.find('>') else { break };
        let open = &rest[..gt + 1];
        let tag = tag_name(open);
        rest = &rest[gt + 1..];

        // Comments and other non-elements
        if tag.is_empty() {
            continue;
        }

        if tag == "img" {
            nodes.push(Node::Img {
                label: attr_value(open, "alt")
                    .map(|a| normalize_entities(&a))
                    .unwrap_or_default(),
                width: attr_value(open, "width").and_then(|w| w.trim().parse().ok()),
            });
        } else if VOID_TAGS.contains(&tag.as_str()) || open.ends_with("/>") {
            continue;
        } else if tag == "div" {
            let (content, after) = element_content_ci(rest, &tag);
            nodes.push(Node::Block {
                aligned: has_class(open, ALIGN_CLASS),
                nodes: tokenize(content),
            });
            rest = after;
        } else if tag == "span" && has_class(open, ABILITY_MARKER_CLASS) {
            let (content, after) = element_content_ci(rest, &tag);
            nodes.push(Node::Marker(strip_tags(normalize_entities(content))));
            rest = after;
        } else {
            let (content, after) = element_content_ci(rest, &tag);
            nodes.push(Node::Inline {
                tag,
                text: strip_tags(normalize_entities(content)),
            });
            rest = after;
        }
    }
    nodes
}

fn push_text(nodes: &mut Vec<Node>, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    nodes.push(Node::Text(normalize_entities(raw)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_mixed_cell_markup() {
        let cell = r#"<span class="a-red">Ability</span> Powder Heal
            <div class="align"><b>Tackle</b> <img alt="Pokemon TCG Pocket - Colorless" width="20"></div>10"#;
        let nodes = tokenize(cell);

        assert_eq!(nodes[0], Node::Marker(s!("Ability")));
        assert!(matches!(&nodes[1], Node::Text(t) if t.trim() == "Powder Heal"));
        let Node::Block { aligned, nodes: inner } = &nodes[2] else {
            panic!("expected block, got {:?}", nodes[2]);
        };
        assert!(aligned);
        assert_eq!(inner[0], Node::Inline { tag: s!("b"), text: s!("Tackle") });
        assert_eq!(
            inner[1],
            Node::Img { label: s!("Pokemon TCG Pocket - Colorless"), width: Some(20) }
        );
        assert!(matches!(&nodes[3], Node::Text(t) if t.trim() == "10"));
    }

    #[test]
    fn plain_span_is_inline_not_marker() {
        let nodes = tokenize(r#"<span class="bold">x</span>"#);
        assert_eq!(nodes, vec![Node::Inline { tag: s!("span"), text: s!("x") }]);
    }

    #[test]
    fn unaligned_div_is_unmarked_block() {
        let nodes = tokenize(r#"<div class="center">x</div>"#);
        assert_eq!(
            nodes,
            vec![Node::Block { aligned: false, nodes: vec![Node::Text(s!("x"))] }]
        );
    }

    #[test]
    fn img_without_width_has_none() {
        let nodes = tokenize(r#"<img alt="Pokemon TCG Pocket - Water">"#);
        assert_eq!(
            nodes,
            vec![Node::Img { label: s!("Pokemon TCG Pocket - Water"), width: None }]
        );
    }

    #[test]
    fn whitespace_runs_are_dropped() {
        let nodes = tokenize("  \n  <b>x</b>  \n ");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn nested_divs_stay_inside_one_block() {
        let nodes = tokenize("<div><div>a</div>b</div>c");
        assert_eq!(nodes.len(), 2);
        let Node::Block { nodes: inner, .. } = &nodes[0] else { panic!() };
        assert_eq!(inner.len(), 2);
        assert_eq!(nodes[0].text(), "ab");
        assert_eq!(nodes[1], Node::Text(s!("c")));
    }

    #[test]
    fn block_text_concatenates_and_skips_images() {
        let nodes = tokenize(r#"<div class="align"><b>Retreat Cost</b><img alt="x" width="40"></div>"#);
        assert_eq!(nodes[0].text(), "Retreat Cost");
    }

    #[test]
    fn entities_normalized_in_text() {
        let nodes = tokenize("Farfetch&#39;d&nbsp;stands");
        assert_eq!(nodes, vec![Node::Text(s!("Farfetch'd stands"))]);
    }
}
