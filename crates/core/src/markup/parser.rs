use super::{
    AttrSegment, Attribute, ElementNode, MarkupDocument, NodeKind, Pos, SCRIPT_TAG, Span,
};
use crate::error::{MiniscopeError, Result};
use tree_sitter::Node;

/// Parse markup text into the typed document model.
///
/// The HTML grammar handles the tag/attribute surface; template
/// interpolations are not a grammar concept, so attribute values are split
/// into text/interpolation segments here.
pub fn parse(content: &str) -> Result<MarkupDocument> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .map_err(|e| MiniscopeError::Parsing(e.to_string()))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| MiniscopeError::Parsing("failed to parse markup file".to_string()))?;

    let mut document = MarkupDocument::default();
    visit(tree.root_node(), None, content, &mut document);
    Ok(document)
}

fn visit(node: Node, parent: Option<usize>, source: &str, document: &mut MarkupDocument) {
    let parent_for_children = match node.kind() {
        "element" | "script_element" | "style_element" => {
            match build_element(node, parent, source) {
                Some(element) => {
                    document.nodes.push(element);
                    Some(document.nodes.len() - 1)
                }
                // Error subtree without a recognizable start tag; skip the
                // node but keep walking for usable fragments below it.
                None => parent,
            }
        }
        _ => parent,
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, parent_for_children, source, document);
    }
}

fn build_element(node: Node, parent: Option<usize>, source: &str) -> Option<ElementNode> {
    let mut cursor = node.walk();
    let start_tag = node
        .children(&mut cursor)
        .find(|c| matches!(c.kind(), "start_tag" | "self_closing_tag"))?;

    let mut name = String::new();
    let mut attributes = Vec::new();
    let mut tag_cursor = start_tag.walk();
    for child in start_tag.children(&mut tag_cursor) {
        match child.kind() {
            "tag_name" => name = node_text(child, source),
            "attribute" => {
                if let Some(attribute) = build_attribute(child, source) {
                    attributes.push(attribute);
                }
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return None;
    }

    let kind = if name == SCRIPT_TAG {
        NodeKind::Script
    } else {
        NodeKind::Element
    };

    Some(ElementNode {
        kind,
        name,
        attributes,
        span: span_of(node),
        start_tag_span: span_of(start_tag),
        parent,
    })
}

fn build_attribute(node: Node, source: &str) -> Option<Attribute> {
    let mut key = None;
    let mut value = String::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "attribute_name" => key = Some(node_text(child, source)),
            "quoted_attribute_value" | "attribute_value" => {
                value = node_text(child, source)
                    .trim_matches(|c| c == '"' || c == '\'')
                    .to_string();
            }
            _ => {}
        }
    }

    let segments = split_interpolations(&value);
    Some(Attribute {
        key: key?,
        value,
        segments,
        span: span_of(node),
    })
}

/// Split an attribute value at `{{…}}` markers. Returns an empty list for
/// purely literal values; an unterminated `{{` is kept as literal text.
fn split_interpolations(value: &str) -> Vec<AttrSegment> {
    if !value.contains("{{") {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut rest = value;
    while let Some(open) = rest.find("{{") {
        if open > 0 {
            segments.push(AttrSegment::Text(rest[..open].to_string()));
        }
        match rest[open..].find("}}") {
            Some(close) => {
                let end = open + close + 2;
                segments.push(AttrSegment::Interpolation(rest[open..end].to_string()));
                rest = &rest[end..];
            }
            None => {
                segments.push(AttrSegment::Text(rest[open..].to_string()));
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        segments.push(AttrSegment::Text(rest.to_string()));
    }
    segments
}

fn node_text(node: Node, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .unwrap_or_default()
        .to_string()
}

fn span_of(node: Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        start: Pos {
            line: start.row as u32,
            column: start.column as u32,
        },
        end: Pos {
            line: end.row as u32,
            column: end.column as u32,
        },
    }
}
