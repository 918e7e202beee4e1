//! Flat outline symbols for a markup document.
//!
//! Each element or script node becomes one symbol whose name packs the tag,
//! id, class list, and event bindings into a CSS-selector-like label; each
//! event-binding attribute additionally surfaces as its own function symbol.

use crate::markup::{AttrSegment, Attribute, ElementNode, MarkupDocument, NodeKind, Span};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    Field,
    Function,
}

#[derive(Debug, Clone)]
pub struct OutlineSymbol {
    pub name: String,
    pub kind: OutlineKind,
    pub span: Span,
    pub selection_span: Span,
}

/// Event-binding attribute keys: `bindtap`, `bind:tap`, `catchtouchmove`,
/// `mut-bind:tap`, `capture-bind:tap`, `capture-catch:tap`, ...
static EVENT_BINDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(capture-bind|capture-catch|mut-bind|bind|catch):?").unwrap());

const INTERPOLATION_OPEN: &str = "{{";

/// One symbol per element/script node, in document order, no nesting.
pub fn document_symbols(document: &MarkupDocument) -> Vec<OutlineSymbol> {
    let mut symbols = Vec::new();
    for node in &document.nodes {
        match node.kind {
            NodeKind::Script => symbols.push(script_symbol(node)),
            NodeKind::Element => element_symbols(node, &mut symbols),
        }
    }
    symbols
}

fn script_symbol(node: &ElementNode) -> OutlineSymbol {
    let mut name = node.name.clone();
    if let Some(module) = node.attribute("module").filter(|a| a.has_value()) {
        name.push_str(&format!("[{}=\"{}\"]", module.key, module.value));
    }
    OutlineSymbol {
        name,
        kind: OutlineKind::Field,
        span: node.span,
        selection_span: node.start_tag_span,
    }
}

fn element_symbols(node: &ElementNode, symbols: &mut Vec<OutlineSymbol>) {
    let mut name = node.name.clone();

    if let Some(id) = node.attribute("id").filter(|a| a.has_value()) {
        name.push('#');
        name.push_str(&id.value);
    }

    if let Some(class) = node.attribute("class").filter(|a| a.has_value()) {
        for token in class_tokens_ordered(class) {
            name.push('.');
            name.push_str(&token);
        }
    }

    let bindings: Vec<&Attribute> = node
        .attributes
        .iter()
        .filter(|attr| attr.has_value() && EVENT_BINDING.is_match(&attr.key))
        .collect();

    for binding in &bindings {
        name.push_str(&format!("[{}=\"{}\"]", binding.key, binding.value));
    }

    symbols.push(OutlineSymbol {
        name,
        kind: OutlineKind::Field,
        span: node.span,
        selection_span: node.start_tag_span,
    });

    for binding in bindings {
        symbols.push(OutlineSymbol {
            name: format!("[{}=\"{}\"]", binding.key, binding.value),
            kind: OutlineKind::Function,
            span: binding.span,
            selection_span: binding.span,
        });
    }
}

/// Ordered class tokens for the symbol name: literal pieces split on
/// whitespace, interpolations kept verbatim, with interpolated tokens
/// stably sorted after all plain ones.
fn class_tokens_ordered(attr: &Attribute) -> Vec<String> {
    let mut tokens = Vec::new();
    if attr.segments.is_empty() {
        tokens.extend(attr.value.split_whitespace().map(str::to_string));
    } else {
        for segment in &attr.segments {
            match segment {
                AttrSegment::Text(value) => {
                    tokens.extend(value.split_whitespace().map(str::to_string));
                }
                AttrSegment::Interpolation(source) => tokens.push(source.clone()),
            }
        }
    }
    tokens.sort_by_key(|token| token.starts_with(INTERPOLATION_OPEN));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;

    fn symbols(source: &str) -> Vec<OutlineSymbol> {
        document_symbols(&markup::parse(source).unwrap())
    }

    #[test]
    fn plain_element_uses_its_tag_name() {
        let syms = symbols("<view></view>");
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].name, "view");
        assert_eq!(syms[0].kind, OutlineKind::Field);
    }

    #[test]
    fn id_and_classes_are_encoded_with_interpolations_last() {
        let syms = symbols(r#"<view id="a" class="b {{c}}"></view>"#);
        assert_eq!(syms[0].name, "view#a.b.{{c}}");
    }

    #[test]
    fn interpolation_order_is_stable_within_categories() {
        let syms = symbols(r#"<view class="{{x}} a {{y}} b"></view>"#);
        assert_eq!(syms[0].name, "view.a.b.{{x}}.{{y}}");
    }

    #[test]
    fn event_bindings_append_and_emit_function_symbols() {
        let syms = symbols(r#"<view bindtap="onTap" capture-bind:touchstart="onTouch"></view>"#);
        assert_eq!(
            syms[0].name,
            r#"view[bindtap="onTap"][capture-bind:touchstart="onTouch"]"#
        );
        assert_eq!(syms.len(), 3);
        assert_eq!(syms[1].name, r#"[bindtap="onTap"]"#);
        assert_eq!(syms[1].kind, OutlineKind::Function);
        assert_eq!(syms[2].name, r#"[capture-bind:touchstart="onTouch"]"#);
    }

    #[test]
    fn binding_keys_match_at_the_start_only() {
        let syms = symbols(r#"<view binding="x" data-bind="y" rebind="z"></view>"#);
        // `binding` starts with `bind` and counts; `data-bind`/`rebind`
        // do not.
        assert_eq!(syms[0].name, r#"view[binding="x"]"#);
        assert_eq!(syms.len(), 2);
    }

    #[test]
    fn empty_binding_values_do_not_count() {
        let syms = symbols(r#"<view bindtap=""></view>"#);
        assert_eq!(syms[0].name, "view");
        assert_eq!(syms.len(), 1);
    }

    #[test]
    fn script_nodes_carry_their_module() {
        let syms = symbols(r#"<wxs module="fmt"></wxs>"#);
        assert_eq!(syms[0].name, r#"wxs[module="fmt"]"#);
        assert_eq!(syms[0].kind, OutlineKind::Field);
    }

    #[test]
    fn ranges_cover_node_and_start_tag() {
        let syms = symbols("<view id=\"a\">\n  <text>hi</text>\n</view>");
        let view = &syms[0];
        assert_eq!(view.span.start.line, 0);
        assert_eq!(view.span.end.line, 2);
        assert_eq!(view.selection_span.end.line, 0);
    }

    #[test]
    fn output_is_flat_in_document_order() {
        let syms = symbols("<view><text id=\"t\"></text></view><view id=\"b\"></view>");
        let names: Vec<_> = syms.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["view", "text#t", "view#b"]);
    }
}
