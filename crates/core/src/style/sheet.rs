use crate::error::{MiniscopeError, Result};
use tree_sitter::Node;

/// A parsed stylesheet, kept alongside its source text for node slicing.
pub(crate) struct StyleSheet {
    tree: tree_sitter::Tree,
    source: String,
}

pub(crate) fn parse(source: String) -> Result<StyleSheet> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_css::LANGUAGE.into())
        .map_err(|e| MiniscopeError::Parsing(e.to_string()))?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| MiniscopeError::Parsing("failed to parse stylesheet".to_string()))?;

    Ok(StyleSheet { tree, source })
}

impl StyleSheet {
    /// Every class-selector name in the sheet, in source order. Malformed
    /// regions parse into error nodes and simply contribute nothing.
    pub fn class_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        visit(self.tree.root_node(), &mut |node| {
            // `class_name` also labels pseudo-class names, so anchor on the
            // selector node and take its name child.
            if node.kind() == "class_selector" {
                if let Some(name) = child_of_kind(node, "class_name") {
                    names.push(self.text(name));
                }
            }
        });
        names
    }

    /// Custom-property names declared inside rules whose selectors include
    /// the given root-scope type selector.
    pub fn root_variables(&self, root_selector: &str) -> Vec<String> {
        let mut variables = Vec::new();
        visit(self.tree.root_node(), &mut |node| {
            if node.kind() != "rule_set" {
                return;
            }
            let Some(selectors) = child_of_kind(node, "selectors") else {
                return;
            };
            if !self.selects_type(selectors, root_selector) {
                return;
            }
            let Some(block) = child_of_kind(node, "block") else {
                return;
            };
            visit(block, &mut |decl| {
                if decl.kind() == "declaration" {
                    if let Some(property) = child_of_kind(decl, "property_name") {
                        let name = self.text(property);
                        if name.starts_with("--") {
                            variables.push(name);
                        }
                    }
                }
            });
        });
        variables
    }

    /// Import targets named by `@import` at-rules, quotes stripped.
    pub fn import_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        visit(self.tree.root_node(), &mut |node| {
            if node.kind() != "import_statement" {
                return;
            }
            // First prelude argument: either a string or url("...")
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "string_value" {
                    paths.push(unquote(&self.text(child)));
                    break;
                }
                if child.kind() == "call_expression" {
                    let mut inner = None;
                    visit(child, &mut |n| {
                        if n.kind() == "string_value" && inner.is_none() {
                            inner = Some(unquote(&self.text(n)));
                        }
                    });
                    if let Some(path) = inner {
                        paths.push(path);
                        break;
                    }
                }
            }
        });
        paths
    }

    fn selects_type(&self, selectors: Node, type_name: &str) -> bool {
        let mut found = false;
        visit(selectors, &mut |node| {
            if node.kind() == "tag_name" && self.text(node) == type_name {
                found = true;
            }
        });
        found
    }

    fn text(&self, node: Node) -> String {
        node.utf8_text(self.source.as_bytes())
            .unwrap_or_default()
            .to_string()
    }
}

fn visit<'a>(node: Node<'a>, f: &mut impl FnMut(Node<'a>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, f);
    }
}

fn child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

fn unquote(raw: &str) -> String {
    raw.trim_matches(|c| c == '"' || c == '\'').to_string()
}
