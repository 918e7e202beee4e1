use super::{AttrSegment, MarkupDocument, parser};
use indexmap::IndexSet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Class tokens actually used by a markup file's `class` attributes.
///
/// A missing or unparsable file yields an empty set; completion must keep
/// working for the files that are fine.
pub fn collect_class_tokens(path: &Path) -> IndexSet<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return IndexSet::new(),
    };
    match parser::parse(&content) {
        Ok(document) => class_tokens(&document),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unparsable markup file");
            IndexSet::new()
        }
    }
}

pub fn class_tokens(document: &MarkupDocument) -> IndexSet<String> {
    let mut tokens = IndexSet::new();
    for node in &document.nodes {
        for attr in node.attributes.iter().filter(|a| a.key == "class") {
            if attr.segments.is_empty() {
                tokens.extend(attr.value.split_whitespace().map(str::to_string));
            } else {
                // Interpolated values only contribute their literal pieces;
                // the expressions themselves are not class names.
                for segment in &attr.segments {
                    if let AttrSegment::Text(value) = segment {
                        tokens.extend(value.split_whitespace().map(str::to_string));
                    }
                }
            }
        }
    }
    tokens
}
