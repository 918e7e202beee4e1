use crate::util;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Cursor context as handed over by the host: the edited file, the full
/// text of the cursor's line, and the cursor's byte column within it.
pub struct CursorContext<'a> {
    pub path: &'a Path,
    pub line: &'a str,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionMode {
    /// `.` typed in a stylesheet: suggest class names used by the paired
    /// markup file.
    StyleWantsMarkupClasses,
    /// `var(--` typed in a stylesheet: suggest global custom properties.
    StyleWantsGlobalVariables,
    /// Space or quote typed inside an open `class` attribute value in a
    /// markup file: suggest class names from the paired and global
    /// stylesheets.
    MarkupWantsStyleClasses {
        /// Line text from line start to the cursor.
        prefix: String,
        /// Character immediately after the cursor, if any.
        next_char: Option<char>,
    },
    NoCompletion,
}

/// Matches a line prefix whose cursor sits inside a `class` attribute value
/// that is still open: an opening quote with nothing after it, or quote plus
/// text with no closing quote yet. A prefix whose attribute already closed
/// does not match.
static CLASS_ATTR_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"class=("[^"]*|'[^']*)$"#).unwrap());

const CSS_VAR_PREFIX: &str = "var(--";

/// Map raw cursor context to a completion decision.
///
/// Deliberately a cheap text-window check rather than parse-position
/// mapping; this is the single seam where a real AST lookup could be
/// swapped in.
pub fn classify(ctx: &CursorContext) -> CompletionMode {
    let column = ctx.column.min(ctx.line.len());
    let Some(prefix) = ctx.line.get(..column) else {
        return CompletionMode::NoCompletion;
    };

    if util::is_style_path(ctx.path) {
        if prefix.ends_with('.') {
            return CompletionMode::StyleWantsMarkupClasses;
        }
        if prefix.ends_with(CSS_VAR_PREFIX) {
            return CompletionMode::StyleWantsGlobalVariables;
        }
        return CompletionMode::NoCompletion;
    }

    if util::is_markup_path(ctx.path) {
        if !matches!(prefix.chars().last(), Some(' ' | '\'' | '"')) {
            return CompletionMode::NoCompletion;
        }
        if !CLASS_ATTR_OPEN.is_match(prefix) {
            return CompletionMode::NoCompletion;
        }
        let next_char = ctx.line[column..].chars().next();
        return CompletionMode::MarkupWantsStyleClasses {
            prefix: prefix.to_string(),
            next_char,
        };
    }

    CompletionMode::NoCompletion
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_at(path: &str, line: &str, column: usize) -> CompletionMode {
        classify(&CursorContext {
            path: Path::new(path),
            line,
            column,
        })
    }

    #[test]
    fn dot_in_stylesheet_wants_markup_classes() {
        assert_eq!(
            classify_at("/p/index.wxss", ".", 1),
            CompletionMode::StyleWantsMarkupClasses
        );
    }

    #[test]
    fn var_prefix_in_stylesheet_wants_global_variables() {
        assert_eq!(
            classify_at("/p/index.wxss", "  color: var(--", 15),
            CompletionMode::StyleWantsGlobalVariables
        );
    }

    #[test]
    fn other_characters_in_stylesheet_do_nothing() {
        assert_eq!(
            classify_at("/p/index.wxss", "color: red;", 11),
            CompletionMode::NoCompletion
        );
    }

    #[test]
    fn quote_in_open_class_attribute_wants_style_classes() {
        let line = r#"<view class=""#;
        match classify_at("/p/index.wxml", line, line.len()) {
            CompletionMode::MarkupWantsStyleClasses { prefix, next_char } => {
                assert_eq!(prefix, line);
                assert_eq!(next_char, None);
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn space_after_existing_token_still_completes() {
        let line = r#"<view class="btn "#;
        assert!(matches!(
            classify_at("/p/index.wxml", line, line.len()),
            CompletionMode::MarkupWantsStyleClasses { .. }
        ));
    }

    #[test]
    fn next_character_is_captured() {
        let line = r#"<view class=""></view>"#;
        match classify_at("/p/index.wxml", line, 13) {
            CompletionMode::MarkupWantsStyleClasses { next_char, .. } => {
                assert_eq!(next_char, Some('"'));
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn closed_class_attribute_does_not_complete() {
        let line = r#"<view class="btn" "#;
        assert_eq!(
            classify_at("/p/index.wxml", line, line.len()),
            CompletionMode::NoCompletion
        );
    }

    #[test]
    fn dot_in_markup_is_not_a_trigger() {
        let line = r#"<view class="btn."#;
        assert_eq!(
            classify_at("/p/index.wxml", line, line.len()),
            CompletionMode::NoCompletion
        );
    }

    #[test]
    fn space_outside_any_class_attribute_does_nothing() {
        let line = "<view id=\"a\" ";
        assert_eq!(
            classify_at("/p/index.wxml", line, line.len()),
            CompletionMode::NoCompletion
        );
    }

    #[test]
    fn unrelated_file_kinds_do_nothing() {
        assert_eq!(
            classify_at("/p/index.json", "class=\"", 7),
            CompletionMode::NoCompletion
        );
    }
}
