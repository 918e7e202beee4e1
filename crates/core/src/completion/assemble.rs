use super::CompletionMode;
use crate::{markup, project, style, util};
use std::path::Path;

/// One suggestion, presented by the host as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    pub label: String,
}

/// Turn a classified cursor context into concrete suggestions. Every
/// collector failure mode degrades to an empty list.
pub fn assemble(
    path: &Path,
    workspace_root: Option<&Path>,
    mode: &CompletionMode,
) -> Vec<CompletionEntry> {
    match mode {
        CompletionMode::StyleWantsMarkupClasses => markup_class_entries(path),
        CompletionMode::StyleWantsGlobalVariables => {
            project::collect_global_variables(workspace_root)
                .into_iter()
                .map(|label| CompletionEntry { label })
                .collect()
        }
        CompletionMode::MarkupWantsStyleClasses { prefix, next_char } => {
            style_class_entries(path, workspace_root, prefix, *next_char)
        }
        CompletionMode::NoCompletion => Vec::new(),
    }
}

/// Class names used by the paired markup file, offered as `.name` selector
/// completions.
fn markup_class_entries(style_path: &Path) -> Vec<CompletionEntry> {
    let markup_path = util::paired_markup_path(style_path);
    if !markup_path.exists() {
        return Vec::new();
    }
    markup::collect_class_tokens(&markup_path)
        .into_iter()
        .map(|name| CompletionEntry {
            label: format!(".{name}"),
        })
        .collect()
}

/// Class names declared by the paired stylesheet plus the global stylesheet,
/// with the closing quote appended when the attribute still needs one.
fn style_class_entries(
    markup_path: &Path,
    workspace_root: Option<&Path>,
    prefix: &str,
    next_char: Option<char>,
) -> Vec<CompletionEntry> {
    let style_path = util::paired_style_path(markup_path);
    if !style_path.exists() {
        return Vec::new();
    }

    let mut names = style::collect_class_names(&style_path, workspace_root);
    names.extend(project::collect_global_class_names(workspace_root));

    let closing = closing_quote(prefix, next_char);
    names
        .into_iter()
        .map(|name| CompletionEntry {
            label: match closing {
                Some(quote) => format!("{name}{quote}"),
                None => name,
            },
        })
        .collect()
}

/// Append the matching quote only when the cursor sits right after the
/// opening quote and no closing quote follows it; otherwise leave the
/// suggestion bare and let the host's own quote pairing apply.
fn closing_quote(prefix: &str, next_char: Option<char>) -> Option<char> {
    if prefix.ends_with("class='") && next_char != Some('\'') {
        Some('\'')
    } else if prefix.ends_with("class=\"") && next_char != Some('"') {
        Some('"')
    } else {
        None
    }
}
