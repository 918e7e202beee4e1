use std::path::{Path, PathBuf};

/// Markup half of a file pair.
pub const MARKUP_EXT: &str = "wxml";
/// Stylesheet half of a file pair.
pub const STYLE_EXT: &str = "wxss";
/// Project-wide stylesheet, resolved relative to the project root.
pub const GLOBAL_STYLESHEET: &str = "app.wxss";

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

pub fn is_markup_path(path: &Path) -> bool {
    extension(path).as_deref() == Some(MARKUP_EXT)
}

pub fn is_style_path(path: &Path) -> bool {
    extension(path).as_deref() == Some(STYLE_EXT)
}

/// The markup file paired with a stylesheet: same directory, same basename,
/// markup extension.
pub fn paired_markup_path(style_path: &Path) -> PathBuf {
    style_path.with_extension(MARKUP_EXT)
}

/// The stylesheet paired with a markup file.
pub fn paired_style_path(markup_path: &Path) -> PathBuf {
    markup_path.with_extension(STYLE_EXT)
}
