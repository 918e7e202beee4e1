use std::path::PathBuf;
use tower_lsp::lsp_types::Url;

pub fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    uri.to_file_path().ok()
}

/// Lightweight container for document state
pub struct Document {
    pub content: String,
    pub version: i32,
}

impl Document {
    pub fn new(content: String, version: i32) -> Self {
        Self { content, version }
    }
}

/// Convert an LSP UTF-16 column on a single line to a byte column.
pub fn utf16_col_to_byte_col(line: &str, utf16_col: usize) -> usize {
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line.chars() {
        if curr_utf16 >= utf16_col {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}
