use tower_lsp::lsp_types::*;

/// Completion trigger characters for both halves of a file pair: `.` for
/// class selectors in stylesheets, space and quotes for class attributes in
/// markup, `--` for CSS variables. Paired-quote variants cover hosts that
/// insert both quotes at once.
const TRIGGER_CHARACTERS: &[&str] = &[".", " ", "'", "\"", "''", "\"\"", "--"];

pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(
            TextDocumentSyncKind::INCREMENTAL,
        )),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(true),
            trigger_characters: Some(
                TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect(),
            ),
            ..Default::default()
        }),
        document_symbol_provider: Some(OneOf::Left(true)),
        ..Default::default()
    }
}
