use crate::LspServer;
use crate::util::{uri_to_path, utf16_col_to_byte_col};
use miniscope_core::completion::{CompletionMode, CursorContext, assemble, classify};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn completion(
    server: &LspServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    let path = match uri_to_path(&uri) {
        Some(path) => path,
        None => return Ok(None),
    };

    let text = match server.document_text(&uri, &path) {
        Some(text) => text,
        None => return Ok(None),
    };
    let line = match text.lines().nth(position.line as usize) {
        Some(line) => line,
        None => return Ok(None),
    };
    let column = utf16_col_to_byte_col(line, position.character as usize);

    let mode = classify(&CursorContext {
        path: &path,
        line,
        column,
    });
    tracing::debug!(?mode, path = %path.display(), "classified completion request");
    if mode == CompletionMode::NoCompletion {
        return Ok(None);
    }

    let root = server.workspace_root().await;
    let entries = assemble(&path, root.as_deref(), &mode);
    if entries.is_empty() {
        return Ok(None);
    }

    let items = entries
        .into_iter()
        .map(|entry| CompletionItem {
            label: entry.label,
            kind: Some(CompletionItemKind::TEXT),
            ..Default::default()
        })
        .collect();

    Ok(Some(CompletionResponse::Array(items)))
}
