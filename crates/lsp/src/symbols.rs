use crate::LspServer;
use crate::util::uri_to_path;
use miniscope_core::markup::Span;
use miniscope_core::outline::{OutlineKind, OutlineSymbol};
use miniscope_core::{markup, outline, util};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn document_symbol(
    server: &LspServer,
    params: DocumentSymbolParams,
) -> Result<Option<DocumentSymbolResponse>> {
    let uri = params.text_document.uri;

    let path = match uri_to_path(&uri) {
        Some(path) => path,
        None => return Ok(None),
    };
    if !util::is_markup_path(&path) {
        return Ok(None);
    }

    let text = match server.document_text(&uri, &path) {
        Some(text) => text,
        None => return Ok(None),
    };
    let document = match markup::parse(&text) {
        Ok(document) => document,
        Err(_) => return Ok(None),
    };

    let lsp_symbols = outline::document_symbols(&document)
        .into_iter()
        .map(convert_symbol)
        .collect();
    // Flat list: symbols never nest, whatever the markup's own nesting
    Ok(Some(DocumentSymbolResponse::Nested(lsp_symbols)))
}

fn convert_symbol(sym: OutlineSymbol) -> DocumentSymbol {
    #[allow(deprecated)]
    DocumentSymbol {
        name: sym.name,
        detail: Some(String::new()),
        kind: outline_kind_to_symbol_kind(sym.kind),
        tags: None,
        deprecated: None,
        range: span_to_range(sym.span),
        selection_range: span_to_range(sym.selection_span),
        children: None,
    }
}

fn outline_kind_to_symbol_kind(kind: OutlineKind) -> SymbolKind {
    match kind {
        OutlineKind::Field => SymbolKind::FIELD,
        OutlineKind::Function => SymbolKind::FUNCTION,
    }
}

fn span_to_range(span: Span) -> Range {
    Range {
        start: Position::new(span.start.line, span.start.column),
        end: Position::new(span.end.line, span.end.column),
    }
}
