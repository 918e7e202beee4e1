pub mod capabilities;
pub mod completion;
pub mod symbols;
pub mod util;

use crate::util::Document;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    client: Client,
    root: Arc<RwLock<Option<PathBuf>>>,
    pub documents: DashMap<Url, Arc<Document>>,
}

impl LspServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            root: Arc::new(RwLock::new(None)),
            documents: DashMap::new(),
        }
    }

    pub async fn workspace_root(&self) -> Option<PathBuf> {
        self.root.read().await.clone()
    }

    /// Text of a document: the open in-memory copy when the host sent one,
    /// otherwise read from disk.
    pub fn document_text(&self, uri: &Url, path: &std::path::Path) -> Option<String> {
        if let Some(doc) = self.documents.get(uri) {
            return Some(doc.content.clone());
        }
        std::fs::read_to_string(path).ok()
    }

    fn offset_at(&self, text: &str, position: Position) -> usize {
        let mut line = 0;
        let mut offset = 0;
        let mut chars = text.chars().peekable();

        while line < position.line as usize {
            if let Some(c) = chars.next() {
                offset += c.len_utf8();
                if c == '\n' {
                    line += 1;
                } else if c == '\r' {
                    if chars.peek() == Some(&'\n') {
                        offset += chars.next().unwrap().len_utf8();
                    }
                    line += 1;
                }
            } else {
                return offset;
            }
        }

        let mut utf16_count = 0;
        while utf16_count < position.character as usize {
            if let Some(c) = chars.next() {
                if c == '\n' || c == '\r' {
                    break;
                }
                utf16_count += c.len_utf16();
                offset += c.len_utf8();
            } else {
                break;
            }
        }
        offset
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root_path = params.root_uri.and_then(|uri| uri.to_file_path().ok());
        *self.root.write().await = root_path;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "Miniscope".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "miniscope language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let content = params.text_document.text;
        let version = params.text_document.version;

        self.documents
            .insert(uri, Arc::new(Document::new(content, version)));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if let Some(mut doc_ref) = self.documents.get_mut(&uri) {
            let doc = doc_ref.value_mut();

            if let Some(change) = params.content_changes.last() {
                // Full-document change: replace outright
                if change.range.is_none() {
                    *doc = Arc::new(Document::new(change.text.clone(), version));
                } else {
                    // Apply ranged edits textually
                    let mut content = doc.content.clone();
                    for change in &params.content_changes {
                        if let Some(range) = change.range {
                            let start_byte = self.offset_at(&content, range.start);
                            let old_end_byte = self.offset_at(&content, range.end);
                            content.replace_range(start_byte..old_end_byte, &change.text);
                        } else {
                            content = change.text.clone();
                        }
                    }
                    *doc = Arc::new(Document::new(content, version));
                }
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/completion uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = completion::completion(self, params).await;
        if let Ok(Some(CompletionResponse::Array(items))) = &result {
            self.client
                .log_message(
                    MessageType::LOG,
                    format!("LSP Response: {} completion items", items.len()),
                )
                .await;
        }
        result
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        // Selecting an entry has no side effect; pass the item through
        Ok(item)
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/documentSymbol uri={}",
                    params.text_document.uri
                ),
            )
            .await;
        let result = symbols::document_symbol(self, params).await;
        if let Ok(Some(DocumentSymbolResponse::Nested(syms))) = &result {
            self.client
                .log_message(
                    MessageType::LOG,
                    format!("LSP Response: found {} symbols", syms.len()),
                )
                .await;
        }
        result
    }
}

pub async fn run_server() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(LspServer::new);
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
