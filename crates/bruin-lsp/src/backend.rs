// Bruin Asset Language Server
//
// Copyright (c) 2026 the bruin-asset-ls contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! LSP backend implementation.
//!
//! Validation is debounced by 200ms so a typing burst produces a single
//! diagnostics pass, and a content hash keeps clean documents from being
//! re-validated at all. Completion always reads the latest stored content,
//! so it never waits on the debounce window.

use crate::constants::DEBOUNCE_MS;
use crate::document_manager::{CacheStatistics, DocumentManager};
use crate::protocol::{to_lsp_completion, to_lsp_diagnostic};
use bruin_core::{Dialect, Schema};
use dashmap::DashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

/// Bruin asset language server backend.
///
/// Protocol handling lives here; document lifecycle is delegated to the
/// [`DocumentManager`] and all language smarts to `bruin-core`. The schema
/// is held by the server and threaded into every engine call, so tests and
/// embedders can run against a custom vocabulary.
pub struct BruinLanguageServer {
    /// LSP client connection.
    client: Client,
    /// Document manager for storage and caching.
    document_manager: Arc<DocumentManager>,
    /// Completion and validation vocabulary.
    schema: Arc<Schema>,
    /// Debounce channels: URI -> sender for triggering validation.
    debounce_channels: DashMap<Url, mpsc::UnboundedSender<()>>,
}

impl BruinLanguageServer {
    /// Create a new language server with default configuration.
    pub fn new(client: Client) -> Self {
        use crate::constants::{DEFAULT_MAX_CACHE_SIZE, DEFAULT_MAX_DOCUMENT_SIZE};
        Self::with_config(
            client,
            Schema::bruin(),
            DEFAULT_MAX_CACHE_SIZE,
            DEFAULT_MAX_DOCUMENT_SIZE,
        )
    }

    /// Create a new language server with a custom schema and cache limits.
    pub fn with_config(
        client: Client,
        schema: Schema,
        max_cache_size: usize,
        max_document_size: usize,
    ) -> Self {
        Self {
            client,
            document_manager: Arc::new(DocumentManager::new(max_cache_size, max_document_size)),
            schema: Arc::new(schema),
            debounce_channels: DashMap::new(),
        }
    }

    /// Get current cache statistics.
    pub fn cache_statistics(&self) -> CacheStatistics {
        self.document_manager.statistics()
    }

    /// Update maximum cache size (can be called during runtime).
    pub fn set_max_cache_size(&self, new_max: usize) {
        self.document_manager.set_max_cache_size(new_max);
    }

    /// Update maximum document size (can be called during runtime).
    pub fn set_max_document_size(&self, new_max: usize) {
        self.document_manager.set_max_document_size(new_max);
    }

    /// Validate a document if dirty and publish the resulting diagnostics.
    async fn validate_if_dirty(&self, uri: &Url) {
        if !self.document_manager.is_dirty(uri) {
            debug!("Document {} is clean, skipping validation", uri);
            return;
        }

        let (content, dialect) = match self.document_manager.get(uri) {
            Some(doc) => doc,
            None => {
                warn!(
                    "Cannot validate non-existent document: {} (may have been closed/evicted)",
                    uri
                );
                return;
            }
        };

        debug!(
            "Validating dirty document: {} ({} bytes, dialect: {:?})",
            uri,
            content.len(),
            dialect
        );
        let diagnostics = Arc::new(bruin_core::validate(&content, dialect, &self.schema));
        if !diagnostics.is_empty() {
            debug!("Validation found {} findings in {}", diagnostics.len(), uri);
        }

        self.document_manager
            .update_diagnostics(uri, Arc::clone(&diagnostics));

        let lsp_diagnostics: Vec<Diagnostic> = diagnostics
            .iter()
            .cloned()
            .map(to_lsp_diagnostic)
            .collect();
        self.client
            .publish_diagnostics(uri.clone(), lsp_diagnostics, None)
            .await;
    }

    /// Start debounced validation for a document.
    fn schedule_validation(&self, uri: Url) {
        let tx = if let Some(entry) = self.debounce_channels.get(&uri) {
            entry.clone()
        } else {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let uri_clone = uri.clone();
            let client = self.client.clone();
            let document_manager = Arc::clone(&self.document_manager);
            let schema = Arc::clone(&self.schema);

            tokio::spawn(async move {
                while rx.recv().await.is_some() {
                    sleep(Duration::from_millis(DEBOUNCE_MS)).await;

                    // Drain signals batched during the debounce window
                    while rx.try_recv().is_ok() {}

                    if !document_manager.is_dirty(&uri_clone) {
                        continue;
                    }
                    let (content, dialect) = match document_manager.get(&uri_clone) {
                        Some(doc) => doc,
                        None => continue,
                    };

                    debug!("Debounced validation for: {}", uri_clone);
                    let diagnostics =
                        Arc::new(bruin_core::validate(&content, dialect, &schema));
                    document_manager.update_diagnostics(&uri_clone, Arc::clone(&diagnostics));

                    let lsp_diagnostics: Vec<Diagnostic> = diagnostics
                        .iter()
                        .cloned()
                        .map(to_lsp_diagnostic)
                        .collect();
                    client
                        .publish_diagnostics(uri_clone.clone(), lsp_diagnostics, None)
                        .await;
                }
            });

            self.debounce_channels.insert(uri.clone(), tx.clone());
            tx
        };

        let _ = tx.send(());
    }
}

/// Decide the block dialect from the document URI. Unrecognized extensions
/// fall back to SQL comment markers, which simply yields no blocks when the
/// file has none.
fn dialect_for_uri(uri: &Url) -> Dialect {
    Dialect::from_path(Path::new(uri.path())).unwrap_or(Dialect::Sql)
}

#[tower_lsp::async_trait]
impl LanguageServer for BruinLanguageServer {
    async fn initialize(&self, _params: InitializeParams) -> Result<InitializeResult> {
        info!("Bruin asset language server initializing");

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        will_save: None,
                        will_save_wait_until: None,
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                    },
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![
                        " ".to_string(),
                        ":".to_string(),
                        "-".to_string(),
                    ]),
                    work_done_progress_options: Default::default(),
                    all_commit_characters: None,
                    completion_item: None,
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "bruin-lsp".to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Bruin asset language server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Bruin asset language server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = &params.text_document.uri;
        let content_len = params.text_document.text.len();
        let dialect = dialect_for_uri(uri);

        info!(
            "Document opened: {} ({} bytes, dialect: {:?})",
            uri, content_len, dialect
        );

        use crate::constants::BYTES_PER_MEGABYTE;
        let max_size = self.document_manager.max_document_size();
        if content_len > max_size {
            error!(
                "Document size limit exceeded on open: {} has {} bytes > {} bytes maximum",
                uri, content_len, max_size
            );
            self.client
                .show_message(
                    MessageType::ERROR,
                    format!(
                        "Document too large: {} bytes exceeds maximum of {} bytes ({} MB)",
                        content_len,
                        max_size,
                        max_size / BYTES_PER_MEGABYTE
                    ),
                )
                .await;
            return;
        }

        // Validate immediately on open (no debounce) for instant feedback
        if self
            .document_manager
            .insert_or_update(uri, &params.text_document.text, dialect)
        {
            self.validate_if_dirty(uri).await;
        } else {
            error!("Failed to register document {} (size validation failed)", uri);
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = &params.text_document.uri;
        debug!("Document change event received for: {}", uri);

        if let Some(change) = params.content_changes.into_iter().last() {
            let dialect = dialect_for_uri(uri);
            if self
                .document_manager
                .insert_or_update(uri, &change.text, dialect)
            {
                self.schedule_validation(uri.clone());
            } else {
                warn!(
                    "Failed to update document {} (size limit exceeded: {} bytes)",
                    uri,
                    change.text.len()
                );
            }
        } else {
            warn!("Document change event for {} had no content changes", uri);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("Document saved: {}", params.text_document.uri);
        if let Some(text) = params.text {
            let uri = &params.text_document.uri;
            // Re-validate immediately so diagnostics are current on save
            self.document_manager
                .insert_or_update(uri, &text, dialect_for_uri(uri));
            self.validate_if_dirty(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.document_manager.remove(&params.text_document.uri);
        self.debounce_channels.remove(&params.text_document.uri);
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        debug!(
            "Completion request for {} at {}:{}",
            uri, position.line, position.character
        );

        if let Some((content, dialect)) = self.document_manager.get(uri) {
            let items = bruin_core::complete(
                &content,
                dialect,
                bruin_core::Position::new(position.line, position.character),
                &self.schema,
            );
            debug!(
                "Providing {} completion items for {} at {}:{}",
                items.len(),
                uri,
                position.line,
                position.character
            );
            let items: Vec<CompletionItem> = items.into_iter().map(to_lsp_completion).collect();
            return Ok(Some(CompletionResponse::Array(items)));
        }

        debug!("No completion available for {} (document not found in cache)", uri);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_falls_back_to_sql() {
        let uri = Url::parse("file:///pipeline/assets/orders.sql").unwrap();
        assert_eq!(dialect_for_uri(&uri), Dialect::Sql);

        let uri = Url::parse("file:///pipeline/assets/events.py").unwrap();
        assert_eq!(dialect_for_uri(&uri), Dialect::Python);

        let uri = Url::parse("file:///pipeline/assets/orders.asset.yml").unwrap();
        assert_eq!(dialect_for_uri(&uri), Dialect::Yaml);

        let uri = Url::parse("file:///pipeline/README.md").unwrap();
        assert_eq!(dialect_for_uri(&uri), Dialect::Sql);
    }
}
