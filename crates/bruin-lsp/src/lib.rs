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

//! Language Server Protocol host for Bruin asset definitions.
//!
//! This crate wires the pure `bruin-core` engine into an LSP server for
//! editors like VS Code and Neovim. It serves context-aware completion
//! inside `@bruin` asset blocks of SQL and Python files and in standalone
//! `.asset.yml` definitions, plus diagnostics for materialization
//! misconfigurations.
//!
//! # Performance
//!
//! - **Debouncing** (200ms): validation of a typing burst collapses into a
//!   single pass.
//! - **Dirty tracking**: content hashes prevent re-validating unchanged
//!   documents.
//! - **LRU eviction**: open-document count and per-document size are capped
//!   so the server's memory stays bounded.
//!
//! # Usage
//!
//! ```bash
//! # Run the language server (stdio transport)
//! bruin-lsp
//!
//! # With debug logging
//! RUST_LOG=debug bruin-lsp
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use bruin_lsp::BruinLanguageServer;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stdin = tokio::io::stdin();
//!     let stdout = tokio::io::stdout();
//!
//!     let (service, socket) = LspService::new(BruinLanguageServer::new);
//!
//!     Server::new(stdin, stdout, socket).serve(service).await;
//! }
//! ```
//!
//! # Architecture
//!
//! - `backend`: LSP protocol handling, debounce scheduling
//! - [`document_manager`]: document storage, dirty tracking, LRU eviction
//! - [`protocol`]: conversions between engine results and LSP wire types
//! - [`constants`]: tuning knobs and protocol magic numbers

mod backend;
pub mod constants;
pub mod document_manager;
pub mod protocol;

pub use backend::BruinLanguageServer;
pub use document_manager::{CacheStatistics, DocumentManager};

/// LSP server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
