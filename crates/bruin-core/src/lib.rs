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

//! Core engine for Bruin asset definition tooling.
//!
//! Bruin assets carry their configuration as a YAML fragment embedded in the
//! asset's own source file: between `@bruin` markers inside a SQL comment or
//! a Python docstring, or as the whole file for standalone `.asset.yml`
//! definitions. This crate turns a raw document snapshot plus a cursor
//! position into editor-grade results without ever parsing full YAML:
//!
//! - [`block`] finds the asset block regions and decides containment;
//! - [`path`] derives the YAML key path at the cursor from indentation alone;
//! - [`schema`] is the static vocabulary of keys, values, and templates;
//! - [`completion`] assembles context-aware suggestions;
//! - [`validate`] reports materialization misconfigurations.
//!
//! Everything here is pure and total: no I/O, no global state, and malformed
//! input degrades to empty results rather than errors. The LSP host in
//! `bruin-lsp` owns documents, scheduling, and the wire protocol.

pub mod block;
pub mod completion;
pub mod path;
pub mod schema;
pub mod text;
pub mod validate;

pub use block::{Block, Dialect, UnknownDialect};
pub use completion::{complete, CompletionItem, CompletionKind};
pub use path::{yaml_path, PathItem};
pub use schema::Schema;
pub use text::Position;
pub use validate::{validate, Diagnostic, Severity};
