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

//! Document management with caching and LRU eviction.
//!
//! The manager is the single source of truth for open documents. Each entry
//! keeps the content as a [`Rope`], the dialect derived from the file name,
//! the last validation result, a content hash for change detection, and an
//! access timestamp for LRU ordering.

use bruin_core::{Diagnostic, Dialect};
use dashmap::DashMap;
use parking_lot::Mutex;
use ropey::Rope;
use std::sync::Arc;
use tower_lsp::lsp_types::Url;
use tracing::{debug, warn};

pub use crate::constants::{DEFAULT_MAX_CACHE_SIZE, DEFAULT_MAX_DOCUMENT_SIZE};

/// Per-document state with dirty tracking.
pub struct DocumentState {
    /// Current rope content.
    pub rope: Rope,
    /// Dialect decided from the URI when the document was opened.
    pub dialect: Dialect,
    /// Diagnostics from the last validation pass.
    pub diagnostics: Arc<Vec<Diagnostic>>,
    /// Content hash for change detection.
    pub content_hash: u64,
    /// True if content changed since the last validation.
    pub dirty: bool,
    /// Last access timestamp for LRU eviction.
    pub last_access: std::time::Instant,
}

/// Cache statistics for monitoring and tuning.
#[derive(Debug, Clone, Default)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub current_size: usize,
    pub max_size: usize,
}

/// Document manager with LRU caching and dirty tracking.
///
/// Uses `DashMap` for concurrent access and `parking_lot::Mutex` for
/// fine-grained per-document locking, so it can be shared freely across the
/// server's async tasks.
pub struct DocumentManager {
    documents: DashMap<Url, Arc<Mutex<DocumentState>>>,
    cache_stats: Arc<Mutex<CacheStatistics>>,
    max_cache_size: Arc<parking_lot::RwLock<usize>>,
    max_document_size: Arc<parking_lot::RwLock<usize>>,
}

impl DocumentManager {
    pub fn new(max_cache_size: usize, max_document_size: usize) -> Self {
        Self {
            documents: DashMap::new(),
            cache_stats: Arc::new(Mutex::new(CacheStatistics {
                max_size: max_cache_size,
                ..Default::default()
            })),
            max_cache_size: Arc::new(parking_lot::RwLock::new(max_cache_size)),
            max_document_size: Arc::new(parking_lot::RwLock::new(max_document_size)),
        }
    }

    /// Snapshot of cache performance metrics.
    pub fn statistics(&self) -> CacheStatistics {
        let mut stats = self.cache_stats.lock();
        stats.current_size = self.documents.len();
        stats.clone()
    }

    pub fn set_max_cache_size(&self, new_max: usize) {
        let mut max = self.max_cache_size.write();
        *max = new_max;
        let mut stats = self.cache_stats.lock();
        stats.max_size = new_max;
        debug!("Cache max size updated to: {}", new_max);
    }

    pub fn max_cache_size(&self) -> usize {
        *self.max_cache_size.read()
    }

    pub fn set_max_document_size(&self, new_max: usize) {
        let mut max = self.max_document_size.write();
        *max = new_max;
        debug!("Max document size updated to: {} bytes", new_max);
    }

    pub fn max_document_size(&self) -> usize {
        *self.max_document_size.read()
    }

    fn hash_content(content: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        hasher.finish()
    }

    /// Insert or update a document.
    ///
    /// Existing documents keep their dialect; content is replaced and the
    /// entry is marked dirty only when the hash actually changed. New
    /// documents may trigger LRU eviction first.
    ///
    /// Returns `false` when the content exceeds the document size limit.
    pub fn insert_or_update(&self, uri: &Url, content: &str, dialect: Dialect) -> bool {
        let max_size = self.max_document_size();
        if content.len() > max_size {
            warn!(
                "Document size limit exceeded for {}: {} bytes > {} bytes maximum (rejected)",
                uri,
                content.len(),
                max_size
            );
            return false;
        }

        let content_hash = Self::hash_content(content);

        if let Some(state_ref) = self.documents.get(uri) {
            {
                let mut stats = self.cache_stats.lock();
                stats.hits += 1;
            }

            let mut state = state_ref.lock();
            if state.content_hash != content_hash {
                debug!(
                    "Document content changed for {}: {} -> {} bytes",
                    uri,
                    state.rope.len_bytes(),
                    content.len()
                );
                state.rope = Rope::from_str(content);
                state.content_hash = content_hash;
                state.dirty = true;
            } else {
                debug!("Document content unchanged for {} (hash: {:#x})", uri, content_hash);
            }
            state.last_access = std::time::Instant::now();
        } else {
            {
                let mut stats = self.cache_stats.lock();
                stats.misses += 1;
            }

            debug!(
                "New document registered: {} ({} bytes, dialect: {:?})",
                uri,
                content.len(),
                dialect
            );

            let max_cache = self.max_cache_size();
            if self.documents.len() >= max_cache {
                warn!(
                    "Cache limit reached ({}/{}), triggering LRU eviction before inserting {}",
                    self.documents.len(),
                    max_cache,
                    uri
                );
                self.evict_lru_document();
            }

            let state = DocumentState {
                rope: Rope::from_str(content),
                dialect,
                diagnostics: Arc::new(Vec::new()),
                content_hash,
                dirty: true,
                last_access: std::time::Instant::now(),
            };
            self.documents
                .insert(uri.clone(), Arc::new(Mutex::new(state)));
        }

        true
    }

    /// Get document content and dialect, updating LRU access time.
    pub fn get(&self, uri: &Url) -> Option<(String, Dialect)> {
        self.documents.get(uri).map(|entry| {
            let mut state = entry.lock();
            state.last_access = std::time::Instant::now();
            (state.rope.to_string(), state.dialect)
        })
    }

    /// Get the document state for in-place operations.
    pub fn get_state(&self, uri: &Url) -> Option<Arc<Mutex<DocumentState>>> {
        self.documents.get(uri).map(|entry| entry.clone())
    }

    pub fn is_dirty(&self, uri: &Url) -> bool {
        self.documents
            .get(uri)
            .map(|entry| entry.lock().dirty)
            .unwrap_or(false)
    }

    /// Store a validation result and clear the dirty flag.
    pub fn update_diagnostics(&self, uri: &Url, diagnostics: Arc<Vec<Diagnostic>>) {
        if let Some(state_ref) = self.documents.get(uri) {
            let mut state = state_ref.lock();
            debug!("Updating diagnostics for {}: {} findings", uri, diagnostics.len());
            state.diagnostics = diagnostics;
            state.dirty = false;
        } else {
            warn!(
                "Attempted to update diagnostics for non-existent document: {} \
                 (may have been closed/evicted)",
                uri
            );
        }
    }

    /// Remove a document, typically on close.
    pub fn remove(&self, uri: &Url) -> bool {
        self.documents.remove(uri).is_some()
    }

    /// All document URIs currently cached.
    pub fn all_uris(&self) -> Vec<Url> {
        self.documents.iter().map(|entry| entry.key().clone()).collect()
    }

    fn evict_lru_document(&self) {
        if self.documents.is_empty() {
            warn!("LRU eviction requested but cache is empty (no-op)");
            return;
        }

        let mut lru_uri: Option<Url> = None;
        let mut lru_time = std::time::Instant::now();
        let mut lru_size: usize = 0;

        for entry in self.documents.iter() {
            let state = entry.value().lock();
            if lru_uri.is_none() || state.last_access < lru_time {
                lru_uri = Some(entry.key().clone());
                lru_time = state.last_access;
                lru_size = state.rope.len_bytes();
            }
        }

        if let Some(uri) = lru_uri {
            let idle_duration = std::time::Instant::now().duration_since(lru_time);
            warn!(
                "Evicting LRU document {} ({} bytes, idle for {:?})",
                uri, lru_size, idle_duration
            );
            self.documents.remove(&uri);

            let mut stats = self.cache_stats.lock();
            stats.evictions += 1;
        }
    }

    /// Drop all documents and reset counters. Primarily for tests.
    pub fn clear(&self) {
        self.documents.clear();
        let mut stats = self.cache_stats.lock();
        stats.hits = 0;
        stats.misses = 0;
        stats.evictions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_manager_new() {
        let manager = DocumentManager::new(100, 1024 * 1024);
        assert_eq!(manager.max_cache_size(), 100);
        assert_eq!(manager.max_document_size(), 1024 * 1024);

        let stats = manager.statistics();
        assert_eq!(stats.max_size, 100);
        assert_eq!(stats.current_size, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_insert_and_get() {
        let manager = DocumentManager::new(10, 1024 * 1024);
        let uri = Url::parse("file:///pipeline/assets/orders.sql").unwrap();
        let content = "/* @bruin\ntype: bq.sql\n@bruin */\nSELECT 1;\n";

        assert!(manager.insert_or_update(&uri, content, Dialect::Sql));

        let (retrieved, dialect) = manager.get(&uri).unwrap();
        assert_eq!(retrieved, content);
        assert_eq!(dialect, Dialect::Sql);

        let stats = manager.statistics();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.current_size, 1);
    }

    #[test]
    fn test_update_marks_dirty_only_on_change() {
        let manager = DocumentManager::new(10, 1024 * 1024);
        let uri = Url::parse("file:///assets/orders.asset.yml").unwrap();

        manager.insert_or_update(&uri, "type: python\n", Dialect::Yaml);
        assert!(manager.is_dirty(&uri));
        manager.update_diagnostics(&uri, Arc::new(Vec::new()));
        assert!(!manager.is_dirty(&uri));

        // Identical content does not re-dirty the document
        manager.insert_or_update(&uri, "type: python\n", Dialect::Yaml);
        assert!(!manager.is_dirty(&uri));

        manager.insert_or_update(&uri, "type: ingestr\n", Dialect::Yaml);
        assert!(manager.is_dirty(&uri));
    }

    #[test]
    fn test_document_size_limit() {
        let manager = DocumentManager::new(10, 100);
        let uri = Url::parse("file:///assets/orders.sql").unwrap();

        assert!(manager.insert_or_update(&uri, "/* @bruin\n@bruin */", Dialect::Sql));

        let large_content = "x".repeat(101);
        assert!(!manager.insert_or_update(&uri, &large_content, Dialect::Sql));
    }

    #[test]
    fn test_lru_eviction() {
        let manager = DocumentManager::new(3, 1024 * 1024);

        for i in 0..3 {
            let uri = Url::parse(&format!("file:///assets/a{}.sql", i)).unwrap();
            manager.insert_or_update(&uri, "/* @bruin\n@bruin */", Dialect::Sql);
        }

        let stats = manager.statistics();
        assert_eq!(stats.current_size, 3);
        assert_eq!(stats.evictions, 0);

        let uri4 = Url::parse("file:///assets/a4.sql").unwrap();
        manager.insert_or_update(&uri4, "/* @bruin\n@bruin */", Dialect::Sql);

        let stats = manager.statistics();
        assert_eq!(stats.current_size, 3);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_remove() {
        let manager = DocumentManager::new(10, 1024 * 1024);
        let uri = Url::parse("file:///assets/orders.py").unwrap();

        manager.insert_or_update(&uri, "print(1)\n", Dialect::Python);
        assert!(manager.get(&uri).is_some());

        assert!(manager.remove(&uri));
        assert!(manager.get(&uri).is_none());
        assert!(!manager.remove(&uri));
    }

    #[test]
    fn test_all_uris() {
        let manager = DocumentManager::new(10, 1024 * 1024);

        for i in 0..5 {
            let uri = Url::parse(&format!("file:///assets/a{}.sql", i)).unwrap();
            manager.insert_or_update(&uri, "/* @bruin\n@bruin */", Dialect::Sql);
        }

        assert_eq!(manager.all_uris().len(), 5);
    }

    #[test]
    fn test_clear() {
        let manager = DocumentManager::new(10, 1024 * 1024);

        for i in 0..3 {
            let uri = Url::parse(&format!("file:///assets/a{}.sql", i)).unwrap();
            manager.insert_or_update(&uri, "/* @bruin\n@bruin */", Dialect::Sql);
        }

        assert_eq!(manager.statistics().current_size, 3);
        manager.clear();
        assert_eq!(manager.statistics().current_size, 0);
        assert_eq!(manager.statistics().misses, 0);
    }

    #[test]
    fn test_runtime_config_update() {
        let manager = DocumentManager::new(100, 1024 * 1024);

        manager.set_max_cache_size(200);
        assert_eq!(manager.max_cache_size(), 200);

        manager.set_max_document_size(2 * 1024 * 1024);
        assert_eq!(manager.max_document_size(), 2 * 1024 * 1024);
    }
}
