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

//! Property-based tests for the server's document and conversion layers.

use bruin_core::{Dialect, Position, Schema};
use bruin_lsp::protocol::to_lsp_completion;
use bruin_lsp::DocumentManager;
use proptest::prelude::*;
use tower_lsp::lsp_types::Url;

proptest! {
    #[test]
    fn manager_round_trips_arbitrary_content(content in ".{0,500}") {
        let manager = DocumentManager::new(10, 1024 * 1024);
        let uri = Url::parse("file:///assets/a.sql").unwrap();
        prop_assert!(manager.insert_or_update(&uri, &content, Dialect::Sql));
        let (stored, dialect) = manager.get(&uri).unwrap();
        prop_assert_eq!(stored, content);
        prop_assert_eq!(dialect, Dialect::Sql);
    }

    #[test]
    fn engine_to_lsp_conversion_is_total(
        content in ".{0,300}",
        line in 0u32..50,
        character in 0u32..80,
    ) {
        let items = bruin_core::complete(
            &content,
            Dialect::Yaml,
            Position::new(line, character),
            &Schema::bruin(),
        );
        for item in items {
            let lsp = to_lsp_completion(item);
            prop_assert!(lsp.kind.is_some());
            prop_assert!(lsp.insert_text.is_some());
        }
    }

    #[test]
    fn size_limit_is_enforced_exactly(len in 0usize..200, limit in 1usize..200) {
        let manager = DocumentManager::new(10, limit);
        let uri = Url::parse("file:///assets/a.sql").unwrap();
        let content = "x".repeat(len);
        let accepted = manager.insert_or_update(&uri, &content, Dialect::Sql);
        prop_assert_eq!(accepted, len <= limit);
    }
}
