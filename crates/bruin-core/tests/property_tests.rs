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

//! Property-based tests: the engine is total over arbitrary documents.
//!
//! Every public entry point must accept any UTF-8 string and any position,
//! including multi-byte text, positions past the end of lines or the file,
//! and documents with no recognizable structure at all.

use bruin_core::{block, complete, path, validate, Dialect, Position, Schema};
use proptest::prelude::*;

fn any_dialect() -> impl Strategy<Value = Dialect> {
    prop_oneof![
        Just(Dialect::Sql),
        Just(Dialect::Python),
        Just(Dialect::Yaml),
    ]
}

proptest! {
    #[test]
    fn complete_never_panics(
        content in ".*",
        line in 0u32..200,
        character in 0u32..200,
        dialect in any_dialect(),
    ) {
        let schema = Schema::bruin();
        let _ = complete(&content, dialect, Position::new(line, character), &schema);
    }

    #[test]
    fn validate_never_panics(content in ".*", dialect in any_dialect()) {
        let _ = validate(&content, dialect, &Schema::bruin());
    }

    #[test]
    fn yaml_path_never_panics(content in ".*", line in 0u32..200, character in 0u32..200) {
        let _ = path::yaml_path(&content, Position::new(line, character));
    }

    #[test]
    fn blocks_are_ordered_and_well_formed(content in ".*", dialect in any_dialect()) {
        let blocks = block::find_blocks(&content, dialect);
        for b in &blocks {
            prop_assert!(b.start <= b.end);
            prop_assert!(b.end <= content.len());
        }
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
    }

    #[test]
    fn is_inside_agrees_with_found_blocks(
        content in ".*",
        offset in 0usize..500,
        dialect in any_dialect(),
    ) {
        let inside = block::is_inside(&content, dialect, offset);
        let covered = block::find_blocks(&content, dialect)
            .iter()
            .any(|b| offset >= b.start && offset <= b.end);
        prop_assert_eq!(inside, covered);
    }

    #[test]
    fn outside_any_block_completion_is_empty(prefix in "[a-z ;\n]{0,80}") {
        // No markers at all means no block, so no completions anywhere.
        let schema = Schema::bruin();
        for line in 0..4u32 {
            let items = complete(&prefix, Dialect::Sql, Position::new(line, 0), &schema);
            prop_assert!(items.is_empty());
        }
    }

    #[test]
    fn completion_labels_are_unique(
        body in "[a-z:\n -]{0,120}",
        line in 0u32..12,
        character in 0u32..40,
    ) {
        let text = format!("/* @bruin\n{body}\n@bruin */");
        let schema = Schema::bruin();
        let items = complete(&text, Dialect::Sql, Position::new(line, character), &schema);
        let mut labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        prop_assert_eq!(labels.len(), items.len());
    }
}
