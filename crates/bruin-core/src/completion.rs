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

//! Context-aware completion for Bruin asset blocks.
//!
//! [`complete`] is the single decision procedure mapping a document snapshot
//! and cursor position to an ordered list of suggestions. Branches are tried
//! in precedence order and an empty branch result falls through to the next:
//!
//! 1. outside every asset block: no completions at all;
//! 2. inside `materialization:`: type values, strategy values, or sub-keys;
//! 3. inside `depends:`: an add-dependency snippet on empty lines;
//! 4. inside `columns:`: column templates, sub-keys, data types, check names;
//! 5. after top-level `type:`: asset type values;
//! 6. at the block's top level on a blank word: all top-level keys;
//! 7. fallback: top-level keys prefix-filtered by the word being typed.
//!
//! Every input is valid: arbitrary malformed text and out-of-range positions
//! degrade to an empty list, never an error.

use serde::{Deserialize, Serialize};

use crate::block::{self, Dialect};
use crate::path;
use crate::schema::Schema;
use crate::text::{self, Position};

/// How a completion item behaves on accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionKind {
    /// A literal value for the current key.
    Value,
    /// A key to be inserted at the cursor.
    Property,
    /// A multi-line template with tab stops.
    Snippet,
}

/// A single suggestion offered at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// Display label; key labels carry a trailing colon.
    pub label: String,
    pub kind: CompletionKind,
    /// Text inserted on accept. Interpreted as a snippet template when
    /// `kind` is [`CompletionKind::Snippet`].
    pub insert_text: String,
    pub detail: String,
    /// Raw key for host-side fuzzy matching, when the label differs from it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_text: Option<String>,
}

/// Produce the ordered completion list for `position`.
pub fn complete(
    text: &str,
    dialect: Dialect,
    position: Position,
    schema: &Schema,
) -> Vec<CompletionItem> {
    let offset = text::offset_at(text, position);
    if !block::is_inside(text, dialect, offset) {
        return Vec::new();
    }

    let yaml_path = path::yaml_path(text, position);
    let word = text::current_word(text, position);

    match yaml_path.first().map(String::as_str) {
        Some("materialization") => {
            let items = materialization_items(text, position, &yaml_path, schema);
            if !items.is_empty() {
                return items;
            }
        }
        Some("depends") => {
            let items = depends_items(text, position);
            if !items.is_empty() {
                return items;
            }
        }
        Some("columns") => {
            let items = column_items(text, position, schema);
            if !items.is_empty() {
                return items;
            }
        }
        _ => {}
    }

    if yaml_path.len() == 1 && yaml_path[0] == "type" {
        return asset_type_items(schema);
    }

    if yaml_path.is_empty() && word.is_empty() {
        return top_level_items(schema);
    }

    prefix_match_items(word, schema)
}

/// Completions inside a `materialization:` block.
fn materialization_items(
    text: &str,
    position: Position,
    yaml_path: &[String],
    schema: &Schema,
) -> Vec<CompletionItem> {
    let at_value = text::is_value_position(text, position);
    let current_key = yaml_path.last().map(String::as_str);

    if text::is_after_colon(text, position, "type")
        || (current_key == Some("type") && at_value)
    {
        return schema
            .materialization_types
            .iter()
            .map(|t| CompletionItem {
                label: t.to_string(),
                kind: CompletionKind::Value,
                insert_text: t.to_string(),
                detail: format!("Materialization type: {t}"),
                filter_text: None,
            })
            .collect();
    }

    if text::is_after_colon(text, position, "strategy")
        || (current_key == Some("strategy") && at_value)
    {
        return schema
            .table_strategies
            .iter()
            .map(|s| CompletionItem {
                label: s.name.to_string(),
                kind: CompletionKind::Value,
                insert_text: s.name.to_string(),
                detail: s.description.to_string(),
                filter_text: None,
            })
            .collect();
    }

    if yaml_path.len() == 1 || (yaml_path.len() == 2 && !at_value) {
        // Directly after `materialization:` the nested line has not been
        // started yet, so the newline and indent are part of the insertion.
        let needs_newline = text::line_prefix(text, position).trim() == "materialization:";
        return schema
            .materialization_keys
            .iter()
            .map(|k| CompletionItem {
                label: format!("{k}:"),
                kind: CompletionKind::Property,
                insert_text: if needs_newline {
                    format!("\n  {k}: ")
                } else {
                    format!("{k}: ")
                },
                detail: "Materialization config key".to_string(),
                filter_text: None,
            })
            .collect();
    }

    Vec::new()
}

/// Completions inside a `depends:` block: a single add-item snippet on lines
/// where a new list entry can start. Dependency names themselves come from
/// the host's pipeline metadata and are not suggested here.
fn depends_items(text: &str, position: Position) -> Vec<CompletionItem> {
    let trimmed = text::line_prefix(text, position).trim();
    if !trimmed.is_empty() && trimmed != "depends:" {
        return Vec::new();
    }
    let insert = if trimmed == "depends:" { "\n  - " } else { "- " };
    vec![CompletionItem {
        label: "- (add dependency)".to_string(),
        kind: CompletionKind::Snippet,
        insert_text: insert.to_string(),
        detail: "Add a dependency entry".to_string(),
        filter_text: None,
    }]
}

/// Completions inside a `columns:` block.
fn column_items(text: &str, position: Position, schema: &Schema) -> Vec<CompletionItem> {
    let prefix = text::line_prefix(text, position);
    let trimmed = prefix.trim();

    // A fresh list entry: blank line, bare dash, or directly after `columns:`.
    if trimmed.is_empty() || trimmed == "-" || trimmed == "columns:" {
        return column_templates(trimmed == "columns:");
    }

    if prefix.contains("name:") && in_checks_context(text, position) {
        return schema
            .column_checks
            .iter()
            .map(|c| CompletionItem {
                label: c.to_string(),
                kind: CompletionKind::Value,
                insert_text: c.to_string(),
                detail: format!("Column check: {c}"),
                filter_text: None,
            })
            .collect();
    }

    if text::is_after_colon(text, position, "type") {
        return schema
            .column_types
            .iter()
            .map(|t| CompletionItem {
                label: t.to_string(),
                kind: CompletionKind::Value,
                insert_text: t.to_string(),
                detail: format!("Data type: {t}"),
                filter_text: None,
            })
            .collect();
    }

    if !text::is_value_position(text, position) {
        return schema
            .column_keys
            .iter()
            .map(|info| CompletionItem {
                label: format!("{}:", info.key),
                kind: CompletionKind::Property,
                insert_text: info.insert_text.to_string(),
                detail: info.description.to_string(),
                filter_text: None,
            })
            .collect();
    }

    Vec::new()
}

/// The two column templates offered when a new list entry starts.
fn column_templates(after_block_key: bool) -> Vec<CompletionItem> {
    let lead = if after_block_key { "\n  " } else { "" };
    vec![
        CompletionItem {
            label: "- name: (full column)".to_string(),
            kind: CompletionKind::Snippet,
            insert_text: format!(
                "{lead}- name: ${{1:col_name}}\n  type: ${{2:string}}\n  \
                 description: ${{3:\"Column description\"}}\n  \
                 primary_key: ${{4:false}}\n  update_on_merge: ${{5:false}}\n  \
                 checks:\n    - name: ${{6:not_null}}"
            ),
            detail: "Complete column definition with all properties".to_string(),
            filter_text: None,
        },
        CompletionItem {
            label: "- name: (simple)".to_string(),
            kind: CompletionKind::Snippet,
            insert_text: format!(
                "{lead}- name: ${{1:col_name}}\n  type: ${{2:string}}\n  \
                 description: ${{3:\"Column description\"}}"
            ),
            detail: "Simple column definition".to_string(),
            filter_text: None,
        },
    ]
}

/// Whether the cursor's line sits under a `checks:` key within the current
/// column item. Walks backwards until a `checks:` line or another plain key
/// line is seen.
fn in_checks_context(text: &str, position: Position) -> bool {
    let lines: Vec<&str> = text.split('\n').collect();
    let last = (position.line as usize).min(lines.len().saturating_sub(1));
    for line in lines[..last].iter().rev() {
        let trimmed = line.trim();
        if trimmed == "checks:" {
            return true;
        }
        if let Some(key) = trimmed.strip_suffix(':') {
            if !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return false;
            }
        }
    }
    false
}

/// Value items for the top-level `type:` key.
fn asset_type_items(schema: &Schema) -> Vec<CompletionItem> {
    schema
        .asset_types
        .iter()
        .map(|t| CompletionItem {
            label: t.to_string(),
            kind: CompletionKind::Value,
            insert_text: t.to_string(),
            detail: format!("Asset type: {t}"),
            filter_text: None,
        })
        .collect()
}

/// Property items for every top-level key, with their multi-line templates.
fn top_level_items(schema: &Schema) -> Vec<CompletionItem> {
    schema
        .top_level_keys
        .iter()
        .map(|info| CompletionItem {
            label: format!("{}:", info.key),
            kind: CompletionKind::Property,
            insert_text: info.insert_text.to_string(),
            detail: info.description.to_string(),
            filter_text: None,
        })
        .collect()
}

/// Fallback: top-level keys whose name starts with the word being typed,
/// case-insensitively; all of them when the word is empty. The explicit
/// filter text carries the raw key so host-side fuzzy matching is not
/// confused by the trailing colon in the label.
fn prefix_match_items(word: &str, schema: &Schema) -> Vec<CompletionItem> {
    let word = word.to_lowercase();
    schema
        .top_level_keys
        .iter()
        .filter(|info| word.is_empty() || info.key.to_lowercase().starts_with(&word))
        .map(|info| CompletionItem {
            label: format!("{}:", info.key),
            kind: CompletionKind::Property,
            insert_text: info.insert_text.to_string(),
            detail: info.description.to_string(),
            filter_text: Some(info.key.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::bruin()
    }

    fn sql_block(body: &str) -> String {
        format!("/* @bruin\n{body}\n@bruin */")
    }

    #[test]
    fn materialization_keys_gain_newline_right_after_block_key() {
        let text = sql_block("materialization:");
        let items = complete(&text, Dialect::Sql, Position::new(1, 16), &schema());
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|i| i.insert_text.starts_with("\n  ")));
        assert!(items.iter().all(|i| i.kind == CompletionKind::Property));
    }

    #[test]
    fn materialization_keys_plain_on_started_nested_line() {
        let text = sql_block("materialization:\n  ");
        let items = complete(&text, Dialect::Sql, Position::new(2, 2), &schema());
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|i| !i.insert_text.starts_with('\n')));
    }

    #[test]
    fn strategy_values_after_strategy_colon() {
        let text = sql_block("materialization:\n  strategy: ");
        let items = complete(&text, Dialect::Sql, Position::new(2, 12), &schema());
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels.len(), 8);
        assert!(labels.contains(&"delete+insert"));
        assert!(labels.contains(&"scd2_by_column"));
        assert!(items.iter().all(|i| i.kind == CompletionKind::Value));
    }

    #[test]
    fn depends_add_item_snippet_on_blank_line() {
        let text = sql_block("depends:\n  ");
        let items = complete(&text, Dialect::Sql, Position::new(2, 2), &schema());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, CompletionKind::Snippet);
        assert_eq!(items[0].insert_text, "- ");
    }

    #[test]
    fn depends_add_item_directly_after_key() {
        let text = sql_block("depends:");
        let items = complete(&text, Dialect::Sql, Position::new(1, 8), &schema());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].insert_text, "\n  - ");
    }

    #[test]
    fn no_suggestions_for_typed_dependency_names() {
        let text = sql_block("depends:\n  - my_upstream");
        let items = complete(&text, Dialect::Sql, Position::new(2, 14), &schema());
        assert!(items.is_empty());
    }

    #[test]
    fn column_templates_after_dash() {
        let text = sql_block("columns:\n  - ");
        let items = complete(&text, Dialect::Sql, Position::new(2, 4), &schema());
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.kind == CompletionKind::Snippet));
        assert!(items[0].insert_text.contains("primary_key"));
        assert!(!items[1].insert_text.contains("primary_key"));
    }

    #[test]
    fn column_keys_inside_existing_item() {
        let text = sql_block("columns:\n  - name: id\n    ");
        let items = complete(&text, Dialect::Sql, Position::new(3, 4), &schema());
        // Blank continuation line offers the new-item templates; a started
        // key offers the column keys.
        assert_eq!(items.len(), 2);

        let text = sql_block("columns:\n  - name: id\n    ty");
        let items = complete(&text, Dialect::Sql, Position::new(3, 6), &schema());
        assert!(items.iter().any(|i| i.label == "type:"));
        assert!(items.iter().any(|i| i.label == "checks:"));
        assert!(items.iter().all(|i| i.kind == CompletionKind::Property));
    }

    #[test]
    fn column_data_types_after_type_colon() {
        let text = sql_block("columns:\n  - name: id\n    type: ");
        let items = complete(&text, Dialect::Sql, Position::new(3, 10), &schema());
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert!(labels.contains(&"integer"));
        assert!(labels.contains(&"timestamp"));
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn check_names_inside_checks_block() {
        let text = sql_block("columns:\n  - name: id\n    checks:\n      - name: ");
        let items = complete(&text, Dialect::Sql, Position::new(4, 14), &schema());
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert!(labels.contains(&"not_null"));
        assert!(labels.contains(&"accepted_values"));
        assert_eq!(labels.len(), 9);
    }

    #[test]
    fn fuzzy_fallback_is_case_insensitive() {
        let text = sql_block("DEP");
        let items = complete(&text, Dialect::Sql, Position::new(1, 3), &schema());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "depends:");
        assert_eq!(items[0].filter_text.as_deref(), Some("depends"));
    }

    #[test]
    fn serialized_shape_uses_camel_case() {
        let item = CompletionItem {
            label: "materialization:".to_string(),
            kind: CompletionKind::Property,
            insert_text: "materialization:\n  ".to_string(),
            detail: "Materialization config".to_string(),
            filter_text: Some("materialization".to_string()),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "Property");
        assert_eq!(json["insertText"], "materialization:\n  ");
        assert_eq!(json["filterText"], "materialization");

        let bare = CompletionItem {
            filter_text: None,
            ..item
        };
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("filterText").is_none());
    }
}
