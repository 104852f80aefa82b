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

//! The static Bruin asset schema used as the completion source.
//!
//! The schema is a plain value constructed once by the host and passed into
//! the engine explicitly; nothing here is a global. All tables are closed
//! sets: unknown keys or values are not an error for the engine (completion
//! simply degrades), but the validator reports them.

/// A completable key with its canonical insertion template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInfo {
    /// The key name, without the trailing colon.
    pub key: &'static str,
    /// Text inserted on accept. Multi-line templates open a nested block.
    pub insert_text: &'static str,
    /// Human-readable description shown next to the item.
    pub description: &'static str,
}

/// A table strategy with its documentation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// The complete asset-definition schema.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Valid top-level keys of an asset block.
    pub top_level_keys: Vec<KeyInfo>,
    /// Closed set of asset type identifiers.
    pub asset_types: Vec<&'static str>,
    /// Valid values for `materialization.type`.
    pub materialization_types: Vec<&'static str>,
    /// Valid values for `materialization.strategy`.
    pub table_strategies: Vec<StrategyInfo>,
    /// Valid keys under `materialization:`.
    pub materialization_keys: Vec<&'static str>,
    /// Valid keys of a column list item.
    pub column_keys: Vec<KeyInfo>,
    /// Suggested column data types.
    pub column_types: Vec<&'static str>,
    /// Valid column check names.
    pub column_checks: Vec<&'static str>,
}

impl Schema {
    /// Build the canonical Bruin schema.
    pub fn bruin() -> Self {
        Self {
            top_level_keys: vec![
                KeyInfo {
                    key: "type",
                    insert_text: "type: ",
                    description: "Asset type",
                },
                KeyInfo {
                    key: "description",
                    insert_text: "description: ",
                    description: "Human-readable description",
                },
                KeyInfo {
                    key: "materialization",
                    insert_text: "materialization:\n  ",
                    description: "Materialization config",
                },
                KeyInfo {
                    key: "depends",
                    insert_text: "depends:\n  - ",
                    description: "Dependencies",
                },
                KeyInfo {
                    key: "columns",
                    insert_text: "columns:\n  - name: ",
                    description: "Column definitions",
                },
            ],
            asset_types: vec![
                "bq.sql",
                "sf.sql",
                "pg.sql",
                "rs.sql",
                "ms.sql",
                "synapse.sql",
                "python",
                "ingestr",
            ],
            // "none" is the canonical no-materialization spelling.
            materialization_types: vec!["table", "view", "none"],
            table_strategies: vec![
                StrategyInfo {
                    name: "create+replace",
                    description: "Drop and recreate the table on every run",
                },
                StrategyInfo {
                    name: "delete+insert",
                    description: "Delete rows matching the incremental key, then insert new data",
                },
                StrategyInfo {
                    name: "append",
                    description: "Append new rows to the existing table",
                },
                StrategyInfo {
                    name: "merge",
                    description: "Merge new data into the existing table by primary key",
                },
                StrategyInfo {
                    name: "time_interval",
                    description: "Replace the time window given by the incremental key",
                },
                StrategyInfo {
                    name: "ddl",
                    description: "Run the query as raw DDL",
                },
                StrategyInfo {
                    name: "scd2_by_time",
                    description: "Slowly changing dimension type 2, versioned by time",
                },
                StrategyInfo {
                    name: "scd2_by_column",
                    description: "Slowly changing dimension type 2, versioned by column values",
                },
            ],
            materialization_keys: vec![
                "type",
                "strategy",
                "partition_by",
                "cluster_by",
                "incremental_key",
                "time_granularity",
            ],
            column_keys: vec![
                KeyInfo {
                    key: "name",
                    insert_text: "name: ",
                    description: "Column name",
                },
                KeyInfo {
                    key: "type",
                    insert_text: "type: ",
                    description: "Column data type",
                },
                KeyInfo {
                    key: "description",
                    insert_text: "description: ",
                    description: "Column description",
                },
                KeyInfo {
                    key: "primary_key",
                    insert_text: "primary_key: ",
                    description: "Whether this column is part of the primary key",
                },
                KeyInfo {
                    key: "update_on_merge",
                    insert_text: "update_on_merge: ",
                    description: "Update this column on merge operations",
                },
                KeyInfo {
                    key: "checks",
                    insert_text: "checks:\n  - name: ",
                    description: "Column quality checks",
                },
            ],
            column_types: vec![
                "string",
                "integer",
                "float",
                "boolean",
                "timestamp",
                "date",
                "json",
                "array",
            ],
            column_checks: vec![
                "unique",
                "not_null",
                "positive",
                "negative",
                "accepted_values",
                "min_length",
                "max_length",
                "regex",
                "range",
            ],
        }
    }

    /// Look up a top-level key by name.
    pub fn top_level_key(&self, key: &str) -> Option<&KeyInfo> {
        self.top_level_keys.iter().find(|info| info.key == key)
    }

    /// Look up a strategy by name.
    pub fn strategy(&self, name: &str) -> Option<&StrategyInfo> {
        self.table_strategies.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_table_sizes() {
        let schema = Schema::bruin();
        assert_eq!(schema.top_level_keys.len(), 5);
        assert_eq!(schema.asset_types.len(), 8);
        assert_eq!(schema.materialization_types.len(), 3);
        assert_eq!(schema.table_strategies.len(), 8);
        assert_eq!(schema.materialization_keys.len(), 6);
    }

    #[test]
    fn no_materialization_spelling_is_none() {
        let schema = Schema::bruin();
        assert!(schema.materialization_types.contains(&"none"));
        assert!(!schema.materialization_types.contains(&"null"));
    }

    #[test]
    fn top_level_insert_templates_end_in_insertion_point() {
        let schema = Schema::bruin();
        for info in &schema.top_level_keys {
            assert!(info.insert_text.starts_with(info.key));
            assert!(info.insert_text.ends_with(' '), "{}", info.key);
        }
    }

    #[test]
    fn lookup_helpers() {
        let schema = Schema::bruin();
        assert_eq!(schema.top_level_key("depends").unwrap().key, "depends");
        assert!(schema.top_level_key("owner").is_none());
        assert!(schema.strategy("merge").is_some());
        assert!(schema.strategy("upsert").is_none());
    }
}
