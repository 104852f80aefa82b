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

//! Diagnostics for the `materialization:` section of asset blocks.
//!
//! Validation is line-oriented on the same indentation model as completion:
//! it never parses the document as full YAML, so broken documents still get
//! useful diagnostics on the lines that do scan.

use serde::{Deserialize, Serialize};

use crate::block::{self, Dialect};
use crate::path::indent_width;
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding, anchored to a zero-based line of the full document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub line: u32,
    /// Stable machine-readable rule name, e.g. `unknown-strategy`.
    pub rule_id: &'static str,
}

/// One parsed `materialization:` section within a block.
#[derive(Debug, Default)]
struct MaterializationSection {
    type_value: Option<(String, u32)>,
    strategy: Option<(String, u32)>,
    keys: Vec<(String, u32)>,
    has_incremental_key: bool,
    has_time_granularity: bool,
}

/// Validate every asset block in `text` and collect diagnostics.
pub fn validate(text: &str, dialect: Dialect, schema: &Schema) -> Vec<Diagnostic> {
    let blocks = block::find_blocks(text, dialect);
    let mut diagnostics = Vec::new();
    for b in &blocks {
        for section in materialization_sections(text, b.start, b.end) {
            check_section(&section, schema, &mut diagnostics);
        }
    }
    diagnostics
}

/// Scan the block's lines for `materialization:` sections. A section extends
/// until the next line at or below the section key's indentation.
fn materialization_sections(text: &str, start: usize, end: usize) -> Vec<MaterializationSection> {
    let mut sections = Vec::new();
    let mut current: Option<(usize, MaterializationSection)> = None;

    let mut offset = 0usize;
    for (line_no, line) in text.split('\n').enumerate() {
        let line_start = offset;
        offset += line.len() + 1;
        if line_start < start || line_start > end {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let indent = indent_width(line);

        if let Some((section_indent, section)) = current.as_mut() {
            if indent > *section_indent {
                record_line(section, trimmed, line_no as u32);
                continue;
            }
            sections.push(current.take().map(|(_, s)| s).unwrap_or_default());
        }
        if trimmed == "materialization:" {
            current = Some((indent, MaterializationSection::default()));
        }
    }
    if let Some((_, section)) = current {
        sections.push(section);
    }
    sections
}

fn record_line(section: &mut MaterializationSection, trimmed: &str, line: u32) {
    let Some((key, value)) = trimmed.split_once(':') else {
        return;
    };
    let key = key.trim();
    let value = value.trim();
    if key
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && c != '_' && c != '-')
    {
        return;
    }
    section.keys.push((key.to_string(), line));
    match key {
        "type" if !value.is_empty() => section.type_value = Some((value.to_string(), line)),
        "strategy" if !value.is_empty() => section.strategy = Some((value.to_string(), line)),
        "incremental_key" if !value.is_empty() => section.has_incremental_key = true,
        "time_granularity" if !value.is_empty() => section.has_time_granularity = true,
        _ => {}
    }
}

fn check_section(section: &MaterializationSection, schema: &Schema, out: &mut Vec<Diagnostic>) {
    if let Some((value, line)) = &section.type_value {
        if !schema.materialization_types.contains(&value.as_str()) {
            out.push(Diagnostic {
                severity: Severity::Error,
                message: format!(
                    "unknown materialization type '{value}', expected one of: {}",
                    schema.materialization_types.join(", ")
                ),
                line: *line,
                rule_id: "unknown-materialization-type",
            });
        }
    }

    if let Some((value, line)) = &section.strategy {
        if schema.strategy(value).is_none() {
            out.push(Diagnostic {
                severity: Severity::Error,
                message: format!("unknown table strategy '{value}'"),
                line: *line,
                rule_id: "unknown-strategy",
            });
        } else {
            let needs_incremental =
                matches!(value.as_str(), "delete+insert" | "time_interval" | "scd2_by_time");
            if needs_incremental && !section.has_incremental_key {
                out.push(Diagnostic {
                    severity: Severity::Error,
                    message: format!("strategy '{value}' requires incremental_key"),
                    line: *line,
                    rule_id: "missing-incremental-key",
                });
            }
            if value == "time_interval" && !section.has_time_granularity {
                out.push(Diagnostic {
                    severity: Severity::Error,
                    message: "strategy 'time_interval' requires time_granularity".to_string(),
                    line: *line,
                    rule_id: "missing-time-granularity",
                });
            }
        }
    }

    for (key, line) in &section.keys {
        if !schema.materialization_keys.contains(&key.as_str()) {
            out.push(Diagnostic {
                severity: Severity::Warning,
                message: format!("unknown materialization key '{key}'"),
                line: *line,
                rule_id: "unknown-materialization-key",
            });
        }
    }
}
