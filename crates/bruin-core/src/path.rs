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

//! Indentation-based YAML path resolution.
//!
//! A real YAML parser would reject most of the intermediate states a document
//! passes through while being typed, so the enclosing key path is derived
//! from a deliberately permissive line scan instead: a line contributes a
//! path node when it starts with optional whitespace, an identifier-like key
//! (letters, digits, `_`, `-`), and a colon. Indentation is the only nesting
//! signal. All other lines are skipped without touching the stack.

use crate::text::Position;

/// One node of the key path from document root to the cursor's line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathItem {
    /// Number of leading whitespace characters on the key's line.
    pub indent: usize,
    /// The key name, without the trailing colon.
    pub key: String,
}

/// Compute the ordered key path enclosing `position`.
///
/// Lines `0..=position.line` are scanned; before a key at indent `i` is
/// pushed, every stack entry with indent `>= i` is popped, so same-indent
/// siblings replace each other. The cursor line's own indentation then trims
/// the stack: only entries strictly shallower than the cursor's indent are
/// kept, and when no such boundary exists the full stack is returned. A line
/// typing a brand-new key is therefore not yet "inside" itself.
pub fn yaml_path(text: &str, position: Position) -> Vec<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let last = (position.line as usize).min(lines.len().saturating_sub(1));

    let mut stack: Vec<PathItem> = Vec::new();
    for line in &lines[..=last] {
        let Some((indent, key)) = key_line(line) else {
            continue;
        };
        while stack.last().is_some_and(|top| top.indent >= indent) {
            stack.pop();
        }
        stack.push(PathItem {
            indent,
            key: key.to_string(),
        });
    }

    let current_indent = indent_width(lines[last]);
    for i in (0..stack.len()).rev() {
        if stack[i].indent < current_indent {
            stack.truncate(i + 1);
            break;
        }
    }

    stack.into_iter().map(|item| item.key).collect()
}

/// Match a key line: captures the leading-whitespace width and the key name,
/// or `None` for lines that do not define a key.
fn key_line(line: &str) -> Option<(usize, &str)> {
    let indent = indent_width(line);
    let rest = &line[indent..];
    let key_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))?;
    if key_len == 0 || rest.as_bytes()[key_len] != b':' {
        return None;
    }
    Some((indent, &rest[..key_len]))
}

pub(crate) fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
