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

//! Position math and line-level text heuristics.
//!
//! The engine addresses documents both by `(line, character)` positions and by
//! flat byte offsets; the conversions here are total and agree with each other
//! (`offset = sum of line lengths + newlines before the line, plus character`).
//! All slicing is UTF-8 boundary aware: a character column that lands in the
//! middle of a multi-byte character rounds down to the nearest boundary
//! instead of panicking.

use serde::{Deserialize, Serialize};

/// A cursor position: zero-based line and byte column within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based byte column within the line.
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Safely get a string slice up to a byte position, rounding down to the
/// nearest UTF-8 character boundary.
pub fn safe_slice_to(s: &str, pos: usize) -> &str {
    if pos >= s.len() {
        return s;
    }
    let mut pos = pos;
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    &s[..pos]
}

/// Safely get a string slice from a byte position to the end, rounding down
/// to the nearest UTF-8 character boundary.
pub fn safe_slice_from(s: &str, pos: usize) -> &str {
    if pos >= s.len() {
        return "";
    }
    let mut pos = pos;
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    &s[pos..]
}

/// Get the text of a line, or the empty string past end-of-document.
///
/// Lines are split on `\n` only, so the addressing stays consistent with
/// [`offset_at`] on documents using `\r\n` line endings.
pub fn line_at(text: &str, line: u32) -> &str {
    text.split('\n').nth(line as usize).unwrap_or("")
}

/// Convert a position to a flat byte offset. Positions past end-of-line clamp
/// to the line end; positions past end-of-document clamp to the text length.
pub fn offset_at(text: &str, position: Position) -> usize {
    let mut offset = 0usize;
    for (i, line) in text.split('\n').enumerate() {
        if i as u32 == position.line {
            let col = safe_slice_to(line, position.character as usize).len();
            return offset + col;
        }
        offset += line.len() + 1;
    }
    text.len()
}

/// The text of the cursor's line from column zero up to the cursor.
pub fn line_prefix(text: &str, position: Position) -> &str {
    safe_slice_to(line_at(text, position.line), position.character as usize)
}

/// The word currently being typed: the last whitespace-separated token of the
/// line prefix, or the empty string on a blank prefix.
pub fn current_word(text: &str, position: Position) -> &str {
    line_prefix(text, position)
        .trim()
        .split_whitespace()
        .last()
        .unwrap_or("")
}

/// Loose value-position heuristic: the prefix right-trimmed ends with `:` or
/// contains `": "` anywhere. Deliberately permissive; a colon-space inside a
/// free-text value also matches.
pub fn is_value_position(text: &str, position: Position) -> bool {
    let prefix = line_prefix(text, position);
    prefix.trim_end().ends_with(':') || prefix.contains(": ")
}

/// Whether the cursor sits directly after `key:` (with at most one trailing
/// space), used to decide which key's value is being completed. Stricter than
/// [`is_value_position`].
pub fn is_after_colon(text: &str, position: Position, key: &str) -> bool {
    let prefix = line_prefix(text, position).trim_start();
    prefix == format!("{key}:") || prefix.ends_with(&format!("{key}: "))
}
