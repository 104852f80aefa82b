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

//! Locating Bruin asset-definition blocks in source text.
//!
//! Asset metadata lives in delimited regions embedded in SQL comments
//! (`/* @bruin ... @bruin */`), Python docstrings (`""" @bruin ... @bruin """`),
//! or standalone YAML asset files where the whole document is the block.
//! Blocks are found by a strictly left-to-right scan; each open marker pairs
//! with the next close marker after it, an open marker with no close marker
//! before end-of-text yields no block, and nesting is not detected.

use std::path::Path;
use std::str::FromStr;

use memchr::memmem;
use thiserror::Error;

/// The `@bruin` tag shared by open and close markers.
const TAG: &str = "@bruin";

/// A delimited asset-definition region: byte offsets of the span between the
/// end of the open marker and the start of the close marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Offset just past the open marker's `@bruin` tag.
    pub start: usize,
    /// Offset of the close marker's `@bruin` tag.
    pub end: usize,
}

/// Which marker pair delimits asset blocks in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `/* @bruin ... @bruin */` comment blocks in SQL files.
    Sql,
    /// `""" @bruin ... @bruin """` docstring blocks in Python files.
    Python,
    /// Standalone `.asset.yml` / `.task.yml` files; the entire document is
    /// one block.
    Yaml,
}

/// Error returned when parsing a dialect name fails.
#[derive(Debug, Clone, Error)]
#[error("unknown asset dialect: {0:?}")]
pub struct UnknownDialect(String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sql" => Ok(Self::Sql),
            "python" => Ok(Self::Python),
            "yaml" => Ok(Self::Yaml),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}

impl Dialect {
    /// Map a file path to the dialect used for its asset blocks, or `None`
    /// for file types without Bruin support.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".asset.yml")
            || lower.ends_with(".asset.yaml")
            || lower.ends_with(".task.yml")
            || lower.ends_with(".task.yaml")
        {
            return Some(Self::Yaml);
        }
        if lower.ends_with(".sql") {
            return Some(Self::Sql);
        }
        if lower.ends_with(".py") {
            return Some(Self::Python);
        }
        None
    }

    /// The delimiter appearing before the tag in an open marker, and after
    /// the tag in a close marker. `None` for whole-file dialects.
    fn delimiters(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Sql => Some(("/*", "*/")),
            Self::Python => Some(("\"\"\"", "\"\"\"")),
            Self::Yaml => None,
        }
    }
}

/// Find all asset-definition blocks in `text`, in document order.
pub fn find_blocks(text: &str, dialect: Dialect) -> Vec<Block> {
    let Some((open, close)) = dialect.delimiters() else {
        return vec![Block {
            start: 0,
            end: text.len(),
        }];
    };

    let tags: Vec<usize> = memmem::find_iter(text.as_bytes(), TAG).collect();
    let mut blocks = Vec::new();

    for &at in &tags {
        if !preceded_by(text, at, open) {
            continue;
        }
        let start = at + TAG.len();
        let end = tags
            .iter()
            .copied()
            .filter(|&c| c >= start)
            .find(|&c| followed_by(text, c + TAG.len(), close));
        if let Some(end) = end {
            blocks.push(Block { start, end });
        }
        // No close marker before EOF: the open marker is dropped.
    }

    blocks
}

/// Whether `offset` lies within any block, inclusive at both bounds.
pub fn is_inside(text: &str, dialect: Dialect, offset: usize) -> bool {
    find_blocks(text, dialect)
        .iter()
        .any(|b| offset >= b.start && offset <= b.end)
}

/// True when the text before `at`, skipping whitespace, ends with `delim`.
fn preceded_by(text: &str, at: usize, delim: &str) -> bool {
    let head = text[..at].trim_end();
    head.ends_with(delim)
}

/// True when the text from `from`, skipping whitespace, starts with `delim`.
fn followed_by(text: &str, from: usize, delim: &str) -> bool {
    if from > text.len() {
        return false;
    }
    text[from..].trim_start().starts_with(delim)
}
