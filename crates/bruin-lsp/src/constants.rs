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

//! Server-wide constants and magic number definitions.

/// Debounce delay for document validation (in milliseconds).
///
/// Validation is cheap but diagnostics churn is distracting, so keystrokes
/// are batched. 200ms sits under the common 250ms perception threshold while
/// collapsing most typing bursts into a single validation pass.
pub const DEBOUNCE_MS: u64 = 200;

/// Default maximum document size in bytes (50 MB).
///
/// Asset files are tiny, but the server also receives the full SQL or Python
/// source surrounding the block. 50 MB is far beyond any real asset file and
/// exists only to stop a misbehaving client from exhausting memory.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 50 * BYTES_PER_MEGABYTE;

/// Default maximum number of simultaneously open documents (1000).
///
/// Most editing sessions keep well under 50 documents open; the limit exists
/// so the LRU eviction path has a bound to enforce.
pub const DEFAULT_MAX_CACHE_SIZE: usize = 1000;

/// Bytes per megabyte (1024 * 1024).
pub const BYTES_PER_MEGABYTE: usize = 1024 * 1024;

/// End-of-line character position used for diagnostic ranges.
///
/// Diagnostics are anchored to whole lines; editors clamp the range to the
/// actual line length. `u32::MAX` is avoided because some editors mishandle
/// extremely large positions.
pub const DIAGNOSTIC_LINE_END_CHAR: u32 = 1000;

/// Zero-based position start index for LSP ranges.
pub const POSITION_ZERO: u32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_conversions() {
        assert_eq!(BYTES_PER_MEGABYTE, 1048576);
        assert_eq!(DEFAULT_MAX_DOCUMENT_SIZE, 52428800);
    }

    #[test]
    fn test_reasonable_limits() {
        assert!(DEBOUNCE_MS >= 50, "Debounce too short, will cause excessive churn");
        assert!(DEBOUNCE_MS <= 500, "Debounce too long, will feel laggy");

        assert!(DEFAULT_MAX_CACHE_SIZE >= 100, "Cache too small for normal usage");
        assert!(DIAGNOSTIC_LINE_END_CHAR >= 100, "Too small for long lines");
    }
}
