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

//! Conversions between engine results and LSP wire types.

use crate::constants::{DIAGNOSTIC_LINE_END_CHAR, POSITION_ZERO};
use bruin_core::{CompletionKind, Severity};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Diagnostic, DiagnosticSeverity, InsertTextFormat,
    NumberOrString, Position, Range,
};

/// Map an engine completion item onto the LSP shape. Snippet items are
/// flagged so the editor expands their tab stops.
pub fn to_lsp_completion(item: bruin_core::CompletionItem) -> CompletionItem {
    let kind = match item.kind {
        CompletionKind::Value => CompletionItemKind::VALUE,
        CompletionKind::Property => CompletionItemKind::PROPERTY,
        CompletionKind::Snippet => CompletionItemKind::SNIPPET,
    };
    let insert_text_format = match item.kind {
        CompletionKind::Snippet => Some(InsertTextFormat::SNIPPET),
        _ => None,
    };
    CompletionItem {
        label: item.label,
        kind: Some(kind),
        detail: Some(item.detail),
        insert_text: Some(item.insert_text),
        insert_text_format,
        filter_text: item.filter_text,
        ..Default::default()
    }
}

/// Map an engine diagnostic onto the LSP shape, anchored to its whole line.
pub fn to_lsp_diagnostic(diag: bruin_core::Diagnostic) -> Diagnostic {
    let severity = match diag.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };
    Diagnostic {
        range: Range {
            start: Position {
                line: diag.line,
                character: POSITION_ZERO,
            },
            end: Position {
                line: diag.line,
                character: DIAGNOSTIC_LINE_END_CHAR,
            },
        },
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.rule_id.to_string())),
        source: Some("bruin".to_string()),
        message: diag.message,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_items_request_snippet_expansion() {
        let item = to_lsp_completion(bruin_core::CompletionItem {
            label: "- name: (simple)".to_string(),
            kind: CompletionKind::Snippet,
            insert_text: "- name: ${1:col_name}".to_string(),
            detail: "Simple column definition".to_string(),
            filter_text: None,
        });
        assert_eq!(item.kind, Some(CompletionItemKind::SNIPPET));
        assert_eq!(item.insert_text_format, Some(InsertTextFormat::SNIPPET));
    }

    #[test]
    fn plain_items_have_no_snippet_format() {
        let item = to_lsp_completion(bruin_core::CompletionItem {
            label: "table".to_string(),
            kind: CompletionKind::Value,
            insert_text: "table".to_string(),
            detail: "Materialization type: table".to_string(),
            filter_text: None,
        });
        assert_eq!(item.kind, Some(CompletionItemKind::VALUE));
        assert_eq!(item.insert_text_format, None);
        assert_eq!(item.filter_text, None);
    }

    #[test]
    fn diagnostics_are_line_anchored() {
        let diag = to_lsp_diagnostic(bruin_core::Diagnostic {
            severity: Severity::Warning,
            message: "unknown materialization key 'cluster'".to_string(),
            line: 4,
            rule_id: "unknown-materialization-key",
        });
        assert_eq!(diag.range.start.line, 4);
        assert_eq!(diag.range.start.character, 0);
        assert_eq!(diag.range.end.character, DIAGNOSTIC_LINE_END_CHAR);
        assert_eq!(diag.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(
            diag.code,
            Some(NumberOrString::String("unknown-materialization-key".to_string()))
        );
    }
}
