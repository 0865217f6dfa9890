//! Wire shapes of the pull-diagnostic report and the collect responses.
//!
//! The diagnostic report is hand-rolled rather than borrowed from
//! `lsp_types` so related documents can be keyed by the raw uri string the
//! client sent, whatever its scheme.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Report kind for a full (non-delta) diagnostic result
pub const DIAGNOSTIC_REPORT_FULL: &str = "full";

/// Result of `textDocument/diagnostic`: the requested document's
/// diagnostics plus one full report per other known document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedFullDocumentDiagnosticReport {
    pub kind: String,
    pub items: Vec<lsp_types::Diagnostic>,
    #[serde(rename = "relatedDocuments", skip_serializing_if = "HashMap::is_empty", default)]
    pub related_documents: HashMap<String, FullDocumentDiagnosticReport>,
}

/// One document's full diagnostic set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullDocumentDiagnosticReport {
    pub kind: String,
    pub items: Vec<lsp_types::Diagnostic>,
}

impl FullDocumentDiagnosticReport {
    pub fn new(items: Vec<lsp_types::Diagnostic>) -> Self {
        FullDocumentDiagnosticReport { kind: DIAGNOSTIC_REPORT_FULL.to_string(), items }
    }
}

impl RelatedFullDocumentDiagnosticReport {
    pub fn new(
        items: Vec<lsp_types::Diagnostic>,
        related_documents: HashMap<String, FullDocumentDiagnosticReport>,
    ) -> Self {
        RelatedFullDocumentDiagnosticReport {
            kind: DIAGNOSTIC_REPORT_FULL.to_string(),
            items,
            related_documents,
        }
    }
}

/// Result of the `vocab/collect*` requests: deduplicated normalized words
/// whose review is due, split by language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectResult {
    pub it: Vec<String>,
    pub de: Vec<String>,
}
