//! Pull-model diagnostics: `textDocument/diagnostic`.

use super::LspServer;
use crate::convert::to_lsp_diagnostic;
use serde_json::Value;
use std::collections::HashMap;
use vocab_index::HarvestedDiagnostic;
use vocab_lsp_protocol::reports::{FullDocumentDiagnosticReport, RelatedFullDocumentDiagnosticReport};
use vocab_lsp_protocol::{invalid_params, internal_error, JsonRpcError};

fn to_items(entries: &[HarvestedDiagnostic]) -> Vec<lsp_types::Diagnostic> {
    entries.iter().map(|entry| to_lsp_diagnostic(&entry.diagnostic)).collect()
}

impl LspServer {
    /// Harvest the forest and answer with the requested document's full
    /// report; every other known document lands in `relatedDocuments`.
    pub(crate) fn handle_diagnostic(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| invalid_params("diagnostic requires params"))?;
        let uri = params
            .pointer("/textDocument/uri")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid_params("missing textDocument.uri"))?;

        let mut report = self.forest.harvest();
        let items = report.remove(uri).map(|entries| to_items(&entries)).unwrap_or_default();

        let related: HashMap<String, FullDocumentDiagnosticReport> = report
            .into_iter()
            .map(|(other_uri, entries)| {
                (other_uri, FullDocumentDiagnosticReport::new(to_items(&entries)))
            })
            .collect();

        let response = RelatedFullDocumentDiagnosticReport::new(items, related);
        serde_json::to_value(response)
            .map(Some)
            .map_err(|error| internal_error(error.to_string()))
    }
}
