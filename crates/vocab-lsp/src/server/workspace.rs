//! Workspace-level operations: file deletion and word collection.

use super::LspServer;
use serde_json::Value;
use std::collections::BTreeSet;
use vocab_index::{HarvestReport, HarvestedDiagnostic};
use vocab_lsp_protocol::reports::CollectResult;
use vocab_lsp_protocol::{invalid_params, internal_error, JsonRpcError};
use vocab_parser::{Language, Severity};

impl LspServer {
    pub(crate) fn handle_did_delete_files(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| invalid_params("didDeleteFiles requires params"))?;
        let files = params
            .pointer("/files")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid_params("missing files"))?;

        for file in files {
            if let Some(uri) = file.pointer("/uri").and_then(Value::as_str) {
                eprintln!("vocab-ls: removing {uri}");
                self.forest.remove(uri);
            }
        }

        Ok(None)
    }

    /// `vocab/collectFromThisFile`: words of one document whose review is
    /// due, split by language and deduplicated.
    pub(crate) fn handle_collect_from_file(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| invalid_params("collect requires params"))?;
        let uri = params
            .pointer("/uri")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid_params("missing uri"))?;

        let report = self.forest.harvest();
        let entries = report.get(uri).map_or(&[][..], Vec::as_slice);
        let result = collect_words(entries.iter());

        serde_json::to_value(result)
            .map(Some)
            .map_err(|error| internal_error(error.to_string()))
    }

    /// `vocab/collectAll`: the same sets aggregated across every document.
    pub(crate) fn handle_collect_all(&mut self) -> Result<Option<Value>, JsonRpcError> {
        let report: HarvestReport = self.forest.harvest();
        let result = collect_words(report.values().flatten());

        serde_json::to_value(result)
            .map(Some)
            .map_err(|error| internal_error(error.to_string()))
    }
}

/// Split error-severity entries into the Italian and German word sets.
/// Entries without a word (parse diagnostics) or with an unrecognized
/// language never collect.
fn collect_words<'a>(entries: impl Iterator<Item = &'a HarvestedDiagnostic>) -> CollectResult {
    let mut italian = BTreeSet::new();
    let mut german = BTreeSet::new();

    for entry in entries {
        if entry.diagnostic.severity != Severity::Error {
            continue;
        }
        let Some(word) = &entry.word else {
            continue;
        };
        match entry.language {
            Some(Language::Italian) => {
                italian.insert(word.clone());
            }
            Some(Language::German) => {
                german.insert(word.clone());
            }
            _ => {}
        }
    }

    CollectResult { it: italian.into_iter().collect(), de: german.into_iter().collect() }
}
