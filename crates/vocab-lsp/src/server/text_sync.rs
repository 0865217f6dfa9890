//! Text document synchronization: didOpen and didChange.
//!
//! Sync is full-text only. Every change replants the whole document; the
//! forest serializes rebuilds per uri, so bursts of changes on one file
//! apply in submission order.

use super::LspServer;
use serde_json::{json, Value};
use vocab_lsp_protocol::{invalid_params, methods, JsonRpcError};

impl LspServer {
    pub(crate) fn handle_did_open(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| invalid_params("didOpen requires params"))?;
        let uri = params
            .pointer("/textDocument/uri")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid_params("missing textDocument.uri"))?;
        let text = params
            .pointer("/textDocument/text")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid_params("missing textDocument.text"))?;
        let version = params.pointer("/textDocument/version").and_then(Value::as_i64).unwrap_or(0);

        eprintln!("vocab-ls: opened {uri}");
        self.forest.plant(uri, text);

        // acknowledge with an empty push; real diagnostics flow through the
        // pull model
        self.send_notification(
            methods::TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS,
            json!({ "uri": uri, "version": version, "diagnostics": [] }),
        )?;

        Ok(None)
    }

    pub(crate) fn handle_did_change(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let params = params.ok_or_else(|| invalid_params("didChange requires params"))?;
        let uri = params
            .pointer("/textDocument/uri")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid_params("missing textDocument.uri"))?;
        let changes = params
            .pointer("/contentChanges")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid_params("missing contentChanges"))?;

        for change in changes {
            let Some(text) = change.pointer("/text").and_then(Value::as_str) else {
                continue;
            };
            // full-text sync: any range on the change is ignored
            self.forest.plant(uri, text);
        }

        Ok(None)
    }
}
