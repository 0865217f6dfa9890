//! The LSP server: message loop, dispatch, and state.
//!
//! The loop is synchronous: read one framed message, dispatch on the method
//! name, write the response. Parallelism lives entirely inside the forest,
//! which schedules document rebuilds onto its worker pool.

mod diagnostics;
mod lifecycle;
mod text_sync;
mod workspace;

use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;

use vocab_index::{stderr_logger, Forest, Lowercase};
use vocab_lsp_protocol::{methods, JsonRpcError, JsonRpcRequest, JsonRpcResponse};

use crate::transport;

/// LSP server over one input/output stream pair.
pub struct LspServer {
    pub(crate) forest: Forest,
    reader: Box<dyn BufRead + Send>,
    pub(crate) writer: Box<dyn Write + Send>,
    pub(crate) initialized: bool,
    pub(crate) shutdown_received: bool,
}

impl LspServer {
    /// Server on stdin/stdout, the deployment configuration.
    pub fn new() -> Self {
        LspServer::with_io(Box::new(BufReader::new(io::stdin())), Box::new(io::stdout()))
    }

    /// Server over custom streams, used by the integration tests.
    pub fn with_io(reader: Box<dyn BufRead + Send>, writer: Box<dyn Write + Send>) -> Self {
        LspServer {
            forest: Forest::new(Arc::new(Lowercase), stderr_logger()),
            reader,
            writer,
            initialized: false,
            shutdown_received: false,
        }
    }

    /// Run the message loop until the input ends or an `exit` notification
    /// arrives. Returns the process exit code; transport failures bubble up
    /// as errors.
    pub fn run(&mut self) -> anyhow::Result<i32> {
        loop {
            match transport::read_message(&mut self.reader) {
                Ok(None) => return Ok(0),
                Ok(Some(request)) => {
                    if request.method == methods::EXIT {
                        return Ok(if self.shutdown_received { 0 } else { 1 });
                    }
                    if let Some(response) = self.handle_request(request) {
                        transport::write_message(&mut self.writer, &response)?;
                    }
                }
                Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                    // tier 1: drop the message, keep the loop alive
                    eprintln!("vocab-ls: decode error: {error}");
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Route one request or notification. Notifications never produce a
    /// response; failed notifications are logged instead.
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();
        let is_notification = request.is_notification();
        let method = request.method.clone();

        let result = match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(request.params),
            methods::INITIALIZED => Ok(None),
            // everything below requires initialization
            _ if !self.initialized && request.method != methods::SHUTDOWN => {
                Err(vocab_lsp_protocol::server_not_initialized())
            }
            methods::SHUTDOWN => self.handle_shutdown(),
            methods::TEXT_DOCUMENT_DID_OPEN => self.handle_did_open(request.params),
            methods::TEXT_DOCUMENT_DID_CHANGE => self.handle_did_change(request.params),
            methods::WORKSPACE_DID_DELETE_FILES => self.handle_did_delete_files(request.params),
            methods::TEXT_DOCUMENT_DIAGNOSTIC => self.handle_diagnostic(request.params),
            methods::VOCAB_COLLECT_FROM_THIS_FILE => self.handle_collect_from_file(request.params),
            methods::VOCAB_COLLECT_ALL => self.handle_collect_all(),
            methods::CANCEL_REQUEST => {
                // acknowledged, not honored: parses are cheap
                eprintln!("vocab-ls: cancel request acknowledged");
                Ok(None)
            }
            other => {
                if is_notification {
                    eprintln!("vocab-ls: ignoring unknown notification {other}");
                    Ok(None)
                } else {
                    Err(vocab_lsp_protocol::method_not_found(other))
                }
            }
        };

        match result {
            Ok(Some(value)) => Some(JsonRpcResponse::success(id, value)),
            Ok(None) => {
                if is_notification {
                    None
                } else {
                    Some(JsonRpcResponse::null(id))
                }
            }
            Err(error) => {
                if is_notification {
                    eprintln!("vocab-ls: error handling {method}: {error}");
                    None
                } else {
                    Some(JsonRpcResponse::error(id, error))
                }
            }
        }
    }

    pub(crate) fn send_notification(
        &mut self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<(), JsonRpcError> {
        transport::write_notification(&mut self.writer, method, params)
            .map_err(|error| vocab_lsp_protocol::internal_error(error.to_string()))
    }
}

impl Default for LspServer {
    fn default() -> Self {
        LspServer::new()
    }
}
