//! Error codes and transport decode errors.

use crate::jsonrpc::JsonRpcError;
use thiserror::Error;

/// Invalid JSON was received by the server
pub const PARSE_ERROR: i32 = -32700;
/// The JSON sent is not a valid request object
pub const INVALID_REQUEST: i32 = -32600;
/// The method does not exist / is not available
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Invalid method parameter(s)
pub const INVALID_PARAMS: i32 = -32602;
/// Internal JSON-RPC error
pub const INTERNAL_ERROR: i32 = -32603;
/// LSP: request received before the initialize request
pub const SERVER_NOT_INITIALIZED: i32 = -32002;

/// A message could not be decoded off the wire.
///
/// Tier-1 failures: the message loop logs these and drops the offending
/// message, it never dies on them.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid header line: {0:?}")]
    InvalidHeader(String),

    #[error("invalid content length: {0:?}")]
    InvalidContentLength(String),

    #[error("missing content length header")]
    MissingContentLength,

    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub fn invalid_params(message: impl Into<String>) -> JsonRpcError {
    JsonRpcError::new(INVALID_PARAMS, message)
}

pub fn method_not_found(method: &str) -> JsonRpcError {
    JsonRpcError::new(METHOD_NOT_FOUND, format!("method not found: {method}"))
}

pub fn server_not_initialized() -> JsonRpcError {
    JsonRpcError::new(SERVER_NOT_INITIALIZED, "Server not initialized")
}

pub fn internal_error(message: impl Into<String>) -> JsonRpcError {
    JsonRpcError::new(INTERNAL_ERROR, message)
}
