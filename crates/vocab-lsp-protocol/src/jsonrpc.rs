//! JSON-RPC 2.0 message types.
//!
//! Incoming messages with an `id` are requests, without one notifications.
//! Responses carry either a result or an error, never both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Incoming request or notification from the client
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, expected to be "2.0"
    #[serde(default)]
    pub jsonrpc: String,

    /// Request identifier; `None` marks a notification
    pub id: Option<Value>,

    /// Method name to route on
    pub method: String,

    /// Method parameters
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Outgoing response to a request
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,

    pub id: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        JsonRpcResponse { jsonrpc: "2.0", id, result: Some(result), error: None }
    }

    pub fn error(id: Option<Value>, error: JsonRpcError) -> Self {
        JsonRpcResponse { jsonrpc: "2.0", id, result: None, error: Some(error) }
    }

    /// For requests that succeed with nothing to say
    pub fn null(id: Option<Value>) -> Self {
        JsonRpcResponse { jsonrpc: "2.0", id, result: Some(Value::Null), error: None }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        JsonRpcError { code, message: message.into(), data: None }
    }
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcError {}
