//! Method name constants for request and notification routing.
//!
//! Dispatch, capability registration, and error reporting all route on these
//! strings; keeping them in one place keeps the three in agreement. The
//! `vocab/*` entries are the server's own extension methods.

// ===== Lifecycle =====

/// First request from client to server
pub const INITIALIZE: &str = "initialize";

/// Notification sent after the initialize response
pub const INITIALIZED: &str = "initialized";

/// Graceful shutdown request
pub const SHUTDOWN: &str = "shutdown";

/// Terminate notification
pub const EXIT: &str = "exit";

// ===== Text document synchronization =====

/// Document opened notification
pub const TEXT_DOCUMENT_DID_OPEN: &str = "textDocument/didOpen";

/// Document changed notification (full-text sync only)
pub const TEXT_DOCUMENT_DID_CHANGE: &str = "textDocument/didChange";

// ===== Diagnostics =====

/// Pull-model diagnostic request
pub const TEXT_DOCUMENT_DIAGNOSTIC: &str = "textDocument/diagnostic";

/// Server-to-client push diagnostics notification
pub const TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS: &str = "textDocument/publishDiagnostics";

// ===== Workspace =====

/// Files deleted notification
pub const WORKSPACE_DID_DELETE_FILES: &str = "workspace/didDeleteFiles";

// ===== Extension methods =====

/// Collect review-due words of one document, split by language
pub const VOCAB_COLLECT_FROM_THIS_FILE: &str = "vocab/collectFromThisFile";

/// Collect review-due words across the whole workspace
pub const VOCAB_COLLECT_ALL: &str = "vocab/collectAll";

// ===== Special =====

/// Cancellation notification; acknowledged but not honored
pub const CANCEL_REQUEST: &str = "$/cancelRequest";
