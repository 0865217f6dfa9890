//! Server capabilities advertised during initialization.
//!
//! The server is deliberately small: full-text document sync, pull
//! diagnostics with inter-file dependencies (a date change in one notebook
//! moves deadlines in another), and a delete filter for `**/*.vocab` so the
//! forest can drop removed documents.

use lsp_types::{
    DiagnosticOptions, DiagnosticServerCapabilities, FileOperationFilter, FileOperationPattern,
    FileOperationRegistrationOptions, InitializeResult, ServerCapabilities, ServerInfo,
    TextDocumentSyncCapability, TextDocumentSyncKind, TextDocumentSyncOptions,
    WorkspaceFileOperationsServerCapabilities, WorkspaceServerCapabilities,
};

/// Glob matching the documents this server owns
pub const VOCAB_GLOB: &str = "**/*.vocab";

/// The full initialize response payload
pub fn initialize_result() -> InitializeResult {
    InitializeResult {
        capabilities: server_capabilities(),
        server_info: Some(ServerInfo {
            name: "vocab-ls".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        ..Default::default()
    }
}

/// Capabilities advertised to the client
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
            open_close: Some(true),
            change: Some(TextDocumentSyncKind::FULL),
            ..Default::default()
        })),
        diagnostic_provider: Some(DiagnosticServerCapabilities::Options(DiagnosticOptions {
            identifier: None,
            inter_file_dependencies: true,
            workspace_diagnostics: false,
            work_done_progress_options: Default::default(),
        })),
        workspace: Some(WorkspaceServerCapabilities {
            workspace_folders: None,
            file_operations: Some(WorkspaceFileOperationsServerCapabilities {
                did_delete: Some(FileOperationRegistrationOptions {
                    filters: vec![FileOperationFilter {
                        scheme: Some("file".to_string()),
                        pattern: FileOperationPattern {
                            glob: VOCAB_GLOB.to_string(),
                            matches: None,
                            options: None,
                        },
                    }],
                }),
                ..Default::default()
            }),
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_full_text_sync_and_interfile_diagnostics() {
        let json = serde_json::to_value(initialize_result()).unwrap();
        let capabilities = &json["capabilities"];

        assert_eq!(capabilities["textDocumentSync"]["openClose"], true);
        assert_eq!(capabilities["textDocumentSync"]["change"], 1); // Full
        assert_eq!(capabilities["diagnosticProvider"]["interFileDependencies"], true);

        let filters = &capabilities["workspace"]["fileOperations"]["didDelete"]["filters"];
        assert_eq!(filters[0]["scheme"], "file");
        assert_eq!(filters[0]["pattern"]["glob"], VOCAB_GLOB);

        assert_eq!(json["serverInfo"]["name"], "vocab-ls");
    }
}
