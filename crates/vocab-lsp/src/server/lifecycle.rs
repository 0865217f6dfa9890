//! Server lifecycle: initialize, shutdown, and the workspace scan.

use super::LspServer;
use serde_json::Value;
use std::path::Path;
use url::Url;
use vocab_lsp_protocol::{capabilities, internal_error, JsonRpcError};
use walkdir::WalkDir;

fn is_vocab_file(path: &Path) -> bool {
    path.extension().and_then(|extension| extension.to_str()).is_some_and(|extension| {
        extension.eq_ignore_ascii_case("vocab")
    })
}

fn should_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    matches!(name.as_ref(), ".git" | ".hg" | ".svn" | "target" | "node_modules" | ".cache")
}

fn file_uri(path: &Path) -> String {
    Url::from_file_path(path)
        .map(|url| url.to_string())
        .unwrap_or_else(|()| format!("file://{}", path.display()))
}

impl LspServer {
    /// Handle the `initialize` request: plant every `*.vocab` file under the
    /// workspace root, then advertise capabilities.
    pub(crate) fn handle_initialize(
        &mut self,
        params: Option<Value>,
    ) -> Result<Option<Value>, JsonRpcError> {
        let root = params.as_ref().and_then(|params| {
            params
                .pointer("/rootPath")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| {
                    params
                        .pointer("/rootUri")
                        .and_then(Value::as_str)
                        .and_then(|uri| Url::parse(uri).ok())
                        .and_then(|url| url.to_file_path().ok())
                        .map(|path| path.display().to_string())
                })
        });

        if let Some(root) = root {
            self.plant_workspace(Path::new(&root));
        }

        self.initialized = true;

        let result = serde_json::to_value(capabilities::initialize_result())
            .map_err(|error| internal_error(error.to_string()))?;
        Ok(Some(result))
    }

    /// Handle `shutdown`: refuse new rebuilds, drain in-flight ones.
    pub(crate) fn handle_shutdown(&mut self) -> Result<Option<Value>, JsonRpcError> {
        self.forest.shutdown();
        self.shutdown_received = true;
        Ok(None)
    }

    /// Walk the workspace and plant every notebook found.
    fn plant_workspace(&mut self, root: &Path) {
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !should_skip_dir(entry))
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() || !is_vocab_file(entry.path()) {
                continue;
            }
            match std::fs::read_to_string(entry.path()) {
                Ok(text) => {
                    self.forest.plant(file_uri(entry.path()), text);
                }
                Err(error) => {
                    eprintln!("vocab-ls: can't read {}: {error}", entry.path().display());
                }
            }
        }
    }
}
