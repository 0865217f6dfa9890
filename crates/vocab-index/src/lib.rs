//! Cross-file word index for `.vocab` documents.
//!
//! The index is a forest of per-document [`WordTree`]s. Each tree maps
//! `(language, normalized word)` to the chronologically ordered occurrences
//! of that word; the [`Forest`] coordinates concurrent per-document rebuilds
//! and merges every tree at harvest time to replay SuperMemo-2 across file
//! boundaries.

pub mod forest;
pub mod lemmatizer;
mod pool;
pub mod tree;

pub use forest::{Forest, HarvestReport, HarvestedDiagnostic, REVIEW_NOW_MESSAGE};
pub use lemmatizer::{ArticleStripping, Lemmatizer, Lowercase};
pub use pool::WorkerPool;
pub use tree::{ast_to_word_tree, LanguageBranch, WordFruit, WordTree, WordTwig};

use std::sync::Arc;

/// Injected sink for free-form log lines; the server wires this to stderr.
pub type Logger = Arc<dyn Fn(&str) + Send + Sync>;

/// Logger that drops everything, for tests and embedding.
pub fn null_logger() -> Logger {
    Arc::new(|_message: &str| {})
}

/// Logger writing to stderr, the stream the LSP host reserves for logs.
pub fn stderr_logger() -> Logger {
    Arc::new(|message: &str| eprintln!("{message}"))
}
