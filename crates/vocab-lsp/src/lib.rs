//! vocab-ls runtime crate.
//!
//! Wires the compilation pipeline (scanner → parser → index → forest) to an
//! LSP host over stdio:
//!
//! - [`transport`] - Content-Length message framing
//! - [`convert`] - core diagnostics to `lsp_types`
//! - [`server`] - the message loop, dispatch, and request workers

pub mod convert;
pub mod server;
pub mod transport;

pub use server::LspServer;
