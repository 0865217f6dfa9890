//! vocab-ls binary.
//!
//! Reads framed JSON-RPC messages from stdin, writes responses to stdout,
//! and logs to stderr. No flags. Exit code 0 on clean end of input,
//! non-zero on fatal I/O.

use std::process;
use vocab_lsp::LspServer;

fn main() {
    eprintln!("vocab-ls: starting");

    let mut server = LspServer::new();
    match server.run() {
        Ok(code) => process::exit(code),
        Err(error) => {
            eprintln!("vocab-ls: fatal: {error:#}");
            process::exit(1);
        }
    }
}
