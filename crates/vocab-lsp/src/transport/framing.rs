//! Message framing for the LSP Base Protocol.
//!
//! Every message is `Content-Length: N\r\n\r\n` followed by N bytes of JSON.
//! Decode problems surface as `InvalidData` I/O errors so the message loop
//! can log them and keep reading; only real I/O failures are fatal.

use serde_json::Value;
use std::io::{self, BufRead, Write};
use vocab_lsp_protocol::{DecodeError, JsonRpcRequest, JsonRpcResponse};

/// Read one framed message.
///
/// Returns `Ok(None)` on clean end of input. Malformed headers or JSON map
/// to `ErrorKind::InvalidData`; anything else is a transport failure.
pub fn read_message<R: BufRead>(reader: &mut R) -> io::Result<Option<JsonRpcRequest>> {
    let mut content_length: Option<usize> = None;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            return Err(invalid_data(DecodeError::InvalidHeader(trimmed.to_string())));
        };
        if key.trim() == "Content-Length" {
            let value = value.trim();
            let parsed = value
                .parse::<usize>()
                .map_err(|_| invalid_data(DecodeError::InvalidContentLength(value.to_string())))?;
            content_length = Some(parsed);
        }
    }

    let Some(length) = content_length else {
        return Err(invalid_data(DecodeError::MissingContentLength));
    };

    let mut content = vec![0u8; length];
    reader.read_exact(&mut content)?;

    match serde_json::from_slice(&content) {
        Ok(request) => Ok(Some(request)),
        Err(error) => Err(invalid_data(DecodeError::InvalidJson(error))),
    }
}

/// Write one framed response.
pub fn write_message<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
    let content = serde_json::to_string(response)?;
    write!(writer, "Content-Length: {}\r\n\r\n{content}", content.len())?;
    writer.flush()
}

/// Write one framed server-to-client notification.
pub fn write_notification<W: Write>(writer: &mut W, method: &str, params: Value) -> io::Result<()> {
    let notification = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
    });
    let content = serde_json::to_string(&notification)?;
    write!(writer, "Content-Length: {}\r\n\r\n{content}", content.len())?;
    writer.flush()
}

fn invalid_data(error: DecodeError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, error)
}
