//! Transport layer: Content-Length message framing over stdio.

mod framing;

pub use framing::{read_message, write_message, write_notification};
