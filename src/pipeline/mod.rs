//! Streaming response pipeline: raw bytes in, typed terminal-aware events out.

pub mod decode;
pub mod idle;

pub use decode::{decode_ndjson, into_typed, done_flag, pull_complete};
pub use idle::with_inactivity_timeout;
