//! metricmap-decode — bounded, fail-safe MessagePack consumption.
//!
//! Reconstructs object graphs from an untrusted byte stream without letting
//! the stream dictate how much work or memory the decoder spends. Every
//! container header and string length is checked against [`DecodeLimits`]
//! before anything is allocated or any handler runs.
//!
//! # Architecture
//!
//! ```text
//! Cursor<'a>  (borrowed buffer + position + limits + error latch)
//!   ├── consume_scalar() / consume_double() / consume_uint() / consume_string()
//!   ├── consume_bounded_map()   ← caller's identifier → handler table
//!   └── consume_bounded_array() ← caller's per-entry handler
//! ```
//!
//! The decoder holds no state of its own beyond the cursor; handlers
//! receive a caller-owned context and are the only thing that mutates it.

pub mod config;
pub mod container;
pub mod cursor;
pub mod error;
pub mod scalar;

pub use config::{DecodeLimits, MAX_ARRAY_ENTRY_COUNT, MAX_MAP_ENTRY_COUNT, MAX_STRING_LENGTH};
pub use container::{EntryHandler, MapEntryHandler, consume_bounded_array, consume_bounded_map};
pub use cursor::Cursor;
pub use error::{DecodeError, DecodeResult, ERROR_CUTOFF};
pub use scalar::{
    Scalar, ScalarKind, consume_double, consume_scalar, consume_str, consume_string, consume_uint,
};
