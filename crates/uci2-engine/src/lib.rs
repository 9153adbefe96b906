//! # uci2-engine
//!
//! An in-memory model of one UCI configuration file.
//!
//! ```
//! use uci2_engine::Document;
//!
//! let mut doc = Document::parse("config interface 'lan'\n\toption proto 'static'\n")?;
//! let lan = doc.get(Some("lan"), None)?;
//! doc.option_add(lan, "ipaddr", "192.168.1.1")?;
//!
//! let proto = doc.query("lan.proto")?;
//! assert_eq!(doc.option_value(proto)?, "static");
//! assert!(doc.serialize().contains("option ipaddr '192.168.1.1'"));
//! # Ok::<(), uci2_engine::Error>(())
//! ```
//!
//! ## Layout
//!
//! - [`tree`] - the node arena and node kinds
//! - [`Document`] - edits, lookups, type merging and iteration
//! - `bridge` - parsing text into a document and writing it back
//! - [`io`] - reading and writing config files
//! - [`value`] - helpers for interpreting option values
//!
//! Every fallible call returns [`Result`]; [`Error::kind`] maps an error to
//! a stable [`ErrorKind`] with a numeric code.

mod bridge;
mod document;
pub mod error;
pub mod io;
mod query;
pub mod tree;
pub mod value;

#[cfg(test)]
pub mod tests;

pub use document::{Document, NodeIter};
pub use error::{Error, ErrorKind, ParseError, Result};
pub use tree::{NodeId, NodeType};
pub use value::string_to_boolean;

pub const VERSION_MAJOR: u32 = 2;
pub const VERSION_MINOR: u32 = 0;
pub const VERSION_PATCH: u32 = 0;

/// Version packed as `major << 16 | minor << 8 | patch`.
pub fn version_numeric() -> u32 {
    (VERSION_MAJOR << 16) | (VERSION_MINOR << 8) | VERSION_PATCH
}

pub fn version_string() -> String {
    format!("{VERSION_MAJOR}.{VERSION_MINOR}.{VERSION_PATCH}")
}
