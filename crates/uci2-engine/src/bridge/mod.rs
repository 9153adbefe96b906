//! Conversion between UCI text and [`Document`](crate::Document).
//!
//! - [`parse`] - replay a syntax tree through the edit operations
//! - [`serialize`] - write the live tree back out in canonical form
//!
//! The two are inverse on the live content: `Document::parse(&doc.serialize())`
//! has the same sections, names, types and values as `doc`. Comments,
//! source quoting and removed nodes are not carried over.

mod parse;
mod serialize;
