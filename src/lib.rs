//! tagdoc builds and reads length-prefixed, type-tagged binary documents.
//!
//! A document is a little-endian length, a sequence of named, typed elements, and a terminator
//! byte. This crate provides:
//!
//! - An incremental builder, [`DocBuilder`], that appends typed fields and nested documents into
//!   one growable buffer, then hands over a finished [`Document`]
//! - Minimum and maximum sentinel values for every type, consistent with a canonical cross-type
//!   order, so that index scans over a single type can be bounded
//! - Raw composition: merging whole documents, merging without duplicate names, and renaming
//!   values by position, all without decoding element payloads
//! - Best-effort coercion of text into numeric fields
//! - A shared table of decimal strings for array indices
//! - A comparator for values under the canonical order
//!
//! The exact byte layout is described in the [`layout`] module.
//!
//! ```
//! use tagdoc::{DocBuilder, TypeTag};
//!
//! let mut b = DocBuilder::new();
//! b.append_str("name", "x")?.append_i32("n", 3)?;
//! b.append_min_for_type("lo", TypeTag::String)?;
//! let doc = b.done();
//! assert_eq!(doc.n_fields(), 3);
//! assert_eq!(doc.to_string(), "{ name: \"x\", n: 3, lo: \"\" }");
//! # Ok::<(), tagdoc::Error>(())
//! ```

mod array;
mod bounds;
mod buffer;
mod builder;
mod coerce;
mod compare;
mod compose;
mod document;
mod element;
mod error;
mod num_strs;
mod object_id;
mod order;
mod tag;
mod timestamp;
mod value;

pub mod layout;

pub use self::array::{index_name, ArrayBuilder};
pub use self::buffer::BufBuilder;
pub use self::builder::DocBuilder;
pub use self::coerce::{parse_number_text, NumberText};
pub use self::compare::{compare_docs, compare_elements, compare_values};
pub use self::document::{DocRef, Document, EMPTY_DOC};
pub use self::element::{ElementIter, Parser, RawElement};
pub use self::error::{Error, Result};
pub use self::num_strs::{num_str, NumStrs, NUM_STRS_SIZE};
pub use self::object_id::ObjectId;
pub use self::order::{
    bounds_slot, canonical_rank, max_sentinel, min_sentinel, successor, MaxRule, OrderSlot,
    Sentinel, CANONICAL_ORDER,
};
pub use self::tag::{BinarySubtype, TypeTag};
pub use self::timestamp::Timestamp;
pub use self::value::ValueRef;

/// The maximum allowed size of a document, including its length prefix and terminator.
pub const MAX_DOC_SIZE: usize = 16 * 1024 * 1024; // 16 MiB

/// The maximum nesting depth accepted when validating a document from raw bytes.
pub const MAX_DEPTH: usize = 100;

/// Integer text shorter than this many characters is always stored as a 32-bit integer.
pub const SHORT_NUMBER_LEN: usize = 8;
