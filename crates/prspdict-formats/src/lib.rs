//! Binary format codecs for PRS+ dictionary files
//!
//! A PRS+ dictionary is a single flat file made of four regions, all offsets
//! absolute and all integers little-endian:
//!
//! ```text
//! [header]     1024 bytes: "PRSPDICT", sizes, version, region offsets
//! [articles]   article*   : u32 length + UTF-8 text
//! [word list]  record*    : word \0 short translation \0
//! [radix]      node*      : variable-length radix tree nodes
//! ```
//!
//! This crate decodes (and, for round-trip purposes, encodes) each of these
//! records. It does not perform any I/O beyond what a caller hands it through
//! `std::io::Read`/`Seek`; traversal of the tree lives in `prspdict-lookup`.
//!
//! # Usage
//!
//! ```rust
//! use prspdict_formats::node::RadixNode;
//! use prspdict_formats::text::encode_query;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut node = RadixNode::new(0, 0);
//! node.push_child(2048, &encode_query("cat")?)?;
//!
//! let bytes = node.encode()?;
//! let parsed = RadixNode::decode(&bytes)?;
//! assert_eq!(parsed, node);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod article;
pub mod error;
pub mod header;
pub mod node;
pub mod text;
pub mod word_list;

/// In-memory dictionary images for test suites
#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::missing_panics_doc)]
pub mod test_utils;

pub use article::Article;
pub use error::{FormatError, Result};
pub use header::DictionaryHeader;
pub use node::RadixNode;
pub use word_list::WordListEntry;
