//! Lookups against PRS+ dictionary files without loading the index.
//!
//! Every query walks the radix tree straight from disk: each step seeks to a
//! node offset, decodes the node and matches the remaining query against its
//! edge labels. Nothing is cached between queries.
//!
//! - [`store::NodeStore`] reads nodes, articles and raw word-list bytes
//! - [`matcher`] compares a query suffix against sibling labels
//! - [`resolver`] finds exact terminals (with backtracking) and best matches
//! - [`scanner::WordListScanner`] pages through the word list
//! - [`Dictionary`] ties them together for callers
//!
//! # Example
//!
//! ```rust,no_run
//! use prspdict_lookup::{Dictionary, LookupConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dict = Dictionary::open("english-french.prspdict", LookupConfig::default())?;
//!
//! if let Some(article) = dict.lookup_exact("cat")? {
//!     println!("{}", article.text());
//! } else {
//!     for entry in dict.lookup_best("cat")?.entries {
//!         println!("{}\t{}", entry.word, entry.translation);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use prspdict_formats::FormatError;
use thiserror::Error;

// Configuration
pub mod config;

// Random-access node and blob reads
pub mod store;

// Sibling label matching
pub mod matcher;

// Exact and best-match descent
pub mod resolver;

// Word-list pagination
pub mod scanner;

// Caller-facing handle
mod dictionary;

pub use config::LookupConfig;
pub use dictionary::{Dictionary, LookupOutcome};
pub use prspdict_formats::{Article, WordListEntry};
pub use scanner::WordListPage;

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Errors that abort a lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// File does not start with the dictionary magic.
    #[error("Not a PRS+ dictionary: bad magic {0:?}")]
    InvalidMagic([u8; 8]),

    /// Dictionary version this reader does not understand.
    #[error("Unsupported dictionary version {hi}.{lo}")]
    UnsupportedVersion {
        /// Major version
        hi: u8,
        /// Minor version
        lo: u8,
    },

    /// Index structure is malformed (bad lengths, stray pointers, cycles).
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    /// Seek or read failure on the underlying storage.
    #[error("Storage fault at offset {offset}: {source}")]
    StorageFault {
        /// Offset of the failed access
        offset: u64,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Caller-supplied query or offset cannot be used.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected by validation.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LookupError {
    /// Wrap an I/O error raised while accessing `offset`
    pub fn storage(offset: u64, source: std::io::Error) -> Self {
        Self::StorageFault { offset, source }
    }

    /// Attach an offset to a format error raised while decoding at `offset`
    pub fn at(offset: u64, err: FormatError) -> Self {
        match err {
            FormatError::Io(source) => Self::StorageFault { offset, source },
            FormatError::InvalidMagic(_)
            | FormatError::UnsupportedVersion { .. }
            | FormatError::InvalidQuery(_) => err.into(),
            other => Self::CorruptIndex(format!("at offset {offset}: {other}")),
        }
    }
}

impl From<FormatError> for LookupError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::InvalidMagic(magic) => Self::InvalidMagic(magic),
            FormatError::UnsupportedVersion { hi, lo } => Self::UnsupportedVersion { hi, lo },
            FormatError::InvalidQuery(msg) => Self::InvalidInput(msg),
            FormatError::Io(source) => Self::StorageFault { offset: 0, source },
            other => Self::CorruptIndex(other.to_string()),
        }
    }
}

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
