//! Error types for dictionary format decoding

use thiserror::Error;

/// Errors that can occur when decoding or encoding dictionary records
#[derive(Debug, Error)]
pub enum FormatError {
    /// Invalid magic bytes (expected "PRSPDICT")
    #[error("Invalid magic: expected 'PRSPDICT', got {0:?}")]
    InvalidMagic([u8; 8]),

    /// Version outside the single supported major/minor pair
    #[error("Unsupported dictionary version: {hi}.{lo}")]
    UnsupportedVersion {
        /// Major version
        hi: u8,
        /// Minor version
        lo: u8,
    },

    /// Header region offsets are inconsistent with each other or the file
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Node length cannot hold its own fixed fields and offsets array
    #[error("Node length {length} too small for {n_children} children (need at least {required} bytes)")]
    NodeTooShort {
        /// Declared node length
        length: u16,
        /// Declared child count
        n_children: u8,
        /// Minimum length implied by the child count
        required: usize,
    },

    /// Label block does not contain whole UTF-16 code units
    #[error("Node label block has odd byte length {0}")]
    OddLabelBlock(usize),

    /// Node would not fit the 16-bit length field
    #[error("Node too large to encode: {0} bytes")]
    NodeTooLarge(usize),

    /// More children than the 8-bit count field allows
    #[error("Too many children: {0} (max 255)")]
    TooManyChildren(usize),

    /// Article text would not fit the 32-bit length prefix
    #[error("Article too large to encode: {0} bytes")]
    ArticleTooLarge(usize),

    /// Query text cannot be represented in the index encoding
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Binary read/write error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error during parsing or building
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for FormatError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Self::Io(io),
            other => Self::BinRead(other.to_string()),
        }
    }
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, FormatError>;
