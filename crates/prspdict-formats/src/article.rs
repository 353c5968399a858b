//! Article blobs
//!
//! An article is a 4-byte little-endian length followed by that many bytes of
//! UTF-8 text. Articles live between the header and the word list.

use crate::error::{FormatError, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::borrow::Cow;
use std::io::Write;

/// Size of the article length prefix
pub const ARTICLE_LEN_PREFIX: u32 = 4;

/// Article text read from a dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Absolute offset of the length prefix
    pub offset: u32,
    /// Raw article bytes (UTF-8)
    pub data: Vec<u8>,
}

impl Article {
    /// Wrap article bytes read from `offset`
    pub const fn new(offset: u32, data: Vec<u8>) -> Self {
        Self { offset, data }
    }

    /// Article text, invalid UTF-8 replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Length of the text in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the article is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Serialize for Article {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Article", 2)?;
        state.serialize_field("offset", &self.offset)?;
        state.serialize_field("text", &self.text())?;
        state.end()
    }
}

/// Write an article blob (length prefix and text)
pub fn write_article<W: Write>(writer: &mut W, text: &[u8]) -> Result<()> {
    let len = u32::try_from(text.len()).map_err(|_| FormatError::ArticleTooLarge(text.len()))?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(text)?;
    Ok(())
}

/// Decode an article length prefix
pub const fn parse_length(prefix: [u8; ARTICLE_LEN_PREFIX as usize]) -> u32 {
    u32::from_le_bytes(prefix)
}
