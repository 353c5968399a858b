//! Word-list records
//!
//! The word list is a flat run of `word\0short_translation\0` records sorted
//! the same way as the radix tree. Records are addressed only by byte offset.

use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Field terminator inside the word list
pub const FIELD_TERMINATOR: u8 = 0;

/// Number of terminated fields per record
pub const FIELDS_PER_RECORD: usize = 2;

/// One (word, short translation) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordListEntry {
    /// Headword
    pub word: String,
    /// Short translation shown in listings
    pub translation: String,
}

impl WordListEntry {
    /// Create an entry from owned strings
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
        }
    }

    /// Build an entry from raw field bytes, replacing invalid UTF-8
    pub fn from_fields(word: &[u8], translation: &[u8]) -> Self {
        Self {
            word: String::from_utf8_lossy(word).into_owned(),
            translation: String::from_utf8_lossy(translation).into_owned(),
        }
    }

    /// Encoded size of this record in bytes
    pub fn encoded_len(&self) -> usize {
        self.word.len() + self.translation.len() + FIELDS_PER_RECORD
    }

    /// Write the record with both terminators
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.word.as_bytes())?;
        writer.write_all(&[FIELD_TERMINATOR])?;
        writer.write_all(self.translation.as_bytes())?;
        writer.write_all(&[FIELD_TERMINATOR])?;
        Ok(())
    }
}
