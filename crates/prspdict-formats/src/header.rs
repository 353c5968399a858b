//! Dictionary file header
//!
//! The header occupies the first 1024 bytes of every dictionary file:
//!
//! ```text
//! magic[8]            "PRSPDICT"
//! size: u16           declared header size (excluding magic)
//! version_lo: u8
//! version_hi: u8
//! offset_word_list: u32
//! offset_radix: u32
//! padding             zeros up to 1024 bytes
//! ```

use crate::error::{FormatError, Result};
use binrw::io::Cursor;
use binrw::{BinRead, BinResult, BinWrite};
use std::io::{Read, Seek, Write};
use std::ops::Range;

/// Magic tag at the start of every dictionary
pub const MAGIC: [u8; 8] = *b"PRSPDICT";

/// Total on-disk size of the header, padding included
pub const HEADER_SIZE: u32 = 1024;

/// Bytes of named fields before the zero padding
pub const HEADER_FIELDS_SIZE: u32 = 20;

/// Declared header size written by the dictionary compiler (header minus magic)
pub const DECLARED_HEADER_SIZE: u16 = (HEADER_SIZE - 8) as u16;

/// Only supported major version
pub const VERSION_HI: u8 = 1;

/// Only supported minor version
pub const VERSION_LO: u8 = 0;

/// Fixed-size dictionary header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryHeader {
    /// Magic bytes "PRSPDICT"
    pub magic: [u8; 8],
    /// Declared header size
    pub header_size: u16,
    /// Minor version
    pub version_lo: u8,
    /// Major version
    pub version_hi: u8,
    /// Absolute offset of the first word-list record
    pub offset_word_list: u32,
    /// Absolute offset of the radix tree root node
    pub offset_radix: u32,
}

const PADDING_SIZE: usize = (HEADER_SIZE - HEADER_FIELDS_SIZE) as usize;

impl DictionaryHeader {
    /// Create a version 1.0 header for the given region offsets
    pub const fn new(offset_word_list: u32, offset_radix: u32) -> Self {
        Self {
            magic: MAGIC,
            header_size: DECLARED_HEADER_SIZE,
            version_lo: VERSION_LO,
            version_hi: VERSION_HI,
            offset_word_list,
            offset_radix,
        }
    }

    /// Parse a header from the first [`HEADER_SIZE`] bytes of a dictionary
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let header = Self::read_le(&mut cursor)?;
        Ok(header)
    }

    /// Serialize the header, padding included
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(HEADER_SIZE as usize));
        self.write_le(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Version as `(hi, lo)`
    pub const fn version(&self) -> (u8, u8) {
        (self.version_hi, self.version_lo)
    }

    /// Byte range of the word-list region
    pub const fn word_list_range(&self) -> Range<u32> {
        self.offset_word_list..self.offset_radix
    }

    /// Byte range of the article region
    pub const fn article_range(&self) -> Range<u32> {
        HEADER_SIZE..self.offset_word_list
    }

    /// Check magic, version and region layout against the file size
    pub fn validate(&self, file_size: u64) -> Result<()> {
        if self.magic != MAGIC {
            return Err(FormatError::InvalidMagic(self.magic));
        }

        if self.version_hi != VERSION_HI || self.version_lo != VERSION_LO {
            return Err(FormatError::UnsupportedVersion {
                hi: self.version_hi,
                lo: self.version_lo,
            });
        }

        if self.offset_word_list < HEADER_SIZE {
            return Err(FormatError::InvalidHeader(format!(
                "word list offset {} overlaps the {HEADER_SIZE}-byte header",
                self.offset_word_list
            )));
        }

        if self.offset_word_list >= self.offset_radix {
            return Err(FormatError::InvalidHeader(format!(
                "word list offset {} is not below radix offset {}",
                self.offset_word_list, self.offset_radix
            )));
        }

        if u64::from(self.offset_radix) > file_size {
            return Err(FormatError::InvalidHeader(format!(
                "radix offset {} is past end of file ({file_size} bytes)",
                self.offset_radix
            )));
        }

        Ok(())
    }
}

impl BinRead for DictionaryHeader {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let mut magic = [0u8; 8];
        reader.read_exact(&mut magic)?;

        let mut buf2 = [0u8; 2];
        reader.read_exact(&mut buf2)?;
        let header_size = u16::from_le_bytes(buf2);

        let mut buf1 = [0u8; 1];
        reader.read_exact(&mut buf1)?;
        let version_lo = buf1[0];
        reader.read_exact(&mut buf1)?;
        let version_hi = buf1[0];

        let mut buf4 = [0u8; 4];
        reader.read_exact(&mut buf4)?;
        let offset_word_list = u32::from_le_bytes(buf4);
        reader.read_exact(&mut buf4)?;
        let offset_radix = u32::from_le_bytes(buf4);

        // Padding is read, not seeked over, so a truncated header fails here
        let mut padding = [0u8; PADDING_SIZE];
        reader.read_exact(&mut padding)?;

        Ok(Self {
            magic,
            header_size,
            version_lo,
            version_hi,
            offset_word_list,
            offset_radix,
        })
    }
}

impl BinWrite for DictionaryHeader {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        _endian: binrw::Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.header_size.to_le_bytes())?;
        writer.write_all(&[self.version_lo, self.version_hi])?;
        writer.write_all(&self.offset_word_list.to_le_bytes())?;
        writer.write_all(&self.offset_radix.to_le_bytes())?;
        writer.write_all(&[0u8; PADDING_SIZE])?;
        Ok(())
    }
}
