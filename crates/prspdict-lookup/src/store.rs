//! Random-access reads from a dictionary file
//!
//! [`NodeStore`] owns the reader and the validated header. Every read is
//! bounds-checked against the region it belongs to before the seek, so a
//! stray pointer in the index surfaces as [`LookupError::CorruptIndex`]
//! rather than a read from the wrong region.

use crate::{LookupError, Result};
use prspdict_formats::article::{ARTICLE_LEN_PREFIX, parse_length};
use prspdict_formats::header::{HEADER_SIZE, MAGIC};
use prspdict_formats::{Article, DictionaryHeader, RadixNode};
use std::io::{Read, Seek, SeekFrom};
use tracing::{info, trace};

/// Reader over a dictionary file with a validated header
#[derive(Debug)]
pub struct NodeStore<R> {
    reader: R,
    header: DictionaryHeader,
    file_size: u64,
    accesses: u64,
}

impl<R: Read + Seek> NodeStore<R> {
    /// Read and validate the header
    pub fn open(mut reader: R) -> Result<Self> {
        let file_size = reader
            .seek(SeekFrom::End(0))
            .map_err(|e| LookupError::storage(0, e))?;
        reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| LookupError::storage(0, e))?;

        let available = file_size.min(u64::from(HEADER_SIZE)) as usize;
        let mut data = vec![0u8; available];
        reader
            .read_exact(&mut data)
            .map_err(|e| LookupError::storage(0, e))?;

        if data.len() < MAGIC.len() || data[..MAGIC.len()] != MAGIC {
            let mut magic = [0u8; 8];
            let n = data.len().min(magic.len());
            magic[..n].copy_from_slice(&data[..n]);
            return Err(LookupError::InvalidMagic(magic));
        }
        if data.len() < HEADER_SIZE as usize {
            return Err(LookupError::CorruptIndex(format!(
                "file of {file_size} bytes is shorter than the {HEADER_SIZE}-byte header"
            )));
        }

        let header = DictionaryHeader::parse(&data)?;
        header.validate(file_size)?;

        info!(
            file_size,
            offset_word_list = header.offset_word_list,
            offset_radix = header.offset_radix,
            "Opened dictionary"
        );

        Ok(Self {
            reader,
            header,
            file_size,
            accesses: 1,
        })
    }

    /// Validated header
    pub const fn header(&self) -> &DictionaryHeader {
        &self.header
    }

    /// Size of the underlying file
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Offset of the root node
    pub const fn root_offset(&self) -> u32 {
        self.header.offset_radix
    }

    /// Number of reads issued so far, header included
    pub const fn accesses(&self) -> u64 {
        self.accesses
    }

    /// Read the node at `offset`
    pub fn read_node(&mut self, offset: u32) -> Result<RadixNode> {
        let mut node = RadixNode::default();
        self.read_node_into(offset, &mut node)?;
        Ok(node)
    }

    /// Read the node at `offset` into an existing node, reusing its buffers
    pub fn read_node_into(&mut self, offset: u32, node: &mut RadixNode) -> Result<()> {
        let pos = u64::from(offset);
        if offset < self.header.offset_radix || pos >= self.file_size {
            return Err(LookupError::CorruptIndex(format!(
                "node offset {offset} outside radix region {}..{}",
                self.header.offset_radix, self.file_size
            )));
        }

        self.seek(pos)?;
        self.accesses += 1;
        node.read_into(&mut self.reader)
            .map_err(|e| LookupError::at(pos, e))?;

        trace!(
            offset,
            children = node.n_children(),
            article = node.value_article,
            "Read node"
        );
        Ok(())
    }

    /// Read the article blob at `offset`
    pub fn read_article(&mut self, offset: u32) -> Result<Article> {
        let region = self.header.article_range();
        let pos = u64::from(offset);
        let data_start = pos + u64::from(ARTICLE_LEN_PREFIX);
        if !region.contains(&offset) || data_start > u64::from(region.end) {
            return Err(LookupError::CorruptIndex(format!(
                "article offset {offset} outside article region {}..{}",
                region.start, region.end
            )));
        }

        self.seek(pos)?;
        let mut prefix = [0u8; ARTICLE_LEN_PREFIX as usize];
        self.accesses += 1;
        self.reader
            .read_exact(&mut prefix)
            .map_err(|e| LookupError::storage(pos, e))?;
        let len = parse_length(prefix);

        if data_start + u64::from(len) > u64::from(region.end) {
            return Err(LookupError::CorruptIndex(format!(
                "article at {offset} of {len} bytes runs past word list at {}",
                region.end
            )));
        }

        let mut data = vec![0u8; len as usize];
        if len > 0 {
            self.accesses += 1;
            self.reader
                .read_exact(&mut data)
                .map_err(|e| LookupError::storage(data_start, e))?;
        }

        trace!(offset, len, "Read article");
        Ok(Article::new(offset, data))
    }

    /// Read raw word-list bytes starting at `offset`
    ///
    /// Fills as much of `buf` as the word-list region allows and returns the
    /// number of bytes read; 0 means `offset` is the end of the region.
    pub fn read_word_list(&mut self, offset: u32, buf: &mut [u8]) -> Result<usize> {
        let region = self.header.word_list_range();
        if offset < region.start || offset > region.end {
            return Err(LookupError::CorruptIndex(format!(
                "word list offset {offset} outside {}..{}",
                region.start, region.end
            )));
        }

        let len = buf.len().min((region.end - offset) as usize);
        if len == 0 {
            return Ok(0);
        }

        let pos = u64::from(offset);
        self.seek(pos)?;
        self.accesses += 1;
        self.reader
            .read_exact(&mut buf[..len])
            .map_err(|e| LookupError::storage(pos, e))?;

        trace!(offset, len, "Read word list chunk");
        Ok(len)
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        self.reader
            .seek(SeekFrom::Start(pos))
            .map_err(|e| LookupError::storage(pos, e))?;
        Ok(())
    }
}
