//! Radix tree node codec
//!
//! Every node is a variable-length record:
//!
//! ```text
//! length: u16              total encoded size of the node
//! value_article: u32       article offset, 0 for a virtual node
//! value_word_list: u32     word-list offset, 0 if none
//! n_children: u8
//! child_offsets: [u32; n_children]
//! labels: [u16]            n_children NUL-terminated UTF-16LE labels
//! ```

use crate::error::{FormatError, Result};
use binrw::io::Cursor;
use std::io::{Read, Write};

/// Size of the fixed prefix (length, both values, child count)
pub const NODE_PREFIX_SIZE: usize = 11;

/// Size of one entry in the child offsets array
pub const CHILD_OFFSET_SIZE: usize = 4;

/// Maximum number of children a node can declare
pub const MAX_CHILDREN: usize = u8::MAX as usize;

/// Label terminator
pub const LABEL_TERMINATOR: u16 = 0;

/// A decoded radix tree node
///
/// `labels` holds the raw label block exactly as stored: the concatenation of
/// one NUL-terminated UTF-16 label per child, in child order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadixNode {
    /// Offset of the article blob, 0 for virtual nodes
    pub value_article: u32,
    /// Offset of the word-list record, 0 if none
    pub value_word_list: u32,
    /// Absolute child node offsets
    pub child_offsets: Vec<u32>,
    /// Raw label block in UTF-16 code units, terminators included
    pub labels: Vec<u16>,
}

impl RadixNode {
    /// Create a node with no children
    pub const fn new(value_article: u32, value_word_list: u32) -> Self {
        Self {
            value_article,
            value_word_list,
            child_offsets: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Append a child edge
    ///
    /// The label must not contain the NUL terminator.
    pub fn push_child(&mut self, offset: u32, label: &[u16]) -> Result<()> {
        if self.child_offsets.len() >= MAX_CHILDREN {
            return Err(FormatError::TooManyChildren(self.child_offsets.len() + 1));
        }
        if label.contains(&LABEL_TERMINATOR) {
            return Err(FormatError::InvalidQuery(
                "edge label contains NUL".to_string(),
            ));
        }

        self.child_offsets.push(offset);
        self.labels.extend_from_slice(label);
        self.labels.push(LABEL_TERMINATOR);
        Ok(())
    }

    /// Number of child edges
    pub fn n_children(&self) -> usize {
        self.child_offsets.len()
    }

    /// A virtual node exists only to branch and carries no article
    pub const fn is_virtual(&self) -> bool {
        self.value_article == 0
    }

    /// Offset of child `index`
    pub fn child_offset(&self, index: usize) -> Option<u32> {
        self.child_offsets.get(index).copied()
    }

    /// Raw label block
    pub fn label_block(&self) -> &[u16] {
        &self.labels
    }

    /// Iterate over the child labels, terminators stripped
    ///
    /// Stops early if the label block runs out before every child has a
    /// terminated label.
    pub fn labels(&self) -> Labels<'_> {
        Labels {
            rest: &self.labels,
            remaining: self.child_offsets.len(),
        }
    }

    /// Encoded size of this node in bytes
    pub fn encoded_len(&self) -> usize {
        NODE_PREFIX_SIZE + self.child_offsets.len() * CHILD_OFFSET_SIZE + self.labels.len() * 2
    }

    /// Decode a node from a reader positioned at its first byte
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut node = Self::default();
        node.read_into(reader)?;
        Ok(node)
    }

    /// Decode a node into `self`, reusing the existing buffers
    pub fn read_into<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut prefix = [0u8; NODE_PREFIX_SIZE];
        reader.read_exact(&mut prefix)?;

        let length = u16::from_le_bytes([prefix[0], prefix[1]]);
        let value_article = u32::from_le_bytes([prefix[2], prefix[3], prefix[4], prefix[5]]);
        let value_word_list = u32::from_le_bytes([prefix[6], prefix[7], prefix[8], prefix[9]]);
        let n_children = prefix[10];

        let offsets_len = n_children as usize * CHILD_OFFSET_SIZE;
        let required = NODE_PREFIX_SIZE + offsets_len;
        if (length as usize) < required {
            return Err(FormatError::NodeTooShort {
                length,
                n_children,
                required,
            });
        }

        let label_bytes = length as usize - required;
        if label_bytes % 2 != 0 {
            return Err(FormatError::OddLabelBlock(label_bytes));
        }

        // Offsets and labels are read in one go; the prefix already told us how much
        let mut body = vec![0u8; offsets_len + label_bytes];
        reader.read_exact(&mut body)?;
        let (offsets, labels) = body.split_at(offsets_len);

        self.value_article = value_article;
        self.value_word_list = value_word_list;
        self.child_offsets.clear();
        self.child_offsets.extend(
            offsets
                .chunks_exact(CHILD_OFFSET_SIZE)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])),
        );
        self.labels.clear();
        self.labels.extend(
            labels
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]])),
        );

        Ok(())
    }

    /// Encode the node, recomputing its length field
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let length = self.encoded_length()?;
        if self.child_offsets.len() > MAX_CHILDREN {
            return Err(FormatError::TooManyChildren(self.child_offsets.len()));
        }

        writer.write_all(&length.to_le_bytes())?;
        writer.write_all(&self.value_article.to_le_bytes())?;
        writer.write_all(&self.value_word_list.to_le_bytes())?;
        writer.write_all(&[self.child_offsets.len() as u8])?;
        for offset in &self.child_offsets {
            writer.write_all(&offset.to_le_bytes())?;
        }
        for unit in &self.labels {
            writer.write_all(&unit.to_le_bytes())?;
        }
        Ok(())
    }

    /// Encode the node into a new buffer
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut data)?;
        Ok(data)
    }

    /// Decode a node from the start of `data`
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        Self::read_from(&mut cursor)
    }

    fn encoded_length(&self) -> Result<u16> {
        let len = self.encoded_len();
        u16::try_from(len).map_err(|_| FormatError::NodeTooLarge(len))
    }
}

/// Iterator over a node's NUL-terminated labels
#[derive(Debug, Clone)]
pub struct Labels<'a> {
    rest: &'a [u16],
    remaining: usize,
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u16];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let end = self.rest.iter().position(|&u| u == LABEL_TERMINATOR)?;
        let label = &self.rest[..end];
        self.rest = &self.rest[end + 1..];
        self.remaining -= 1;
        Some(label)
    }
}
