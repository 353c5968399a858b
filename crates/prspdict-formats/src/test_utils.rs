//! In-memory dictionary images
//!
//! [`DictionaryImageBuilder`] lays a file out the way the dictionary compiler
//! does: header, articles, word list, then radix nodes in depth-first
//! pre-order. Virtual branch nodes carry zero for both values.

use crate::article::write_article;
use crate::header::{DictionaryHeader, HEADER_SIZE};
use crate::node::{CHILD_OFFSET_SIZE, NODE_PREFIX_SIZE, RadixNode};
use crate::word_list::WordListEntry;
use std::collections::BTreeMap;

/// Builder for a complete dictionary file held in memory
#[derive(Debug, Clone, Default)]
pub struct DictionaryImageBuilder {
    entries: BTreeMap<String, (String, String)>,
}

/// A serialized dictionary plus the offsets of everything in it
#[derive(Debug, Clone)]
pub struct DictionaryImage {
    /// Complete file contents
    pub bytes: Vec<u8>,
    /// Header written at offset 0
    pub header: DictionaryHeader,
    /// Article offset per word
    pub article_offsets: BTreeMap<String, u32>,
    /// Word-list record offset per word
    pub word_list_offsets: BTreeMap<String, u32>,
    /// Terminal node offset per word
    pub node_offsets: BTreeMap<String, u32>,
    /// Words in word-list order
    pub words: Vec<String>,
}

impl DictionaryImage {
    /// Offset of the root node
    pub const fn root_offset(&self) -> u32 {
        self.header.offset_radix
    }

    /// Total file size
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the image is empty (never true for a built image)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Overwrite the bytes at `offset`
    pub fn patch(&mut self, offset: u32, data: &[u8]) {
        let start = offset as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
    }
}

impl DictionaryImageBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word with its article text and short translation
    ///
    /// Adding the same word twice keeps the last entry.
    #[must_use]
    pub fn entry(
        mut self,
        word: impl Into<String>,
        article: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        self.entries
            .insert(word.into(), (article.into(), translation.into()));
        self
    }

    /// Serialize the dictionary
    pub fn build(&self) -> DictionaryImage {
        let mut articles = Vec::new();
        let mut article_offsets = BTreeMap::new();
        for (word, (article, _)) in &self.entries {
            let offset = HEADER_SIZE + articles.len() as u32;
            write_article(&mut articles, article.as_bytes()).expect("article should encode");
            article_offsets.insert(word.clone(), offset);
        }

        let offset_word_list = HEADER_SIZE + articles.len() as u32;
        let mut word_list = Vec::new();
        let mut word_list_offsets = BTreeMap::new();
        for (word, (_, translation)) in &self.entries {
            word_list_offsets.insert(word.clone(), offset_word_list + word_list.len() as u32);
            WordListEntry::new(word.as_str(), translation.as_str())
                .write_to(&mut word_list)
                .expect("record should encode");
        }

        let offset_radix = offset_word_list + word_list.len() as u32;

        let mut root = TreeNode::default();
        for word in self.entries.keys() {
            let key: Vec<u16> = word.encode_utf16().collect();
            if !key.is_empty() {
                root.insert(&key, word);
            }
        }

        let mut flat = Vec::new();
        flatten(root, &mut flat);

        let mut node_offsets_by_index = Vec::with_capacity(flat.len());
        let mut next = offset_radix;
        for node in &flat {
            node_offsets_by_index.push(next);
            next += node.encoded_len() as u32;
        }

        let mut radix = Vec::new();
        let mut node_offsets = BTreeMap::new();
        for (index, node) in flat.iter().enumerate() {
            let (value_article, value_word_list) = match &node.word {
                Some(word) => {
                    node_offsets.insert(word.clone(), node_offsets_by_index[index]);
                    (article_offsets[word], word_list_offsets[word])
                }
                None => (0, 0),
            };

            let mut encoded = RadixNode::new(value_article, value_word_list);
            for (label, child) in &node.children {
                encoded
                    .push_child(node_offsets_by_index[*child], label)
                    .expect("child should fit");
            }
            encoded.write_to(&mut radix).expect("node should encode");
        }

        let header = DictionaryHeader::new(offset_word_list, offset_radix);
        let mut bytes = header.build().expect("header should encode");
        bytes.extend_from_slice(&articles);
        bytes.extend_from_slice(&word_list);
        bytes.extend_from_slice(&radix);

        DictionaryImage {
            bytes,
            header,
            article_offsets,
            word_list_offsets,
            node_offsets,
            words: self.entries.keys().cloned().collect(),
        }
    }
}

#[derive(Debug, Default)]
struct TreeNode {
    word: Option<String>,
    children: Vec<(Vec<u16>, TreeNode)>,
}

impl TreeNode {
    fn insert(&mut self, key: &[u16], word: &str) {
        if key.is_empty() {
            self.word = Some(word.to_string());
            return;
        }

        let Some(pos) = self.children.iter().position(|(label, _)| label[0] == key[0]) else {
            let mut leaf = Self::default();
            leaf.insert(&[], word);
            self.children.push((key.to_vec(), leaf));
            self.children.sort_by(|a, b| a.0.cmp(&b.0));
            return;
        };

        let (label, child) = &mut self.children[pos];
        let common = label
            .iter()
            .zip(key)
            .take_while(|(a, b)| a == b)
            .count();

        if common < label.len() {
            // split the edge at the shared prefix
            let tail = label.split_off(common);
            let old = std::mem::take(child);
            child.children.push((tail, old));
        }

        child.insert(&key[common..], word);
    }
}

#[derive(Debug)]
struct FlatNode {
    word: Option<String>,
    children: Vec<(Vec<u16>, usize)>,
}

impl FlatNode {
    fn encoded_len(&self) -> usize {
        let labels: usize = self
            .children
            .iter()
            .map(|(label, _)| (label.len() + 1) * 2)
            .sum();
        NODE_PREFIX_SIZE + self.children.len() * CHILD_OFFSET_SIZE + labels
    }
}

fn flatten(node: TreeNode, out: &mut Vec<FlatNode>) -> usize {
    let index = out.len();
    out.push(FlatNode {
        word: node.word,
        children: Vec::new(),
    });

    let mut children = Vec::with_capacity(node.children.len());
    for (label, child) in node.children {
        children.push((label, flatten(child, out)));
    }
    out[index].children = children;
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_regions() {
        let image = DictionaryImageBuilder::new()
            .entry("cat", "A", "chat")
            .entry("catalog", "B", "catalogue")
            .build();

        image
            .header
            .validate(image.len() as u64)
            .expect("header should be consistent");
        assert_eq!(image.article_offsets["cat"], HEADER_SIZE);
        assert_eq!(image.article_offsets["catalog"], HEADER_SIZE + 5);
        assert_eq!(image.header.offset_word_list, HEADER_SIZE + 10);
        assert_eq!(
            image.word_list_offsets["catalog"],
            image.header.offset_word_list + 9
        );
        assert_eq!(image.root_offset(), image.header.offset_word_list + 27);
    }

    #[test]
    fn test_tree_shape() {
        let image = DictionaryImageBuilder::new()
            .entry("cat", "A", "chat")
            .entry("catalog", "B", "catalogue")
            .entry("do", "C", "faire")
            .build();

        let root = RadixNode::decode(&image.bytes[image.root_offset() as usize..]).unwrap();
        assert!(root.is_virtual());
        let labels: Vec<String> = root
            .labels()
            .map(crate::text::decode_utf16_lossy)
            .collect();
        assert_eq!(labels, vec!["cat", "do"]);

        // pre-order: the first child follows the root directly
        let cat_offset = image.node_offsets["cat"];
        assert_eq!(root.child_offset(0), Some(cat_offset));
        assert_eq!(cat_offset, image.root_offset() + root.encoded_len() as u32);

        let cat = RadixNode::decode(&image.bytes[cat_offset as usize..]).unwrap();
        assert_eq!(cat.value_article, image.article_offsets["cat"]);
        assert_eq!(cat.value_word_list, image.word_list_offsets["cat"]);
        let labels: Vec<String> = cat.labels().map(crate::text::decode_utf16_lossy).collect();
        assert_eq!(labels, vec!["alog"]);
    }

    #[test]
    fn test_split_creates_virtual_node() {
        let image = DictionaryImageBuilder::new()
            .entry("tea", "A", "thé")
            .entry("ten", "B", "dix")
            .build();

        let root = RadixNode::decode(&image.bytes[image.root_offset() as usize..]).unwrap();
        assert_eq!(root.n_children(), 1);
        let te_offset = root.child_offset(0).unwrap();
        let te = RadixNode::decode(&image.bytes[te_offset as usize..]).unwrap();
        assert!(te.is_virtual());
        assert_eq!(te.value_word_list, 0);
        assert_eq!(te.n_children(), 2);
    }
}
