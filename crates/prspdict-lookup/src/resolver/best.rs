//! Nearest-entry resolution

use super::CallBudget;
use crate::matcher::{MatchMode, find_matching_child};
use crate::store::NodeStore;
use crate::{LookupError, Result};
use prspdict_formats::RadixNode;
use std::io::{Read, Seek};
use tracing::trace;

/// Find the closest real entry for `query`
///
/// Descends greedily with exact comparison for as long as some child label
/// prefixes the rest of the query, then walks first children until it reaches
/// a node that carries an article. The result's word-list offset is where the
/// neighbourhood of `query` starts in the word list.
pub fn resolve_best<R: Read + Seek>(
    store: &mut NodeStore<R>,
    start_offset: u32,
    query: &[u16],
    budget: &mut CallBudget,
) -> Result<RadixNode> {
    budget.charge()?;
    let mut offset = start_offset;
    let mut node = store.read_node(offset)?;
    let mut rest = query;

    while !rest.is_empty() {
        let Some(m) = find_matching_child(&node, rest, MatchMode::Exact, 0) else {
            break;
        };
        if m.is_degenerate() {
            break;
        }

        budget.charge()?;
        offset = child_of(&node, offset, m.index)?;
        store.read_node_into(offset, &mut node)?;
        rest = &rest[m.matched_len..];
    }
    trace!(offset, consumed = query.len() - rest.len(), "Best match descent stopped");

    while node.is_virtual() {
        budget.charge()?;
        offset = child_of(&node, offset, 0)?;
        store.read_node_into(offset, &mut node)?;
    }

    Ok(node)
}

fn child_of(node: &RadixNode, offset: u32, index: usize) -> Result<u32> {
    node.child_offset(index).ok_or_else(|| {
        LookupError::CorruptIndex(format!(
            "virtual node at {offset} has no child to descend into"
        ))
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use prspdict_formats::test_utils::{DictionaryImage, DictionaryImageBuilder};
    use prspdict_formats::text::encode_query;
    use std::io::Cursor;

    fn best(image: &DictionaryImage, query: &str) -> Result<RadixNode> {
        let mut store = NodeStore::open(Cursor::new(image.bytes.clone()))?;
        let mut budget = CallBudget::new(1000);
        resolve_best(
            &mut store,
            image.root_offset(),
            &encode_query(query).unwrap(),
            &mut budget,
        )
    }

    fn image() -> DictionaryImage {
        DictionaryImageBuilder::new()
            .entry("cat", "A", "chat")
            .entry("catalog", "B", "catalogue")
            .entry("do", "C", "faire")
            .build()
    }

    #[test]
    fn test_prefix_descends_then_stops() {
        let image = image();
        let node = best(&image, "catapult").unwrap();
        assert_eq!(node.value_word_list, image.word_list_offsets["cat"]);

        let node = best(&image, "dog").unwrap();
        assert_eq!(node.value_word_list, image.word_list_offsets["do"]);
    }

    #[test]
    fn test_no_edge_consumed_walks_first_children() {
        let image = image();
        for query in ["zebra", "", "c"] {
            let node = best(&image, query).unwrap();
            assert!(!node.is_virtual());
            assert_eq!(node.value_word_list, image.word_list_offsets["cat"]);
        }
    }

    #[test]
    fn test_exact_only() {
        let image = image();
        // folding would reach "cat"; the greedy pass does not fold
        let node = best(&image, "DOG").unwrap();
        assert_eq!(node.value_word_list, image.word_list_offsets["cat"]);
    }

    #[test]
    fn test_split_node_resolves_to_first_real_child() {
        let image = DictionaryImageBuilder::new()
            .entry("tea", "A", "thé")
            .entry("ten", "B", "dix")
            .build();
        let node = best(&image, "tex").unwrap();
        assert_eq!(node.value_article, image.article_offsets["tea"]);
    }

    #[test]
    fn test_empty_label_stops_descent() {
        let mut image = DictionaryImageBuilder::new()
            .entry("ant", "A", "fourmi")
            .entry("cat", "B", "chat")
            .build();
        let old_root = image.root_offset();

        // following the empty edge would still reach "cat" below the old root
        let mut root = RadixNode::new(0, 0);
        root.push_child(old_root, &[]).unwrap();
        root.push_child(image.node_offsets["cat"], &encode_query("cat").unwrap()).unwrap();
        let start = image.len() as u32;
        root.write_to(&mut image.bytes).unwrap();

        let mut store = NodeStore::open(Cursor::new(image.bytes.clone())).unwrap();
        let mut budget = CallBudget::new(1000);
        let node = resolve_best(
            &mut store,
            start,
            &encode_query("cat").unwrap(),
            &mut budget,
        )
        .unwrap();
        assert_eq!(node.value_word_list, image.word_list_offsets["ant"]);
    }

    #[test]
    fn test_virtual_leaf_is_corrupt() {
        let mut image = DictionaryImageBuilder::new().entry("a", "A", "a").build();
        // make the only leaf virtual
        let leaf = image.node_offsets["a"];
        image.patch(leaf + 2, &0u32.to_le_bytes());

        assert!(matches!(
            best(&image, "a"),
            Err(LookupError::CorruptIndex(_))
        ));
    }

    #[test]
    fn test_first_child_cycle_hits_budget() {
        let mut image = DictionaryImageBuilder::new().entry("a", "A", "a").build();
        let root = image.root_offset();
        image.patch(root + 11, &root.to_le_bytes());

        assert!(matches!(
            best(&image, "zzz"),
            Err(LookupError::CorruptIndex(_))
        ));
    }
}
