//! Exact-match resolution with backtracking

use super::CallBudget;
use crate::matcher::{ChildMatch, MatchMode, find_matching_child};
use crate::store::NodeStore;
use crate::{LookupError, Result};
use prspdict_formats::RadixNode;
use std::io::{Read, Seek};
use tracing::warn;

/// Find the node whose path spells `query`
///
/// At each node the exact candidate is tried first. If it is missing,
/// consumes nothing, or its subtree does not contain the rest of the query,
/// the siblings are scanned again with case and accent folding, skipping the
/// child already tried. Returns the offset of the terminal node; whether that
/// node carries an article is for the caller to check.
pub fn resolve_exact<R: Read + Seek>(
    store: &mut NodeStore<R>,
    start_offset: u32,
    query: &[u16],
    budget: &mut CallBudget,
) -> Result<Option<u32>> {
    budget.charge()?;
    let node = store.read_node(start_offset)?;

    let exact = find_matching_child(&node, query, MatchMode::Exact, 0);
    let mut start = 0;
    if let Some(m) = exact {
        if m.is_degenerate() {
            warn!(offset = start_offset, child = m.index, "Ignoring empty edge label");
            start = m.index + 1;
        } else if let Some(hit) = follow(store, start_offset, &node, m, query, budget)? {
            return Ok(Some(hit));
        }
    }

    while let Some(m) = find_matching_child(&node, query, MatchMode::Normalized, start) {
        start = m.index + 1;
        if exact.is_some_and(|e| e.index == m.index) {
            // already descended through this child
            continue;
        }
        if m.is_degenerate() {
            warn!(offset = start_offset, child = m.index, "Ignoring empty edge label");
            return Ok(None);
        }
        if let Some(hit) = follow(store, start_offset, &node, m, query, budget)? {
            return Ok(Some(hit));
        }
    }

    Ok(None)
}

fn follow<R: Read + Seek>(
    store: &mut NodeStore<R>,
    offset: u32,
    node: &RadixNode,
    m: ChildMatch,
    query: &[u16],
    budget: &mut CallBudget,
) -> Result<Option<u32>> {
    let child = node.child_offset(m.index).ok_or_else(|| {
        LookupError::CorruptIndex(format!("node at {offset} has no child {}", m.index))
    })?;

    if m.matched_len == query.len() {
        return Ok(Some(child));
    }
    resolve_exact(store, child, &query[m.matched_len..], budget)
}
