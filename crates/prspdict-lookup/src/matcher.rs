//! Sibling edge label matching
//!
//! A child qualifies when its whole label is a prefix of the remaining query.
//! Labels are walked straight out of the node's raw label block, so a block
//! that ends early simply yields no further candidates.

use prspdict_formats::RadixNode;
use prspdict_formats::node::LABEL_TERMINATOR;
use prspdict_formats::text::folded_eq;

/// How label and query units are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Raw code unit equality
    Exact,
    /// Equality after folding case and accents
    Normalized,
}

impl MatchMode {
    fn units_eq(self, label: u16, query: u16) -> bool {
        match self {
            Self::Exact => label == query,
            Self::Normalized => folded_eq(label, query),
        }
    }
}

/// A child whose label prefixes the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildMatch {
    /// Child index within the node
    pub index: usize,
    /// Query units consumed by the label
    pub matched_len: usize,
}

impl ChildMatch {
    /// Label consumed nothing
    pub const fn is_degenerate(&self) -> bool {
        self.matched_len == 0
    }
}

/// Find the first child at or after `start_index` whose label prefixes `query`
pub fn find_matching_child(
    node: &RadixNode,
    query: &[u16],
    mode: MatchMode,
    start_index: usize,
) -> Option<ChildMatch> {
    let block = node.label_block();
    let mut pos = 0;

    for index in 0..node.n_children() {
        let mut j = 0;
        if index >= start_index {
            loop {
                let unit = *block.get(pos + j)?;
                if unit == LABEL_TERMINATOR {
                    return Some(ChildMatch {
                        index,
                        matched_len: j,
                    });
                }
                // label runs past the query, or differs from it
                if j == query.len() || !mode.units_eq(unit, query[j]) {
                    break;
                }
                j += 1;
            }
        }

        let rest = block.get(pos + j..)?;
        let end = rest.iter().position(|&u| u == LABEL_TERMINATOR)?;
        pos += j + end + 1;
    }

    None
}
