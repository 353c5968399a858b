//! Text helpers for the UTF-16 index encoding
//!
//! Edge labels are stored as UTF-16LE code units while queries arrive as
//! UTF-8. Normalized matching compares code units after [`desaturate`], which
//! lower-cases and strips accents one unit at a time.

use crate::error::{FormatError, Result};
use unicode_normalization::char::decompose_canonical;

/// Convert a query to UTF-16 code units
///
/// NUL terminates labels in the index, so a query containing it can never
/// match and is rejected up front.
pub fn encode_query(query: &str) -> Result<Vec<u16>> {
    if query.contains('\0') {
        return Err(FormatError::InvalidQuery(format!(
            "query {query:?} contains NUL"
        )));
    }
    Ok(query.encode_utf16().collect())
}

/// Decode UTF-16 code units, replacing unpaired surrogates
pub fn decode_utf16_lossy(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Fold a code unit for accent and case insensitive comparison
///
/// The unit is lower-cased, then reduced to the first character of its
/// canonical decomposition (`é` -> `e`, `Å` -> `a`). Surrogates and units
/// whose folded form does not fit a single code unit come back unchanged.
pub fn desaturate(unit: u16) -> u16 {
    let Some(ch) = char::from_u32(u32::from(unit)) else {
        return unit;
    };

    let lower = ch.to_lowercase().next().unwrap_or(ch);

    let mut base = None;
    decompose_canonical(lower, |c| {
        if base.is_none() {
            base = Some(c);
        }
    });

    let folded = base.unwrap_or(lower);
    u16::try_from(u32::from(folded)).unwrap_or(unit)
}

/// Compare two code units after folding
pub fn folded_eq(a: u16, b: u16) -> bool {
    a == b || desaturate(a) == desaturate(b)
}
