//! Radix tree descent
//!
//! Both resolvers re-read every node they visit from the store and charge
//! each step against a per-query [`CallBudget`]. A well-formed tree never
//! comes close to the default cap; hitting it means the index loops back on
//! itself.

mod best;
mod exact;

pub use best::resolve_best;
pub use exact::resolve_exact;

use crate::{LookupError, Result};

/// Per-query cap on resolver steps
#[derive(Debug, Clone, Copy)]
pub struct CallBudget {
    used: usize,
    max: usize,
}

impl CallBudget {
    /// Allow up to `max` steps
    pub const fn new(max: usize) -> Self {
        Self { used: 0, max }
    }

    /// Steps taken so far
    pub const fn used(&self) -> usize {
        self.used
    }

    /// Account for one more step
    pub fn charge(&mut self) -> Result<()> {
        self.used += 1;
        if self.used > self.max {
            return Err(LookupError::CorruptIndex(format!(
                "gave up after {} resolver steps; the index likely contains a cycle",
                self.max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_allows_exactly_max() {
        let mut budget = CallBudget::new(3);
        for _ in 0..3 {
            budget.charge().expect("within budget");
        }
        assert_eq!(budget.used(), 3);
        assert!(matches!(budget.charge(), Err(LookupError::CorruptIndex(_))));
    }
}
