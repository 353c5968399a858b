//! Lookup configuration

use crate::{LookupError, Result};
use serde::{Deserialize, Serialize};

/// Default number of records per word-list page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default word-list read buffer: 20 records of up to 256 UTF-16 units
pub const DEFAULT_SCAN_BUFFER_LEN: usize = DEFAULT_PAGE_SIZE * 256 * 2;

/// Default cap on resolver steps per query
pub const DEFAULT_MAX_RESOLVE_CALLS: usize = 1000;

/// Tunables for a dictionary handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Records per word-list page
    pub page_size: usize,

    /// Bytes read per word-list chunk
    pub scan_buffer_len: usize,

    /// Resolver steps allowed per query before the index is declared corrupt
    pub max_resolve_calls: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            scan_buffer_len: DEFAULT_SCAN_BUFFER_LEN,
            max_resolve_calls: DEFAULT_MAX_RESOLVE_CALLS,
        }
    }
}

impl LookupConfig {
    /// Set the page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the word-list read buffer length
    #[must_use]
    pub const fn with_scan_buffer_len(mut self, len: usize) -> Self {
        self.scan_buffer_len = len;
        self
    }

    /// Set the resolver step cap
    #[must_use]
    pub const fn with_max_resolve_calls(mut self, calls: usize) -> Self {
        self.max_resolve_calls = calls;
        self
    }

    /// Reject settings that would make every lookup fail
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(LookupError::Config("page_size must be at least 1".into()));
        }
        if self.scan_buffer_len == 0 {
            return Err(LookupError::Config(
                "scan_buffer_len must be at least 1".into(),
            ));
        }
        if self.max_resolve_calls == 0 {
            return Err(LookupError::Config(
                "max_resolve_calls must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
