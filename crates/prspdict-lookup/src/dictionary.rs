//! Dictionary handle

use crate::config::LookupConfig;
use crate::resolver::{CallBudget, resolve_best, resolve_exact};
use crate::scanner::{WordListPage, WordListScanner};
use crate::store::NodeStore;
use crate::{LookupError, Result};
use prspdict_formats::text::encode_query;
use prspdict_formats::{Article, DictionaryHeader};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Result of a lookup that falls back to the word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The query names an entry
    Article(Article),
    /// No entry; the neighbourhood of the query in the word list
    Page(WordListPage),
}

/// An open dictionary
///
/// Each operation takes `&mut self`: the handle owns a single reader and
/// seeks it around the file. Use one handle per thread.
#[derive(Debug)]
pub struct Dictionary<R> {
    store: NodeStore<R>,
    scanner: WordListScanner,
    config: LookupConfig,
}

impl Dictionary<BufReader<File>> {
    /// Open a dictionary file
    pub fn open(path: impl AsRef<Path>, config: LookupConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LookupError::storage(0, e))?;
        debug!(path = %path.display(), "Opening dictionary");
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read + Seek> Dictionary<R> {
    /// Use an already open reader
    pub fn from_reader(reader: R, config: LookupConfig) -> Result<Self> {
        config.validate()?;
        let store = NodeStore::open(reader)?;
        Ok(Self {
            store,
            scanner: WordListScanner::new(config.scan_buffer_len),
            config,
        })
    }

    /// Validated file header
    pub const fn header(&self) -> &DictionaryHeader {
        self.store.header()
    }

    /// Active configuration
    pub const fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Reads issued against the file since it was opened
    pub const fn disk_accesses(&self) -> u64 {
        self.store.accesses()
    }

    /// Article for `query`, if the dictionary has an entry for it
    ///
    /// Matching is exact where possible and falls back to case and accent
    /// folding per edge.
    pub fn lookup_exact(&mut self, query: &str) -> Result<Option<Article>> {
        let units = encode_query(query)?;
        let before = self.store.accesses();
        let mut budget = CallBudget::new(self.config.max_resolve_calls);

        let root = self.store.root_offset();
        let article = match resolve_exact(&mut self.store, root, &units, &mut budget)? {
            Some(offset) => {
                let node = self.store.read_node(offset)?;
                if node.is_virtual() {
                    None
                } else {
                    Some(self.store.read_article(node.value_article)?)
                }
            }
            None => None,
        };

        debug!(
            query,
            found = article.is_some(),
            steps = budget.used(),
            accesses = self.store.accesses() - before,
            "Exact lookup"
        );
        Ok(article)
    }

    /// Word-list page around the closest entry to `query`
    ///
    /// Up to half a page of records precede the best match.
    pub fn lookup_best(&mut self, query: &str) -> Result<WordListPage> {
        let units = encode_query(query)?;
        let before = self.store.accesses();
        let mut budget = CallBudget::new(self.config.max_resolve_calls);

        let root = self.store.root_offset();
        let node = resolve_best(&mut self.store, root, &units, &mut budget)?;

        let offset = node.value_word_list;
        let region = self.store.header().word_list_range();
        if !region.contains(&offset) {
            return Err(LookupError::CorruptIndex(format!(
                "best match points at word list offset {offset} outside {}..{}",
                region.start, region.end
            )));
        }

        let page_size = self.config.page_size;
        let start = self.scanner.rewind(&mut self.store, offset, page_size / 2)?;
        let page = self.scanner.scan_forward(&mut self.store, start, page_size)?;

        debug!(
            query,
            best = offset,
            records = page.len(),
            accesses = self.store.accesses() - before,
            "Best match lookup"
        );
        Ok(page)
    }

    /// Exact lookup, falling back to the best-match page
    pub fn lookup(&mut self, query: &str) -> Result<LookupOutcome> {
        match self.lookup_exact(query)? {
            Some(article) => Ok(LookupOutcome::Article(article)),
            None => Ok(LookupOutcome::Page(self.lookup_best(query)?)),
        }
    }

    /// Up to `count` records starting at `offset`
    pub fn list_forward(&mut self, offset: u32, count: usize) -> Result<WordListPage> {
        self.scanner.scan_forward(&mut self.store, offset, count)
    }

    /// Up to `count` records ending at `offset`
    pub fn list_backward(&mut self, offset: u32, count: usize) -> Result<WordListPage> {
        self.scanner.scan_backward(&mut self.store, offset, count)
    }

    /// Next page of the configured size
    pub fn next_page(&mut self, offset: u32) -> Result<WordListPage> {
        self.list_forward(offset, self.config.page_size)
    }

    /// Previous page of the configured size
    pub fn previous_page(&mut self, offset: u32) -> Result<WordListPage> {
        self.list_backward(offset, self.config.page_size)
    }

    /// Article stored at a raw offset
    pub fn read_article(&mut self, offset: u32) -> Result<Article> {
        let region = self.store.header().article_range();
        if !region.contains(&offset) {
            return Err(LookupError::InvalidInput(format!(
                "offset {offset} is outside the article region ({}..{})",
                region.start, region.end
            )));
        }
        self.store.read_article(offset)
    }
}
