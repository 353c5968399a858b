//! Word-list pagination
//!
//! The word list has no index of its own: pages are cut by counting NUL
//! terminators from a byte offset. Going forward that is a plain chunked
//! scan. Going backward the scanner first rewinds over enough terminators to
//! land on a record boundary, then scans forward again up to where it began.

use crate::store::NodeStore;
use crate::{LookupError, Result};
use prspdict_formats::WordListEntry;
use prspdict_formats::word_list::{FIELD_TERMINATOR, FIELDS_PER_RECORD};
use serde::Serialize;
use std::io::{Read, Seek};
use tracing::{trace, warn};

/// A run of consecutive word-list records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordListPage {
    /// Records in file order
    pub entries: Vec<WordListEntry>,
    /// Offset of the first record
    pub start_offset: u32,
    /// Offset just past the last complete record
    pub end_offset: u32,
}

impl WordListPage {
    /// Number of records on the page
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Chunked reader over the word-list region
#[derive(Debug)]
pub struct WordListScanner {
    buffer: Vec<u8>,
}

impl WordListScanner {
    /// Create a scanner reading `buffer_len` bytes at a time
    pub fn new(buffer_len: usize) -> Self {
        Self {
            buffer: vec![0u8; buffer_len.max(1)],
        }
    }

    /// Read up to `max_records` records starting at `start`
    pub fn scan_forward<R: Read + Seek>(
        &mut self,
        store: &mut NodeStore<R>,
        start: u32,
        max_records: usize,
    ) -> Result<WordListPage> {
        check_offset(store, start)?;
        let limit = store.header().offset_radix;
        self.scan_range(store, start, limit, max_records)
    }

    /// Read up to `max_records` records ending at `end`
    pub fn scan_backward<R: Read + Seek>(
        &mut self,
        store: &mut NodeStore<R>,
        end: u32,
        max_records: usize,
    ) -> Result<WordListPage> {
        let start = self.rewind(store, end, max_records)?;
        self.scan_range(store, start, end, max_records)
    }

    /// Offset of the record `records` places before `offset`
    ///
    /// Stops at the start of the word list if there are fewer records before
    /// `offset`. `offset` is expected to sit on a record boundary.
    pub fn rewind<R: Read + Seek>(
        &mut self,
        store: &mut NodeStore<R>,
        offset: u32,
        records: usize,
    ) -> Result<u32> {
        check_offset(store, offset)?;
        if records == 0 {
            return Ok(offset);
        }

        let region_start = store.header().offset_word_list;
        // the terminator right before `offset` closes the previous record, so
        // the boundary we want sits after one extra terminator
        let target = records.saturating_mul(FIELDS_PER_RECORD).saturating_add(1);
        let mut seen = 0;
        let mut pos = offset;

        while pos > region_start {
            let len = self.buffer.len().min((pos - region_start) as usize);
            let chunk_start = pos - len as u32;
            let n = store.read_word_list(chunk_start, &mut self.buffer[..len])?;

            for i in (0..n).rev() {
                if self.buffer[i] == FIELD_TERMINATOR {
                    seen += 1;
                    if seen == target {
                        let boundary = chunk_start + i as u32 + 1;
                        trace!(offset, records, boundary, "Rewound word list");
                        return Ok(boundary);
                    }
                }
            }
            pos = chunk_start;
        }

        Ok(region_start)
    }

    fn scan_range<R: Read + Seek>(
        &mut self,
        store: &mut NodeStore<R>,
        start: u32,
        limit: u32,
        max_records: usize,
    ) -> Result<WordListPage> {
        let mut page = WordListPage {
            entries: Vec::with_capacity(max_records.min(1024)),
            start_offset: start,
            end_offset: start,
        };

        // bytes of the field being assembled, and the finished word if any
        let mut field = Vec::new();
        let mut word: Option<Vec<u8>> = None;
        let mut pos = start;

        'chunks: while pos < limit && page.entries.len() < max_records {
            let len = self.buffer.len().min((limit - pos) as usize);
            let n = store.read_word_list(pos, &mut self.buffer[..len])?;
            if n == 0 {
                break;
            }

            let mut rest = &self.buffer[..n];
            let mut rest_pos = pos;
            while let Some(z) = rest.iter().position(|&b| b == FIELD_TERMINATOR) {
                field.extend_from_slice(&rest[..z]);
                rest = &rest[z + 1..];
                rest_pos += z as u32 + 1;

                match word.take() {
                    None => word = Some(std::mem::take(&mut field)),
                    Some(w) => {
                        page.entries.push(WordListEntry::from_fields(&w, &field));
                        field.clear();
                        page.end_offset = rest_pos;
                        if page.entries.len() == max_records {
                            break 'chunks;
                        }
                    }
                }
            }
            field.extend_from_slice(rest);
            pos += n as u32;
        }

        if page.entries.len() < max_records
            && (word.is_some() || !field.is_empty())
            && limit == store.header().offset_radix
        {
            warn!(
                offset = page.end_offset,
                "Ignoring unterminated record at end of word list"
            );
        }

        trace!(
            start,
            end = page.end_offset,
            records = page.entries.len(),
            "Scanned word list"
        );
        Ok(page)
    }
}

fn check_offset<R: Read + Seek>(store: &NodeStore<R>, offset: u32) -> Result<()> {
    let region = store.header().word_list_range();
    if offset < region.start || offset > region.end {
        return Err(LookupError::InvalidInput(format!(
            "offset {offset} is outside the word list ({}..={})",
            region.start, region.end
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prspdict_formats::test_utils::{DictionaryImage, DictionaryImageBuilder};
    use std::io::Cursor;

    fn image() -> DictionaryImage {
        let mut builder = DictionaryImageBuilder::new();
        for word in ["ant", "bee", "cat", "dog", "eel", "fox", "gnu"] {
            builder = builder.entry(word, format!("{word} article"), word.to_uppercase());
        }
        builder.build()
    }

    fn store(image: &DictionaryImage) -> NodeStore<Cursor<Vec<u8>>> {
        NodeStore::open(Cursor::new(image.bytes.clone())).unwrap()
    }

    fn words(page: &WordListPage) -> Vec<&str> {
        page.entries.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn test_forward_page() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(64);

        let start = image.word_list_offsets["bee"];
        let page = scanner.scan_forward(&mut store, start, 3).unwrap();
        assert_eq!(words(&page), vec!["bee", "cat", "dog"]);
        assert_eq!(page.entries[0].translation, "BEE");
        assert_eq!(page.start_offset, start);
        assert_eq!(page.end_offset, image.word_list_offsets["eel"]);
    }

    #[test]
    fn test_forward_stops_at_radix() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(64);

        let page = scanner
            .scan_forward(&mut store, image.word_list_offsets["fox"], 20)
            .unwrap();
        assert_eq!(words(&page), vec!["fox", "gnu"]);
        assert_eq!(page.end_offset, image.header.offset_radix);

        let page = scanner
            .scan_forward(&mut store, image.header.offset_radix, 20)
            .unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_tiny_buffer_carries_records_across_chunks() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(3);

        let page = scanner
            .scan_forward(&mut store, image.header.offset_word_list, 20)
            .unwrap();
        assert_eq!(page.len(), 7);
        assert_eq!(page.entries[6].word, "gnu");
        assert_eq!(page.entries[6].translation, "GNU");
    }

    #[test]
    fn test_backward_page() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(5);

        let end = image.word_list_offsets["eel"];
        let page = scanner.scan_backward(&mut store, end, 2).unwrap();
        assert_eq!(words(&page), vec!["cat", "dog"]);
        assert_eq!(page.start_offset, image.word_list_offsets["cat"]);
        assert_eq!(page.end_offset, end);
    }

    #[test]
    fn test_backward_clamps_to_region_start() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(64);

        let page = scanner
            .scan_backward(&mut store, image.word_list_offsets["cat"], 10)
            .unwrap();
        assert_eq!(words(&page), vec!["ant", "bee"]);
        assert_eq!(page.start_offset, image.header.offset_word_list);
    }

    #[test]
    fn test_forward_then_backward_round_trip() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(7);

        for start_word in ["ant", "bee", "dog"] {
            let forward = scanner
                .scan_forward(&mut store, image.word_list_offsets[start_word], 3)
                .unwrap();
            let backward = scanner
                .scan_backward(&mut store, forward.end_offset, 3)
                .unwrap();
            assert_eq!(backward, forward);
        }
    }

    #[test]
    fn test_rewind_zero_records() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(64);
        let offset = image.word_list_offsets["cat"];
        assert_eq!(scanner.rewind(&mut store, offset, 0).unwrap(), offset);
    }

    #[test]
    fn test_rewind_huge_count_stops_at_region_start() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(64);

        let end = image.header.offset_radix;
        assert_eq!(
            scanner.rewind(&mut store, end, usize::MAX).unwrap(),
            image.header.offset_word_list
        );

        let page = scanner.scan_backward(&mut store, end, usize::MAX).unwrap();
        assert_eq!(page.len(), 7);
        assert_eq!(page.start_offset, image.header.offset_word_list);
        assert_eq!(page.end_offset, end);
    }

    #[test]
    fn test_offset_outside_region_is_invalid_input() {
        let image = image();
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(64);

        for offset in [0, image.header.offset_word_list - 1, image.header.offset_radix + 1] {
            assert!(matches!(
                scanner.scan_forward(&mut store, offset, 5),
                Err(LookupError::InvalidInput(_))
            ));
            assert!(matches!(
                scanner.scan_backward(&mut store, offset, 5),
                Err(LookupError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_unterminated_trailing_record_ignored() {
        // grow the last translation over its terminator
        let mut image = image();
        let last_nul = image.header.offset_radix - 1;
        image.patch(last_nul, b"X");
        let mut store = store(&image);
        let mut scanner = WordListScanner::new(16);

        let page = scanner
            .scan_forward(&mut store, image.word_list_offsets["fox"], 20)
            .unwrap();
        assert_eq!(words(&page), vec!["fox"]);
        assert_eq!(page.end_offset, image.word_list_offsets["gnu"]);
    }
}
