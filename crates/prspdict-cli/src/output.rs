//! Result formatting.
//!
//! Text output keeps the two-shape format of the classic reader so front
//! ends that parse it keep working:
//!
//! ```text
//! list
//! <word>\t<short translation>
//! ...
//! <start_offset>\t<end_offset>
//! ```
//!
//! or `match` followed by the article text.

use prspdict_lookup::{Article, LookupOutcome, WordListPage};
use serde::Serialize;
use std::io::Write;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `list`/`match` text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Pick the format from the `--json` flag.
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Print a word-list page.
pub fn write_page<W: Write>(
    out: &mut W,
    page: &WordListPage,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, page),
        OutputFormat::Text => {
            writeln!(out, "list")?;
            let lines: Vec<String> = page
                .entries
                .iter()
                .map(|e| format!("{}\t{}", e.word, e.translation))
                .collect();
            write!(out, "{}", lines.join("\n"))?;
            writeln!(out, "\n{}\t{}", page.start_offset, page.end_offset)?;
            Ok(())
        }
    }
}

/// Print an article.
pub fn write_article<W: Write>(
    out: &mut W,
    article: &Article,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, article),
        OutputFormat::Text => {
            writeln!(out, "match")?;
            writeln!(out, "{}", article.text())?;
            Ok(())
        }
    }
}

/// Print whichever result a fallback lookup produced.
pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &LookupOutcome,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match (outcome, format) {
        (_, OutputFormat::Json) => write_json(out, outcome),
        (LookupOutcome::Article(article), OutputFormat::Text) => write_article(out, article, format),
        (LookupOutcome::Page(page), OutputFormat::Text) => write_page(out, page, format),
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
