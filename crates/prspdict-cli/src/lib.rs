//! Command-line front end for PRS+ dictionary lookups.
//!
//! The `prspdict` binary is a thin wrapper around [`run`]: it parses a
//! [`Cli`], opens the dictionary and prints one result to stdout. Keeping the
//! work here lets tests drive the whole command with an in-memory writer.

#![warn(missing_docs)]

use anyhow::Context;
use prspdict_lookup::Dictionary;
use std::io::Write;

pub mod config;
pub mod output;

pub use config::{Cli, CommandKind};
pub use output::OutputFormat;

/// Run one command and print its result to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let format = OutputFormat::from_json_flag(cli.json);
    let mut dict = Dictionary::open(&cli.dictionary, cli.lookup_config())
        .with_context(|| format!("failed to open {}", cli.dictionary.display()))?;

    match cli.command {
        CommandKind::Exact => {
            let outcome = dict
                .lookup(&cli.argument)
                .with_context(|| format!("lookup of {:?} failed", cli.argument))?;
            output::write_outcome(out, &outcome, format)?;
        }
        CommandKind::List => {
            let page = dict
                .lookup_best(&cli.argument)
                .with_context(|| format!("lookup of {:?} failed", cli.argument))?;
            output::write_page(out, &page, format)?;
        }
        CommandKind::Next => {
            let offset = cli.offset()?;
            let page = dict
                .next_page(offset)
                .with_context(|| format!("failed to list words from {offset}"))?;
            output::write_page(out, &page, format)?;
        }
        CommandKind::Previous => {
            let offset = cli.offset()?;
            let page = dict
                .previous_page(offset)
                .with_context(|| format!("failed to list words before {offset}"))?;
            output::write_page(out, &page, format)?;
        }
        CommandKind::Article => {
            let offset = cli.offset()?;
            let article = dict
                .read_article(offset)
                .with_context(|| format!("failed to read article at {offset}"))?;
            output::write_article(out, &article, format)?;
        }
    }

    tracing::debug!(accesses = dict.disk_accesses(), "Command finished");
    out.flush()?;
    Ok(())
}
