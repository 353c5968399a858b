//! Command-line arguments.
//!
//! The positional form mirrors the classic reader: `prspdict <dict> <cmd> <arg>`.
//! Lookup tunables can also come from the environment:
//!
//! - `PRSPDICT_PAGE_SIZE`
//! - `PRSPDICT_SCAN_BUFFER_LEN`
//! - `PRSPDICT_MAX_RESOLVE_CALLS`

use clap::{Parser, ValueEnum};
use prspdict_lookup::LookupConfig;
use prspdict_lookup::config::{
    DEFAULT_MAX_RESOLVE_CALLS, DEFAULT_PAGE_SIZE, DEFAULT_SCAN_BUFFER_LEN,
};
use std::path::PathBuf;

/// Arguments for a single lookup.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "prspdict",
    about = "Look words up in a PRS+ dictionary file",
    version
)]
pub struct Cli {
    /// Dictionary file
    pub dictionary: PathBuf,

    /// What to do with ARGUMENT
    #[arg(value_enum)]
    pub command: CommandKind,

    /// Word to look up, or a byte offset for n, p and x
    #[arg(allow_hyphen_values = true)]
    pub argument: String,

    /// Print results as JSON instead of the list/match text format
    #[arg(long)]
    pub json: bool,

    /// Records per word-list page
    #[arg(long, env = "PRSPDICT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Bytes read per word-list chunk
    #[arg(long, env = "PRSPDICT_SCAN_BUFFER_LEN", default_value_t = DEFAULT_SCAN_BUFFER_LEN)]
    pub scan_buffer_len: usize,

    /// Resolver steps allowed per query
    #[arg(long, env = "PRSPDICT_MAX_RESOLVE_CALLS", default_value_t = DEFAULT_MAX_RESOLVE_CALLS)]
    pub max_resolve_calls: usize,
}

/// Lookup commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommandKind {
    /// Exact match; the best-match list if there is none
    #[value(name = "e", alias = "exact")]
    Exact,
    /// Best-match list
    #[value(name = "l", alias = "list")]
    List,
    /// Page starting at an offset
    #[value(name = "n", alias = "next")]
    Next,
    /// Page ending at an offset
    #[value(name = "p", alias = "prev")]
    Previous,
    /// Article at an offset
    #[value(name = "x", alias = "article")]
    Article,
}

impl Cli {
    /// Parse from the process arguments.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Lookup settings from the flags.
    pub const fn lookup_config(&self) -> LookupConfig {
        LookupConfig {
            page_size: self.page_size,
            scan_buffer_len: self.scan_buffer_len,
            max_resolve_calls: self.max_resolve_calls,
        }
    }

    /// The argument as a byte offset.
    pub fn offset(&self) -> anyhow::Result<u32> {
        self.argument.trim().parse().map_err(|_| {
            anyhow::anyhow!(
                "expected a byte offset for '{}', got {:?}",
                self.command_name(),
                self.argument
            )
        })
    }

    fn command_name(&self) -> &'static str {
        match self.command {
            CommandKind::Exact => "e",
            CommandKind::List => "l",
            CommandKind::Next => "n",
            CommandKind::Previous => "p",
            CommandKind::Article => "x",
        }
    }
}
