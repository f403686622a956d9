use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a deck and print its category and deck-wide assessment.
    Evaluate(EvaluateArgs),
    /// Fetch oracle tags for every card in a deck file.
    Tags(TagsArgs),
}

/// Arguments for `tutor evaluate`.
#[derive(Clone, Debug, Args)]
pub struct EvaluateArgs {
    /// Deck file: a JSON array of card records.
    pub deck: PathBuf,
    /// Fetch oracle tags before evaluating.
    #[arg(long)]
    pub fetch_tags: bool,
    #[command(flatten)]
    pub cache: CacheArgs,
}

/// Arguments for `tutor tags`.
#[derive(Clone, Debug, Args)]
pub struct TagsArgs {
    /// Deck file: a JSON array of card records.
    pub deck: PathBuf,
    /// Use the legacy name-only lookup (never contacts the service).
    #[arg(long)]
    pub by_name: bool,
    #[command(flatten)]
    pub cache: CacheArgs,
}

/// Tag cache controls shared by every fetching command.
#[derive(Clone, Debug, Default, Args)]
pub struct CacheArgs {
    /// Neither read nor write the tag cache.
    #[arg(long)]
    pub no_cache: bool,
    /// Persistent tag cache file (overrides `general.cache_path`).
    #[arg(long, value_name = "PATH")]
    pub tag_cache: Option<PathBuf>,
}
