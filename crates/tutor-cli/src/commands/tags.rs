use tutor_config::TutorConfig;
use tutor_tags::fetch_tags_by_name;

use crate::cli::{GlobalFlags, TagsArgs};
use crate::commands::shared;
use crate::output::{output, warn_all};

/// Handle `tutor tags`.
pub async fn handle(
    args: &TagsArgs,
    config: &TutorConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let cards = shared::load_deck(&args.deck)?;

    let report = if args.by_name {
        let names: Vec<String> = cards.iter().map(|card| card.name.clone()).collect();
        fetch_tags_by_name(&names)
    } else {
        shared::fetch_tags(&cards, &args.cache, config, flags).await?
    };

    warn_all(&report.errors, flags.quiet);
    output(&report, flags.format)
}
