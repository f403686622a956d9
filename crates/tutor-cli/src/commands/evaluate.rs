use tutor_config::TutorConfig;
use tutor_tags::enrich;

use crate::cli::{EvaluateArgs, GlobalFlags};
use crate::commands::shared;
use crate::output::{output, warn_all};

/// Handle `tutor evaluate`.
pub async fn handle(
    args: &EvaluateArgs,
    config: &TutorConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut cards = shared::load_deck(&args.deck)?;

    if args.fetch_tags {
        let scored: Vec<_> = cards
            .iter()
            .filter(|card| card.board.is_scored())
            .cloned()
            .collect();
        let report = shared::fetch_tags(&scored, &args.cache, config, flags).await?;
        warn_all(&report.errors, flags.quiet);
        cards = enrich(&cards, &report.tags);
    }

    let evaluation = tutor_eval::aggregate(&cards);
    output(&evaluation, flags.format)
}
