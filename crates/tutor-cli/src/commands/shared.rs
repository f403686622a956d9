use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::sync::watch;
use tutor_config::{TaggerConfig, TutorConfig};
use serde::Deserialize;
use tutor_core::{CardAggregate, CardFace};
use tutor_tags::{
    AbortPolicy, ClientOptions, FetchOptions, FetchReport, TagCache, TagFetcher, TaggerAuth,
    TaggerClient,
};

use crate::cli::{CacheArgs, GlobalFlags};
use crate::progress::Progress;

/// An importer record. Multi-faced cards may list their `faces`, which are
/// merged into the record's text fields.
#[derive(Deserialize)]
struct DeckRecord {
    #[serde(flatten)]
    card: CardAggregate,
    #[serde(default)]
    faces: Vec<CardFace>,
}

/// Read a deck file and validate every record.
pub fn load_deck(path: &Path) -> anyhow::Result<Vec<CardAggregate>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file {}", path.display()))?;
    let records: Vec<DeckRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of card records", path.display()))?;
    let cards: Vec<CardAggregate> = records
        .into_iter()
        .map(|record| record.card.with_faces(&record.faces))
        .collect();

    for card in &cards {
        card.validate()
            .with_context(|| format!("invalid card record in {}", path.display()))?;
    }
    tracing::debug!(path = %path.display(), cards = cards.len(), "deck loaded");
    Ok(cards)
}

/// Where the tag cache lives: the flag wins over `general.cache_path`.
/// `None` when caching is disabled or no location is configured.
pub fn cache_location(args: &CacheArgs, config: &TutorConfig) -> Option<PathBuf> {
    if args.no_cache {
        return None;
    }
    args.tag_cache.clone().or_else(|| config.general.cache_path())
}

fn client_options(config: &TaggerConfig) -> ClientOptions {
    ClientOptions {
        endpoint: config.endpoint.clone(),
        scryfall_api: config.scryfall_api.clone(),
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
    }
}

fn build_fetcher(config: &TaggerConfig) -> anyhow::Result<TagFetcher<TaggerClient>> {
    let client = TaggerClient::with_options(client_options(config))
        .context("failed to build tagger HTTP client")?;
    let policy = if config.cache_aborted_as_empty {
        AbortPolicy::CacheAsEmpty
    } else {
        AbortPolicy::LeaveUnresolved
    };

    Ok(TagFetcher::new(client)
        .with_request_delay(config.request_delay())
        .with_failure_threshold(config.failure_threshold)
        .with_abort_policy(policy))
}

fn auth(config: &TaggerConfig) -> Option<TaggerAuth> {
    config.is_authenticated().then(|| TaggerAuth {
        csrf_token: config.csrf_token.clone(),
        cookie: config.session_cookie.clone(),
    })
}

/// Raise the cancel flag on Ctrl-C so the fetch loop stops at the next card.
fn cancel_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping tag fetch");
            tx.send_replace(true);
        }
    });
    rx
}

/// Fetch oracle tags for `cards`, loading and saving the persistent cache
/// around the run.
pub async fn fetch_tags(
    cards: &[CardAggregate],
    args: &CacheArgs,
    config: &TutorConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<FetchReport> {
    let location = cache_location(args, config);
    let mut cache = match &location {
        Some(path) => TagCache::load(path)
            .with_context(|| format!("failed to load tag cache {}", path.display()))?,
        None => TagCache::new(),
    };

    let fetcher = build_fetcher(&config.tagger)?;
    let options = FetchOptions {
        use_cache: !args.no_cache,
        auth: auth(&config.tagger),
        cancel: Some(cancel_on_ctrl_c()),
    };

    let progress = Progress::bar(
        u64::try_from(cards.len()).unwrap_or(u64::MAX),
        "fetching oracle tags",
        flags,
    );
    let report = fetcher
        .fetch_tags(cards, &mut cache, &options, |done, _| {
            progress.set_position(u64::try_from(done).unwrap_or(u64::MAX));
        })
        .await;
    if report.aborted {
        progress.finish_err("tag fetch stopped early");
    } else {
        progress.finish_ok("oracle tags fetched");
    }

    if let Some(path) = &location {
        cache
            .save(path)
            .with_context(|| format!("failed to save tag cache {}", path.display()))?;
        tracing::debug!(path = %path.display(), entries = cache.len(), "tag cache saved");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tutor_core::Board;

    use super::*;

    fn write_deck(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_importer_records_with_defaults() {
        let file = write_deck(
            r#"[
                {"name": "Sol Ring", "typeLine": "Artifact", "cmc": 1, "setCode": "cmm", "collectorNumber": "400"},
                {"name": "Atraxa, Praetors' Voice", "typeLine": "Legendary Creature — Phyrexian Angel Horror", "board": "commander", "cmc": 4}
            ]"#,
        );
        let cards = load_deck(file.path()).unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].quantity, 1);
        assert_eq!(cards[0].print_identity(), Some(("cmm", "400")));
        assert_eq!(cards[1].board, Board::Commander);
    }

    #[test]
    fn faces_are_merged_into_one_card() {
        let file = write_deck(
            r#"[{
                "name": "Delver of Secrets // Insectile Aberration",
                "cmc": 1,
                "quantity": 2,
                "faces": [
                    {"name": "Delver of Secrets", "typeLine": "Creature — Human Wizard", "oracleText": "Look at the top card of your library.", "manaCost": "{U}"},
                    {"name": "Insectile Aberration", "typeLine": "Creature — Human Insect", "oracleText": "Flying"}
                ]
            }]"#,
        );
        let cards = load_deck(file.path()).unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(
            cards[0].oracle_text,
            "Look at the top card of your library.\n//\nFlying"
        );
        assert_eq!(cards[0].type_line, "Creature — Human Wizard // Creature — Human Insect");
        assert_eq!(cards[0].mana_cost, "{U}");
        assert_eq!(cards[0].quantity, 2);
    }

    #[test]
    fn rejects_zero_quantity() {
        let file = write_deck(r#"[{"name": "Forest", "quantity": 0}]"#);
        let err = load_deck(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("quantity must be at least 1"));
    }

    #[test]
    fn rejects_non_array_files() {
        let file = write_deck(r#"{"name": "Forest"}"#);
        assert!(load_deck(file.path()).is_err());
    }

    #[test]
    fn cache_flag_overrides_config_and_no_cache_disables() {
        let mut config = TutorConfig::default();
        config.general.cache_path = "from-config.json".into();

        let from_config = cache_location(&CacheArgs::default(), &config);
        assert_eq!(from_config, Some(PathBuf::from("from-config.json")));

        let flag = CacheArgs {
            tag_cache: Some(PathBuf::from("from-flag.json")),
            ..CacheArgs::default()
        };
        assert_eq!(cache_location(&flag, &config), Some(PathBuf::from("from-flag.json")));

        let disabled = CacheArgs {
            no_cache: true,
            tag_cache: Some(PathBuf::from("from-flag.json")),
        };
        assert_eq!(cache_location(&disabled, &config), None);
    }

    #[test]
    fn client_options_follow_config() {
        let config = TaggerConfig {
            endpoint: "http://localhost:1/graphql".into(),
            timeout_secs: 3,
            ..TaggerConfig::default()
        };
        let options = client_options(&config);
        assert_eq!(options.endpoint, "http://localhost:1/graphql");
        assert_eq!(options.timeout, std::time::Duration::from_secs(3));
    }

    #[test]
    fn auth_requires_both_credentials() {
        let mut config = TaggerConfig {
            csrf_token: "csrf".into(),
            ..TaggerConfig::default()
        };
        assert!(auth(&config).is_none());

        config.session_cookie = "_session=1".into();
        assert_eq!(
            auth(&config),
            Some(TaggerAuth {
                csrf_token: "csrf".into(),
                cookie: "_session=1".into(),
            })
        );
    }
}
