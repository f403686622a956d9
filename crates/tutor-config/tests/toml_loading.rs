//! Integration tests for layered configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tutor_config::TutorConfig;

#[test]
fn loads_tagger_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[tagger]
endpoint = "http://localhost:8080/graphql"
request_delay_ms = 500
failure_threshold = 5
timeout_secs = 30
cache_aborted_as_empty = false
csrf_token = "csrf-from-toml"
session_cookie = "_tagger_session=abc"
"#,
        )?;

        let config: TutorConfig = Figment::from(Serialized::defaults(TutorConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.tagger.endpoint, "http://localhost:8080/graphql");
        assert_eq!(config.tagger.request_delay_ms, 500);
        assert_eq!(config.tagger.failure_threshold, 5);
        assert_eq!(config.tagger.timeout_secs, 30);
        assert!(!config.tagger.cache_aborted_as_empty);
        assert!(config.tagger.is_authenticated());
        // Untouched fields keep their defaults.
        assert_eq!(config.tagger.scryfall_api, "https://api.scryfall.com");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tutor")?;
        jail.create_file(
            ".tutor/config.toml",
            r#"
[general]
cache_path = "tags.json"
"#,
        )?;

        let config = TutorConfig::load().expect("config loads");
        assert_eq!(config.general.cache_path, "tags.json");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tutor")?;
        jail.create_file(
            ".tutor/config.toml",
            r#"
[tagger]
request_delay_ms = 400
"#,
        )?;
        jail.set_env("TUTOR_TAGGER__REQUEST_DELAY_MS", "900");
        jail.set_env("TUTOR_TAGGER__USER_AGENT", "tutor-test/1.0");

        let config = TutorConfig::load().expect("config loads");
        assert_eq!(config.tagger.request_delay_ms, 900);
        assert_eq!(config.tagger.user_agent, "tutor-test/1.0");
        Ok(())
    });
}

#[test]
fn malformed_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("TUTOR_TAGGER__FAILURE_THRESHOLD", "many");

        let err = TutorConfig::load().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
        Ok(())
    });
}

#[test]
fn invalid_threshold_loads_but_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("TUTOR_TAGGER__FAILURE_THRESHOLD", "0");

        let config = TutorConfig::load().expect("config loads");
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'tagger.failure_threshold': must be at least 1"
        );
        Ok(())
    });
}
