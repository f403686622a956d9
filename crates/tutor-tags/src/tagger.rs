//! Scryfall Tagger GraphQL client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TagError;
use crate::http::{ensure_success, lookup};
use crate::source::{CardIdentifier, TagSource, TaggerAuth};

const FETCH_CARD_QUERY: &str = "query FetchCard($set: String!, $number: String!, \
$back: Boolean = false, $moderatorView: Boolean = false) { \
card: cardBySet(set: $set, number: $number, back: $back) { \
name taggings(moderatorView: $moderatorView) { tag { name type } } } }";

/// Tag type carried by functional (oracle) tags.
const ORACLE_TAG_TYPE: &str = "ORACLE_CARD_TAG";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: FetchCardVariables<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchCardVariables<'a> {
    set: &'a str,
    number: &'a str,
    back: bool,
    moderator_view: bool,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<FetchCardData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct FetchCardData {
    card: Option<TaggedCard>,
}

#[derive(Deserialize)]
struct TaggedCard {
    #[serde(default)]
    taggings: Vec<Tagging>,
}

#[derive(Deserialize)]
struct Tagging {
    tag: Option<TagNode>,
}

#[derive(Deserialize)]
struct TagNode {
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct NamedCard {
    set: String,
    collector_number: String,
}

/// Connection settings for [`TaggerClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub endpoint: String,
    pub scryfall_api: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: "https://tagger.scryfall.com/graphql".to_string(),
            scryfall_api: "https://api.scryfall.com".to_string(),
            user_agent: "tutor/0.1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the Scryfall Tagger service.
pub struct TaggerClient {
    http: reqwest::Client,
    endpoint: String,
    scryfall_api: String,
}

impl Default for TaggerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TaggerClient {
    /// Create a client with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ClientOptions::default()).expect("reqwest client should build")
    }

    /// Create a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Http`] if the underlying `reqwest::Client` cannot
    /// be built.
    pub fn with_options(options: ClientOptions) -> Result<Self, TagError> {
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(options.user_agent)
                .timeout(options.timeout)
                .build()?,
            endpoint: options.endpoint,
            scryfall_api: options.scryfall_api.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the oracle tags of one printing.
    ///
    /// # Errors
    ///
    /// Returns [`TagError`] if the request fails, the service returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn fetch_print_tags(
        &self,
        set: &str,
        number: &str,
        auth: Option<&TaggerAuth>,
    ) -> Result<Vec<String>, TagError> {
        let body = GraphQlRequest {
            operation_name: "FetchCard",
            query: FETCH_CARD_QUERY,
            variables: FetchCardVariables {
                set,
                number,
                back: false,
                moderator_view: false,
            },
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(auth) = auth {
            request = request
                .header("X-CSRF-Token", &auth.csrf_token)
                .header(reqwest::header::COOKIE, &auth.cookie);
        }

        tracing::debug!(set, number, "requesting oracle tags");
        let resp = ensure_success(request.send().await?).await?;
        let data: GraphQlResponse = resp.json().await?;
        extract_tags(data)
    }

    /// Resolve a card name to its default printing. `Ok(None)` when Scryfall
    /// has no card by that exact name.
    async fn resolve_print(&self, name: &str) -> Result<Option<NamedCard>, TagError> {
        let url = format!(
            "{}/cards/named?exact={}",
            self.scryfall_api,
            urlencoding::encode(name)
        );
        match lookup(self.http.get(&url).send().await?).await? {
            Some(resp) => Ok(Some(resp.json().await?)),
            None => Ok(None),
        }
    }
}

impl TagSource for TaggerClient {
    async fn fetch_tags(
        &self,
        id: &CardIdentifier,
        auth: Option<&TaggerAuth>,
    ) -> Result<Vec<String>, TagError> {
        match id {
            CardIdentifier::Print { set, number } => self.fetch_print_tags(set, number, auth).await,
            CardIdentifier::Name { name } => match self.resolve_print(name).await? {
                Some(print) => {
                    self.fetch_print_tags(&print.set, &print.collector_number, auth)
                        .await
                }
                None => {
                    tracing::debug!(card = %name, "no printing found, treating as untagged");
                    Ok(Vec::new())
                }
            },
        }
    }
}

/// Pull oracle tag names out of a `FetchCard` response.
///
/// A `null` card is the service's "not found" and yields no tags. Names are
/// deduplicated, keeping first occurrence order.
fn extract_tags(response: GraphQlResponse) -> Result<Vec<String>, TagError> {
    if let Some(first) = response.errors.first() {
        return Err(TagError::Parse(first.message.clone()));
    }
    let Some(card) = response.data.and_then(|d| d.card) else {
        return Ok(Vec::new());
    };

    let mut tags: Vec<String> = Vec::new();
    for tag in card.taggings.into_iter().filter_map(|t| t.tag) {
        let is_oracle = tag.kind.as_deref().is_none_or(|k| k == ORACLE_TAG_TYPE);
        if is_oracle && !tags.contains(&tag.name) {
            tags.push(tag.name);
        }
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> Result<Vec<String>, TagError> {
        extract_tags(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn extracts_oracle_tags_only() {
        let tags = parse(
            r#"{"data": {"card": {"name": "Cultivate", "taggings": [
                {"tag": {"name": "ramp", "type": "ORACLE_CARD_TAG"}},
                {"tag": {"name": "land-ramp", "type": "ORACLE_CARD_TAG"}},
                {"tag": {"name": "forest-in-art", "type": "ILLUSTRATION_TAG"}},
                {"tag": {"name": "ramp", "type": "ORACLE_CARD_TAG"}},
                {"tag": null}
            ]}}}"#,
        )
        .unwrap();
        assert_eq!(tags, vec!["ramp", "land-ramp"]);
    }

    #[test]
    fn untyped_tags_are_kept() {
        let tags = parse(r#"{"data": {"card": {"taggings": [{"tag": {"name": "draw"}}]}}}"#).unwrap();
        assert_eq!(tags, vec!["draw"]);
    }

    #[test]
    fn null_card_is_not_found_and_empty() {
        assert!(parse(r#"{"data": {"card": null}}"#).unwrap().is_empty());
    }

    #[test]
    fn missing_taggings_field_is_empty() {
        assert!(parse(r#"{"data": {"card": {"name": "Island"}}}"#).unwrap().is_empty());
    }

    #[test]
    fn graphql_errors_are_failures() {
        let err = parse(r#"{"data": null, "errors": [{"message": "Invalid CSRF token"}]}"#)
            .unwrap_err();
        assert!(matches!(err, TagError::Parse(ref m) if m == "Invalid CSRF token"));
    }

    #[test]
    fn request_body_uses_graphql_field_names() {
        let body = GraphQlRequest {
            operation_name: "FetchCard",
            query: FETCH_CARD_QUERY,
            variables: FetchCardVariables {
                set: "cmm",
                number: "400",
                back: false,
                moderator_view: false,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["operationName"], "FetchCard");
        assert_eq!(value["variables"]["set"], "cmm");
        assert_eq!(value["variables"]["moderatorView"], false);
    }

    #[test]
    fn client_default_builds() {
        let _client = TaggerClient::default();
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_fetch_by_name() {
        let client = TaggerClient::new();
        let id = CardIdentifier::Name {
            name: "Cultivate".to_string(),
        };
        match client.fetch_tags(&id, None).await {
            Ok(tags) => println!("Cultivate: {tags:?}"),
            Err(e) => println!("Cultivate: ERROR {e}"),
        }
    }
}
