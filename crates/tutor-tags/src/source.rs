//! The seam between the fetcher and whatever answers tag lookups.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use tutor_core::CardAggregate;

use crate::error::TagError;

/// How a card is identified towards the tagging service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CardIdentifier {
    /// A specific printing: set code plus collector number.
    Print { set: String, number: String },
    /// Fallback when the importer supplied no print identity.
    Name { name: String },
}

impl CardIdentifier {
    /// Prefer the print identity, fall back to the card name.
    #[must_use]
    pub fn for_card(card: &CardAggregate) -> Self {
        match card.print_identity() {
            Some((set, number)) => Self::Print {
                set: set.to_lowercase(),
                number: number.to_string(),
            },
            None => Self::Name {
                name: card.name.clone(),
            },
        }
    }
}

impl fmt::Display for CardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Print { set, number } => write!(f, "{set}/{number}"),
            Self::Name { name } => f.write_str(name),
        }
    }
}

/// Session credentials some tagging endpoints require.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerAuth {
    pub csrf_token: String,
    pub cookie: String,
}

/// Anything that can resolve one card identifier into its oracle tags.
///
/// `Ok(vec![])` is a valid answer meaning the card has no tags (or the
/// service has no record of it). Any `Err` counts as a failed lookup.
pub trait TagSource {
    fn fetch_tags(
        &self,
        id: &CardIdentifier,
        auth: Option<&TaggerAuth>,
    ) -> impl Future<Output = Result<Vec<String>, TagError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_prefers_print_identity() {
        let card = CardAggregate::new("Sol Ring", "Artifact", "").with_print("CMM", "400");
        assert_eq!(
            CardIdentifier::for_card(&card),
            CardIdentifier::Print {
                set: "cmm".to_string(),
                number: "400".to_string()
            }
        );
    }

    #[test]
    fn identifier_falls_back_to_name() {
        let card = CardAggregate::new("Sol Ring", "Artifact", "");
        let id = CardIdentifier::for_card(&card);
        assert_eq!(
            id,
            CardIdentifier::Name {
                name: "Sol Ring".to_string()
            }
        );
        assert_eq!(id.to_string(), "Sol Ring");
    }
}
