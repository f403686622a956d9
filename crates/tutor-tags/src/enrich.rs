//! Attach fetched tags to imported card records.

use std::collections::BTreeMap;

use tutor_core::CardAggregate;

/// Return new records carrying the fetched tags.
///
/// Cards absent from `tags` keep whatever tags they were imported with. The
/// input slice is left untouched.
#[must_use]
pub fn enrich(cards: &[CardAggregate], tags: &BTreeMap<String, Vec<String>>) -> Vec<CardAggregate> {
    cards
        .iter()
        .map(|card| match tags.get(&card.name) {
            Some(found) => card.with_tags(found.iter().cloned()),
            None => card.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn enrich_replaces_tags_of_known_cards_only() {
        let cards = vec![
            CardAggregate::new("Cultivate", "Sorcery", ""),
            CardAggregate::new("Opt", "Instant", "").with_tags(["cantrip"]),
        ];
        let mut tags = BTreeMap::new();
        tags.insert("Cultivate".to_string(), vec!["ramp".to_string()]);

        let enriched = enrich(&cards, &tags);
        assert_eq!(enriched[0].oracle_tags, vec!["ramp"]);
        assert_eq!(enriched[1].oracle_tags, vec!["cantrip"]);
        assert!(cards[0].oracle_tags.is_empty());
    }

    #[test]
    fn confirmed_empty_clears_imported_tags() {
        let cards = vec![CardAggregate::new("Island", "Basic Land — Island", "").with_tags(["stale"])];
        let mut tags = BTreeMap::new();
        tags.insert("Island".to_string(), Vec::new());
        assert!(enrich(&cards, &tags)[0].oracle_tags.is_empty());
    }
}
