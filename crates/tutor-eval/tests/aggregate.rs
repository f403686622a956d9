//! Deck-level aggregation scenarios.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tutor_core::{Board, CardAggregate, Category, Rating};
use tutor_eval::aggregate;

const MANA_SOURCES_SUGGESTION: &str = "Add more mana sources";

fn basic(name: &str, quantity: u32) -> CardAggregate {
    CardAggregate::new(name, format!("Basic Land — {name}"), "").with_quantity(quantity)
}

fn rock(n: u32) -> CardAggregate {
    CardAggregate::new(format!("Rock {n}"), "Artifact", "").with_tags(["mana-rock"])
}

fn filler(n: u32) -> CardAggregate {
    CardAggregate::new(format!("Bear {n}"), "Creature — Bear", "").with_cmc(2.0)
}

proptest! {
    #[test]
    fn total_cards_is_the_sum_of_scored_quantities(
        entries in prop::collection::vec((1u32..=10, 0usize..4, 0u32..8), 0..40)
    ) {
        let boards = [Board::Mainboard, Board::Commander, Board::Sideboard, Board::Companion];
        let cards: Vec<CardAggregate> = entries
            .iter()
            .enumerate()
            .map(|(i, &(quantity, board, cmc))| {
                CardAggregate::new(format!("Card {i}"), "Creature", "")
                    .with_quantity(quantity)
                    .with_board(boards[board])
                    .with_cmc(f64::from(cmc))
            })
            .collect();
        let expected: u32 = cards
            .iter()
            .filter(|card| matches!(card.board, Board::Mainboard | Board::Commander))
            .map(|card| card.quantity)
            .sum();

        let eval = aggregate(&cards);
        prop_assert_eq!(eval.total_cards, expected);
        prop_assert!(eval.average_cmc >= 0.0 && eval.average_cmc <= 7.0);
        prop_assert_eq!(eval.categories.len(), Category::ALL.len());
    }
}

#[test]
fn average_cmc_of_two_cards() {
    let deck = vec![
        CardAggregate::new("One", "Instant", "").with_cmc(1.0),
        CardAggregate::new("Zero", "Artifact", "").with_cmc(0.0),
    ];
    let eval = aggregate(&deck);
    assert_eq!(eval.total_cards, 2);
    assert!((eval.average_cmc - 0.5).abs() < f64::EPSILON);
}

#[test]
fn forty_mana_sources_ask_for_more() {
    let mut deck = vec![basic("Forest", 18), basic("Island", 18)];
    deck.extend((1..=4).map(rock));
    let eval = aggregate(&deck);

    assert_eq!(eval.land_count, 36);
    assert_eq!(eval.category(Category::Ramp).map(|e| e.actual_count), Some(4));
    assert_eq!(eval.mana_sources, 40);
    assert!(
        eval.suggestions
            .iter()
            .any(|s| s.starts_with(MANA_SOURCES_SUGGESTION))
    );
}

#[test]
fn forty_five_mana_sources_are_enough() {
    let mut deck = vec![basic("Forest", 20), basic("Island", 20)];
    deck.extend((1..=5).map(rock));
    let eval = aggregate(&deck);

    assert_eq!(eval.mana_sources, 45);
    assert!(
        !eval
            .suggestions
            .iter()
            .any(|s| s.starts_with(MANA_SOURCES_SUGGESTION))
    );
}

#[test]
fn sideboard_and_companion_are_not_scored() {
    let deck = vec![
        filler(1),
        rock(1).with_board(Board::Sideboard),
        rock(2).with_board(Board::Companion).with_quantity(3),
        basic("Forest", 5).with_board(Board::Sideboard),
    ];
    let eval = aggregate(&deck);

    assert_eq!(eval.total_cards, 1);
    assert_eq!(eval.land_count, 0);
    assert_eq!(eval.category(Category::Ramp).map(|e| e.actual_count), Some(0));
}

#[test]
fn commander_counts_toward_totals_but_not_lands_or_coverage() {
    let commander = CardAggregate::new("Dryad Arbor", "Land Creature — Forest Dryad", "")
        .with_board(Board::Commander)
        .with_cmc(0.0);
    let deck = vec![commander, filler(1), filler(2).with_tags(["vanilla"])];
    let eval = aggregate(&deck);

    assert_eq!(eval.total_cards, 3);
    assert_eq!(eval.land_count, 0);
    assert!((eval.tag_coverage - 50.0).abs() < f64::EPSILON);
}

#[test]
fn placeholder_category_is_reported() {
    let eval = aggregate(&[filler(1)]);
    let protection = eval.category(Category::Protection).unwrap();

    assert_eq!(protection.target_count, 10);
    assert_eq!(protection.actual_count, 0);
    assert_eq!(protection.suggestions, vec!["Protection evaluation coming soon"]);
}

#[test]
fn overall_rating_averages_the_four_core_categories() {
    // Ramp 10/10, everything else empty: (10 + 0 + 0 + 0) / 4 = 2.5
    let deck: Vec<CardAggregate> = (1..=10).map(rock).collect();
    let eval = aggregate(&deck);

    assert!((eval.overall_rating - 2.5).abs() < f64::EPSILON);
    assert_eq!(eval.overall_tier, Rating::Poor);
    assert_eq!(
        eval.suggestions.iter().filter(|s| s.starts_with("Strengthen your ramp")).count(),
        0
    );
}

#[test]
fn categories_follow_catalogue_order() {
    let eval = aggregate(&[filler(1)]);
    let order: Vec<Category> = eval.categories.iter().map(|report| report.category).collect();
    assert_eq!(order, Category::ALL.to_vec());
}

#[test]
fn aggregation_is_deterministic() {
    let mut deck = vec![
        basic("Swamp", 35),
        CardAggregate::new("Toxic Deluge", "Sorcery", "As an additional cost to cast this spell, pay X life. All creatures get -X/-X until end of turn.").with_cmc(3.0),
        CardAggregate::new("Night's Whisper", "Sorcery", "You draw two cards and you lose 2 life.").with_cmc(2.0),
        CardAggregate::new("Exsanguinate", "Sorcery", "Each opponent loses X life. You gain life equal to the life lost this way.").with_cmc(2.0),
        CardAggregate::new("K'rrik, Son of Yawgmoth", "Legendary Creature — Phyrexian Horror Minion", "Lifelink")
            .with_board(Board::Commander)
            .with_cmc(7.0),
    ];
    deck.extend((1..=3).map(filler));

    let first = aggregate(&deck);
    let second = aggregate(&deck);
    assert_eq!(first, second);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["totalCards"], 42);
    assert_eq!(json["categories"][0]["category"], "ramp");
    assert!(json["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
}

#[test]
fn oversized_quantities_saturate_instead_of_overflowing() {
    let deck = vec![
        basic("Forest", 3_000_000_000),
        basic("Island", 3_000_000_000),
        rock(1).with_quantity(3_000_000_000),
    ];

    let eval = aggregate(&deck);

    assert_eq!(eval.total_cards, u32::MAX);
    assert_eq!(eval.land_count, u32::MAX);
    assert_eq!(eval.mana_sources, u32::MAX);
    assert!(eval.average_cmc.is_finite());
    let ramp = eval.category(Category::Ramp).unwrap();
    assert_eq!(ramp.actual_count, 3_000_000_000);
}
