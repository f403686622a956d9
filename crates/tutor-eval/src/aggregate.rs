//! Deck-wide aggregation over every category evaluator.

use tutor_core::{Board, CardAggregate, Category, CategoryReport, DeckEvaluation, Rating};

use crate::evaluator::evaluate_category;

/// Below this many lands plus ramp pieces the deck is short on mana.
pub const MIN_MANA_SOURCES: u32 = 45;

/// Ramp, card advantage and interaction below this 0–10 rating get a suggestion.
pub const MIN_CORE_RATING: f64 = 6.0;

/// Win conditions below this 0–10 rating get a suggestion.
pub const MIN_WIN_CONDITION_RATING: f64 = 5.0;

/// Average mana value above which the curve is considered too high.
pub const MAX_AVERAGE_CMC: f64 = 3.5;

pub const MIN_BOARD_WIPES: u32 = 2;

/// Tag coverage percentage below which heuristic matching dominates.
pub const MIN_TAG_COVERAGE: f64 = 50.0;

/// The numbers the deck-level suggestions are derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionInputs {
    pub land_count: u32,
    pub ramp_count: u32,
    pub mana_sources: u32,
    pub ramp_rating: f64,
    pub card_advantage_rating: f64,
    pub interaction_rating: f64,
    pub win_condition_rating: f64,
    pub average_cmc: f64,
    pub board_wipes: u32,
    pub tag_coverage: f64,
}

/// Evaluate a whole deck.
///
/// Only mainboard and commander entries are scored; sideboard and companion
/// entries are ignored. Never fails: an empty deck yields zeroes and the
/// lowest ratings.
#[must_use]
pub fn aggregate(cards: &[CardAggregate]) -> DeckEvaluation {
    let (mainboard, commanders): (Vec<CardAggregate>, Vec<CardAggregate>) = cards
        .iter()
        .filter(|card| card.board.is_scored())
        .cloned()
        .partition(|card| card.board == Board::Mainboard);

    let scored = || mainboard.iter().chain(&commanders);
    let total_cards = scored()
        .map(|card| card.quantity)
        .fold(0, u32::saturating_add);
    let average_cmc = if total_cards == 0 {
        0.0
    } else {
        scored()
            .map(|card| card.effective_cmc() * f64::from(card.quantity))
            .sum::<f64>()
            / f64::from(total_cards)
    };
    let land_count = mainboard
        .iter()
        .filter(|card| card.is_land())
        .map(|card| card.quantity)
        .fold(0, u32::saturating_add);
    let tag_coverage = tag_coverage(&mainboard);

    let categories: Vec<CategoryReport> = Category::ALL
        .into_iter()
        .map(|category| CategoryReport {
            category,
            label: category.label().to_string(),
            evaluation: evaluate_category(category, &mainboard, &commanders),
        })
        .collect();

    let report = |category: Category| {
        categories
            .iter()
            .find(|report| report.category == category)
            .map(|report| &report.evaluation)
    };
    let ten_point = |category: Category| report(category).map_or(0.0, |e| e.ten_point_rating());
    let count = |category: Category| report(category).map_or(0, |e| e.actual_count);

    let ramp_count = count(Category::Ramp);
    let mana_sources = land_count.saturating_add(ramp_count);
    let inputs = SuggestionInputs {
        land_count,
        ramp_count,
        mana_sources,
        ramp_rating: ten_point(Category::Ramp),
        card_advantage_rating: ten_point(Category::CardAdvantage),
        interaction_rating: ten_point(Category::Interaction),
        win_condition_rating: ten_point(Category::WinConditions),
        average_cmc,
        board_wipes: count(Category::BoardWipes),
        tag_coverage,
    };
    let overall_rating = (inputs.ramp_rating
        + inputs.card_advantage_rating
        + inputs.interaction_rating
        + inputs.win_condition_rating)
        / 4.0;
    let suggestions = deck_suggestions(&inputs);

    tracing::debug!(
        total_cards,
        land_count,
        mana_sources,
        overall_rating,
        suggestions = suggestions.len(),
        "deck evaluated"
    );

    DeckEvaluation {
        total_cards,
        average_cmc,
        land_count,
        mana_sources,
        tag_coverage,
        overall_rating,
        overall_tier: Rating::from_ten_point(overall_rating),
        categories,
        suggestions,
    }
}

/// Percentage of mainboard entries with at least one oracle tag.
fn tag_coverage(mainboard: &[CardAggregate]) -> f64 {
    if mainboard.is_empty() {
        return 0.0;
    }
    let tagged = mainboard
        .iter()
        .filter(|card| !card.oracle_tags.is_empty())
        .count();
    // Deck sizes are far below f64's exact integer range.
    #[allow(clippy::cast_precision_loss)]
    let ratio = tagged as f64 / mainboard.len() as f64;
    ratio * 100.0
}

/// Deck-level suggestions, in a fixed order. Every condition is checked
/// independently.
#[must_use]
pub fn deck_suggestions(inputs: &SuggestionInputs) -> Vec<String> {
    let mut suggestions = Vec::new();

    if inputs.mana_sources < MIN_MANA_SOURCES {
        suggestions.push(format!(
            "Add more mana sources: {} lands plus {} ramp pieces make {}, aim for at least {MIN_MANA_SOURCES}",
            inputs.land_count, inputs.ramp_count, inputs.mana_sources
        ));
    }
    if inputs.ramp_rating < MIN_CORE_RATING {
        suggestions.push(format!(
            "Strengthen your ramp (rated {:.1}/10) with more mana rocks, dorks or land searches",
            inputs.ramp_rating
        ));
    }
    if inputs.card_advantage_rating < MIN_CORE_RATING {
        suggestions.push(format!(
            "Add more card draw and card advantage (rated {:.1}/10)",
            inputs.card_advantage_rating
        ));
    }
    if inputs.interaction_rating < MIN_CORE_RATING {
        suggestions.push(format!(
            "Add more interaction such as removal and counterspells (rated {:.1}/10)",
            inputs.interaction_rating
        ));
    }
    if inputs.win_condition_rating < MIN_WIN_CONDITION_RATING {
        suggestions.push(format!(
            "Add more finishers to close out games (win conditions rated {:.1}/10)",
            inputs.win_condition_rating
        ));
    }
    if inputs.average_cmc > MAX_AVERAGE_CMC {
        suggestions.push(format!(
            "Lower your mana curve: average mana value is {:.2}, aim for {MAX_AVERAGE_CMC} or less",
            inputs.average_cmc
        ));
    }
    if inputs.board_wipes < MIN_BOARD_WIPES {
        suggestions.push(format!(
            "Include more mass removal: {} board wipes found, aim for at least {MIN_BOARD_WIPES}",
            inputs.board_wipes
        ));
    }
    if inputs.tag_coverage < MIN_TAG_COVERAGE {
        // Truncated so a value just under the threshold never prints as the threshold.
        let shown = (inputs.tag_coverage * 10.0).floor() / 10.0;
        suggestions.push(format!(
            "Only {shown:.1}% of mainboard cards have oracle tags; categorization may be less accurate"
        ));
    }

    suggestions
}
