//! Evaluation results handed to the presentation layer.
//!
//! These are plain data: computed fresh on every evaluation, never cached,
//! never carrying rendering concerns.

use serde::{Deserialize, Serialize};

use crate::enums::{Category, Importance, Rating};

/// Why one card was placed in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardJudgment {
    pub card: String,
    pub importance: Importance,
    pub reasoning: String,
}

/// Output of one category evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEvaluation {
    pub actual_count: u32,
    pub target_count: u32,
    /// 0–100.
    pub score: u8,
    pub rating: Rating,
    pub findings: Vec<String>,
    pub cards: Vec<CardJudgment>,
    pub suggestions: Vec<String>,
}

impl CategoryEvaluation {
    /// The category score on the deck-level 0–10 scale.
    #[must_use]
    pub fn ten_point_rating(&self) -> f64 {
        f64::from(self.score) / 10.0
    }
}

/// A category evaluation labelled with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: Category,
    pub label: String,
    #[serde(flatten)]
    pub evaluation: CategoryEvaluation,
}

/// Deck-wide assessment: every category plus deck scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckEvaluation {
    pub total_cards: u32,
    pub average_cmc: f64,
    pub land_count: u32,
    pub mana_sources: u32,
    /// Percentage of mainboard entries carrying at least one oracle tag.
    pub tag_coverage: f64,
    /// Mean of the ramp, card advantage, interaction and win condition
    /// ratings on the 0–10 scale.
    pub overall_rating: f64,
    pub overall_tier: Rating,
    pub categories: Vec<CategoryReport>,
    pub suggestions: Vec<String>,
}

impl DeckEvaluation {
    /// Look up the evaluation of a single category.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryEvaluation> {
        self.categories
            .iter()
            .find(|report| report.category == category)
            .map(|report| &report.evaluation)
    }
}
