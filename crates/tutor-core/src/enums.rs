//! Board, category, rating and importance enums for Tutor.
//!
//! All enums serialize as `kebab-case` or `snake_case` strings and expose an
//! `as_str()` matching their serialized form.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Which list a card belongs to within a deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Board {
    #[default]
    Mainboard,
    Commander,
    Sideboard,
    Companion,
}

impl Board {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainboard => "mainboard",
            Self::Commander => "commander",
            Self::Sideboard => "sideboard",
            Self::Companion => "companion",
        }
    }

    /// Whether cards on this board take part in deck scoring.
    #[must_use]
    pub const fn is_scored(self) -> bool {
        matches!(self, Self::Mainboard | Self::Commander)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// Ordinal rating bucket derived from a 0–100 category score.
///
/// ```text
/// score >= 90 → excellent
/// score >= 70 → good
/// score >= 40 → average
/// score >= 20 → below-average
/// otherwise   → poor
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Poor,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl Rating {
    /// Bucket a 0–100 category score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            40..=69 => Self::Average,
            20..=39 => Self::BelowAverage,
            _ => Self::Poor,
        }
    }

    /// Bucket a deck-level rating on the 0–10 scale.
    ///
    /// These thresholds are independent of [`Rating::from_score`]; the two
    /// scales are not interchangeable.
    #[must_use]
    pub fn from_ten_point(rating: f64) -> Self {
        if rating >= 8.0 {
            Self::Excellent
        } else if rating >= 6.5 {
            Self::Good
        } else if rating >= 5.0 {
            Self::Average
        } else if rating >= 3.0 {
            Self::BelowAverage
        } else {
            Self::Poor
        }
    }

    /// Poor and below-average ratings call for stronger suggestions.
    #[must_use]
    pub const fn is_weak(self) -> bool {
        matches!(self, Self::Poor | Self::BelowAverage)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::BelowAverage => "below-average",
            Self::Average => "average",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Importance
// ---------------------------------------------------------------------------

/// How confidently a card was placed in a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Functional category a deck is scored on, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ramp,
    CardAdvantage,
    Interaction,
    WinConditions,
    TargetedRemoval,
    BoardWipes,
    ManaBase,
    Synergy,
    Protection,
}

impl Category {
    /// Every category, in the order the aggregator reports them.
    pub const ALL: [Self; 9] = [
        Self::Ramp,
        Self::CardAdvantage,
        Self::Interaction,
        Self::WinConditions,
        Self::TargetedRemoval,
        Self::BoardWipes,
        Self::ManaBase,
        Self::Synergy,
        Self::Protection,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ramp => "ramp",
            Self::CardAdvantage => "card_advantage",
            Self::Interaction => "interaction",
            Self::WinConditions => "win_conditions",
            Self::TargetedRemoval => "targeted_removal",
            Self::BoardWipes => "board_wipes",
            Self::ManaBase => "mana_base",
            Self::Synergy => "synergy",
            Self::Protection => "protection",
        }
    }

    /// Human-readable label used in findings and suggestions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ramp => "Ramp",
            Self::CardAdvantage => "Card Advantage",
            Self::Interaction => "Interaction",
            Self::WinConditions => "Win Conditions",
            Self::TargetedRemoval => "Targeted Removal",
            Self::BoardWipes => "Board Wipes",
            Self::ManaBase => "Mana Base",
            Self::Synergy => "Synergy",
            Self::Protection => "Protection",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, Rating::Excellent)]
    #[case(90, Rating::Excellent)]
    #[case(89, Rating::Good)]
    #[case(70, Rating::Good)]
    #[case(69, Rating::Average)]
    #[case(40, Rating::Average)]
    #[case(39, Rating::BelowAverage)]
    #[case(20, Rating::BelowAverage)]
    #[case(19, Rating::Poor)]
    #[case(0, Rating::Poor)]
    fn score_buckets_are_exact(#[case] score: u8, #[case] expected: Rating) {
        assert_eq!(Rating::from_score(score), expected);
    }

    #[rstest]
    #[case(10.0, Rating::Excellent)]
    #[case(8.0, Rating::Excellent)]
    #[case(7.9, Rating::Good)]
    #[case(6.5, Rating::Good)]
    #[case(5.0, Rating::Average)]
    #[case(4.99, Rating::BelowAverage)]
    #[case(3.0, Rating::BelowAverage)]
    #[case(2.9, Rating::Poor)]
    fn ten_point_buckets(#[case] rating: f64, #[case] expected: Rating) {
        assert_eq!(Rating::from_ten_point(rating), expected);
    }

    #[test]
    fn ten_point_scale_differs_from_score_scale() {
        assert_eq!(Rating::from_ten_point(8.5), Rating::Excellent);
        assert_eq!(Rating::from_score(85), Rating::Good);
    }

    #[test]
    fn rating_serializes_kebab_case() {
        let json = serde_json::to_string(&Rating::BelowAverage).unwrap();
        assert_eq!(json, "\"below-average\"");
        assert_eq!(Rating::BelowAverage.to_string(), "below-average");
    }

    #[test]
    fn only_poor_and_below_average_are_weak() {
        assert!(Rating::Poor.is_weak());
        assert!(Rating::BelowAverage.is_weak());
        assert!(!Rating::Average.is_weak());
        assert!(!Rating::Excellent.is_weak());
    }

    #[test]
    fn scored_boards() {
        assert!(Board::Mainboard.is_scored());
        assert!(Board::Commander.is_scored());
        assert!(!Board::Sideboard.is_scored());
        assert!(!Board::Companion.is_scored());
    }

    #[test]
    fn category_ids_match_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
