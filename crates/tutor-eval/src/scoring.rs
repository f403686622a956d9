//! Score, rating and narration rules shared by every category.
//!
//! All threshold math lives here so each category only supplies data.

use tutor_core::{Category, Importance, Rating};

/// Baseline category score: `min(100, round(100 * actual / target))`.
///
/// Rounds half up. A zero target is read as one. Anything at or beyond the
/// target scores 100, so surplus cards never push a category past the cap.
#[must_use]
pub fn score(actual: u32, target: u32) -> u8 {
    let target = u64::from(target.max(1));
    let actual = u64::from(actual);
    let scaled = (200 * actual + target) / (2 * target);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}

/// Count past which a category is flagged as oversaturated (1.5 × target).
#[must_use]
pub const fn saturation_point(target: u32) -> u32 {
    target.saturating_add(target / 2)
}

/// How many matched cards fell into each importance tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn from_tiers(tiers: impl IntoIterator<Item = Importance>) -> Self {
        tiers.into_iter().fold(Self::default(), |mut counts, tier| {
            match tier {
                Importance::High => counts.high += 1,
                Importance::Medium => counts.medium += 1,
                Importance::Low => counts.low += 1,
            }
            counts
        })
    }
}

/// Findings and suggestions for a scored category.
///
/// Output depends only on the arguments, in a fixed order.
#[must_use]
pub fn narrate(
    category: Category,
    actual: u32,
    target: u32,
    rating: Rating,
    tiers: TierCounts,
    advice: &str,
) -> (Vec<String>, Vec<String>) {
    let label = category.label();
    let mut findings = vec![format!(
        "You have {actual} of the recommended {target} cards in this category"
    )];

    if actual == 0 {
        findings.push(format!("No {} cards identified", label.to_lowercase()));
    } else {
        findings.push(format!(
            "{} identified by oracle tag or staple, {} by strong text match, {} by weak text match",
            tiers.high, tiers.medium, tiers.low
        ));
    }

    if actual > saturation_point(target) {
        findings.push(format!(
            "{label} is well past the recommended count; additional cards add no further score"
        ));
    }

    let mut suggestions = Vec::new();
    if actual < target {
        let missing = target - actual;
        suggestions.push(format!(
            "Add {missing} more {} {} to reach the recommended {target}: {advice}",
            label.to_lowercase(),
            plural(missing, "card", "cards"),
        ));
    }
    if rating.is_weak() {
        suggestions.push(format!(
            "{label} is a major weakness (rated {rating}); prioritize {advice}"
        ));
    }

    (findings, suggestions)
}

const fn plural<'a>(n: u32, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 10)]
    #[case(7, 10, 70)]
    #[case(10, 10, 100)]
    #[case(15, 10, 100)]
    #[case(40, 10, 100)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 8, 13)]
    #[case(3, 0, 100)]
    fn score_is_rounded_and_capped(#[case] actual: u32, #[case] target: u32, #[case] expected: u8) {
        assert_eq!(score(actual, target), expected);
    }

    #[test]
    fn half_rounds_up() {
        // 100 * 1 / 8 = 12.5
        assert_eq!(score(1, 8), 13);
        // 100 * 1 / 40 = 2.5
        assert_eq!(score(1, 40), 3);
    }

    #[test]
    fn saturation_is_one_and_a_half_times_target() {
        assert_eq!(saturation_point(10), 15);
        assert_eq!(saturation_point(3), 4);
    }

    #[test]
    fn tier_counts_tally_each_tier() {
        let counts = TierCounts::from_tiers([
            Importance::High,
            Importance::Low,
            Importance::High,
            Importance::Medium,
        ]);
        assert_eq!(
            counts,
            TierCounts {
                high: 2,
                medium: 1,
                low: 1
            }
        );
    }

    #[test]
    fn narration_for_a_weak_category() {
        let (findings, suggestions) = narrate(
            Category::Ramp,
            3,
            10,
            Rating::BelowAverage,
            TierCounts {
                high: 2,
                medium: 1,
                low: 0,
            },
            "mana rocks",
        );
        assert_eq!(
            findings,
            vec![
                "You have 3 of the recommended 10 cards in this category",
                "2 identified by oracle tag or staple, 1 by strong text match, 0 by weak text match",
            ]
        );
        assert_eq!(
            suggestions,
            vec![
                "Add 7 more ramp cards to reach the recommended 10: mana rocks",
                "Ramp is a major weakness (rated below-average); prioritize mana rocks",
            ]
        );
    }

    #[test]
    fn narration_at_target_has_no_suggestions() {
        let (_, suggestions) = narrate(
            Category::BoardWipes,
            3,
            3,
            Rating::Excellent,
            TierCounts::default(),
            "wraths",
        );
        assert!(suggestions.is_empty());
    }

    #[test]
    fn narration_flags_oversaturation_and_singular_card() {
        let (findings, _) = narrate(
            Category::WinConditions,
            9,
            5,
            Rating::Excellent,
            TierCounts::default(),
            "finishers",
        );
        assert!(findings.iter().any(|f| f.contains("well past")));

        let (_, suggestions) = narrate(
            Category::WinConditions,
            4,
            5,
            Rating::Good,
            TierCounts::default(),
            "finishers",
        );
        assert_eq!(
            suggestions,
            vec!["Add 1 more win conditions card to reach the recommended 5: finishers"]
        );
    }
}
