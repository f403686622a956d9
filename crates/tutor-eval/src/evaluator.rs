//! Category evaluation: classify candidate cards, then score and narrate.

use std::collections::BTreeSet;

use tutor_core::{
    CardAggregate, CardJudgment, Category, CategoryEvaluation, Importance, Rating,
};

use crate::descriptor::{CategoryDescriptor, MatcherKind, SYNERGY_MECHANICS, descriptor};
use crate::scoring::{TierCounts, narrate, score};

/// Scores how well a deck fills one functional role.
///
/// Evaluation is a pure function of the card lists: no state is kept between
/// calls, so one evaluator can serve any number of decks concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEvaluator {
    category: Category,
}

/// A matched card and why it matched.
struct Matched<'a> {
    card: &'a CardAggregate,
    importance: Importance,
    reasoning: String,
}

impl CategoryEvaluator {
    #[must_use]
    pub const fn new(category: Category) -> Self {
        Self { category }
    }

    #[must_use]
    pub const fn category(self) -> Category {
        self.category
    }

    /// Evaluate the category over a deck's mainboard and commander cards.
    #[must_use]
    pub fn evaluate(
        self,
        mainboard: &[CardAggregate],
        commanders: &[CardAggregate],
    ) -> CategoryEvaluation {
        let desc = descriptor(self.category);
        let total_cards = mainboard
            .iter()
            .chain(commanders)
            .map(|card| card.quantity)
            .fold(0, u32::saturating_add);
        let target = desc.target.target(total_cards);

        let mut extra_findings = Vec::new();
        let mut extra_suggestions = Vec::new();
        let matched: Vec<Matched<'_>> = match desc.matcher {
            MatcherKind::Vocabulary => mainboard
                .iter()
                .chain(commanders)
                .filter_map(|card| classify(desc, card))
                .collect(),
            MatcherKind::Lands => {
                let matched = classify_lands(desc, mainboard);
                fixing_advice(&matched, commanders, &mut extra_suggestions);
                matched
            }
            MatcherKind::CommanderSynergy => {
                if commanders.is_empty() {
                    extra_findings
                        .push("No commander present; synergy cannot be assessed".to_string());
                    Vec::new()
                } else {
                    classify_synergy(mainboard, commanders)
                }
            }
            MatcherKind::Placeholder => return placeholder(self.category, target),
        };

        let actual = matched
            .iter()
            .map(|m| m.card.quantity)
            .fold(0, u32::saturating_add);
        let score = score(actual, target);
        let rating = Rating::from_score(score);
        let tiers = TierCounts::from_tiers(matched.iter().map(|m| m.importance));
        let (mut findings, mut suggestions) =
            narrate(self.category, actual, target, rating, tiers, desc.advice);
        findings.extend(extra_findings);
        suggestions.extend(extra_suggestions);

        CategoryEvaluation {
            actual_count: actual,
            target_count: target,
            score,
            rating,
            findings,
            cards: matched
                .into_iter()
                .map(|m| CardJudgment {
                    card: m.card.name.clone(),
                    importance: m.importance,
                    reasoning: m.reasoning,
                })
                .collect(),
            suggestions,
        }
    }
}

/// Evaluate one category over a deck's mainboard and commander cards.
#[must_use]
pub fn evaluate_category(
    category: Category,
    mainboard: &[CardAggregate],
    commanders: &[CardAggregate],
) -> CategoryEvaluation {
    CategoryEvaluator::new(category).evaluate(mainboard, commanders)
}

/// Tag vocabulary first, then named staples, then text rules.
fn classify<'a>(desc: &CategoryDescriptor, card: &'a CardAggregate) -> Option<Matched<'a>> {
    if let Some(tag) = desc.vocabulary_tag(&card.oracle_tags) {
        return Some(Matched {
            card,
            importance: Importance::High,
            reasoning: format!("Tagged `{tag}`"),
        });
    }
    if desc.is_staple(&card.name) {
        return Some(Matched {
            card,
            importance: Importance::High,
            reasoning: format!("Recognized {} staple", desc.category.label().to_lowercase()),
        });
    }
    if desc.skip_lands && card.is_land() {
        return None;
    }
    desc.match_text(&card.oracle_text, &card.type_line)
        .map(|rule| Matched {
            card,
            importance: rule.importance,
            reasoning: rule.reason.to_string(),
        })
}

/// Every land counts; tiering says how much it helps with colors.
fn classify_lands<'a>(desc: &CategoryDescriptor, mainboard: &'a [CardAggregate]) -> Vec<Matched<'a>> {
    mainboard
        .iter()
        .filter(|card| card.is_land())
        .map(|card| {
            if let Some(tag) = desc.vocabulary_tag(&card.oracle_tags) {
                return Matched {
                    card,
                    importance: Importance::High,
                    reasoning: format!("Tagged `{tag}`"),
                };
            }
            if desc.is_staple(&card.name) {
                return Matched {
                    card,
                    importance: Importance::High,
                    reasoning: "Recognized fixing land".to_string(),
                };
            }
            match desc.match_text(&card.oracle_text, &card.type_line) {
                Some(rule) => Matched {
                    card,
                    importance: rule.importance,
                    reasoning: rule.reason.to_string(),
                },
                None => Matched {
                    card,
                    importance: Importance::Medium,
                    reasoning: "Utility or colorless land".to_string(),
                },
            }
        })
        .collect()
}

/// Ask for more fixing when the commander spans several colors.
fn fixing_advice(lands: &[Matched<'_>], commanders: &[CardAggregate], suggestions: &mut Vec<String>) {
    let colors: BTreeSet<&str> = commanders
        .iter()
        .flat_map(|card| card.colors.iter().map(String::as_str))
        .collect();
    let fixing = lands
        .iter()
        .filter(|m| m.importance == Importance::High)
        .map(|m| m.card.quantity)
        .fold(0, u32::saturating_add);
    let wanted = u32::try_from(colors.len()).unwrap_or(u32::MAX).saturating_mul(2);

    if colors.len() >= 2 && fixing < wanted {
        suggestions.push(format!(
            "Your commander spans {} colors but only {fixing} lands fix colors; add dual, tri or fetch lands",
            colors.len()
        ));
    }
}

/// Overlap with the commander's oracle tags, creature types and mechanics.
fn classify_synergy<'a>(
    mainboard: &'a [CardAggregate],
    commanders: &[CardAggregate],
) -> Vec<Matched<'a>> {
    let commander_tags: BTreeSet<&str> = commanders
        .iter()
        .flat_map(|card| card.oracle_tags.iter().map(String::as_str))
        .collect();
    let subtypes: BTreeSet<String> = commanders
        .iter()
        .filter(|card| card.type_line.to_lowercase().contains("creature"))
        .flat_map(|card| creature_subtypes(&card.type_line))
        .collect();
    let commander_text = commanders
        .iter()
        .map(|card| card.oracle_text.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");
    let mechanics: Vec<&str> = SYNERGY_MECHANICS
        .iter()
        .copied()
        .filter(|phrase| commander_text.contains(phrase))
        .collect();

    mainboard
        .iter()
        .filter(|card| !card.is_land())
        .filter_map(|card| {
            let shared: Vec<&str> = card
                .oracle_tags
                .iter()
                .map(String::as_str)
                .filter(|tag| commander_tags.contains(tag))
                .collect();
            if shared.len() >= 2 {
                return Some(Matched {
                    card,
                    importance: Importance::High,
                    reasoning: format!("Shares tags with the commander: {}", shared.join(", ")),
                });
            }
            if let Some(tag) = shared.first() {
                return Some(Matched {
                    card,
                    importance: Importance::Medium,
                    reasoning: format!("Shares the `{tag}` tag with the commander"),
                });
            }

            let text = card.oracle_text.to_lowercase();
            let own_types = creature_subtypes(&card.type_line);
            if let Some(subtype) = subtypes
                .iter()
                .find(|subtype| own_types.contains(subtype) || mentions_word(&text, subtype))
            {
                return Some(Matched {
                    card,
                    importance: Importance::Medium,
                    reasoning: format!("Supports the commander's {subtype} type"),
                });
            }

            mechanics
                .iter()
                .find(|phrase| text.contains(*phrase))
                .map(|phrase| Matched {
                    card,
                    importance: Importance::Low,
                    reasoning: format!("Shares the \"{phrase}\" theme with the commander"),
                })
        })
        .collect()
}

/// Lowercased subtypes after the dash of a type line, across every face.
fn creature_subtypes(type_line: &str) -> Vec<String> {
    type_line
        .split(" // ")
        .filter_map(|face| face.split_once('—').or_else(|| face.split_once(" - ")))
        .flat_map(|(_, subtypes)| subtypes.split_whitespace())
        .map(str::to_lowercase)
        .collect()
}

fn mentions_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word || token.strip_suffix('s') == Some(word))
}

/// An inert category: no matches, fixed target, "coming soon".
fn placeholder(category: Category, target: u32) -> CategoryEvaluation {
    CategoryEvaluation {
        actual_count: 0,
        target_count: target,
        score: 0,
        rating: Rating::Poor,
        findings: Vec::new(),
        cards: Vec::new(),
        suggestions: vec![format!("{} evaluation coming soon", category.label())],
    }
}
