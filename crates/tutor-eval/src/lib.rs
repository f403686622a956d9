//! # tutor-eval
//!
//! Category evaluators and deck aggregation for Tutor.
//!
//! Everything here is synchronous and pure: evaluations are a function of the
//! card list alone, share no mutable state, and never fail.
//!
//! - [`descriptor`]: per-category tag vocabularies, staples and text rules
//! - [`scoring`]: score, rating and narration rules shared by all categories
//! - [`CategoryEvaluator`]: classifies and scores one category
//! - [`aggregate()`]: runs every category and derives deck-wide statistics

pub mod aggregate;
pub mod descriptor;
pub mod evaluator;
pub mod scoring;

pub use aggregate::{SuggestionInputs, aggregate, deck_suggestions};
pub use evaluator::{CategoryEvaluator, evaluate_category};
