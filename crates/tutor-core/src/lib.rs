//! # tutor-core
//!
//! Card records, evaluation types, and error types for Tutor.
//!
//! This crate provides the foundational types shared across all Tutor crates:
//! - [`CardAggregate`]: one resolved card occurrence in an imported deck
//! - Board, category, rating and importance enums
//! - Category and deck evaluation results handed to the presentation layer
//! - Cross-cutting error types

pub mod card;
pub mod enums;
pub mod errors;
pub mod evaluation;

pub use card::{CardAggregate, CardFace, FACE_SEPARATOR};
pub use enums::{Board, Category, Importance, Rating};
pub use errors::CoreError;
pub use evaluation::{CardJudgment, CategoryEvaluation, CategoryReport, DeckEvaluation};
