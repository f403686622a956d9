//! Imported card records.

use serde::{Deserialize, Serialize};

use crate::enums::Board;
use crate::errors::CoreError;

/// Separator placed between face oracle texts of a multi-faced card.
pub const FACE_SEPARATOR: &str = "\n//\n";

/// One resolved card occurrence in a deck, as handed over by the importer.
///
/// Records are never mutated by the evaluation engine. Tag enrichment builds
/// a new record through [`CardAggregate::with_tags`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAggregate {
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    /// Oracle text of every face, joined with [`FACE_SEPARATOR`].
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub mana_cost: String,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub board: Board,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Empty means either "not yet queried" or "queried, no tags"; only the
    /// tag cache tells the two apart.
    #[serde(default)]
    pub oracle_tags: Vec<String>,
    /// Print identity, used to look tags up by set and collector number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

fn join_faces(faces: &[CardFace], field: fn(&CardFace) -> &str, separator: &str) -> String {
    faces
        .iter()
        .map(field)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// One face of a multi-faced card before merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub mana_cost: String,
}

impl CardAggregate {
    /// Create a single-faced mainboard card with quantity 1.
    #[must_use]
    pub fn new(name: impl Into<String>, type_line: impl Into<String>, oracle_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: type_line.into(),
            oracle_text: oracle_text.into(),
            mana_cost: String::new(),
            cmc: 0.0,
            colors: Vec::new(),
            board: Board::Mainboard,
            quantity: 1,
            oracle_tags: Vec::new(),
            set_code: None,
            collector_number: None,
        }
    }

    /// Merge the faces of a multi-faced card into one entity.
    ///
    /// Names and type lines are joined with ` // `, oracle texts with
    /// [`FACE_SEPARATOR`]. The mana cost is taken from the front face.
    #[must_use]
    pub fn merge_faces(faces: &[CardFace]) -> Self {
        let mut card = Self::new(
            join_faces(faces, |f| f.name.as_str(), " // "),
            join_faces(faces, |f| f.type_line.as_str(), " // "),
            join_faces(faces, |f| f.oracle_text.as_str(), FACE_SEPARATOR),
        );
        card.mana_cost = faces.first().map(|f| f.mana_cost.clone()).unwrap_or_default();
        card
    }

    /// Replace name, type line, oracle text and mana cost with the merged
    /// `faces`, keeping everything else. An empty slice changes nothing.
    #[must_use]
    pub fn with_faces(self, faces: &[CardFace]) -> Self {
        if faces.is_empty() {
            return self;
        }
        let merged = Self::merge_faces(faces);
        Self {
            name: merged.name,
            type_line: merged.type_line,
            oracle_text: merged.oracle_text,
            mana_cost: merged.mana_cost,
            ..self
        }
    }

    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_cmc(mut self, cmc: f64) -> Self {
        self.cmc = cmc;
        self
    }

    #[must_use]
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_print(mut self, set_code: impl Into<String>, collector_number: impl Into<String>) -> Self {
        self.set_code = Some(set_code.into());
        self.collector_number = Some(collector_number.into());
        self
    }

    /// Return a copy of this record carrying `tags` as its oracle tags.
    #[must_use]
    pub fn with_tags<I, S>(&self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            oracle_tags: tags.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Whether the type line contains "land" (case-insensitive).
    #[must_use]
    pub fn is_land(&self) -> bool {
        self.type_line.to_lowercase().contains("land")
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.oracle_tags.iter().any(|t| t == tag)
    }

    /// Converted mana cost, with negative or non-finite values read as zero.
    #[must_use]
    pub fn effective_cmc(&self) -> f64 {
        if self.cmc.is_finite() && self.cmc > 0.0 {
            self.cmc
        } else {
            0.0
        }
    }

    /// Set code and collector number, when both are present and non-empty.
    #[must_use]
    pub fn print_identity(&self) -> Option<(&str, &str)> {
        match (self.set_code.as_deref(), self.collector_number.as_deref()) {
            (Some(set), Some(number)) if !set.is_empty() && !number.is_empty() => {
                Some((set, number))
            }
            _ => None,
        }
    }

    /// Check the importer-side invariants of a record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is empty, the quantity
    /// is zero, or `cmc` is negative or non-finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("card name must not be empty".to_string()));
        }
        if self.quantity == 0 {
            return Err(CoreError::Validation(format!(
                "{}: quantity must be at least 1",
                self.name
            )));
        }
        if !self.cmc.is_finite() || self.cmc < 0.0 {
            return Err(CoreError::Validation(format!(
                "{}: cmc must be a non-negative number, got {}",
                self.name, self.cmc
            )));
        }
        Ok(())
    }
}
