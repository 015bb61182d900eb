//! Deterministic element identifiers.
//!
//! Every element a rubric row or the value-set dialog exposes is addressed by
//! an id derived from the row ordinal (or the dialog id). The scheme is
//! collision-free as long as ordinals are never reused.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rubric::Ordinal;

/// Identifier of an element in the page model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        ElementId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives a child id of the form `<self>-<suffix>`.
    pub fn child(&self, suffix: &str) -> ElementId {
        ElementId(format!("{}-{}", self.0, suffix))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId(id)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ids of every element a rubric row may carry, keyed by its ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubricIds {
    pub ordinal: Ordinal,
    row: ElementId,
}

impl RubricIds {
    pub fn new(ordinal: Ordinal) -> Self {
        Self {
            ordinal,
            row: ElementId(format!("rubric-{ordinal}")),
        }
    }

    /// `rubric-<n>`
    pub fn row(&self) -> ElementId {
        self.row.clone()
    }

    /// `rubric-<n>-name`: the criterion name input present on every row.
    pub fn name_input(&self) -> ElementId {
        self.row.child("name")
    }

    /// `rubric-<n>-presentation`: hidden field carrying the row kind.
    pub fn presentation(&self) -> ElementId {
        self.row.child("presentation")
    }

    /// `rubric-<n>-select`
    pub fn select(&self) -> ElementId {
        self.row.child("select")
    }

    /// `rubric-<n>-hidden`
    pub fn hidden(&self) -> ElementId {
        self.row.child("hidden")
    }

    /// `rubric-<n>-edit-button`
    pub fn edit_button(&self) -> ElementId {
        self.row.child("edit-button")
    }

    /// `rubric-<n>-max-score`
    pub fn max_score(&self) -> ElementId {
        self.row.child("max-score")
    }

    /// `rubric-<n>-score`
    pub fn checkbox_score(&self) -> ElementId {
        self.row.child("score")
    }
}

/// Ids of the value-set dialog and its named child controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogIds {
    dialog: ElementId,
}

impl DialogIds {
    pub fn new(dialog: impl Into<ElementId>) -> Self {
        Self { dialog: dialog.into() }
    }

    pub fn dialog(&self) -> ElementId {
        self.dialog.clone()
    }

    /// The dialog's own option list, bound to the scratch widget.
    pub fn select(&self) -> ElementId {
        self.dialog.child("dropdown-select")
    }

    pub fn value_input(&self) -> ElementId {
        self.dialog.child("value-input")
    }

    pub fn score_input(&self) -> ElementId {
        self.dialog.child("score-input")
    }

    pub fn add_button(&self) -> ElementId {
        self.dialog.child("add")
    }

    pub fn delete_button(&self) -> ElementId {
        self.dialog.child("delete")
    }

    pub fn clear_all_button(&self) -> ElementId {
        self.dialog.child("clear-all")
    }

    pub fn confirm_button(&self) -> ElementId {
        self.dialog.child("ok")
    }

    pub fn cancel_button(&self) -> ElementId {
        self.dialog.child("cancel")
    }
}
