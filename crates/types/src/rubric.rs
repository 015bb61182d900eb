use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How a rubric row is presented and scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Presentation {
    /// Discrete named values, each carrying a score.
    Dropdown,
    /// A free numeric score up to a maximum.
    Numeric,
    /// A single pass/fail score.
    Checkbox,
}

impl Presentation {
    pub const ALL: [Presentation; 3] = [Presentation::Dropdown, Presentation::Numeric, Presentation::Checkbox];

    /// Token written into the row's presentation field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dropdown => "DROPDOWN",
            Self::Numeric => "NUMERIC",
            Self::Checkbox => "CHECKBOX",
        }
    }

    /// Column header shown for rows of this kind.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Dropdown => "Dropdown",
            Self::Numeric => "Numeric",
            Self::Checkbox => "Checkbox",
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Presentation {
    type Err = ParsePresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DROPDOWN" => Ok(Self::Dropdown),
            "NUMERIC" => Ok(Self::Numeric),
            "CHECKBOX" => Ok(Self::Checkbox),
            _ => Err(ParsePresentationError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePresentationError(pub String);

impl fmt::Display for ParsePresentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid presentation '{}'; expected DROPDOWN, NUMERIC or CHECKBOX", self.0)
    }
}

impl Error for ParsePresentationError {}

/// 1-based sequence number of a rubric row. Never reused within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ordinal(u32);

impl Ordinal {
    pub const FIRST: Ordinal = Ordinal(1);

    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Ordinal(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Ordinal {
        Ordinal(self.0 + 1)
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row appended to the rubric table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubricRow {
    pub ordinal: Ordinal,
    pub presentation: Presentation,
    pub header: String,
}
