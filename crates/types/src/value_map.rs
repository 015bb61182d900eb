//! Ordered name → score association backing dropdown rubrics.
//!
//! A [`ValueMap`] keeps entries in insertion order (via `IndexMap`) so the
//! rendered option list and the serialized hidden-field value are stable
//! across redraws. Scores are opaque tokens: they are stored and displayed
//! exactly as entered and never parsed as numbers.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between `name:score` pairs in the serialized form.
pub const PAIR_SEPARATOR: char = ',';
/// Separator between a name and its score in the serialized form.
pub const NAME_SCORE_SEPARATOR: char = ':';

/// Opaque score token attached to a value name.
///
/// Scores always deserialize as text. YAML plain scalars such as `2.50` keep
/// their source spelling; JSON scores must be strings because JSON numbers
/// lose theirs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Score(String);

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScoreVisitor;

        impl Visitor<'_> for ScoreVisitor {
            type Value = Score;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a score token written as a string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Score, E> {
                Ok(Score(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Score, E> {
                Ok(Score(value))
            }
        }

        deserializer.deserialize_string(ScoreVisitor)
    }
}

impl Score {
    pub fn new(token: impl Into<String>) -> Self {
        Score(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Score> for String {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl From<&str> for Score {
    fn from(token: &str) -> Self {
        Score(token.to_string())
    }
}

impl From<String> for Score {
    fn from(token: String) -> Self {
        Score(token)
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Score(value.to_string())
    }
}

impl From<u32> for Score {
    fn from(value: u32) -> Self {
        Score(value.to_string())
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score(value.to_string())
    }
}

/// Error surfaced when a serialized value string cannot be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueMapError {
    /// A comma-separated token had no `name:score` separator.
    #[error("value token '{token}' is missing the ':' separator")]
    MissingSeparator { token: String },
}

/// Insertion-ordered mapping from value name to score.
///
/// Equality is order-insensitive: two maps are equal when they hold the same
/// pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap {
    entries: IndexMap<String, Score>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the score for `name`.
    ///
    /// Overwriting keeps the entry at its original position. Returns the
    /// previous score when one existed.
    pub fn insert(&mut self, name: impl Into<String>, score: impl Into<Score>) -> Option<Score> {
        self.entries.insert(name.into(), score.into())
    }

    /// Removes the entry for `name`, preserving the order of the remaining
    /// entries. Absent names are ignored.
    pub fn remove(&mut self, name: &str) -> Option<Score> {
        self.entries.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Score> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Score)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), score))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Flattens the map into `name:score` pairs joined by `,`, in insertion
    /// order.
    pub fn serialized_form(&self) -> String {
        self.iter()
            .map(|(name, score)| format!("{name}{NAME_SCORE_SEPARATOR}{score}"))
            .collect::<Vec<_>>()
            .join(&PAIR_SEPARATOR.to_string())
    }

    /// Reads a value produced by [`ValueMap::serialized_form`].
    ///
    /// Each token is split on its first `:` so scores may contain colons but
    /// names may not. An empty input yields an empty map.
    pub fn parse_serialized(input: &str) -> Result<Self, ParseValueMapError> {
        let mut map = ValueMap::new();
        if input.is_empty() {
            return Ok(map);
        }
        for token in input.split(PAIR_SEPARATOR) {
            let Some((name, score)) = token.split_once(NAME_SCORE_SEPARATOR) else {
                return Err(ParseValueMapError::MissingSeparator {
                    token: token.to_string(),
                });
            };
            map.insert(name, score);
        }
        Ok(map)
    }
}

impl<N, S> FromIterator<(N, S)> for ValueMap
where
    N: Into<String>,
    S: Into<Score>,
{
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        map.extend(iter);
        map
    }
}

impl<N, S> Extend<(N, S)> for ValueMap
where
    N: Into<String>,
    S: Into<Score>,
{
    fn extend<I: IntoIterator<Item = (N, S)>>(&mut self, iter: I) {
        for (name, score) in iter {
            self.insert(name, score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = ValueMap::new();
        map.insert("good", "3");
        map.insert("poor", "1");
        map.insert("good", "4");

        assert_eq!(map.get("good").map(Score::as_str), Some("4"));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["good", "poor"]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut map: ValueMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        map.remove("a");
        assert!(map.remove("a").is_none());
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn equality_ignores_order() {
        let left: ValueMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let right: ValueMap = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(left, right);
    }

    #[test]
    fn serialized_form_follows_insertion_order() {
        let map: ValueMap = [("a", Score::from(1_i64)), ("b", Score::from(2_i64))].into_iter().collect();
        assert_eq!(map.serialized_form(), "a:1,b:2");
        assert_eq!(ValueMap::new().serialized_form(), "");
    }

    #[test]
    fn parse_serialized_splits_on_first_colon() {
        let map = ValueMap::parse_serialized("late:0,ratio:1:2").expect("parse");
        assert_eq!(map.get("late").map(Score::as_str), Some("0"));
        assert_eq!(map.get("ratio").map(Score::as_str), Some("1:2"));
    }

    #[test]
    fn parse_serialized_rejects_token_without_separator() {
        let error = ValueMap::parse_serialized("a:1,oops").unwrap_err();
        assert_eq!(error, ParseValueMapError::MissingSeparator { token: "oops".into() });
    }

    #[test]
    fn yaml_scores_keep_their_source_spelling() {
        let map: ValueMap =
            serde_yaml::from_str("full: 10.0\nhalf: 2.50\nbig: 18446744073709551615\nnone: zero\n").expect("yaml");
        assert_eq!(map.serialized_form(), "full:10.0,half:2.50,big:18446744073709551615,none:zero");
    }

    #[test]
    fn json_scores_must_be_strings() {
        let map: ValueMap = serde_json::from_str(r#"{"full": "10.0", "half": "2.50"}"#).expect("json");
        assert_eq!(map.get("half").map(Score::as_str), Some("2.50"));

        let error = serde_json::from_str::<ValueMap>(r#"{"full": 10.0}"#).unwrap_err();
        assert!(error.to_string().contains("a score token written as a string"));
    }
}
