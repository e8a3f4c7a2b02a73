//! Building blocks of a [`UnitFilter`](super::UnitFilter).
//!
//! Each criterion is inactive in its default state and accepts every unit
//! until it is given bounds, values or text.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};

// ==================== RangePredicate ====================

/// An inclusive numeric interval; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangePredicate {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl RangePredicate {
    /// Creates a predicate from numeric bounds.
    pub fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self { low, high }
    }

    /// Parses bound text. Empty (or blank) text leaves that side open.
    ///
    /// A low bound above the high bound is allowed and matches nothing.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidRangeBound` naming `field` when either text
    /// is non-empty and not a finite number.
    pub fn parse(field: &str, low: &str, high: &str) -> FilterResult<Self> {
        Ok(Self {
            low: parse_bound(field, low)?,
            high: parse_bound(field, high)?,
        })
    }

    /// Returns true if either side is bounded.
    pub fn is_active(&self) -> bool {
        self.low.is_some() || self.high.is_some()
    }

    /// Returns true if `low <= value <= high`, ignoring open sides.
    pub fn contains(&self, value: f64) -> bool {
        self.low.map_or(true, |low| low <= value) && self.high.map_or(true, |high| value <= high)
    }

    /// Renders the bounds back into `LO:HI` text.
    pub fn to_text(&self) -> (String, String) {
        (bound_text(self.low), bound_text(self.high))
    }
}

fn parse_bound(field: &str, text: &str) -> FilterResult<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FilterError::invalid_range_bound(field, text)),
    }
}

fn bound_text(bound: Option<f64>) -> String {
    bound.map(|b| b.to_string()).unwrap_or_default()
}

// ==================== CategorySet ====================

/// Include and exclude lists over one categorical attribute.
///
/// Values compare case-insensitively. The exclude list wins over the include
/// list when a value appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl CategorySet {
    /// Creates a set from include and exclude lists.
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if either list is non-empty.
    pub fn is_active(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    /// `(include empty || value in include) && value not in exclude`.
    pub fn accepts(&self, value: &str) -> bool {
        let listed = |list: &[String]| list.iter().any(|v| v.eq_ignore_ascii_case(value));
        (self.include.is_empty() || listed(&self.include)) && !listed(&self.exclude)
    }
}

// ==================== TriState ====================

/// One control's state: unset, must be true (included) or must be false (excluded).
///
/// Serializes as `"unset"`, `"include"` or `"exclude"`. Deserializing also
/// accepts `"any"`, `"yes"` and `"no"`, and the numeric codes 0, 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "TriStateRepr")]
pub enum TriState {
    #[default]
    Unset,
    Include,
    Exclude,
}

/// Accepted spellings of a [`TriState`].
#[derive(Deserialize)]
#[serde(untagged)]
enum TriStateRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<TriStateRepr> for TriState {
    type Error = String;

    fn try_from(repr: TriStateRepr) -> Result<Self, Self::Error> {
        match repr {
            TriStateRepr::Code(code) => TriState::from_code(code)
                .ok_or_else(|| format!("invalid tri-state code {code}, expected 0, 1 or 2")),
            TriStateRepr::Name(name) => match name.to_lowercase().as_str() {
                "unset" | "any" => Ok(TriState::Unset),
                "include" | "yes" => Ok(TriState::Include),
                "exclude" | "no" => Ok(TriState::Exclude),
                _ => Err(format!(
                    "invalid tri-state '{name}', expected unset, include or exclude"
                )),
            },
        }
    }
}

impl TriState {
    /// Decodes the `0 = any, 1 = must be true, 2 = must be false` encoding.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TriState::Unset),
            1 => Some(TriState::Include),
            2 => Some(TriState::Exclude),
            _ => None,
        }
    }

    /// The numeric encoding of this state.
    pub fn code(self) -> u8 {
        match self {
            TriState::Unset => 0,
            TriState::Include => 1,
            TriState::Exclude => 2,
        }
    }

    /// The state after one more toggle: unset, include, exclude, unset, ...
    pub fn next(self) -> Self {
        match self {
            TriState::Unset => TriState::Include,
            TriState::Include => TriState::Exclude,
            TriState::Exclude => TriState::Unset,
        }
    }

    /// Returns true if this state is satisfied by `value`.
    pub fn test(self, value: bool) -> bool {
        match self {
            TriState::Unset => true,
            TriState::Include => value,
            TriState::Exclude => !value,
        }
    }

    pub fn is_set(self) -> bool {
        self != TriState::Unset
    }
}

// ==================== TriStateSelection ====================

/// Per-value tri-states recorded by repeated toggles.
///
/// Only set values are stored; a value toggled back to unset is forgotten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriStateSelection {
    states: BTreeMap<String, TriState>,
}

impl TriStateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances `value` to its next state and returns it.
    pub fn toggle(&mut self, value: &str) -> TriState {
        let next = self.state(value).next();
        self.set(value, next);
        next
    }

    /// Sets `value` to `state`.
    pub fn set(&mut self, value: &str, state: TriState) {
        if state.is_set() {
            self.states.insert(value.to_string(), state);
        } else {
            self.states.remove(value);
        }
    }

    /// The current state of `value`.
    pub fn state(&self, value: &str) -> TriState {
        self.states.get(value).copied().unwrap_or_default()
    }

    /// Values currently included, in sorted order.
    pub fn included(&self) -> impl Iterator<Item = &str> {
        self.with_state(TriState::Include)
    }

    /// Values currently excluded, in sorted order.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.with_state(TriState::Exclude)
    }

    fn with_state(&self, wanted: TriState) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(move |(_, state)| **state == wanted)
            .map(|(value, _)| value.as_str())
    }

    /// Collects the selection into include and exclude lists.
    pub fn to_category_set(&self) -> CategorySet {
        CategorySet::new(self.included(), self.excluded())
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

// ==================== Quirks ====================

/// Whether a list needs every name or just one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    AllOf,
    AnyOf,
}

impl MatchMode {
    fn test<'a>(self, mut names: impl Iterator<Item = &'a String>, present: &HashSet<String>) -> bool {
        match self {
            MatchMode::AllOf => names.all(|name| present.contains(&name.to_lowercase())),
            MatchMode::AnyOf => names.any(|name| present.contains(&name.to_lowercase())),
        }
    }
}

/// Include and exclude lists over a unit's quirk names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuirkCriterion {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub include_mode: MatchMode,
    pub exclude_mode: MatchMode,
}

impl Default for QuirkCriterion {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            include_mode: MatchMode::AllOf,
            exclude_mode: MatchMode::AnyOf,
        }
    }
}

impl QuirkCriterion {
    pub fn is_active(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    /// Tests a unit's quirk set, which must already be lower-cased.
    ///
    /// The include half passes when the include condition holds; the exclude
    /// half rejects only when the exclude condition holds.
    pub fn accepts(&self, quirks: &HashSet<String>) -> bool {
        let included = self.include.is_empty() || self.include_mode.test(self.include.iter(), quirks);
        let excluded =
            !self.exclude.is_empty() && self.exclude_mode.test(self.exclude.iter(), quirks);
        included && !excluded
    }
}

/// Lower-cases a quirk list into the set [`QuirkCriterion::accepts`] expects.
pub fn quirk_set(quirks: &[String]) -> HashSet<String> {
    quirks.iter().map(|q| q.to_lowercase()).collect()
}

// ==================== TextMatch ====================

/// Whitespace-separated words that must all occur in a text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMatch {
    words: Vec<String>,
}

impl TextMatch {
    /// Splits `text` into lower-cased words. Blank text gives an inactive match.
    pub fn new(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.words.is_empty()
    }

    /// Returns true if every word is a substring of the lower-cased `haystack`.
    pub fn matches(&self, haystack: &str) -> bool {
        if self.words.is_empty() {
            return true;
        }
        let haystack = haystack.to_lowercase();
        self.words.iter().all(|word| haystack.contains(word.as_str()))
    }

    /// The words joined back into text.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}
