//! Error types for filter construction and evaluation.

use strsim::levenshtein;
use thiserror::Error;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while building or evaluating a filter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The equipment expression is not well formed.
    #[error("malformed expression: {reason}")]
    MalformedExpression {
        /// What is wrong with the expression.
        reason: String,
    },

    /// A range bound is neither empty nor a number.
    #[error("invalid {field} bound: '{text}' is not a number")]
    InvalidRangeBound {
        /// The range field the bound belongs to.
        field: String,
        /// The offending text.
        text: String,
    },

    /// The MUL id text is neither empty nor an integer.
    #[error("invalid MUL id: '{text}' is not an integer")]
    InvalidMulId {
        /// The offending text.
        text: String,
    },

    /// A unit's inventory lists are misaligned.
    #[error("unit '{unit}' has a corrupt inventory: {names} names but {quantities} quantities")]
    InvalidInventory {
        /// Display name of the unit.
        unit: String,
        /// Number of equipment names.
        names: usize,
        /// Number of equipment quantities.
        quantities: usize,
    },

    /// The expression builder refused a token.
    #[error("cannot add {token}: {reason}")]
    RejectedToken {
        /// The refused token, as text.
        token: String,
        /// Why it was refused.
        reason: String,
    },

    /// A name given as text does not match any known value.
    #[error("unknown {kind}: {value}{}", suggestion_suffix(.suggestion))]
    UnknownValue {
        /// What kind of value was expected (e.g. "weapon class").
        kind: String,
        /// The unrecognized text.
        value: String,
        /// The closest known value, if one is close enough.
        suggestion: Option<String>,
    },
}

impl FilterError {
    /// Creates a malformed expression error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        FilterError::MalformedExpression {
            reason: reason.into(),
        }
    }

    /// Creates an invalid range bound error.
    pub fn invalid_range_bound(field: impl Into<String>, text: impl Into<String>) -> Self {
        FilterError::InvalidRangeBound {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Creates a rejected token error.
    pub fn rejected(token: impl Into<String>, reason: impl Into<String>) -> Self {
        FilterError::RejectedToken {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown value error, suggesting the closest candidate.
    pub fn unknown_value<'a>(
        kind: impl Into<String>,
        value: impl Into<String>,
        candidates: impl Iterator<Item = &'a str>,
    ) -> Self {
        let value = value.into();
        let suggestion = find_similar_name(&value, candidates);
        FilterError::UnknownValue {
            kind: kind.into(),
            value,
            suggestion,
        }
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold and it
/// is not an exact match.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name.to_string(), levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}
