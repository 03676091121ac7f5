//! Conversion of free-text form values into model feature vectors.
//!
//! Blank fields default to zero. Any other field must parse as a decimal
//! number or the whole conversion fails. No range checks are applied.
//! Single underscores between digits group them (`1_000`).

use crate::error::CoercionError;
use crate::types::FeatureVector;
use std::borrow::Cow;

/// Convert ordered raw field values into a feature vector.
///
/// Entries are trimmed before parsing. The first non-numeric, non-blank entry
/// aborts the conversion and no partial vector is produced.
pub fn coerce<S: AsRef<str>>(raw: &[S]) -> Result<FeatureVector, CoercionError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| coerce_one(index, value.as_ref()))
        .collect::<Result<Vec<f64>, _>>()
        .map(FeatureVector::new)
}

fn coerce_one(index: usize, value: &str) -> Result<f64, CoercionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let invalid = || CoercionError::InvalidNumber {
        index,
        value: value.to_string(),
    };

    strip_digit_separators(trimmed)
        .ok_or_else(invalid)?
        .parse::<f64>()
        .map_err(|_| invalid())
}

/// Remove underscores that sit between two ASCII digits.
///
/// Returns `None` when an underscore is leading, trailing, doubled or next
/// to a non-digit.
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }

    let bytes = text.as_bytes();
    let mut stripped = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c != '_' {
            stripped.push(c);
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(Cow::Owned(stripped))
}
