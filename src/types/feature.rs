//! Numeric model inputs and outputs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Ordered numeric inputs for one prediction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All-zero vector of the given length
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Values narrowed to `f32`, the input type of ONNX-exported classifiers
    pub fn to_f32(&self) -> Vec<f32> {
        self.0.iter().map(|&v| v as f32).collect()
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Class label returned by a binary classifier.
///
/// Only `1` is treated as the positive condition. Any other value, including
/// labels outside `{0, 1}`, counts as negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub i64);

impl Label {
    pub const NEGATIVE: Label = Label(0);
    pub const POSITIVE: Label = Label(1);

    pub fn is_positive(self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
