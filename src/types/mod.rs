//! Type definitions for the health assistant

pub mod domain;
pub mod feature;
pub mod verdict;

pub use domain::{Domain, Field};
pub use feature::{FeatureVector, Label};
pub use verdict::Verdict;
