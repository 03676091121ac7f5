//! Error types for model loading, input coercion and prediction

use crate::types::Domain;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to bring up one domain's model
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Model file not found: {}", path.display())]
    MissingFile { domain: Domain, path: PathBuf },

    #[error("Error loading {} model from {}: {source}", domain.display_name(), path.display())]
    Corrupt {
        domain: Domain,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("{} model is NOT trained ({reason}). Re-export it from a fitted estimator!", domain.display_name())]
    NotFitted { domain: Domain, reason: String },
}

impl LoadError {
    pub fn domain(&self) -> Domain {
        match self {
            LoadError::MissingFile { domain, .. }
            | LoadError::Corrupt { domain, .. }
            | LoadError::NotFitted { domain, .. } => *domain,
        }
    }
}

/// Fatal errors that stop the application from serving
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to initialize inference runtime: {0}")]
    Runtime(#[source] anyhow::Error),

    #[error("{}", ModelFailures(.0))]
    Models(Vec<LoadError>),
}

struct ModelFailures<'a>(&'a [LoadError]);

impl fmt::Display for ModelFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} model(s) failed to load", self.0.len())?;
        for failure in self.0 {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

/// A non-blank field that is not a number
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("value {value:?} at position {index} is not numeric")]
    InvalidNumber { index: usize, value: String },
}

impl CoercionError {
    pub fn index(&self) -> usize {
        match self {
            CoercionError::InvalidNumber { index, .. } => *index,
        }
    }
}

/// Per-request prediction failure. The application stays usable.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid input detected. Please enter numeric values only.")]
    InvalidInput(#[from] CoercionError),

    #[error("{domain} expects {expected} features, got {actual}")]
    LengthMismatch {
        domain: Domain,
        expected: usize,
        actual: usize,
    },

    #[error("{} model inference failed: {source}", domain.display_name())]
    Inference {
        domain: Domain,
        #[source]
        source: anyhow::Error,
    },
}
