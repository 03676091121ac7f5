//! Health Assistant Library
//!
//! A multiple disease prediction front-end: form values are coerced into
//! feature vectors and dispatched to one of three pre-trained ONNX
//! classifiers (diabetes, heart disease, Parkinson's).

pub mod coercion;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod types;
pub mod web;

pub use config::AppConfig;
pub use error::{CoercionError, DispatchError, LoadError, StartupError};
pub use models::{Classifier, ModelRegistry, PredictionDispatcher};
pub use types::{Domain, FeatureVector, Label, Verdict};
