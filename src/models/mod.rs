//! ML model loading and prediction components

pub mod classifier;
pub mod dispatcher;
pub mod loader;
pub mod registry;

pub use classifier::{Classifier, OnnxClassifier};
pub use dispatcher::PredictionDispatcher;
pub use loader::ModelLoader;
pub use registry::ModelRegistry;
