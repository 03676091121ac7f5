//! ONNX model loader

use crate::error::{LoadError, StartupError};
use crate::models::classifier::{Classifier, OnnxClassifier};
use crate::types::{Domain, FeatureVector};
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::{debug, info};

/// Loader for the per-domain ONNX artifacts
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self, StartupError> {
        ort::init()
            .with_name("health-assistant")
            .commit()
            .map_err(|e| StartupError::Runtime(e.into()))?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load and verify the model for one domain.
    ///
    /// Distinguishes an absent file, a file that does not deserialize, and a
    /// model that cannot produce a prediction.
    pub fn load_domain<P: AsRef<Path>>(
        &self,
        models_dir: P,
        domain: Domain,
    ) -> Result<OnnxClassifier, LoadError> {
        let path = models_dir.as_ref().join(domain.model_file());

        if !path.exists() {
            return Err(LoadError::MissingFile { domain, path });
        }

        info!(model = %domain, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = self
            .open_session(&path)
            .map_err(|source| LoadError::Corrupt {
                domain,
                path: path.clone(),
                source,
            })?;

        let classifier = OnnxClassifier::new(domain.slug(), session).map_err(|e| {
            LoadError::NotFitted {
                domain,
                reason: e.to_string(),
            }
        })?;

        ensure_fitted(domain, &classifier)?;

        info!(
            model = %domain,
            input = %classifier.input_name(),
            output = %classifier.label_output(),
            "Model loaded successfully"
        );

        Ok(classifier)
    }

    fn open_session(&self, path: &Path) -> Result<Session> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;
        Ok(session)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self { onnx_threads: 1 }
    }
}

/// Verify a classifier is fitted by predicting an all-zero vector of the
/// domain's length.
pub fn ensure_fitted(domain: Domain, classifier: &dyn Classifier) -> Result<(), LoadError> {
    let zeros = FeatureVector::zeros(domain.feature_count());

    match classifier.predict(&zeros) {
        Ok(label) => {
            debug!(model = %domain, label = label.0, "Zero-vector prediction succeeded");
            Ok(())
        }
        Err(e) => Err(LoadError::NotFitted {
            domain,
            reason: format!("test prediction failed: {:#}", e),
        }),
    }
}
