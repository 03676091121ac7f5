//! The three per-domain models, loaded once and shared read-only

use crate::error::{LoadError, StartupError};
use crate::models::classifier::Classifier;
use crate::models::loader::ModelLoader;
use crate::types::Domain;
use std::path::Path;
use tracing::{error, info};

/// Owns exactly one fitted classifier per domain.
pub struct ModelRegistry {
    diabetes: Box<dyn Classifier>,
    heart_disease: Box<dyn Classifier>,
    parkinsons: Box<dyn Classifier>,
}

impl ModelRegistry {
    pub fn new(
        diabetes: Box<dyn Classifier>,
        heart_disease: Box<dyn Classifier>,
        parkinsons: Box<dyn Classifier>,
    ) -> Self {
        Self {
            diabetes,
            heart_disease,
            parkinsons,
        }
    }

    /// Load all three ONNX models from a directory
    pub fn load<P: AsRef<Path>>(models_dir: P, onnx_threads: usize) -> Result<Self, StartupError> {
        let models_dir = models_dir.as_ref();
        let loader = ModelLoader::with_threads(onnx_threads).inspect_err(|e| {
            error!(error = %e, "Model runtime unavailable");
        })?;

        let registry = Self::load_with(|domain| {
            loader
                .load_domain(models_dir, domain)
                .map(|model| Box::new(model) as Box<dyn Classifier>)
        })?;

        info!(
            count = Domain::ALL.len(),
            "Loaded {} models from {}",
            Domain::ALL.len(),
            models_dir.display()
        );

        Ok(registry)
    }

    /// Build the registry by loading every domain with `load`.
    ///
    /// Every domain is attempted so each failure is reported. Any failure
    /// means no registry is produced.
    pub fn load_with<F>(mut load: F) -> Result<Self, StartupError>
    where
        F: FnMut(Domain) -> Result<Box<dyn Classifier>, LoadError>,
    {
        let results = Domain::ALL.map(|domain| {
            load(domain).inspect_err(|e| {
                error!(model = %domain, error = %e, "Failed to load model");
            })
        });

        match results {
            [Ok(diabetes), Ok(heart_disease), Ok(parkinsons)] => {
                Ok(Self::new(diabetes, heart_disease, parkinsons))
            }
            results => Err(StartupError::Models(
                results.into_iter().filter_map(Result::err).collect(),
            )),
        }
    }

    /// The model owned by a domain
    pub fn get(&self, domain: Domain) -> &dyn Classifier {
        match domain {
            Domain::Diabetes => self.diabetes.as_ref(),
            Domain::HeartDisease => self.heart_disease.as_ref(),
            Domain::Parkinsons => self.parkinsons.as_ref(),
        }
    }

    /// Get loaded model names
    pub fn model_names(&self) -> Vec<(Domain, String)> {
        Domain::ALL
            .into_iter()
            .map(|domain| (domain, self.get(domain).name().to_string()))
            .collect()
    }
}
