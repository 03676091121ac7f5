//! Routes a feature vector to its domain's model and interprets the label

use crate::coercion::coerce;
use crate::error::DispatchError;
use crate::metrics::PredictionMetrics;
use crate::models::registry::ModelRegistry;
use crate::types::{Domain, FeatureVector, Verdict};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Prediction dispatcher over the loaded models
pub struct PredictionDispatcher {
    registry: Arc<ModelRegistry>,
    metrics: Arc<PredictionMetrics>,
}

impl PredictionDispatcher {
    pub fn new(registry: Arc<ModelRegistry>, metrics: Arc<PredictionMetrics>) -> Self {
        Self { registry, metrics }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Coerce raw form values and predict.
    ///
    /// Invalid input aborts before the model is invoked.
    pub fn submit<S: AsRef<str>>(&self, domain: Domain, raw: &[S]) -> Result<Verdict, DispatchError> {
        let features = coerce(raw).map_err(|e| {
            self.metrics.record_invalid_input();
            warn!(domain = %domain, error = %e, "Rejected non-numeric input");
            DispatchError::InvalidInput(e)
        })?;

        self.predict(domain, &features)
    }

    /// Run the domain's model on a single feature vector
    pub fn predict(&self, domain: Domain, features: &FeatureVector) -> Result<Verdict, DispatchError> {
        let expected = domain.feature_count();
        if features.len() != expected {
            return Err(DispatchError::LengthMismatch {
                domain,
                expected,
                actual: features.len(),
            });
        }

        let start_time = Instant::now();
        let label = self
            .registry
            .get(domain)
            .predict(features)
            .map_err(|source| {
                self.metrics.record_inference_failure();
                error!(domain = %domain, error = %source, "Inference failed");
                DispatchError::Inference { domain, source }
            })?;
        let inference_time = start_time.elapsed();

        let verdict = Verdict::from_label(domain, label);
        self.metrics
            .record_prediction(domain, inference_time, verdict.positive);

        info!(
            prediction_id = %verdict.prediction_id,
            domain = %domain,
            label = label.0,
            positive = verdict.positive,
            inference_time_us = inference_time.as_micros(),
            "Prediction complete"
        );

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classifier::stubs::{FixedClassifier, UnfittedClassifier};
    use crate::models::classifier::Classifier;
    use std::sync::atomic::Ordering;

    fn dispatcher_with(
        diabetes: Box<dyn Classifier>,
        heart_disease: Box<dyn Classifier>,
        parkinsons: Box<dyn Classifier>,
    ) -> (PredictionDispatcher, Arc<PredictionMetrics>) {
        let registry = Arc::new(ModelRegistry::new(diabetes, heart_disease, parkinsons));
        let metrics = Arc::new(PredictionMetrics::new());
        (PredictionDispatcher::new(registry, metrics.clone()), metrics)
    }

    fn fixed(label: i64) -> Box<dyn Classifier> {
        Box::new(FixedClassifier::new(label))
    }

    #[test]
    fn test_diabetes_positive() {
        let (dispatcher, _) = dispatcher_with(fixed(1), fixed(0), fixed(0));
        let verdict = dispatcher
            .predict(Domain::Diabetes, &FeatureVector::zeros(8))
            .unwrap();

        assert!(verdict.positive);
        assert_eq!(verdict.message, "The person is diabetic");
    }

    #[test]
    fn test_diabetes_negative() {
        let (dispatcher, _) = dispatcher_with(fixed(0), fixed(1), fixed(1));
        let verdict = dispatcher
            .predict(Domain::Diabetes, &FeatureVector::zeros(8))
            .unwrap();

        assert!(!verdict.positive);
        assert_eq!(verdict.message, "The person is not diabetic");
    }

    #[test]
    fn test_routes_to_matching_model() {
        let heart = Arc::new(FixedClassifier::new(1));
        let (dispatcher, _) = dispatcher_with(fixed(0), Box::new(heart.clone()), fixed(0));

        let raw = ["63", "1", "3", "145", "233", "1", "0", "150", "0", "2.3", "0", "0", "1"];
        let verdict = dispatcher.submit(Domain::HeartDisease, &raw).unwrap();

        assert_eq!(verdict.message, "The person has heart disease");
        assert_eq!(heart.calls().len(), 1);
        assert_eq!(heart.calls()[0][9], 2.3);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let diabetes = Arc::new(FixedClassifier::new(1));
        let (dispatcher, _) = dispatcher_with(Box::new(diabetes.clone()), fixed(0), fixed(0));

        let err = dispatcher
            .predict(Domain::Diabetes, &FeatureVector::zeros(13))
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::LengthMismatch {
                expected: 8,
                actual: 13,
                ..
            }
        ));
        assert!(diabetes.calls().is_empty());
    }

    #[test]
    fn test_invalid_input_skips_model() {
        let diabetes = Arc::new(FixedClassifier::new(1));
        let (dispatcher, metrics) =
            dispatcher_with(Box::new(diabetes.clone()), fixed(0), fixed(0));

        let raw = ["1", "abc", "", "", "", "", "", ""];
        let err = dispatcher.submit(Domain::Diabetes, &raw).unwrap_err();

        assert!(matches!(err, DispatchError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "Invalid input detected. Please enter numeric values only."
        );
        assert!(diabetes.calls().is_empty());
        assert_eq!(metrics.invalid_inputs.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_blank_parkinsons_form_still_predicts() {
        let parkinsons = Arc::new(FixedClassifier::new(0));
        let (dispatcher, _) = dispatcher_with(fixed(0), fixed(0), Box::new(parkinsons.clone()));

        let raw = vec![""; 22];
        let verdict = dispatcher.submit(Domain::Parkinsons, &raw).unwrap();

        assert_eq!(
            verdict.message,
            "The person does not have Parkinson's disease"
        );
        assert_eq!(parkinsons.calls(), vec![vec![0.0; 22]]);
    }

    #[test]
    fn test_inference_error_surfaces() {
        let (dispatcher, metrics) =
            dispatcher_with(fixed(0), Box::new(UnfittedClassifier), fixed(0));

        let err = dispatcher
            .predict(Domain::HeartDisease, &FeatureVector::zeros(13))
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Inference {
                domain: Domain::HeartDisease,
                ..
            }
        ));
        assert_eq!(metrics.inference_failures.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.predictions.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_non_binary_label_is_negative() {
        let (dispatcher, _) = dispatcher_with(fixed(0), fixed(2), fixed(0));
        let verdict = dispatcher
            .predict(Domain::HeartDisease, &FeatureVector::zeros(13))
            .unwrap();

        assert_eq!(verdict.message, "The person does not have any heart disease");
    }
}
