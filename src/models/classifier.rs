//! Binary classifier capability and its ONNX Runtime implementation

use crate::types::{FeatureVector, Label};
use anyhow::{anyhow, bail, Context, Result};
use ort::session::{Session, SessionOutputs};
use ort::value::Tensor;
use std::sync::Mutex;
use tracing::debug;

/// A fitted binary classifier for one domain.
pub trait Classifier: Send + Sync {
    /// Name used in logs and on the health endpoint
    fn name(&self) -> &str;

    /// Predict the label of a single feature vector
    fn predict(&self, features: &FeatureVector) -> Result<Label>;
}

/// Classifier backed by an ONNX Runtime session
pub struct OnnxClassifier {
    name: String,
    /// Running a session needs exclusive access
    session: Mutex<Session>,
    input_name: String,
    label_output: String,
}

impl OnnxClassifier {
    /// Wrap a session, resolving the input and label output names
    pub fn new(name: &str, session: Session) -> Result<Self> {
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| anyhow!("model declares no inputs"))?;

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| anyhow!("model declares no outputs"))?;

        debug!(
            model = %name,
            input = %input_name,
            output = %label_output,
            "Resolved model signature"
        );

        Ok(Self {
            name: name.to_string(),
            session: Mutex::new(session),
            input_name,
            label_output,
        })
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn label_output(&self) -> &str {
        &self.label_output
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        // Single-row batch: shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_f32()))
            .context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        extract_label(&outputs, &self.label_output, &self.name)
    }
}

/// Read the predicted label of the single input row.
///
/// sklearn exports emit an int64 label tensor. Floating point outputs are
/// accepted only when they carry exactly one value for the row; a wider
/// tensor holds class probabilities, not a label.
fn extract_label(outputs: &SessionOutputs, label_output: &str, model_name: &str) -> Result<Label> {
    let output = outputs
        .get(label_output)
        .ok_or_else(|| anyhow!("output {} missing from results", label_output))?;

    if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
        return first_label(data.first().copied(), model_name);
    }

    if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
        let data: Vec<f64> = data.iter().map(|&v| v as f64).collect();
        return float_label(&data, label_output, model_name);
    }

    if let Ok((_, data)) = output.try_extract_tensor::<f64>() {
        return float_label(data, label_output, model_name);
    }

    bail!(
        "output {} of {} is not a numeric label tensor ({:?})",
        label_output,
        model_name,
        output.dtype()
    )
}

fn float_label(data: &[f64], label_output: &str, model_name: &str) -> Result<Label> {
    match data {
        [value] => first_label(Some(value.round() as i64), model_name),
        _ => bail!(
            "output {} of {} returns {} values per row; expected a single class label",
            label_output,
            model_name,
            data.len()
        ),
    }
}

fn first_label(value: Option<i64>, model_name: &str) -> Result<Label> {
    let label = value
        .map(Label)
        .ok_or_else(|| anyhow!("{} returned an empty label tensor", model_name))?;
    debug!(model = %model_name, label = label.0, "Extracted label");
    Ok(label)
}


#[cfg(test)]
mod tests {
    use super::stubs::*;
    use super::*;

    #[test]
    fn test_fixed_classifier_records_calls() {
        let classifier = FixedClassifier::new(1);
        let label = classifier
            .predict(&FeatureVector::new(vec![1.0, 2.0]))
            .unwrap();

        assert_eq!(label, Label::POSITIVE);
        assert_eq!(classifier.calls(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_float_label_single_value() {
        assert_eq!(float_label(&[1.0], "label", "m").unwrap(), Label::POSITIVE);
        assert_eq!(float_label(&[0.0], "label", "m").unwrap(), Label::NEGATIVE);
    }

    #[test]
    fn test_float_probabilities_rejected() {
        // [P(class 0), P(class 1)] must never be rounded into a label
        let err = float_label(&[0.9, 0.1], "probabilities", "m").unwrap_err();
        assert!(err.to_string().contains("expected a single class label"));
    }

    #[test]
    fn test_classifier_is_object_safe() {
        let boxed: Box<dyn Classifier> = Box::new(UnfittedClassifier);
        assert!(boxed.predict(&FeatureVector::zeros(8)).is_err());
    }
}
