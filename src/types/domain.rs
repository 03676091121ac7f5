//! Disease domains and their fixed form layouts

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single form input feeding one position of a feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Form parameter name
    pub key: &'static str,
    /// Clinical label shown next to the input
    pub label: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> Field {
    Field { key, label }
}

const DIABETES_FIELDS: [Field; 8] = [
    field("pregnancies", "Number of Pregnancies"),
    field("glucose", "Glucose Level"),
    field("blood_pressure", "Blood Pressure value"),
    field("skin_thickness", "Skin Thickness value"),
    field("insulin", "Insulin Level"),
    field("bmi", "BMI value"),
    field("pedigree", "Diabetes Pedigree Function value"),
    field("age", "Age of the Person"),
];

const HEART_DISEASE_FIELDS: [Field; 13] = [
    field("age", "Age"),
    field("sex", "Sex"),
    field("cp", "Chest Pain types"),
    field("trestbps", "Resting Blood Pressure"),
    field("chol", "Serum Cholestoral in mg/dl"),
    field("fbs", "Fasting Blood Sugar > 120 mg/dl"),
    field("restecg", "Resting Electrocardiographic results"),
    field("thalach", "Maximum Heart Rate achieved"),
    field("exang", "Exercise Induced Angina"),
    field("oldpeak", "ST depression induced by exercise"),
    field("slope", "Slope of the peak exercise ST segment"),
    field("ca", "Major vessels colored by flourosopy"),
    field(
        "thal",
        "thal: 0 = normal; 1 = fixed defect; 2 = reversable defect",
    ),
];

const PARKINSONS_FIELDS: [Field; 22] = [
    field("fo", "MDVP:Fo(Hz)"),
    field("fhi", "MDVP:Fhi(Hz)"),
    field("flo", "MDVP:Flo(Hz)"),
    field("jitter_percent", "MDVP:Jitter(%)"),
    field("jitter_abs", "MDVP:Jitter(Abs)"),
    field("rap", "MDVP:RAP"),
    field("ppq", "MDVP:PPQ"),
    field("ddp", "Jitter:DDP"),
    field("shimmer", "MDVP:Shimmer"),
    field("shimmer_db", "MDVP:Shimmer(dB)"),
    field("apq3", "Shimmer:APQ3"),
    field("apq5", "Shimmer:APQ5"),
    field("apq", "MDVP:APQ"),
    field("dda", "Shimmer:DDA"),
    field("nhr", "NHR"),
    field("hnr", "HNR"),
    field("rpde", "RPDE"),
    field("dfa", "DFA"),
    field("spread1", "spread1"),
    field("spread2", "spread2"),
    field("d2", "D2"),
    field("ppe", "PPE"),
];

/// Supported prediction contexts. Each owns one model and one field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    #[default]
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl Domain {
    /// All domains in sidebar order
    pub const ALL: [Domain; 3] = [Domain::Diabetes, Domain::HeartDisease, Domain::Parkinsons];

    /// URL path segment
    pub fn slug(self) -> &'static str {
        match self {
            Domain::Diabetes => "diabetes",
            Domain::HeartDisease => "heart-disease",
            Domain::Parkinsons => "parkinsons",
        }
    }

    /// Resolve a URL path segment back to a domain
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.slug() == slug)
    }

    /// Sidebar entry
    pub fn menu_label(self) -> &'static str {
        match self {
            Domain::Diabetes => "Diabetes Prediction",
            Domain::HeartDisease => "Heart Disease Prediction",
            Domain::Parkinsons => "Parkinsons Prediction",
        }
    }

    /// Human-readable name used in log and error messages
    pub fn display_name(self) -> &'static str {
        match self {
            Domain::Diabetes => "Diabetes",
            Domain::HeartDisease => "Heart Disease",
            Domain::Parkinsons => "Parkinson's",
        }
    }

    pub fn page_title(self) -> &'static str {
        match self {
            Domain::Diabetes => "Diabetes Prediction using ML",
            Domain::HeartDisease => "Heart Disease Prediction using ML",
            Domain::Parkinsons => "Parkinson's Disease Prediction using ML",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Domain::Diabetes => "Diabetes Test Result",
            Domain::HeartDisease => "Heart Disease Test Result",
            Domain::Parkinsons => "Parkinson's Test Result",
        }
    }

    /// Artifact file name inside the models directory
    pub fn model_file(self) -> &'static str {
        match self {
            Domain::Diabetes => "trained_model.onnx",
            Domain::HeartDisease => "heart_disease_model.onnx",
            Domain::Parkinsons => "parkinsons_model.onnx",
        }
    }

    /// Ordered input layout. Its length is the expected feature vector length.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Domain::Diabetes => &DIABETES_FIELDS,
            Domain::HeartDisease => &HEART_DISEASE_FIELDS,
            Domain::Parkinsons => &PARKINSONS_FIELDS,
        }
    }

    pub fn feature_count(self) -> usize {
        self.fields().len()
    }

    /// Number of columns in the form grid
    pub fn columns(self) -> usize {
        match self {
            Domain::Diabetes | Domain::HeartDisease => 3,
            Domain::Parkinsons => 5,
        }
    }

    pub fn positive_message(self) -> &'static str {
        match self {
            Domain::Diabetes => "The person is diabetic",
            Domain::HeartDisease => "The person has heart disease",
            Domain::Parkinsons => "The person has Parkinson's disease",
        }
    }

    pub fn negative_message(self) -> &'static str {
        match self {
            Domain::Diabetes => "The person is not diabetic",
            Domain::HeartDisease => "The person does not have any heart disease",
            Domain::Parkinsons => "The person does not have Parkinson's disease",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
