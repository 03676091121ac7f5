//! Prediction verdict shown to the user

use crate::types::domain::Domain;
use crate::types::feature::Label;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Human-readable outcome of one prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Unique prediction identifier
    pub prediction_id: Uuid,

    /// Domain whose model produced the label
    pub domain: Domain,

    /// Raw label returned by the model
    pub label: Label,

    /// Whether the label maps to the positive condition
    pub positive: bool,

    /// Fixed message for the domain and outcome
    pub message: String,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
}

impl Verdict {
    /// Interpret a model label for a domain
    pub fn from_label(domain: Domain, label: Label) -> Self {
        let positive = label.is_positive();
        let message = if positive {
            domain.positive_message()
        } else {
            domain.negative_message()
        };

        Self {
            prediction_id: Uuid::new_v4(),
            domain,
            label,
            positive,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}
