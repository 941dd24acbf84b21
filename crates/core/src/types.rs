use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RetentionError, RetentionResult};

/// Category label assigned to users whose nominal attribute is missing or
/// not a scalar value. Keeping them in a named bucket preserves the rule
/// that nominal slices partition the whole population.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// A single user as supplied by the ingestion layer. Immutable input to
/// every retention computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    /// Defines the cohort-assignment key. Required by construction.
    pub registration_date: DateTime<Utc>,
    /// Absent means the user is still active as of the reference date.
    #[serde(default)]
    pub unregistration_date: Option<DateTime<Utc>>,
    /// Informational; not used by the retention computations.
    #[serde(default)]
    pub last_login_date: Option<DateTime<Utc>>,
    /// Categorical dimensions (e.g. "gender", "acquisition_source") mapped
    /// to string or numeric values.
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl UserRecord {
    /// Read an attribute as a category label. Numbers are rendered as text
    /// so numeric nominal codes still slice cleanly.
    pub fn attribute_text(&self, name: &str) -> Option<String> {
        match self.attributes.get(name) {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Read an attribute as a number (for bracketed dimensions such as age).
    pub fn attribute_number(&self, name: &str) -> Option<f64> {
        match self.attributes.get(name) {
            Some(serde_json::Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }
}

/// A named half-open integer interval `[min, max)` used to bucket a numeric
/// attribute into categories (e.g. age "18-25").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeBracket {
    pub label: String,
    pub min: i64,
    pub max: i64,
}

impl AgeBracket {
    pub fn new(label: &str, min: i64, max: i64) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min as f64 && value < self.max as f64
    }
}

/// A categorical dimension the population can be sliced by.
///
/// `Nominal` dimensions take their category set from the distinct values
/// observed in the data; `Bucketed` dimensions use an externally supplied
/// ordered bracket list, first matching bracket wins, and users matching no
/// bracket are excluded from every slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDimension {
    Nominal {
        attribute: String,
    },
    Bucketed {
        attribute: String,
        brackets: Vec<AgeBracket>,
    },
}

impl CategoryDimension {
    pub fn nominal(attribute: &str) -> RetentionResult<Self> {
        if attribute.is_empty() {
            return Err(RetentionError::Dimension(
                "attribute name must not be empty".to_string(),
            ));
        }
        Ok(Self::Nominal {
            attribute: attribute.to_string(),
        })
    }

    pub fn bucketed(attribute: &str, brackets: Vec<AgeBracket>) -> RetentionResult<Self> {
        if attribute.is_empty() {
            return Err(RetentionError::Dimension(
                "attribute name must not be empty".to_string(),
            ));
        }
        if brackets.is_empty() {
            return Err(RetentionError::Validation(format!(
                "bucketed dimension '{attribute}' needs at least one bracket"
            )));
        }
        for bracket in &brackets {
            if bracket.label.is_empty() {
                return Err(RetentionError::Validation(format!(
                    "bracket [{}, {}) of '{attribute}' has an empty label",
                    bracket.min, bracket.max
                )));
            }
            if bracket.min >= bracket.max {
                return Err(RetentionError::Validation(format!(
                    "bracket '{}' of '{attribute}' is empty: [{}, {})",
                    bracket.label, bracket.min, bracket.max
                )));
            }
        }
        Ok(Self::Bucketed {
            attribute: attribute.to_string(),
            brackets,
        })
    }

    pub fn attribute(&self) -> &str {
        match self {
            Self::Nominal { attribute } | Self::Bucketed { attribute, .. } => attribute,
        }
    }
}
