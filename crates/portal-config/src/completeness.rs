//! Completeness scoring weights.

use serde::{Deserialize, Serialize};

const fn default_weight() -> f64 {
    1.0
}

/// One completeness category and its weight in the total score.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompletenessCategory {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl CompletenessCategory {
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompletenessConfig {
    /// Categories in report order. Fields name their category via
    /// `Field::category`.
    #[serde(default)]
    pub categories: Vec<CompletenessCategory>,
}

impl CompletenessConfig {
    #[must_use]
    pub fn weight_of(&self, category: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.weight)
    }
}
