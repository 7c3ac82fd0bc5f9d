//! Item completeness scoring.

use portal_config::CompletenessConfig;
use portal_core::Item;
use serde::Serialize;

use crate::registry::FieldRegistry;
use crate::values::has_value;

const DEFAULT_WEIGHT: f64 = 1.0;

/// Score of one completeness category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub name: String,
    /// Rounded share of the category's fields that have values, 0-100.
    pub score: u8,
    pub weight: f64,
    pub filled: usize,
    pub total: usize,
    /// Expected fields of this category that have no value.
    pub missing_expected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completeness {
    /// Weighted average of the category scores, 0-100.
    pub total: u8,
    pub categories: Vec<CategoryScore>,
}

/// Score how well `item` fills the registered fields.
///
/// Categories are reported in configuration order, followed by categories
/// only named on fields (weight 1). Virtual fields never count. A category
/// without fields scores 100 and does not contribute to the total.
#[must_use]
pub fn calculate_completeness(
    item: &Item,
    registry: &FieldRegistry,
    config: &CompletenessConfig,
) -> Completeness {
    let mut names: Vec<&str> = config.categories.iter().map(|c| c.name.as_str()).collect();
    for field in registry.iter() {
        if let Some(category) = field.category.as_deref() {
            if !names.contains(&category) {
                names.push(category);
            }
        }
    }

    let categories: Vec<CategoryScore> = names
        .into_iter()
        .map(|name| {
            let mut filled = 0;
            let mut total = 0;
            let mut missing_expected = Vec::new();
            for field in registry.fields_in_category(name).filter(|f| !f.is_virtual) {
                total += 1;
                if has_value(field, item) {
                    filled += 1;
                } else if field.expected {
                    missing_expected.push(field.name.clone());
                }
            }
            CategoryScore {
                name: name.to_string(),
                score: percent(filled, total),
                weight: config.weight_of(name).unwrap_or(DEFAULT_WEIGHT),
                filled,
                total,
                missing_expected,
            }
        })
        .collect();

    let (weighted, weights) = categories
        .iter()
        .filter(|c| c.total > 0 && c.weight > 0.0)
        .fold((0.0, 0.0), |(sum, weights), c| {
            (sum + f64::from(c.score) * c.weight, weights + c.weight)
        });
    let total = if weights > 0.0 {
        clamp_score((weighted / weights).round())
    } else {
        0
    };

    Completeness { total, categories }
}

/// `filled / total` as a percentage, rounded half up.
fn percent(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (filled * 200 + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0) as u8
}
