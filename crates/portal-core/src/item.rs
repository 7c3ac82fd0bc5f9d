//! Retrieved entity records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One stored `{field_name, field_value}` pair of an [`Item`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemValue {
    pub field_name: String,
    pub field_value: String,
}

/// A retrieved entity record.
///
/// `values` may hold several entries with the same `field_name`; their order
/// is meaningful for concatenation and change detection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Item {
    pub item_id: String,
    pub entity_type: String,
    pub business_id: String,
    #[serde(default)]
    pub values: Vec<ItemValue>,
}

impl Item {
    #[must_use]
    pub fn new(
        item_id: impl Into<String>,
        entity_type: impl Into<String>,
        business_id: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            entity_type: entity_type.into(),
            business_id: business_id.into(),
            values: Vec::new(),
        }
    }

    /// Append a value, keeping insertion order.
    #[must_use]
    pub fn with_value(mut self, field_name: impl Into<String>, field_value: impl Into<String>) -> Self {
        self.values.push(ItemValue {
            field_name: field_name.into(),
            field_value: field_value.into(),
        });
        self
    }

    /// All values stored under `field_name`, in item order.
    pub fn values_of<'a>(&'a self, field_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |v| v.field_name == field_name)
            .map(|v| v.field_value.as_str())
    }
}
