//! Logical display fields and the storage fields they resolve to.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Renderer, ValueType};
use crate::errors::CoreError;

/// One underlying storage field a logical [`Field`] reads values from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldSource {
    /// The `field_name` stored on items.
    pub name: String,
    #[serde(default)]
    pub value_type: ValueType,
    /// Values are controlled-vocabulary codes.
    #[serde(default)]
    pub is_enumerable: bool,
    /// BCP-47 tag of the content language, when the source holds
    /// language-specific text.
    #[serde(default)]
    pub language: Option<String>,
    /// Joins multiple values of this source. Falls back to the field's
    /// concatenator.
    #[serde(default)]
    pub concatenator: Option<String>,
}

impl FieldSource {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Text,
            is_enumerable: false,
            language: None,
            concatenator: None,
        }
    }

    #[must_use]
    pub const fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    #[must_use]
    pub const fn enumerable(mut self) -> Self {
        self.is_enumerable = true;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_concatenator(mut self, concatenator: impl Into<String>) -> Self {
        self.concatenator = Some(concatenator.into());
        self
    }
}

/// A logical display field, possibly backed by several storage fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Field {
    /// Unique key.
    pub name: String,
    /// Storage fields in declaration order. Never empty once registered.
    pub resolves_to: Vec<FieldSource>,
    #[serde(default)]
    pub renderer: Renderer,
    /// For reference fields: the field rendered on the target item.
    #[serde(default)]
    pub linked_field: Option<String>,
    #[serde(default)]
    pub is_enumerable: bool,
    /// Computed rather than stored.
    #[serde(default)]
    pub is_virtual: bool,
    /// Joins the segments of this field's sources.
    #[serde(default)]
    pub concatenator: Option<String>,
    /// Completeness category this field counts towards.
    #[serde(default)]
    pub category: Option<String>,
    /// Reported by completeness when missing.
    #[serde(default)]
    pub expected: bool,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, renderer: Renderer, resolves_to: Vec<FieldSource>) -> Self {
        Self {
            name: name.into(),
            resolves_to,
            renderer,
            linked_field: None,
            is_enumerable: false,
            is_virtual: false,
            concatenator: None,
            category: None,
            expected: false,
        }
    }

    /// Shorthand for a plain field backed by one storage field of the same name.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        let name = name.into();
        let source = FieldSource::new(name.clone());
        Self::new(name, Renderer::Plain, vec![source])
    }

    #[must_use]
    pub fn with_linked_field(mut self, linked: impl Into<String>) -> Self {
        self.linked_field = Some(linked.into());
        self
    }

    #[must_use]
    pub fn with_concatenator(mut self, concatenator: impl Into<String>) -> Self {
        self.concatenator = Some(concatenator.into());
        self
    }

    #[must_use]
    pub fn in_category(mut self, category: impl Into<String>, expected: bool) -> Self {
        self.category = Some(category.into());
        self.expected = expected;
        self
    }

    #[must_use]
    pub const fn enumerable(mut self) -> Self {
        self.is_enumerable = true;
        self
    }

    /// Whether values read through `source` are vocabulary codes.
    #[must_use]
    pub const fn is_enumerable_source(&self, source: &FieldSource) -> bool {
        self.is_enumerable || source.is_enumerable
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name is blank or the field
    /// resolves to no storage fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("field name must not be empty".into()));
        }
        if self.resolves_to.is_empty() {
            return Err(CoreError::Validation(format!(
                "field '{}' must resolve to at least one storage field",
                self.name
            )));
        }
        if let Some(source) = self.resolves_to.iter().find(|s| s.name.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "field '{}' has a storage field with an empty name ({})",
                self.name, source.value_type
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_field_resolves_to_itself() {
        let field = Field::plain("title");
        assert_eq!(field.resolves_to.len(), 1);
        assert_eq!(field.resolves_to[0].name, "title");
        assert_eq!(field.renderer, Renderer::Plain);
        assert!(field.validate().is_ok());
    }

    #[test]
    fn empty_resolves_to_is_rejected() {
        let field = Field::new("ghost", Renderer::Plain, vec![]);
        let err = field.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let field = Field::plain("  ");
        assert!(field.validate().is_err());
    }

    #[test]
    fn enumerable_on_field_or_source() {
        let source = FieldSource::new("type");
        let field = Field::new("type", Renderer::Entity, vec![source.clone()]);
        assert!(!field.is_enumerable_source(&source));
        assert!(field.clone().enumerable().is_enumerable_source(&source));
        assert!(field.is_enumerable_source(&source.enumerable()));
    }

    #[test]
    fn deserializes_with_defaults() {
        let field: Field = serde_json::from_str(
            r#"{"name": "abstract", "resolves_to": [{"name": "abstract_en", "language": "en"}]}"#,
        )
        .unwrap();
        assert_eq!(field.renderer, Renderer::Plain);
        assert_eq!(field.resolves_to[0].value_type, ValueType::Text);
        assert_eq!(field.resolves_to[0].language.as_deref(), Some("en"));
        assert!(!field.expected);
    }
}
