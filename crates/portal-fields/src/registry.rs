//! Static registry of logical fields.

use std::collections::HashMap;

use portal_core::Field;

use crate::error::FieldError;

/// The process-wide field set, built once from configuration.
///
/// Preserves declaration order; lookups by name go through an index.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    /// Build a registry from field definitions.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if a definition is invalid (empty
    /// `resolves_to`, blank name), a name is repeated, or a `linked_field`
    /// names a field that is not part of the set.
    pub fn new(fields: Vec<Field>) -> Result<Self, FieldError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            field.validate()?;
            if index.insert(field.name.clone(), position).is_some() {
                return Err(FieldError::DuplicateField(field.name.clone()));
            }
        }

        for field in &fields {
            if let Some(linked) = &field.linked_field {
                if !index.contains_key(linked) {
                    return Err(FieldError::UnknownLinkedField {
                        field: field.name.clone(),
                        linked: linked.clone(),
                    });
                }
            }
        }

        Ok(Self { fields, index })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Look up a field that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownField`] if `name` is not registered.
    pub fn require(&self, name: &str) -> Result<&Field, FieldError> {
        self.get(name)
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }

    /// Look up several fields, preserving the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownField`] for the first unknown name.
    pub fn require_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&Field>, FieldError> {
        names.iter().map(|n| self.require(n.as_ref())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Fields assigned to `category`, in declaration order.
    pub fn fields_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.category.as_deref() == Some(category))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::Renderer;

    #[test]
    fn lookup_by_name() {
        let registry =
            FieldRegistry::new(vec![Field::plain("title"), Field::plain("author")]).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("author").unwrap().name, "author");
        assert!(registry.get("missing").is_none());
        assert!(matches!(
            registry.require("missing"),
            Err(FieldError::UnknownField(name)) if name == "missing"
        ));
    }

    #[test]
    fn require_all_keeps_order() {
        let registry =
            FieldRegistry::new(vec![Field::plain("a"), Field::plain("b"), Field::plain("c")])
                .unwrap();
        let names: Vec<&str> = registry
            .require_all(&["c", "a"])
            .unwrap()
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "a"]);
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = FieldRegistry::new(vec![Field::plain("title"), Field::plain("title")]).unwrap_err();
        assert!(matches!(err, FieldError::DuplicateField(name) if name == "title"));
    }

    #[test]
    fn empty_resolves_to_rejected() {
        let err = FieldRegistry::new(vec![Field::new("x", Renderer::Plain, vec![])]).unwrap_err();
        assert!(matches!(err, FieldError::Invalid(_)));
    }

    #[test]
    fn unknown_linked_field_rejected() {
        let reference = Field::plain("publisher").with_linked_field("name");
        let err = FieldRegistry::new(vec![reference.clone()]).unwrap_err();
        assert!(matches!(err, FieldError::UnknownLinkedField { .. }));

        let registry = FieldRegistry::new(vec![reference, Field::plain("name")]).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn fields_in_category_in_declaration_order() {
        let registry = FieldRegistry::new(vec![
            Field::plain("title").in_category("basic", true),
            Field::plain("notes").in_category("extra", false),
            Field::plain("author").in_category("basic", false),
        ])
        .unwrap();
        let basic: Vec<&str> = registry
            .fields_in_category("basic")
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(basic, vec!["title", "author"]);
    }
}
