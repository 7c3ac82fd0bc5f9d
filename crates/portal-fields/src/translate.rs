//! Localized labels for fields and vocabulary values.
//!
//! Keys are built from normalized identifiers:
//!
//! | Lookup | Key | Fallback |
//! |--------|-----|----------|
//! | field label | `fields.<field>` | normalized field name |
//! | field description | `fields.<field>.description` | none |
//! | value label | `values.<field>.<value>` | raw value |
//! | value description | `values.<field>.<value>.description` | normalized value |
//!
//! No lookup ever fails: unknown keys fall back as listed above.

use std::collections::HashMap;

/// Source of localized strings for the current UI language.
pub trait Translator {
    /// Translation for `key`, if the catalog has one.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Current locale code (e.g., `en`, `fi`).
    fn language(&self) -> &str;

    /// Translate `key`, interpolating `{name}` placeholders from `params`.
    /// Falls back to the key itself.
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.lookup(key)
            .map_or_else(|| key.to_string(), |text| interpolate(text, params))
    }

    /// Like [`Translator::t`], with an explicit fallback text.
    fn t_or(&self, key: &str, fallback: &str, params: &[(&str, &str)]) -> String {
        interpolate(self.lookup(key).unwrap_or(fallback), params)
    }
}

/// Replace every `{name}` in `text` with the matching parameter value.
fn interpolate(text: &str, params: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// In-memory translation catalog for one language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Build the catalog of the configured UI language.
    #[must_use]
    pub fn from_config(config: &portal_config::I18nConfig) -> Self {
        let catalog = Self::new(config.language.clone());
        match config.current_catalog() {
            Some(entries) => catalog.with_entries(entries.clone()),
            None => catalog,
        }
    }
}

impl Translator for Catalog {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn language(&self) -> &str {
        &self.language
    }
}

/// Convert an identifier to a stable `snake_case` key.
///
/// `camelCase`, `PascalCase`, `kebab-case`, dotted and spaced identifiers all
/// map to lowercase words joined by single underscores.
#[must_use]
pub fn normalize_key(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    let mut after_lower = false;
    for ch in id.trim().chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() {
                if after_lower && !out.ends_with('_') {
                    out.push('_');
                }
                out.extend(ch.to_lowercase());
                after_lower = false;
            } else {
                out.push(ch);
                after_lower = true;
            }
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            after_lower = false;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Localized label of a field.
#[must_use]
pub fn translate_field_name(translator: &dyn Translator, name: &str) -> String {
    let key = normalize_key(name);
    translator
        .lookup(&format!("fields.{key}"))
        .map_or(key, str::to_string)
}

/// Localized description of a field, if one exists.
#[must_use]
pub fn field_description(translator: &dyn Translator, name: &str) -> Option<String> {
    translator
        .lookup(&format!("fields.{}.description", normalize_key(name)))
        .map(str::to_string)
}

/// Vocabulary label of a stored value.
#[must_use]
pub fn translate_field_value(translator: &dyn Translator, field: &str, value: &str) -> String {
    translator
        .lookup(&format!(
            "values.{}.{}",
            normalize_key(field),
            normalize_key(value)
        ))
        .map_or_else(|| value.to_string(), str::to_string)
}

/// Vocabulary description of a stored value.
#[must_use]
pub fn translate_field_value_description(
    translator: &dyn Translator,
    field: &str,
    value: &str,
) -> String {
    let value_key = normalize_key(value);
    translator
        .lookup(&format!(
            "values.{}.{value_key}.description",
            normalize_key(field)
        ))
        .map_or(value_key, str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("entityType", "entity_type")]
    #[case("EntityType", "entity_type")]
    #[case("entity-type", "entity_type")]
    #[case("Entity Type", "entity_type")]
    #[case("entity_type", "entity_type")]
    #[case("date.published", "date_published")]
    #[case("field2Name", "field2_name")]
    #[case("  __weird--key__ ", "weird_key")]
    #[case("", "")]
    fn normalizes_identifiers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(input), expected);
    }

    fn catalog() -> Catalog {
        Catalog::new("en").with_entries([
            ("fields.entity_type", "Type"),
            ("fields.entity_type.description", "Kind of record"),
            ("values.entity_type.book", "Book"),
            ("values.entity_type.book.description", "A printed work"),
            ("search.summary.multiple", "{count} results for {query}"),
        ])
    }

    #[test]
    fn field_name_translation_and_fallback() {
        let catalog = catalog();
        assert_eq!(translate_field_name(&catalog, "entityType"), "Type");
        assert_eq!(translate_field_name(&catalog, "publishedAt"), "published_at");
    }

    #[test]
    fn field_description_is_optional() {
        let catalog = catalog();
        assert_eq!(
            field_description(&catalog, "entity_type").as_deref(),
            Some("Kind of record")
        );
        assert_eq!(field_description(&catalog, "title"), None);
    }

    #[test]
    fn value_translation_falls_back_to_raw_value() {
        let catalog = catalog();
        assert_eq!(translate_field_value(&catalog, "entityType", "Book"), "Book");
        assert_eq!(translate_field_value(&catalog, "entityType", "book"), "Book");
        assert_eq!(translate_field_value(&catalog, "entityType", "Film Reel"), "Film Reel");
    }

    #[test]
    fn value_description_falls_back_to_normalized_value() {
        let catalog = catalog();
        assert_eq!(
            translate_field_value_description(&catalog, "entity_type", "book"),
            "A printed work"
        );
        assert_eq!(
            translate_field_value_description(&catalog, "entity_type", "Film Reel"),
            "film_reel"
        );
    }

    #[test]
    fn interpolates_params() {
        let catalog = catalog();
        let text = catalog.t(
            "search.summary.multiple",
            &[("count", "12"), ("query", "moomin")],
        );
        assert_eq!(text, "12 results for moomin");
        assert_eq!(catalog.t("missing.key", &[]), "missing.key");
        assert_eq!(catalog.t_or("missing.key", "{n} left", &[("n", "3")]), "3 left");
    }

    #[test]
    fn catalog_from_config_uses_current_language() {
        let mut config = portal_config::I18nConfig::default();
        config.language = "fi".into();
        config.catalogs.insert(
            "fi".into(),
            [("fields.title".to_string(), "Nimeke".to_string())]
                .into_iter()
                .collect(),
        );
        let catalog = Catalog::from_config(&config);
        assert_eq!(catalog.language(), "fi");
        assert_eq!(translate_field_name(&catalog, "title"), "Nimeke");
    }
}
