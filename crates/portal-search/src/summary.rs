//! Result summary text and facet axis labels.

use portal_core::SearchFacet;
use portal_fields::{translate_field_name, FieldRegistry, Translator};

/// Result summary for `num_found` hits.
///
/// Uses `search.summary.none`, `.one` or `.multiple` (with `{count}`), or
/// their `_query` variants (also given `{query}`) when a query is set.
#[must_use]
pub fn summary(translator: &dyn Translator, num_found: u64, query: &str) -> String {
    let query = query.trim();
    let count = num_found.to_string();
    let params = [("count", count.as_str()), ("query", query)];

    let (key, fallback) = match (num_found, query.is_empty()) {
        (0, true) => ("search.summary.none", "No results"),
        (1, true) => ("search.summary.one", "1 result"),
        (_, true) => ("search.summary.multiple", "{count} results"),
        (0, false) => ("search.summary.none_query", "No results for \"{query}\""),
        (1, false) => ("search.summary.one_query", "1 result for \"{query}\""),
        (_, false) => ("search.summary.multiple_query", "{count} results for \"{query}\""),
    };
    translator.t_or(key, fallback, &params)
}

/// Display label of a facet axis: the translated name of its UI field, or of
/// the axis itself when the UI field is not registered.
#[must_use]
pub fn axis_label(facet: &SearchFacet, registry: &FieldRegistry, translator: &dyn Translator) -> String {
    let name = registry
        .get(&facet.ui_field)
        .map_or(facet.name.as_str(), |field| field.name.as_str());
    translate_field_name(translator, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{FacetType, Field};
    use portal_fields::Catalog;
    use rstest::rstest;

    #[rstest]
    #[case(0, "", "No results")]
    #[case(1, "", "1 result")]
    #[case(42, "", "42 results")]
    #[case(0, "moomin", "No results for \"moomin\"")]
    #[case(1, "moomin", "1 result for \"moomin\"")]
    #[case(7, " moomin ", "7 results for \"moomin\"")]
    fn builtin_summaries(#[case] num_found: u64, #[case] query: &str, #[case] expected: &str) {
        assert_eq!(summary(&Catalog::new("en"), num_found, query), expected);
    }

    #[test]
    fn translated_summary() {
        let catalog = Catalog::new("fi").with_entries([
            ("search.summary.none", "Ei tuloksia"),
            ("search.summary.multiple", "{count} tulosta"),
        ]);
        assert_eq!(summary(&catalog, 0, ""), "Ei tuloksia");
        assert_eq!(summary(&catalog, 3, ""), "3 tulosta");
    }

    #[test]
    fn axis_label_uses_ui_field() {
        let registry = FieldRegistry::new(vec![Field::plain("entity_type")]).unwrap();
        let catalog = Catalog::new("en").with_entries([("fields.entity_type", "Type")]);
        let facet = SearchFacet::new("type", "entity_type", FacetType::Exact);
        assert_eq!(axis_label(&facet, &registry, &catalog), "Type");

        let unregistered = SearchFacet::new("yearPublished", "missing", FacetType::YearRange);
        assert_eq!(axis_label(&unregistered, &registry, &catalog), "year_published");
    }
}
