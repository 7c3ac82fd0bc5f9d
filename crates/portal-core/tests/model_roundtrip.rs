//! Serde roundtrip and JsonSchema validation tests for the wire and config types.

use portal_core::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            pretty_assertions::assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schemars::schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    item_roundtrip,
    Item,
    Item::new("it-1", "book", "urn:book:1")
        .with_value("title", "Tales from Moominvalley")
        .with_value("author", "Tove Jansson")
        .with_value("author", "Thomas Warburton")
);

roundtrip_and_validate!(
    field_roundtrip,
    Field,
    Field::new(
        "abstract",
        Renderer::Description,
        vec![
            FieldSource::new("abstract_en").with_language("en"),
            FieldSource::new("abstract_fi")
                .with_language("fi")
                .with_concatenator(" / "),
        ],
    )
    .in_category("content", true)
);

roundtrip_and_validate!(
    search_facet_roundtrip,
    SearchFacet,
    SearchFacet::new("year", "published", FacetType::YearRange)
);

roundtrip_and_validate!(
    results_facet_roundtrip,
    SearchResultsFacet,
    SearchResultsFacet {
        axis: "subject".into(),
        buckets: vec![
            Bucket::new("science", 12),
            Bucket {
                value: "science/physics".into(),
                count: 4,
                hierarchy_info: Some(HierarchyInfo {
                    label: Some("Physics".into()),
                    parents: vec!["science".into()],
                    has_children: true,
                }),
            },
        ],
        bucket_no: 40,
    }
);

roundtrip_and_validate!(
    search_params_roundtrip,
    SearchParams,
    SearchParams {
        query: "moomin".into(),
        offset: 20,
        limit: 10,
        filters: vec![FilterParam {
            axis: "type".into(),
            facet_type: FacetType::Exact,
            values: vec!["book".into(), "film".into()],
        }],
        facets: vec![FacetRequest {
            axis: "type".into(),
            offset: 0,
            limit: 10,
        }],
        sort: Some(SortSpec {
            axis: "modified".into(),
            order: SortOrder::Desc,
        }),
    }
);

roundtrip_and_validate!(
    search_response_roundtrip,
    SearchResponse,
    SearchResponse {
        num_found: 1,
        items: vec![Item::new("it-1", "book", "urn:book:1").with_value("title", "Moomin")],
        facets: vec![SearchResultsFacet {
            axis: "type".into(),
            buckets: vec![Bucket::new("book", 1)],
            bucket_no: 1,
        }],
    }
);

roundtrip_and_validate!(
    hierarchy_roundtrip,
    Hierarchy,
    Hierarchy {
        axis: "subject".into(),
        nodes: vec![HierarchyNode {
            value: "science".into(),
            label: Some("Science".into()),
            count: Some(12),
            children: vec![HierarchyNode::leaf("science/physics", 4)],
        }],
    }
);

#[test]
fn relevance_sort_is_omitted_on_the_wire() {
    let params = SearchParams {
        query: "x".into(),
        limit: 10,
        ..Default::default()
    };
    let json = serde_json::to_value(&params).unwrap();
    assert!(json.get("sort").is_none());
}

#[test]
fn partial_response_defaults_missing_collections() {
    let response: SearchResponse = serde_json::from_str(r#"{"num_found": 3}"#).unwrap();
    assert_eq!(response.num_found, 3);
    assert!(response.items.is_empty());
    assert!(response.facets.is_empty());
}

#[test]
fn facet_type_key_is_type() {
    let facet: SearchFacet =
        serde_json::from_str(r#"{"name": "subject", "ui_field": "subject", "type": "hierarchy"}"#)
            .unwrap();
    assert_eq!(facet.facet_type, FacetType::Hierarchy);
}
