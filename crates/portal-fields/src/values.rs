//! Raw value resolution for logical fields.

use portal_core::{Field, FieldSource, Item};

/// One stored value matched by a field, with the sub-field it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedValue<'a> {
    pub field_value: &'a str,
    pub source: &'a FieldSource,
}

/// All values of `item` matched by `field`.
///
/// Sub-fields are scanned in declaration order; within one sub-field the
/// item's value order is kept. Empty when no sub-field matches.
#[must_use]
pub fn get_values<'a>(field: &'a Field, item: &'a Item) -> Vec<ResolvedValue<'a>> {
    field
        .resolves_to
        .iter()
        .flat_map(|source| {
            item.values_of(&source.name)
                .map(move |field_value| ResolvedValue {
                    field_value,
                    source,
                })
        })
        .collect()
}

/// Unmodified stored strings of every field, in field order.
///
/// Fields without values contribute nothing.
#[must_use]
pub fn get_raw_values(fields: &[&Field], item: &Item) -> Vec<String> {
    fields
        .iter()
        .flat_map(|field| get_values(field, item))
        .map(|v| v.field_value.to_string())
        .collect()
}

/// Whether any sub-field of `field` has a value on `item`.
#[must_use]
pub fn has_value(field: &Field, item: &Item) -> bool {
    field
        .resolves_to
        .iter()
        .any(|source| item.values_of(&source.name).next().is_some())
}

/// Whether the ordered raw values of `field` differ between `item` and
/// `previous`. Without a previous version nothing has changed.
#[must_use]
pub fn has_value_changed(field: &Field, item: &Item, previous: Option<&Item>) -> bool {
    previous.is_some_and(|previous| {
        let current = get_values(field, item).into_iter().map(|v| v.field_value);
        let before = get_values(field, previous).into_iter().map(|v| v.field_value);
        !current.eq(before)
    })
}

/// Whether the field label should use its plural form.
#[must_use]
pub fn use_plural_label(field: &Field, item: &Item) -> bool {
    get_values(field, item).len() > 1
}
