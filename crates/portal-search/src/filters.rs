//! Selected filter values per axis.

use std::collections::{BTreeMap, BTreeSet};

/// Axis name -> selected values. An axis without values has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    axes: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` on `axis`. Returns `false` if it was already selected.
    pub fn add(&mut self, axis: &str, value: &str) -> bool {
        self.axes
            .entry(axis.to_string())
            .or_default()
            .insert(value.to_string())
    }

    /// Make `value` the only selection on `axis`.
    pub fn replace(&mut self, axis: &str, value: &str) -> bool {
        let next = BTreeSet::from([value.to_string()]);
        let previous = self.axes.insert(axis.to_string(), next.clone());
        previous.as_ref() != Some(&next)
    }

    /// Deselect `value`. Returns `false` if it was not selected. Dropping the
    /// last value removes the axis entry.
    pub fn remove(&mut self, axis: &str, value: &str) -> bool {
        let Some(values) = self.axes.get_mut(axis) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.axes.remove(axis);
        }
        removed
    }

    pub fn clear_axis(&mut self, axis: &str) -> bool {
        self.axes.remove(axis).is_some()
    }

    pub fn clear(&mut self) {
        self.axes.clear();
    }

    #[must_use]
    pub fn values(&self, axis: &str) -> Option<&BTreeSet<String>> {
        self.axes.get(axis)
    }

    #[must_use]
    pub fn contains(&self, axis: &str, value: &str) -> bool {
        self.axes.get(axis).is_some_and(|values| values.contains(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.axes.iter().map(|(axis, values)| (axis.as_str(), values))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Number of axes with a selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut once = FilterState::new();
        once.add("type", "book");

        let mut twice = FilterState::new();
        assert!(twice.add("type", "book"));
        assert!(!twice.add("type", "book"));

        assert_eq!(once, twice);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut filters = FilterState::new();
        filters.add("type", "book");
        let before = filters.clone();
        assert!(!filters.remove("type", "film"));
        assert!(!filters.remove("language", "fin"));
        assert_eq!(filters, before);
    }

    #[test]
    fn removing_last_value_drops_axis() {
        let mut filters = FilterState::new();
        filters.add("type", "book");
        filters.add("type", "film");
        filters.remove("type", "book");
        assert_eq!(filters.len(), 1);
        filters.remove("type", "film");
        assert!(filters.values("type").is_none());
        assert!(filters.is_empty());
    }

    #[test]
    fn replace_keeps_single_value() {
        let mut filters = FilterState::new();
        assert!(filters.replace("year", "2000-2010"));
        assert!(filters.replace("year", "2005-2010"));
        assert!(!filters.replace("year", "2005-2010"));
        let values: Vec<&String> = filters.values("year").unwrap().iter().collect();
        assert_eq!(values, vec!["2005-2010"]);
    }
}
