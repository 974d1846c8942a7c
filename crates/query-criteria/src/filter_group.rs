//! Conjunctions of filters.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::Result;
use crate::filter::{Filter, RawFilter};
use crate::operator::Operator;
use crate::value::Value;

/// An ordered, duplicate-free set of filters combined with logical AND.
///
/// Insertion order is kept and drives the canonical string. Adding a filter
/// that is already present leaves the group unchanged.
///
/// Duplicate detection is a linear scan, which is fine for the handful of
/// filters a group usually carries.
///
/// # Example
///
/// ```
/// use query_criteria::FilterGroup;
///
/// let group = FilterGroup::new()
///     .add_filter_equal("name", "Vincent")
///     .add_filter_greater_or_equal_than("age", 35)
///     .add_filter_equal("name", "Vincent");
///
/// assert_eq!(group.len(), 2);
/// assert_eq!(group.to_string(), "name.=.Vincent+age.>=.35");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FilterGroup {
    filters: Vec<Filter>,
}

impl FilterGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        FilterGroup::default()
    }

    /// Creates a group from filters, dropping duplicates.
    pub fn from_filters<I>(filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        filters
            .into_iter()
            .fold(FilterGroup::new(), FilterGroup::add_filter)
    }

    /// Creates a group from raw filters.
    ///
    /// Fails on the first raw filter that does not parse.
    pub fn from_raw(raw: &[RawFilter]) -> Result<Self> {
        let filters = raw
            .iter()
            .map(Filter::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(FilterGroup::from_filters(filters))
    }

    /// Appends a filter unless an equal one is already present.
    pub fn add_filter(mut self, filter: Filter) -> Self {
        if self.contains(&filter) {
            trace!(filter = %filter, "duplicate filter ignored");
            return self;
        }
        self.filters.push(filter);
        self
    }

    /// Builds a filter and appends it.
    pub fn add(self, field: &str, operator: Operator, value: impl Into<Value>) -> Self {
        self.add_filter(Filter::new(field, operator, value))
    }

    // ========================================================================
    // Per-operator shorthand
    // ========================================================================

    /// Adds a `field = value` filter.
    pub fn add_filter_equal(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::Equal, value)
    }

    /// Adds a `field != value` filter.
    pub fn add_filter_not_equal(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::NotEqual, value)
    }

    /// Adds a `field > value` filter.
    pub fn add_filter_greater_than(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::Gt, value)
    }

    /// Adds a `field >= value` filter.
    pub fn add_filter_greater_or_equal_than(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::Gte, value)
    }

    /// Adds a `field < value` filter.
    pub fn add_filter_less_than(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::Lt, value)
    }

    /// Adds a `field <= value` filter.
    pub fn add_filter_less_or_equal_than(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::Lte, value)
    }

    /// Adds a `field in value` filter.
    pub fn add_filter_in(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::In, value)
    }

    /// Adds a `field notIn value` filter.
    pub fn add_filter_not_in(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::NotIn, value)
    }

    /// Adds a `field like value` filter.
    pub fn add_filter_like(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::Like, value)
    }

    /// Adds a `field notLike value` filter.
    pub fn add_filter_not_like(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::NotLike, value)
    }

    /// Adds a `field contains value` filter.
    pub fn add_filter_contains(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::Contains, value)
    }

    /// Adds a `field notContains value` filter.
    pub fn add_filter_not_contains(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(field, Operator::NotContains, value)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the filters in insertion order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns an iterator over the filters.
    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if the group has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns `true` if an equal filter is present.
    pub fn contains(&self, filter: &Filter) -> bool {
        self.filters.iter().any(|f| f == filter)
    }
}

impl FromIterator<Filter> for FilterGroup {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        FilterGroup::from_filters(iter)
    }
}

impl IntoIterator for FilterGroup {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.into_iter()
    }
}

impl<'a> IntoIterator for &'a FilterGroup {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Canonical form: filters joined by `+`.
impl fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{filter}")?;
        }
        Ok(())
    }
}
