//! Filter predicates.
//!
//! A [`Filter`] represents a single predicate: a field name, an operator, and
//! a comparison value. [`RawFilter`] is the loosely-typed shape filters arrive
//! in from external input, before operator aliases are resolved.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CriteriaError, Result};
use crate::operator::Operator;
use crate::value::{Scalar, Value};

/// A single filter predicate.
///
/// A filter consists of:
/// - A field name (the field to compare)
/// - An operator (how to compare)
/// - A value (what to compare against)
///
/// Filters are immutable. Two filters are equal when field, operator and value
/// are all equal.
///
/// # Example
///
/// ```
/// use query_criteria::{Filter, Operator};
///
/// let filter = Filter::new("age", Operator::Gte, 35);
/// assert_eq!(filter, Filter::greater_or_equal_than("age", 35));
/// assert_eq!(filter.to_string(), "age.>=.35");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Filter {
    field: String,
    operator: Operator,
    value: Value,
}

impl Filter {
    /// Creates a new filter.
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Filter {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Builds a filter from its raw positional or keyed form.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidOperator`] when the operator text does not
    /// resolve, [`CriteriaError::MalformedFilter`] when the shape is wrong.
    pub fn from_raw(raw: &RawFilter) -> Result<Self> {
        let (field, operator, value) = raw.parts()?;
        Ok(Filter::new(
            field,
            Operator::from_symbol_or_alias(operator)?,
            value.clone(),
        ))
    }

    // ========================================================================
    // Per-operator constructors
    // ========================================================================

    /// `field = value`
    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::Equal, value)
    }

    /// `field != value`
    pub fn not_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::NotEqual, value)
    }

    /// `field > value`
    pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::Gt, value)
    }

    /// `field >= value`
    pub fn greater_or_equal_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::Gte, value)
    }

    /// `field < value`
    pub fn less_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::Lt, value)
    }

    /// `field <= value`
    pub fn less_or_equal_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::Lte, value)
    }

    /// `field in value`
    pub fn is_in(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::In, value)
    }

    /// `field notIn value`
    pub fn not_in(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::NotIn, value)
    }

    /// `field like value`
    pub fn like(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::Like, value)
    }

    /// `field notLike value`
    pub fn not_like(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::NotLike, value)
    }

    /// `field contains value`
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::Contains, value)
    }

    /// `field notContains value`
    pub fn not_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::new(field, Operator::NotContains, value)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the comparison value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Canonical form: `field.operator.value`.
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.field, self.operator, self.value)
    }
}

/// A filter as supplied by external input.
///
/// Either a positional triple `[field, operator, value]` or a mapping with
/// `field`, `operator` and `value` keys. A mapping whose keys are exactly
/// `"0"`..`"n-1"` is treated as positional, which is how indexed lists come
/// out of query-string decoders.
///
/// Operators may be canonical symbols or aliases. Values keep their type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFilter {
    /// `[field, operator, value]`
    Positional(Vec<Value>),
    /// `{"field": .., "operator": .., "value": ..}`
    Keyed(BTreeMap<String, Value>),
}

impl RawFilter {
    /// Creates a positional raw filter.
    pub fn positional(field: &str, operator: &str, value: impl Into<Value>) -> Self {
        RawFilter::Positional(vec![field.into(), operator.into(), value.into()])
    }

    /// Creates a keyed raw filter.
    pub fn keyed(field: &str, operator: &str, value: impl Into<Value>) -> Self {
        RawFilter::Keyed(BTreeMap::from([
            ("field".to_string(), field.into()),
            ("operator".to_string(), operator.into()),
            ("value".to_string(), value.into()),
        ]))
    }

    /// Returns `true` if this raw filter will be read positionally.
    pub fn is_positional(&self) -> bool {
        match self {
            RawFilter::Positional(_) => true,
            RawFilter::Keyed(map) => is_indexed(map),
        }
    }

    fn parts(&self) -> Result<(&str, &str, &Value)> {
        match self {
            RawFilter::Positional(items) => {
                let items: Vec<&Value> = items.iter().collect();
                positional_parts(&items)
            }
            RawFilter::Keyed(map) if is_indexed(map) => {
                let items: Vec<&Value> = (0..map.len())
                    .filter_map(|i| map.get(&i.to_string()))
                    .collect();
                positional_parts(&items)
            }
            RawFilter::Keyed(map) => {
                let field = map
                    .get("field")
                    .ok_or_else(|| malformed("missing 'field' key"))?;
                let operator = map
                    .get("operator")
                    .ok_or_else(|| malformed("missing 'operator' key"))?;
                // An absent value is a null comparison value.
                let value = map.get("value").unwrap_or(&Value::Null);
                Ok((field_name(field)?, text(operator, "operator")?, value))
            }
        }
    }
}

fn is_indexed(map: &BTreeMap<String, Value>) -> bool {
    !map.is_empty() && (0..map.len()).all(|i| map.contains_key(&i.to_string()))
}

fn positional_parts<'a>(items: &[&'a Value]) -> Result<(&'a str, &'a str, &'a Value)> {
    match items {
        [field, operator, value] => Ok((
            field_name(*field)?,
            text(*operator, "operator")?,
            *value,
        )),
        _ => Err(malformed(&format!(
            "expected [field, operator, value], got {} elements",
            items.len()
        ))),
    }
}

fn field_name(value: &Value) -> Result<&str> {
    match text(value, "field")? {
        "" => Err(malformed("field must not be empty")),
        name => Ok(name),
    }
}

fn text<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    match value {
        Value::Scalar(Scalar::String(s)) => Ok(s),
        other => Err(malformed(&format!("{what} must be a string, got '{other}'"))),
    }
}

fn malformed(reason: &str) -> CriteriaError {
    CriteriaError::MalformedFilter(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_operator_constructors() {
        let cases = [
            (Filter::equal("name", "Vincent"), Operator::Equal, "="),
            (Filter::not_equal("name", "Vincent"), Operator::NotEqual, "!="),
            (Filter::greater_than("stars", 5), Operator::Gt, ">"),
            (Filter::greater_or_equal_than("stars", 5), Operator::Gte, ">="),
            (Filter::less_than("stars", 5), Operator::Lt, "<"),
            (Filter::less_or_equal_than("stars", 5), Operator::Lte, "<="),
            (Filter::is_in("country", ["es", "fr"]), Operator::In, "in"),
            (Filter::not_in("country", ["es", "fr"]), Operator::NotIn, "notIn"),
            (Filter::like("bio", "developer"), Operator::Like, "like"),
            (Filter::not_like("bio", "developer"), Operator::NotLike, "notLike"),
            (Filter::contains("bio", "developer"), Operator::Contains, "contains"),
            (
                Filter::not_contains("bio", "developer"),
                Operator::NotContains,
                "notContains",
            ),
        ];

        for (filter, op, symbol) in cases {
            assert_eq!(filter.operator(), op);
            assert_eq!(filter.operator().symbol(), symbol);
        }
    }

    #[test]
    fn accessors() {
        let filter = Filter::equal("name", "Vincent");
        assert_eq!(filter.field(), "name");
        assert_eq!(filter.value(), &Value::from("Vincent"));
    }

    #[test]
    fn canonical_string() {
        assert_eq!(Filter::equal("name", "Vincent").to_string(), "name.=.Vincent");
        assert_eq!(
            Filter::is_in("country", ["es", "fr", "pt"]).to_string(),
            "country.in.es,fr,pt"
        );
        assert_eq!(Filter::equal("deleted_at", Value::Null).to_string(), "deleted_at.=.");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(Filter::equal("a", 1), Filter::equal("a", 1u64));
        assert_ne!(Filter::equal("a", 1), Filter::equal("a", "1"));
        assert_ne!(Filter::equal("a", 1), Filter::not_equal("a", 1));
        assert_ne!(Filter::equal("a", 1), Filter::equal("b", 1));
    }

    #[test]
    fn from_positional_raw() {
        let raw = RawFilter::positional("age", "gte", 35);
        let filter = Filter::from_raw(&raw).unwrap();
        assert_eq!(filter, Filter::greater_or_equal_than("age", 35));
    }

    #[test]
    fn from_keyed_raw() {
        let raw = RawFilter::keyed("tag", "nin", ["a", "b"]);
        let filter = Filter::from_raw(&raw).unwrap();
        assert_eq!(filter, Filter::not_in("tag", ["a", "b"]));
    }

    #[test]
    fn indexed_mapping_is_positional() {
        let raw = RawFilter::Keyed(BTreeMap::from([
            ("0".to_string(), Value::from("name")),
            ("1".to_string(), Value::from("eq")),
            ("2".to_string(), Value::from("Jules")),
        ]));
        assert!(raw.is_positional());
        assert_eq!(Filter::from_raw(&raw).unwrap(), Filter::equal("name", "Jules"));
    }

    #[test]
    fn non_contiguous_keys_are_keyed() {
        let raw = RawFilter::Keyed(BTreeMap::from([
            ("1".to_string(), Value::from("name")),
            ("2".to_string(), Value::from("eq")),
            ("3".to_string(), Value::from("Jules")),
        ]));
        assert!(!raw.is_positional());
        assert!(matches!(
            Filter::from_raw(&raw),
            Err(CriteriaError::MalformedFilter(_))
        ));
    }

    #[test]
    fn keyed_without_value_is_null() {
        let raw = RawFilter::Keyed(BTreeMap::from([
            ("field".to_string(), Value::from("deleted_at")),
            ("operator".to_string(), Value::from("=")),
        ]));
        assert_eq!(
            Filter::from_raw(&raw).unwrap(),
            Filter::equal("deleted_at", Value::Null)
        );
    }

    #[test]
    fn raw_errors() {
        let unknown_op = RawFilter::positional("name", "between", 1);
        assert_eq!(
            Filter::from_raw(&unknown_op),
            Err(CriteriaError::InvalidOperator("between".to_string()))
        );

        let short = RawFilter::Positional(vec![Value::from("name"), Value::from("=")]);
        assert!(matches!(
            Filter::from_raw(&short),
            Err(CriteriaError::MalformedFilter(_))
        ));

        let numeric_field = RawFilter::Positional(vec![1.into(), "=".into(), 1.into()]);
        assert!(matches!(
            Filter::from_raw(&numeric_field),
            Err(CriteriaError::MalformedFilter(_))
        ));
    }

    #[test]
    fn raw_empty_field_is_rejected() {
        assert_eq!(
            Filter::from_raw(&RawFilter::positional("", "=", 1)),
            Err(CriteriaError::MalformedFilter(
                "field must not be empty".to_string()
            ))
        );
        assert_eq!(
            Filter::from_raw(&RawFilter::keyed("", "=", 1)),
            Err(CriteriaError::MalformedFilter(
                "field must not be empty".to_string()
            ))
        );

        let json: RawFilter =
            serde_json::from_str(r#"{"field": "", "operator": "=", "value": 1}"#).unwrap();
        assert!(matches!(
            Filter::from_raw(&json),
            Err(CriteriaError::MalformedFilter(_))
        ));
    }

    #[test]
    fn raw_deserializes_both_shapes() {
        let positional: RawFilter = serde_json::from_str(r#"["stars", ">", 5]"#).unwrap();
        assert!(matches!(positional, RawFilter::Positional(_)));
        assert_eq!(
            Filter::from_raw(&positional).unwrap(),
            Filter::greater_than("stars", 5)
        );

        let keyed: RawFilter =
            serde_json::from_str(r#"{"field": "active", "operator": "eq", "value": true}"#)
                .unwrap();
        assert_eq!(Filter::from_raw(&keyed).unwrap(), Filter::equal("active", true));
    }
}
