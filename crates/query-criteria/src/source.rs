//! Adapter contract for building criteria from external input.
//!
//! [`CriteriaSource`] is implemented by whatever holds the loosely-typed input
//! (an HTTP request, CLI arguments, a stored search). [`ParamsSource`] is a
//! ready-made implementation that any serde format can populate.

use serde::{Deserialize, Serialize};

use crate::filter::RawFilter;
use crate::page::{DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET};

/// Read-only supplier of raw criteria data.
///
/// [`Criteria::from_source`](crate::Criteria::from_source) calls each method
/// at most once and nothing else.
///
/// # Example
///
/// ```
/// use query_criteria::{Criteria, CriteriaSource, RawFilter};
///
/// struct Request;
///
/// impl CriteriaSource for Request {
///     fn filter_groups(&self) -> Vec<Vec<RawFilter>> {
///         vec![vec![RawFilter::keyed("name", "=", "Jules")]]
///     }
///     fn order_by(&self) -> &str {
///         "name"
///     }
///     fn order_type(&self) -> &str {
///         "asc"
///     }
///     fn page_limit(&self) -> i64 {
///         25
///     }
///     fn page_number(&self) -> i64 {
///         3
///     }
/// }
///
/// let criteria = Criteria::from_source(&Request).unwrap();
/// assert_eq!(criteria.page_offset(), 50);
/// ```
pub trait CriteriaSource {
    /// The filter groups. Each group is a list of raw filters combined with
    /// AND; groups are combined with OR.
    fn filter_groups(&self) -> Vec<Vec<RawFilter>>;

    /// The field to order by.
    fn order_by(&self) -> &str;

    /// One of `asc`, `desc`, `none` or `random`, in any case.
    fn order_type(&self) -> &str;

    /// The size of a page.
    fn page_limit(&self) -> i64;

    /// The number of items to skip. Discarded when
    /// [`page_number`](CriteriaSource::page_number) is positive.
    fn page_offset(&self) -> i64 {
        DEFAULT_PAGE_OFFSET as i64
    }

    /// The 1-based page number. Values above 0 are used to compute the
    /// offset; 0 means "use the offset".
    fn page_number(&self) -> i64 {
        0
    }
}

impl<S: CriteriaSource + ?Sized> CriteriaSource for &S {
    fn filter_groups(&self) -> Vec<Vec<RawFilter>> {
        (**self).filter_groups()
    }

    fn order_by(&self) -> &str {
        (**self).order_by()
    }

    fn order_type(&self) -> &str {
        (**self).order_type()
    }

    fn page_limit(&self) -> i64 {
        (**self).page_limit()
    }

    fn page_offset(&self) -> i64 {
        (**self).page_offset()
    }

    fn page_number(&self) -> i64 {
        (**self).page_number()
    }
}

/// Plain-data criteria source.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults of [`ParamsSource::default`].
///
/// ```
/// # #[cfg(feature = "json")]
/// # {
/// use query_criteria::{Criteria, ParamsSource};
///
/// let source = ParamsSource::from_json(
///     r#"{"filter_groups": [[["name", "eq", "Vincent"]]], "order_by": "name", "order_type": "ASC"}"#,
/// )
/// .unwrap();
///
/// let criteria = Criteria::from_source(&source).unwrap();
/// assert_eq!(criteria.to_string(), "name.=.Vincent#name.asc#25.0");
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsSource {
    /// Raw filter groups.
    pub filter_groups: Vec<Vec<RawFilter>>,
    /// Field to order by.
    pub order_by: String,
    /// Order direction text.
    pub order_type: String,
    /// Page size.
    pub page_limit: i64,
    /// Items to skip.
    pub page_offset: i64,
    /// 1-based page number, 0 when unused.
    pub page_number: i64,
}

impl ParamsSource {
    /// Decodes a source from a JSON document.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a source from an already parsed JSON value.
    #[cfg(feature = "json")]
    pub fn from_json_value(value: serde_json::Value) -> crate::error::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl Default for ParamsSource {
    fn default() -> Self {
        ParamsSource {
            filter_groups: Vec::new(),
            order_by: String::new(),
            order_type: "none".to_string(),
            page_limit: DEFAULT_PAGE_LIMIT as i64,
            page_offset: DEFAULT_PAGE_OFFSET as i64,
            page_number: 0,
        }
    }
}

impl CriteriaSource for ParamsSource {
    fn filter_groups(&self) -> Vec<Vec<RawFilter>> {
        self.filter_groups.clone()
    }

    fn order_by(&self) -> &str {
        &self.order_by
    }

    fn order_type(&self) -> &str {
        &self.order_type
    }

    fn page_limit(&self) -> i64 {
        self.page_limit
    }

    fn page_offset(&self) -> i64 {
        self.page_offset
    }

    fn page_number(&self) -> i64 {
        self.page_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let source = ParamsSource::default();
        assert!(source.filter_groups().is_empty());
        assert_eq!(source.order_by(), "");
        assert_eq!(source.order_type(), "none");
        assert_eq!(source.page_limit(), 25);
        assert_eq!(source.page_offset(), 0);
        assert_eq!(source.page_number(), 0);
    }

    #[test]
    fn provided_methods() {
        struct Minimal;

        impl CriteriaSource for Minimal {
            fn filter_groups(&self) -> Vec<Vec<RawFilter>> {
                Vec::new()
            }
            fn order_by(&self) -> &str {
                ""
            }
            fn order_type(&self) -> &str {
                "none"
            }
            fn page_limit(&self) -> i64 {
                10
            }
        }

        assert_eq!(Minimal.page_offset(), 0);
        assert_eq!(Minimal.page_number(), 0);
        assert_eq!((&Minimal).page_limit(), 10);
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_fills_missing_fields() {
        let source = ParamsSource::from_json(r#"{"page_number": 2}"#).unwrap();
        assert_eq!(source.page_number, 2);
        assert_eq!(source.page_limit, 25);
        assert_eq!(source.order_type, "none");
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_reports_bad_documents() {
        let err = ParamsSource::from_json(r#"{"page_limit": "many"}"#).unwrap_err();
        assert!(matches!(err, crate::CriteriaError::InvalidSource(_)));
    }

    #[cfg(feature = "json")]
    #[test]
    fn from_json_value_reads_mixed_filter_shapes() {
        let source = ParamsSource::from_json_value(serde_json::json!({
            "filter_groups": [[
                ["title", "like", "to hero"],
                {"field": "tag", "operator": "in", "value": ["beginner", "intermediate"]}
            ]]
        }))
        .unwrap();

        let group = &source.filter_groups[0];
        assert!(group[0].is_positional());
        assert!(!group[1].is_positional());
    }
}
