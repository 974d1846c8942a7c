//! Pagination window.

use std::fmt;

use serde::Serialize;

use crate::error::{CriteriaError, Result};

/// Page size used when none is given.
pub const DEFAULT_PAGE_LIMIT: u64 = 25;

/// Offset used when none is given.
pub const DEFAULT_PAGE_OFFSET: u64 = 0;

/// A pagination window: how many items to return and how many to skip.
///
/// Inputs are signed so that negative values coming from loosely-typed
/// sources are reported rather than wrapped. Both values stay within
/// `0..=i64::MAX`; no tighter upper bound is enforced.
///
/// ```
/// use query_criteria::Page;
///
/// let page = Page::from_page_number(3, 25).unwrap();
/// assert_eq!(page.offset(), 50);
/// assert_eq!(page.page_number(), 3);
/// assert_eq!(page.to_string(), "25.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Page {
    limit: u64,
    offset: u64,
}

impl Page {
    /// Creates a page from a limit and an offset.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidPage`] when either value is negative.
    pub fn new(limit: i64, offset: i64) -> Result<Self> {
        Ok(Page {
            limit: non_negative("limit", limit)?,
            offset: non_negative("offset", offset)?,
        })
    }

    /// Creates a page from a 1-based page number and a page size.
    ///
    /// The offset is `size * (number - 1)`, so page 1 starts at 0.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidPage`] when `number < 1`, when `size` is
    /// negative, or when the offset does not fit.
    pub fn from_page_number(number: i64, size: i64) -> Result<Self> {
        if number < 1 {
            return Err(CriteriaError::InvalidPage {
                field: "number",
                value: number,
            });
        }
        let limit = non_negative("limit", size)?;
        let offset = size
            .checked_mul(number - 1)
            .ok_or(CriteriaError::InvalidPage {
                field: "number",
                value: number,
            })?;
        Ok(Page {
            limit,
            offset: non_negative("offset", offset)?,
        })
    }

    /// Returns the same offset with another limit.
    pub fn with_limit(&self, limit: i64) -> Result<Self> {
        Ok(Page {
            limit: non_negative("limit", limit)?,
            offset: self.offset,
        })
    }

    /// Returns the same limit with another offset.
    pub fn with_offset(&self, offset: i64) -> Result<Self> {
        Ok(Page {
            limit: self.limit,
            offset: non_negative("offset", offset)?,
        })
    }

    /// Returns the page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the number of items to skip.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the 1-based page number containing the offset.
    ///
    /// A zero limit has no pages to speak of and reports page 1.
    pub fn page_number(&self) -> u64 {
        match self.limit {
            0 => 1,
            limit => self.offset / limit + 1,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: DEFAULT_PAGE_LIMIT,
            offset: DEFAULT_PAGE_OFFSET,
        }
    }
}

/// Canonical form: `limit.offset`.
impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.limit, self.offset)
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| CriteriaError::InvalidPage { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Page::default();
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.to_string(), "25.0");
    }

    #[test]
    fn negative_values_are_rejected() {
        assert_eq!(
            Page::new(-1, 0),
            Err(CriteriaError::InvalidPage {
                field: "limit",
                value: -1
            })
        );
        assert_eq!(
            Page::new(10, -5),
            Err(CriteriaError::InvalidPage {
                field: "offset",
                value: -5
            })
        );
        assert!(Page::new(0, 0).is_ok());
    }

    #[test]
    fn page_numbers_are_one_based() {
        assert_eq!(Page::from_page_number(1, 25).unwrap().offset(), 0);
        assert_eq!(Page::from_page_number(3, 25).unwrap().offset(), 50);
        assert_eq!(Page::from_page_number(4, 0).unwrap().offset(), 0);
    }

    #[test]
    fn page_number_below_one_is_rejected() {
        for number in [0, -1, i64::MIN] {
            assert_eq!(
                Page::from_page_number(number, 25),
                Err(CriteriaError::InvalidPage {
                    field: "number",
                    value: number
                })
            );
        }
        assert!(Page::from_page_number(1, -1).is_err());
    }

    #[test]
    fn offset_overflow_is_rejected() {
        assert!(Page::from_page_number(i64::MAX, i64::MAX).is_err());
    }

    #[test]
    fn partial_updates() {
        let page = Page::new(10, 20).unwrap();
        assert_eq!(page.with_limit(5).unwrap(), Page::new(5, 20).unwrap());
        assert_eq!(page.with_offset(0).unwrap(), Page::new(10, 0).unwrap());
        assert!(page.with_limit(-1).is_err());
    }

    #[test]
    fn page_number_is_derived_from_offset() {
        assert_eq!(Page::new(10, 0).unwrap().page_number(), 1);
        assert_eq!(Page::new(10, 25).unwrap().page_number(), 3);
        assert_eq!(Page::new(0, 25).unwrap().page_number(), 1);
    }

    #[test]
    fn no_upper_bound() {
        let page = Page::new(i64::MAX, i64::MAX).unwrap();
        assert_eq!(page.limit(), i64::MAX as u64);
    }
}
