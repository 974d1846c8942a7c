//! Query criteria - immutable descriptions of which records to select, how to
//! order them, and which page to return.
//!
//! A [`Criteria`] value is independent of any storage engine. Repositories and
//! query builders translate it into their own query language; this crate only
//! guarantees that the description is structurally valid. It provides:
//!
//! - Filters: field, operator and value, with operator aliases (`eq`, `nin`, ...)
//! - Filter groups: AND inside a group, OR between groups
//! - Ordering: ascending, descending, none or random on a single field
//! - Pagination with limit and offset, or a 1-based page number
//! - A canonical string form, usable as a cache key
//! - [`CriteriaSource`], the adapter contract for loosely-typed input
//!
//! # Quick Start
//!
//! ```rust
//! use query_criteria::{Criteria, FilterGroup, Order, Page};
//!
//! let criteria = Criteria::default()
//!     .with_filter_group_from(|group| {
//!         group
//!             .add_filter_equal("status", "active")
//!             .add_filter_greater_or_equal_than("priority", 3)
//!     })?
//!     .with_filter_group(FilterGroup::new().add_filter_in("tag", ["urgent", "critical"]))?
//!     .with_order(Order::desc("priority")?)
//!     .with_page(Page::from_page_number(2, 20)?);
//!
//! assert_eq!(
//!     criteria.to_string(),
//!     "status.=.active+priority.>=.3||tag.in.urgent,critical#priority.desc#20.20"
//! );
//! # Ok::<(), query_criteria::CriteriaError>(())
//! ```
//!
//! # Semantics
//!
//! ```text
//! match = (f1 AND f2 AND ...) OR (f3 AND f4 AND ...) OR ...
//! ```
//!
//! - **Group**: all filters must match (empty = trivially satisfied)
//! - **Criteria**: at least one group must match (no groups = no filtering)
//!
//! # Operators
//!
//! | Operator | Symbol | Aliases |
//! |----------|--------|---------|
//! | `Equal` | `=` | `eq` |
//! | `NotEqual` | `!=` | `neq`, `ne` |
//! | `Gt` | `>` | `gt` |
//! | `Gte` | `>=` | `gte`, `ge` |
//! | `Lt` | `<` | `lt` |
//! | `Lte` | `<=` | `lte`, `le` |
//! | `In` | `in` | |
//! | `NotIn` | `notIn` | `nin`, `out` |
//! | `Like` | `like` | |
//! | `NotLike` | `notLike` | `nlike` |
//! | `Contains` | `contains` | |
//! | `NotContains` | `notContains` | `ncontains` |
//!
//! # Canonical String
//!
//! ```text
//! <group1>||<group2>||...#<orderBy>.<orderType>#<limit>.<offset>
//! ```
//!
//! Each group is its filters joined by `+`, each filter is
//! `field.symbol.value`, and list values are joined by `,`.

mod criteria;
mod error;
mod filter;
mod filter_group;
mod operator;
mod order;
mod page;
mod result;
mod source;
mod value;

// Re-export public API
pub use criteria::Criteria;
pub use error::{CriteriaError, Result};
pub use filter::{Filter, RawFilter};
pub use filter_group::FilterGroup;
pub use operator::Operator;
pub use order::{Order, OrderType};
pub use page::{Page, DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET};
pub use result::PaginatedResult;
pub use source::{CriteriaSource, ParamsSource};
pub use value::{Number, Scalar, Value, LIST_SEPARATOR};
