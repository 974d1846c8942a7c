//! The criteria aggregate.
//!
//! [`Criteria`] composes filter groups, one [`Order`] and one [`Page`]. It is
//! immutable: every `with_*` method returns a new value and leaves the
//! receiver untouched.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{CriteriaError, Result};
use crate::filter_group::FilterGroup;
use crate::order::{Order, OrderType};
use crate::page::Page;
use crate::source::CriteriaSource;

/// Aggregate-level invariants over the filter groups.
///
/// Checked whenever the groups change: [`Criteria::new`],
/// [`Criteria::from_source`] and the `with_filter_group*` derivations. Order
/// and page derivations carry already-checked groups over unchanged, so an
/// entry here must only read `groups`.
///
/// Each entry is the name reported in [`CriteriaError::InvalidCriteria`] and
/// the predicate that must hold.
const INVARIANTS: &[(&str, fn(&Criteria) -> bool)] = &[(
    "filter_fields_must_not_be_empty",
    filter_fields_are_not_empty,
)];

fn filter_fields_are_not_empty(criteria: &Criteria) -> bool {
    criteria
        .groups
        .iter()
        .flat_map(FilterGroup::iter)
        .all(|filter| !filter.field().is_empty())
}

/// Which records to select, how to order them, and which page to return.
///
/// Groups combine with OR and the filters inside a group combine with AND:
///
/// ```text
/// (f1 AND f2) OR (f3 AND f4) OR ...
/// ```
///
/// No groups means no filtering.
///
/// # Example
///
/// ```
/// use query_criteria::{Criteria, FilterGroup, OrderType};
///
/// let criteria = Criteria::default()
///     .with_filter_group_from(|group| {
///         group
///             .add_filter_equal("name", "Vincent")
///             .add_filter_greater_or_equal_than("age", "35")
///     })?
///     .with_page_limit(100)?
///     .with_page_offset(0)?
///     .with_order_by("name")?
///     .with_order_type(OrderType::Asc);
///
/// assert_eq!(criteria.to_string(), "name.=.Vincent+age.>=.35#name.asc#100.0");
/// # Ok::<(), query_criteria::CriteriaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Criteria {
    groups: Vec<FilterGroup>,
    order: Order,
    page: Page,
}

impl Criteria {
    /// Creates criteria from its parts.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidCriteria`] listing every violated invariant.
    pub fn new(groups: Vec<FilterGroup>, order: Order, page: Page) -> Result<Self> {
        let criteria = Criteria {
            groups,
            order,
            page,
        };
        criteria.check()?;
        Ok(criteria)
    }

    /// Builds criteria from an external source.
    ///
    /// A positive page number takes precedence over the source's offset.
    pub fn from_source<S: CriteriaSource + ?Sized>(source: &S) -> Result<Self> {
        let groups = source
            .filter_groups()
            .iter()
            .map(|raw| FilterGroup::from_raw(raw))
            .collect::<Result<Vec<_>>>()?;

        let order = Order::new(source.order_by(), source.order_type().parse()?)?;

        let limit = source.page_limit();
        let page = match source.page_number() {
            number if number > 0 => Page::from_page_number(number, limit)?,
            _ => Page::new(limit, source.page_offset())?,
        };

        debug!(
            groups = groups.len(),
            order = %order,
            page = %page,
            "building criteria from source"
        );
        Criteria::new(groups, order, page)
    }

    fn check(&self) -> Result<()> {
        let violations: Vec<String> = INVARIANTS
            .iter()
            .filter(|(_, holds)| !holds(self))
            .map(|(name, _)| name.to_string())
            .collect();

        if violations.is_empty() {
            return Ok(());
        }
        debug!(?violations, "criteria invariants violated");
        Err(CriteriaError::InvalidCriteria { violations })
    }

    // ========================================================================
    // Derivations
    // ========================================================================

    /// Returns new criteria with the given groups replacing the current ones.
    pub fn with_filter_groups(&self, groups: Vec<FilterGroup>) -> Result<Self> {
        Criteria::new(groups, self.order.clone(), self.page)
    }

    /// Returns new criteria with `group` appended as another OR branch.
    pub fn with_filter_group(&self, group: FilterGroup) -> Result<Self> {
        let mut groups = self.groups.clone();
        groups.push(group);
        self.with_filter_groups(groups)
    }

    /// Returns new criteria with the group produced by `build` appended.
    ///
    /// `build` receives an empty group and returns the populated one.
    pub fn with_filter_group_from<F>(&self, build: F) -> Result<Self>
    where
        F: FnOnce(FilterGroup) -> FilterGroup,
    {
        self.with_filter_group(build(FilterGroup::new()))
    }

    /// Returns new criteria with the given order.
    pub fn with_order(&self, order: Order) -> Self {
        Criteria {
            groups: self.groups.clone(),
            order,
            page: self.page,
        }
    }

    /// Returns new criteria with random ordering.
    pub fn with_order_random(&self) -> Self {
        self.with_order(Order::random())
    }

    /// Returns new criteria ordered by `field`, keeping the current direction.
    pub fn with_order_by(&self, field: &str) -> Result<Self> {
        Ok(self.with_order(Order::new(field, self.order.order_type())?))
    }

    /// Returns new criteria with the given direction, keeping the current field.
    pub fn with_order_type(&self, order_type: OrderType) -> Self {
        self.with_order(self.order.with_order_type(order_type))
    }

    /// Returns new criteria with the given page.
    pub fn with_page(&self, page: Page) -> Self {
        Criteria {
            groups: self.groups.clone(),
            order: self.order.clone(),
            page,
        }
    }

    /// Returns new criteria with a new limit, keeping the current offset.
    pub fn with_page_limit(&self, limit: i64) -> Result<Self> {
        Ok(self.with_page(self.page.with_limit(limit)?))
    }

    /// Returns new criteria with a new offset, keeping the current limit.
    pub fn with_page_offset(&self, offset: i64) -> Result<Self> {
        Ok(self.with_page(self.page.with_offset(offset)?))
    }

    /// Returns new criteria positioned at a 1-based page number.
    ///
    /// `size` defaults to the current limit.
    pub fn with_page_number(&self, number: i64, size: Option<i64>) -> Result<Self> {
        // Page values never exceed i64::MAX.
        let size = size.unwrap_or(self.page.limit() as i64);
        Ok(self.with_page(Page::from_page_number(number, size)?))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the filter groups.
    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    /// Returns `true` if any group carries at least one filter.
    pub fn has_filters(&self) -> bool {
        self.groups.iter().any(|group| !group.is_empty())
    }

    /// Returns the order.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Returns the field to order by.
    pub fn order_by(&self) -> &str {
        self.order.by()
    }

    /// Returns the order direction.
    pub fn order_type(&self) -> OrderType {
        self.order.order_type()
    }

    /// Returns the page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Returns the page size.
    pub fn page_limit(&self) -> u64 {
        self.page.limit()
    }

    /// Returns the page offset.
    pub fn page_offset(&self) -> u64 {
        self.page.offset()
    }

    /// Returns the 1-based page number containing the offset.
    pub fn page_number(&self) -> u64 {
        self.page.page_number()
    }
}

/// No groups, no ordering, default page.
impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            groups: Vec::new(),
            order: Order::none(),
            page: Page::default(),
        }
    }
}

/// Canonical form: `groups#order#page`, groups joined by `||`.
impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str("||")?;
            }
            write!(f, "{group}")?;
        }
        write!(f, "#{}#{}", self.order, self.page)
    }
}
