//! Ordering types for criteria.
//!
//! Provides [`OrderType`] for the sort direction and [`Order`] for a field and
//! direction pair.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{CriteriaError, Result};

// Letters, digits and underscore; empty is allowed.
static FIELD_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w*$").expect("valid regex"));

/// Sort direction.
///
/// Parsed case-insensitively, rendered lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
    /// No ordering requested.
    None,
    /// Random order.
    Random,
}

impl OrderType {
    /// Returns the lowercase name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Asc => "asc",
            OrderType::Desc => "desc",
            OrderType::None => "none",
            OrderType::Random => "random",
        }
    }
}

impl FromStr for OrderType {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(OrderType::Asc),
            "desc" => Ok(OrderType::Desc),
            "none" => Ok(OrderType::None),
            "random" => Ok(OrderType::Random),
            _ => Err(CriteriaError::InvalidOrderType(s.to_string())),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A sort directive: the field to order by and the direction.
///
/// The field must consist of word characters only. It may be empty, which is
/// the natural state for [`Order::none`] and [`Order::random`].
///
/// ```
/// use query_criteria::{Order, OrderType};
///
/// let order = Order::desc("created_at").unwrap();
/// assert_eq!(order.order_type(), OrderType::Desc);
/// assert_eq!(order.to_string(), "created_at.desc");
///
/// assert!(Order::asc("bad name!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Order {
    by: String,
    #[serde(rename = "type")]
    order_type: OrderType,
}

impl Order {
    /// Creates an ordering with the given direction.
    ///
    /// # Errors
    ///
    /// [`CriteriaError::InvalidOrder`] when `by` contains non-word characters.
    pub fn new(by: impl Into<String>, order_type: OrderType) -> Result<Self> {
        let by = by.into();
        if !FIELD_NAME.is_match(&by) {
            return Err(CriteriaError::InvalidOrder(by));
        }
        Ok(Order { by, order_type })
    }

    /// Creates an ascending ordering for the given field.
    pub fn asc(by: impl Into<String>) -> Result<Self> {
        Order::new(by, OrderType::Asc)
    }

    /// Creates a descending ordering for the given field.
    pub fn desc(by: impl Into<String>) -> Result<Self> {
        Order::new(by, OrderType::Desc)
    }

    /// No ordering.
    pub fn none() -> Self {
        Order {
            by: String::new(),
            order_type: OrderType::None,
        }
    }

    /// Random ordering.
    pub fn random() -> Self {
        Order {
            by: String::new(),
            order_type: OrderType::Random,
        }
    }

    /// Returns the same field with another direction.
    pub fn with_order_type(&self, order_type: OrderType) -> Self {
        Order {
            by: self.by.clone(),
            order_type,
        }
    }

    /// Returns the field to order by.
    pub fn by(&self) -> &str {
        &self.by
    }

    /// Returns the direction.
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Returns `true` if no ordering is requested.
    pub fn is_none(&self) -> bool {
        self.order_type == OrderType::None
    }

    /// Returns `true` if random ordering is requested.
    pub fn is_random(&self) -> bool {
        self.order_type == OrderType::Random
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::none()
    }
}

/// Canonical form: `by.type`.
impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.by, self.order_type)
    }
}
