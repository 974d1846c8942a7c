//! Comparison operators for filters.
//!
//! The [`Operator`] enum is a closed set. Each variant has exactly one
//! canonical symbol; a small fixed table of short aliases (`eq`, `ne`, `nin`,
//! ...) resolves to those symbols before parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{CriteriaError, Result};

/// Comparison operator for a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `in`: value is one of a list.
    In,
    /// `notIn`: value is none of a list.
    NotIn,
    /// `like`: pattern match.
    Like,
    /// `notLike`
    NotLike,
    /// `contains`: substring or element containment.
    Contains,
    /// `notContains`
    NotContains,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 12] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::NotIn,
        Operator::Like,
        Operator::NotLike,
        Operator::Contains,
        Operator::NotContains,
    ];

    /// Returns the canonical symbol of this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Like => "like",
            Operator::NotLike => "notLike",
            Operator::Contains => "contains",
            Operator::NotContains => "notContains",
        }
    }

    /// Parses a canonical symbol. Aliases are not accepted here.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        let op = match symbol {
            "=" => Operator::Equal,
            "!=" => Operator::NotEqual,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "in" => Operator::In,
            "notIn" => Operator::NotIn,
            "like" => Operator::Like,
            "notLike" => Operator::NotLike,
            "contains" => Operator::Contains,
            "notContains" => Operator::NotContains,
            _ => return None,
        };
        Some(op)
    }

    /// Maps a short alias to its canonical symbol.
    ///
    /// Input that is not an alias is returned unchanged.
    ///
    /// | Alias | Symbol |
    /// |-------|--------|
    /// | `eq` | `=` |
    /// | `neq`, `ne` | `!=` |
    /// | `gt` | `>` |
    /// | `gte`, `ge` | `>=` |
    /// | `lt` | `<` |
    /// | `lte`, `le` | `<=` |
    /// | `nin`, `out` | `notIn` |
    /// | `nlike` | `notLike` |
    /// | `ncontains` | `notContains` |
    pub fn resolve_alias(text: &str) -> &str {
        match text {
            "eq" => "=",
            "neq" | "ne" => "!=",
            "gt" => ">",
            "gte" | "ge" => ">=",
            "lt" => "<",
            "lte" | "le" => "<=",
            "nin" | "out" => "notIn",
            "nlike" => "notLike",
            "ncontains" => "notContains",
            other => other,
        }
    }

    /// Parses a canonical symbol or a short alias.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::InvalidOperator`] when `text` is neither.
    ///
    /// ```
    /// use query_criteria::Operator;
    ///
    /// assert_eq!(Operator::from_symbol_or_alias("nin").unwrap(), Operator::NotIn);
    /// assert_eq!(Operator::from_symbol_or_alias(">=").unwrap(), Operator::Gte);
    /// assert!(Operator::from_symbol_or_alias("~").is_err());
    /// ```
    pub fn from_symbol_or_alias(text: &str) -> Result<Operator> {
        Operator::from_symbol(Operator::resolve_alias(text))
            .ok_or_else(|| CriteriaError::InvalidOperator(text.to_string()))
    }

    /// Returns `true` for operators whose value is naturally a list.
    ///
    /// Filters do not enforce this; translation layers may.
    pub fn expects_list(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

impl FromStr for Operator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::from_symbol_or_alias(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}
