//! Filter value types.
//!
//! A filter compares a field against a [`Value`]: nothing ([`Value::Null`]), a
//! single [`Scalar`], or an ordered list of scalars. Values are owned so they
//! can live inside immutable criteria, and they keep their original type
//! (numbers stay numbers, booleans stay booleans).

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Separator used when a list value is rendered in canonical form.
pub const LIST_SEPARATOR: &str = ",";

/// Value a filter compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// A single scalar.
    Scalar(Scalar),
    /// Ordered list of scalars, typically for `in` / `notIn`.
    List(Vec<Scalar>),
}

impl Value {
    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a list value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the scalar, if this is a single value.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the string, if this is a single string value.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Extracts the list elements, if this is a list value.
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Scalar(s) => write!(f, "{s}"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(LIST_SEPARATOR)?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// A single non-null value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
}

impl Scalar {
    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// Numeric value.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Integers compare equal across `I64` and `U64` when they denote the same
/// number. Floats compare by bit pattern, so `Eq` and `Hash` hold (`NaN`
/// equals itself, `0.0` and `-0.0` differ) and a float never equals an integer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

#[derive(PartialEq, Eq, Hash)]
enum NumberKey {
    Int(i128),
    Float(u64),
}

impl Number {
    fn key(self) -> NumberKey {
        match self {
            Number::I64(n) => NumberKey::Int(i128::from(n)),
            Number::U64(n) => NumberKey::Int(i128::from(n)),
            Number::F64(n) => NumberKey::Float(n.to_bits()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Scalar {
                fn from(n: $source) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Scalar(Scalar::from(n))
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Scalar(Scalar::Number(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::from(s))
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scalars() {
        assert_eq!(Value::from("Vincent").to_string(), "Vincent");
        assert_eq!(Value::from(35).to_string(), "35");
        assert_eq!(Value::from(-3i64).to_string(), "-3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn display_list_uses_comma() {
        assert_eq!(Value::from(["es", "fr", "pt"]).to_string(), "es,fr,pt");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "1,2");
        assert_eq!(Value::List(vec![]).to_string(), "");
    }

    #[test]
    fn integer_equality_across_signedness() {
        assert_eq!(Number::from(5u32), Number::from(5i32));
        assert_ne!(Number::from(5i32), Number::from(5.0));
        assert_ne!(Number::from(-1i64), Number::U64(u64::MAX));
    }

    #[test]
    fn float_equality_is_structural() {
        assert_eq!(Number::F64(f64::NAN), Number::F64(f64::NAN));
        assert_ne!(Number::F64(0.0), Number::F64(-0.0));
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn extractors() {
        let v = Value::from("name");
        assert_eq!(v.as_str(), Some("name"));
        assert!(v.as_list().is_none());

        let list = Value::from([1, 2, 3]);
        assert!(list.is_list());
        assert_eq!(list.as_list().map(<[Scalar]>::len), Some(3));
        assert!(Value::Null.is_null());

        assert_eq!(Scalar::from(7u8).as_number(), Some(Number::U64(7)));
        assert_eq!(Scalar::from(false).as_bool(), Some(false));
    }

    #[test]
    fn deserializes_preserving_types() {
        let v: Value = serde_json::from_str("[1, \"a\", true]").unwrap();
        assert_eq!(
            v,
            Value::List(vec![Scalar::from(1), Scalar::from("a"), Scalar::from(true)])
        );
        let v: Value = serde_json::from_str("null").unwrap();
        assert_eq!(v, Value::Null);
        let v: Value = serde_json::from_str("1.5").unwrap();
        assert_eq!(v, Value::from(1.5));
        assert!(serde_json::from_str::<Value>("[[1]]").is_err());
    }
}
