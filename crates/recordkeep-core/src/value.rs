//! Scalar values stored in record fields.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar field value.
///
/// Mirrors the storage classes of SQLite so relational rows convert without
/// loss. Values compare across variants the way SQLite sorts them:
/// `Null` < numbers < text < blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The numeric content as a float, for integers and reals.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    fn storage_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Integer(_) | Value::Real(_) => 1,
            Value::Text(_) => 2,
            Value::Blob(_) => 3,
        }
    }

    /// Total ordering used for `ORDER BY` emulation.
    ///
    /// Integers and reals compare numerically with each other. Text compares
    /// by bytes (SQLite's default `BINARY` collation).
    pub fn sql_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => {
                let a = self.as_real().unwrap_or_default();
                let b = other.as_real().unwrap_or_default();
                a.total_cmp(&b)
            }
            (Value::Text(a), Value::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            _ => self.storage_rank().cmp(&other.storage_rank()),
        }
    }

    /// Equality used for `WHERE field = value` emulation.
    ///
    /// `NULL = x` never matches, and integers match equal reals.
    pub fn sql_eq(&self, other: &Value) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        self.sql_cmp(other) == Ordering::Equal
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
            Value::Blob(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_cross_type_ordering() {
        let mut values = vec![
            Value::Text("b".into()),
            Value::Blob(vec![1]),
            Value::Integer(10),
            Value::Null,
            Value::Real(2.5),
            Value::Text("a".into()),
        ];
        values.sort_by(|a, b| a.sql_cmp(b));

        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Real(2.5),
                Value::Integer(10),
                Value::Text("a".into()),
                Value::Text("b".into()),
                Value::Blob(vec![1]),
            ]
        );
    }

    #[test]
    fn test_sql_eq() {
        assert!(Value::Integer(3).sql_eq(&Value::Real(3.0)));
        assert!(!Value::Integer(3).sql_eq(&Value::Text("3".into())));
        assert!(!Value::Null.sql_eq(&Value::Null));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::from("seven").to_string(), "seven");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    fn any_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<i64>().prop_map(Value::Integer),
            (-1.0e9f64..1.0e9).prop_map(Value::Real),
            "[a-z]{0,6}".prop_map(Value::Text),
            prop::collection::vec(any::<u8>(), 0..6).prop_map(Value::Blob),
        ]
    }

    proptest! {
        #[test]
        fn test_sql_cmp_antisymmetric(a in any_value(), b in any_value()) {
            prop_assert_eq!(a.sql_cmp(&b), b.sql_cmp(&a).reverse());
        }

        #[test]
        fn test_sql_eq_never_matches_null(a in any_value()) {
            prop_assert!(!Value::Null.sql_eq(&a));
            prop_assert_eq!(a.sql_eq(&a), !a.is_null());
        }
    }
}
