//! Records: field-name to value mappings.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::value::Value;

/// A record: a mapping from field name to scalar value.
///
/// Fields are kept in name order, so two records with the same fields
/// compare equal regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Get a field's value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Whether the record has the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Get a key field's value, failing with [`CoreError::MissingKeyField`].
    pub fn key(&self, field: &str) -> Result<&Value> {
        self.fields
            .get(field)
            .ok_or_else(|| CoreError::MissingKeyField(field.to_string()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a record from any serializable struct or map.
    ///
    /// Numbers become `Integer` or `Real`, booleans become `0`/`1`, and
    /// nested arrays or objects are rejected.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        let serde_json::Value::Object(map) = json else {
            return Err(CoreError::Serialization(
                "expected a struct or map at the top level".into(),
            ));
        };

        let mut record = Record::new();
        for (field, v) in map {
            let value = json_to_value(&field, v)?;
            record.fields.insert(field, value);
        }
        Ok(record)
    }

    /// Convert the record into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }
}

fn json_to_value(field: &str, v: serde_json::Value) -> Result<Value> {
    match v {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::from(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None => Ok(Value::Real(n.as_f64().unwrap_or(f64::NAN))),
        },
        serde_json::Value::String(s) => Ok(Value::Text(s)),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err(CoreError::UnsupportedValue {
                field: field.to_string(),
                reason: "nested values cannot be stored in a record field".into(),
            })
        }
    }
}

fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(r) => serde_json::Number::from_f64(*r)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Blob(b) => serde_json::Value::from(b.clone()),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Wrapper marking a serde value to be stored as a record.
///
/// ```
/// use recordkeep_core::{IntoRecord, Structured};
///
/// #[derive(serde::Serialize)]
/// struct Player { id: i64, name: String }
///
/// let record = Structured(Player { id: 7, name: "A".into() }).into_record().unwrap();
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Structured<T>(pub T);

/// Anything a store accepts where a record is expected.
///
/// Stores take either a field map or a structured value; both end up as a
/// [`Record`] before any key field is read.
pub trait IntoRecord {
    fn into_record(self) -> Result<Record>;
}

impl IntoRecord for Record {
    fn into_record(self) -> Result<Record> {
        Ok(self)
    }
}

impl IntoRecord for &Record {
    fn into_record(self) -> Result<Record> {
        Ok(self.clone())
    }
}

impl IntoRecord for BTreeMap<String, Value> {
    fn into_record(self) -> Result<Record> {
        Ok(Record { fields: self })
    }
}

impl IntoRecord for HashMap<String, Value> {
    fn into_record(self) -> Result<Record> {
        Ok(self.into_iter().collect())
    }
}

impl<T: Serialize> IntoRecord for Structured<T> {
    fn into_record(self) -> Result<Record> {
        Record::from_serialize(&self.0)
    }
}

impl<T: Serialize> IntoRecord for &Structured<T> {
    fn into_record(self) -> Result<Record> {
        Record::from_serialize(&self.0)
    }
}
