//! CompositeKeyStore: records keyed by an ordered pair of fields.
//!
//! Built on [`SingleKeyStore`] by composition: the first key component is the
//! wrapped store's key field, and the operations that do not care about the
//! second component delegate to it unchanged.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use recordkeep_core::{IntoRecord, KeyedStore, Record, Value};

use crate::backend::Backend;
use crate::error::{Result, SqlError};
use crate::query::Query;
use crate::single::{SingleKeyStore, DEFAULT_KEY_FIELD};

/// Second key field used when none is configured.
pub const DEFAULT_SECOND_KEY_FIELD: &str = "id";

/// A table of records identified by `(key1, key2)`.
///
/// Uniqueness of the pair is assumed, not enforced. Partial lookups on the
/// first component (`get_some`, `count_some`, `delete_some`) address every
/// record sharing it.
pub struct CompositeKeyStore<B: Backend + ?Sized> {
    base: SingleKeyStore<B>,
    key_field2: String,
}

impl<B: Backend + ?Sized> Clone for CompositeKeyStore<B> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            key_field2: self.key_field2.clone(),
        }
    }
}

impl<B: Backend + ?Sized> CompositeKeyStore<B> {
    /// Bind a store to `table`, keyed on the default field pair.
    pub fn new(backend: Arc<B>, table: impl Into<String>) -> Self {
        Self::with_keys(backend, table, DEFAULT_KEY_FIELD, DEFAULT_SECOND_KEY_FIELD)
    }

    /// Bind a store to `table`, keyed on `(key_field, key_field2)`.
    pub fn with_keys(
        backend: Arc<B>,
        table: impl Into<String>,
        key_field: impl Into<String>,
        key_field2: impl Into<String>,
    ) -> Self {
        Self {
            base: SingleKeyStore::with_key(backend, table, key_field),
            key_field2: key_field2.into(),
        }
    }

    pub fn table(&self) -> &str {
        self.base.table()
    }

    /// The first key field.
    pub fn key_field(&self) -> &str {
        self.base.key_field()
    }

    /// The second key field.
    pub fn key_field2(&self) -> &str {
        &self.key_field2
    }

    /// The single-key view over the same table, keyed on the first field.
    pub fn as_single(&self) -> &SingleKeyStore<B> {
        &self.base
    }

    fn backend(&self) -> &Arc<B> {
        self.base.backend()
    }

    fn by_pair(&self, key1: impl Into<Value>, key2: impl Into<Value>) -> Query {
        self.base
            .query()
            .filter(self.key_field(), key1)
            .filter(&self.key_field2, key2)
    }

    fn by_first(&self, key1: impl Into<Value>) -> Query {
        self.base.query().filter(self.key_field(), key1)
    }

    fn ordered(&self, query: Query) -> Query {
        query.order_by(self.key_field()).order_by(&self.key_field2)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the record identified by `(key1, key2)`.
    pub fn get(&self, key1: impl Into<Value>, key2: impl Into<Value>) -> Result<Option<Record>> {
        let query = self.by_pair(key1, key2);
        Ok(self.backend().select(&query)?.into_iter().next())
    }

    /// Fetch a record and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(
        &self,
        key1: impl Into<Value>,
        key2: impl Into<Value>,
    ) -> Result<Option<T>> {
        self.get(key1, key2)?
            .map(|record| record.deserialize().map_err(SqlError::from))
            .transpose()
    }

    /// Whether a record with this key pair exists.
    pub fn exists(&self, key1: impl Into<Value>, key2: impl Into<Value>) -> Result<bool> {
        Ok(self.backend().count(&self.by_pair(key1, key2))? > 0)
    }

    /// Insert a record. The record must carry both key fields.
    pub fn add(&self, record: impl IntoRecord) -> Result<()> {
        let record = record.into_record()?;
        record.key(&self.key_field2)?;
        self.base.add(record)
    }

    /// Overwrite the stored record matching both of the record's own key
    /// fields. Returns the number of rows changed.
    pub fn update(&self, record: impl IntoRecord) -> Result<usize> {
        let record = record.into_record()?;
        let key1 = record.key(self.key_field())?.clone();
        let key2 = record.key(&self.key_field2)?.clone();
        self.backend().update(&self.by_pair(key1, key2), &record)
    }

    /// Delete the record identified by `(key1, key2)`.
    pub fn delete(&self, key1: impl Into<Value>, key2: impl Into<Value>) -> Result<usize> {
        self.backend().delete(&self.by_pair(key1, key2))
    }

    /// A blank record with every column set to empty text.
    pub fn create(&self) -> Result<Record> {
        self.base.create()
    }

    /// Column names of the table.
    pub fn fields(&self) -> Result<Vec<String>> {
        self.base.fields()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Partial-Key Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Every record sharing the first key component, ordered by the pair.
    pub fn get_some(&self, key1: impl Into<Value>) -> Result<Vec<Record>> {
        let query = self.ordered(self.by_first(key1));
        self.backend().select(&query)
    }

    /// Number of records sharing the first key component.
    pub fn count_some(&self, key1: impl Into<Value>) -> Result<usize> {
        self.backend().count(&self.by_first(key1))
    }

    /// Delete every record sharing the first key component.
    pub fn delete_some(&self, key1: impl Into<Value>) -> Result<usize> {
        self.backend().delete(&self.by_first(key1))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Aggregate Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Every record, ordered by `(key1, key2)`.
    pub fn get_all(&self) -> Result<Vec<Record>> {
        let query = self.ordered(self.base.query());
        self.backend().select(&query)
    }

    /// Number of records whose `field` equals `value`.
    pub fn count_which(&self, field: &str, value: impl Into<Value>) -> Result<usize> {
        self.base.count_which(field, value)
    }

    /// Records whose `field` equals `value`, ordered by the first key field.
    pub fn query_some(&self, field: &str, value: impl Into<Value>) -> Result<Vec<Record>> {
        self.base.query_some(field, value)
    }

    /// Total number of records.
    pub fn size(&self) -> Result<usize> {
        self.base.size()
    }
}

impl<B: Backend + ?Sized> KeyedStore for CompositeKeyStore<B> {
    type Key = (Value, Value);
    type Record = Record;
    type Error = SqlError;

    fn fetch(&self, key: &(Value, Value)) -> Result<Option<Record>> {
        self.get(key.0.clone(), key.1.clone())
    }

    fn contains_key(&self, key: &(Value, Value)) -> Result<bool> {
        self.exists(key.0.clone(), key.1.clone())
    }

    fn fetch_all(&self) -> Result<Vec<Record>> {
        self.get_all()
    }

    fn record_count(&self) -> Result<usize> {
        self.size()
    }
}
