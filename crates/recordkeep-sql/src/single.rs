//! SingleKeyStore: records keyed by one field of a relational table.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use recordkeep_core::{IntoRecord, KeyedStore, Record, Value};

use crate::backend::Backend;
use crate::error::{Result, SqlError};
use crate::query::Query;

/// Key field used when none is configured.
pub const DEFAULT_KEY_FIELD: &str = "ID";

/// A table of records identified by a single key field.
///
/// Every operation becomes exactly one backend call. Absence is reported as
/// `None` / `false`, never as an error.
///
/// ```
/// use std::sync::Arc;
/// use recordkeep_core::Record;
/// use recordkeep_sql::{MemoryBackend, SingleKeyStore};
///
/// let backend = Arc::new(MemoryBackend::new());
/// backend.create_table("teams", ["ID", "city"]).unwrap();
///
/// let teams = SingleKeyStore::new(backend, "teams");
/// teams.add(Record::new().with("ID", "JAX").with("city", "Jacksonville")).unwrap();
/// assert!(teams.exists("JAX").unwrap());
/// ```
pub struct SingleKeyStore<B: Backend + ?Sized> {
    backend: Arc<B>,
    table: String,
    key_field: String,
}

impl<B: Backend + ?Sized> Clone for SingleKeyStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            table: self.table.clone(),
            key_field: self.key_field.clone(),
        }
    }
}

impl<B: Backend + ?Sized> SingleKeyStore<B> {
    /// Bind a store to `table`, keyed on [`DEFAULT_KEY_FIELD`].
    pub fn new(backend: Arc<B>, table: impl Into<String>) -> Self {
        Self::with_key(backend, table, DEFAULT_KEY_FIELD)
    }

    /// Bind a store to `table`, keyed on `key_field`.
    pub fn with_key(
        backend: Arc<B>,
        table: impl Into<String>,
        key_field: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            table: table.into(),
            key_field: key_field.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// An unfiltered, unordered query over this store's table.
    pub(crate) fn query(&self) -> Query {
        Query::new(&self.table)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the record whose key equals `key`.
    pub fn get(&self, key: impl Into<Value>) -> Result<Option<Record>> {
        let query = self.query().filter(&self.key_field, key);
        Ok(self.backend.select(&query)?.into_iter().next())
    }

    /// Fetch a record and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: impl Into<Value>) -> Result<Option<T>> {
        self.get(key)?
            .map(|record| record.deserialize().map_err(SqlError::from))
            .transpose()
    }

    /// Whether a record with this key exists.
    pub fn exists(&self, key: impl Into<Value>) -> Result<bool> {
        let query = self.query().filter(&self.key_field, key);
        Ok(self.backend.count(&query)? > 0)
    }

    /// Insert a record. The record must carry the key field.
    pub fn add(&self, record: impl IntoRecord) -> Result<()> {
        let record = record.into_record()?;
        record.key(&self.key_field)?;
        self.backend.insert(&self.table, &record)?;
        Ok(())
    }

    /// Overwrite the stored record whose key matches the record's own key
    /// field. Returns the number of rows changed.
    pub fn update(&self, record: impl IntoRecord) -> Result<usize> {
        let record = record.into_record()?;
        let key = record.key(&self.key_field)?.clone();
        let query = self.query().filter(&self.key_field, key);
        self.backend.update(&query, &record)
    }

    /// Delete the record with this key. Returns the number of rows removed.
    pub fn delete(&self, key: impl Into<Value>) -> Result<usize> {
        let query = self.query().filter(&self.key_field, key);
        self.backend.delete(&query)
    }

    /// A blank record with every column of the table set to empty text.
    ///
    /// Intended for forms that build a record field by field before `add`.
    pub fn create(&self) -> Result<Record> {
        Ok(self
            .fields()?
            .into_iter()
            .map(|field| (field, String::new()))
            .collect())
    }

    /// Column names of the table.
    pub fn fields(&self) -> Result<Vec<String>> {
        self.backend.columns(&self.table)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Aggregate Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Every record, ascending by key.
    pub fn get_all(&self) -> Result<Vec<Record>> {
        self.backend.select(&self.query().order_by(&self.key_field))
    }

    /// Every record deserialized into `T`, ascending by key.
    pub fn get_all_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.get_all()?
            .iter()
            .map(|record| record.deserialize().map_err(SqlError::from))
            .collect()
    }

    /// Number of records whose `field` equals `value`.
    pub fn count_which(&self, field: &str, value: impl Into<Value>) -> Result<usize> {
        self.backend.count(&self.query().filter(field, value))
    }

    /// Records whose `field` equals `value`, ascending by the primary key.
    ///
    /// The ordering is always by key, never by the filter field.
    pub fn query_some(&self, field: &str, value: impl Into<Value>) -> Result<Vec<Record>> {
        let query = self
            .query()
            .order_by(&self.key_field)
            .filter(field, value);
        self.backend.select(&query)
    }

    /// Total number of records.
    pub fn size(&self) -> Result<usize> {
        self.backend.count(&self.query())
    }
}

impl<B: Backend + ?Sized> KeyedStore for SingleKeyStore<B> {
    type Key = Value;
    type Record = Record;
    type Error = SqlError;

    fn fetch(&self, key: &Value) -> Result<Option<Record>> {
        self.get(key.clone())
    }

    fn contains_key(&self, key: &Value) -> Result<bool> {
        self.exists(key.clone())
    }

    fn fetch_all(&self) -> Result<Vec<Record>> {
        self.get_all()
    }

    fn record_count(&self) -> Result<usize> {
        self.size()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::{MemoryBackend, SqliteBackend};
    use recordkeep_core::{CoreError, Structured};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Player {
        #[serde(rename = "ID")]
        id: i64,
        name: String,
        position: String,
        period: i64,
    }

    fn player(id: i64, name: &str, position: &str, period: i64) -> Player {
        Player {
            id,
            name: name.into(),
            position: position.into(),
            period,
        }
    }

    fn sqlite_players() -> SingleKeyStore<SqliteBackend> {
        let backend = SqliteBackend::open_memory().unwrap();
        backend
            .execute_batch(
                "CREATE TABLE players (
                    ID INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    position TEXT,
                    period INTEGER
                );",
            )
            .unwrap();
        SingleKeyStore::new(Arc::new(backend), "players")
    }

    fn memory_players() -> SingleKeyStore<MemoryBackend> {
        let backend = MemoryBackend::new();
        backend
            .create_table("players", ["ID", "name", "position", "period"])
            .unwrap();
        SingleKeyStore::new(Arc::new(backend), "players")
    }

    #[test]
    fn test_add_then_get_round_trip() {
        let store = sqlite_players();
        let record = Record::new()
            .with("ID", 12)
            .with("name", "Jordan")
            .with("position", "QB")
            .with("period", 2);

        store.add(&record).unwrap();
        assert_eq!(store.get(12).unwrap(), Some(record));
        assert_eq!(store.get(13).unwrap(), None);
    }

    #[test]
    fn test_structured_add_and_typed_get() {
        let store = memory_players();
        let p = player(4, "Ray", "WR", 1);

        store.add(Structured(p.clone())).unwrap();
        assert_eq!(store.get_as::<Player>(4).unwrap(), Some(p));
    }

    #[test]
    fn test_add_without_key_fails() {
        let store = sqlite_players();
        let err = store
            .add(Record::new().with("name", "Nobody"))
            .unwrap_err();
        assert!(matches!(
            err,
            SqlError::Record(CoreError::MissingKeyField(f)) if f == "ID"
        ));
        assert_eq!(store.size().unwrap(), 0);
    }

    #[test]
    fn test_update_reads_key_from_record() {
        let store = sqlite_players();
        store.add(Structured(player(1, "Ray", "WR", 1))).unwrap();
        store.add(Structured(player(2, "Sam", "TE", 1))).unwrap();

        let changed = store.update(Structured(player(2, "Sam", "QB", 3))).unwrap();
        assert_eq!(changed, 1);

        assert_eq!(store.get_as::<Player>(2).unwrap(), Some(player(2, "Sam", "QB", 3)));
        assert_eq!(store.get_as::<Player>(1).unwrap(), Some(player(1, "Ray", "WR", 1)));

        let err = store.update(Record::new().with("name", "x")).unwrap_err();
        assert!(matches!(err, SqlError::Record(CoreError::MissingKeyField(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let store = memory_players();
        store.add(Structured(player(9, "Kai", "K", 1))).unwrap();

        assert!(store.exists(9).unwrap());
        assert_eq!(store.delete(9).unwrap(), 1);
        assert!(!store.exists(9).unwrap());
        assert_eq!(store.delete(9).unwrap(), 0);
    }

    #[test]
    fn test_get_all_ascending_by_key() {
        let store = sqlite_players();
        for id in [30, 4, 17, 8] {
            store.add(Structured(player(id, "p", "WR", 1))).unwrap();
        }

        let ids: Vec<i64> = store
            .get_all_as::<Player>()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![4, 8, 17, 30]);
    }

    #[test]
    fn test_query_some_orders_by_key_not_filter_field() {
        let store = memory_players();
        store.add(Structured(player(5, "Zed", "WR", 2))).unwrap();
        store.add(Structured(player(1, "Amy", "WR", 1))).unwrap();
        store.add(Structured(player(3, "Bo", "QB", 1))).unwrap();

        let rows = store.query_some("position", "WR").unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.get("ID").cloned()).collect();
        assert_eq!(ids, vec![Some(Value::Integer(1)), Some(Value::Integer(5))]);
        assert_eq!(store.count_which("position", "WR").unwrap(), 2);
        assert_eq!(store.size().unwrap(), 3);
    }

    // Periods below 9 and from 9 up filter the same way.
    #[test]
    fn test_query_some_period_filter_is_plain_equality() {
        let store = sqlite_players();
        for (id, period) in [(1, 3), (2, 9), (3, 3), (4, 12)] {
            store.add(Structured(player(id, "p", "WR", period))).unwrap();
        }

        let low: Vec<Player> = store
            .query_some("period", 3)
            .unwrap()
            .iter()
            .map(|r| r.deserialize().unwrap())
            .collect();
        assert_eq!(low.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);

        let high = store.query_some("period", 12).unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(store.count_which("period", 9).unwrap(), 1);
    }

    #[test]
    fn test_create_and_fields() {
        let store = sqlite_players();
        assert_eq!(store.fields().unwrap(), vec!["ID", "name", "position", "period"]);

        let blank = store.create().unwrap();
        assert_eq!(blank.len(), 4);
        assert_eq!(blank.get("name"), Some(&Value::from("")));
    }

    #[test]
    fn test_keyed_store_contract() {
        let store = memory_players();
        store.add(Structured(player(2, "Sam", "TE", 1))).unwrap();

        assert!(store.contains_key(&Value::Integer(2)).unwrap());
        assert!(store.fetch(&Value::Integer(3)).unwrap().is_none());
        assert_eq!(store.fetch_all().unwrap().len(), 1);
        assert_eq!(store.record_count().unwrap(), 1);
    }

    #[test]
    fn test_custom_key_field() {
        let backend = MemoryBackend::new();
        backend.create_table("teams", ["code", "city"]).unwrap();
        let store = SingleKeyStore::with_key(Arc::new(backend), "teams", "code");

        store
            .add(Record::new().with("code", "JAX").with("city", "Jacksonville"))
            .unwrap();
        assert_eq!(store.key_field(), "code");
        assert!(store.exists("JAX").unwrap());
    }
}
