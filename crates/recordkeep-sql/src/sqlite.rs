//! SQLite implementation of the Backend trait.
//!
//! This is the primary relational backend. It uses rusqlite with bundled
//! SQLite; the connection sits behind a mutex so one backend can be shared
//! (via `Arc`) by every store over the same database.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};

use recordkeep_core::{Record, Value};

use crate::backend::Backend;
use crate::error::{Result, SqlError};
use crate::query::{quote_identifier, Query};

/// SQLite-based backend.
///
/// Schema management is left to the caller: create tables with
/// [`execute_batch`](Self::execute_batch) or open an existing database.
pub struct SqliteBackend {
    /// The SQLite connection, protected by a mutex.
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open a SQLite database at the given path, creating the file if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run one or more raw SQL statements (schema setup, fixtures).
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.with_conn(|conn| Ok(conn.execute_batch(sql)?))
    }

    /// Execute a blocking operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SqlError::Poisoned(e.to_string()))?;
        f(&conn)
    }

    /// Run a statement that changes rows, returning the affected count.
    fn execute(&self, sql: &str, params: Vec<Value>) -> Result<usize> {
        tracing::debug!(sql, params = params.len(), "execute");
        self.with_conn(|conn| {
            let changed = conn.execute(sql, params_from_iter(params.iter().map(to_sql)))?;
            Ok(changed)
        })
    }
}

// Helper to convert a record value into a bindable SQLite value
fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Real(r) => SqlValue::Real(*r),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.clone()),
    }
}

// Helper to convert a row to a Record
fn row_to_record(row: &rusqlite::Row<'_>, columns: &[String]) -> rusqlite::Result<Record> {
    let mut record = Record::new();
    for (i, name) in columns.iter().enumerate() {
        let value = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        };
        record.set(name.clone(), value);
    }
    Ok(record)
}

impl Backend for SqliteBackend {
    fn select(&self, query: &Query) -> Result<Vec<Record>> {
        let (where_sql, params) = query.where_sql(1)?;
        let sql = format!(
            "SELECT * FROM {}{}{}",
            quote_identifier(query.table())?,
            where_sql,
            query.order_sql()?
        );
        tracing::debug!(sql = %sql, params = params.len(), "select");

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

            let records = stmt
                .query_map(params_from_iter(params.iter().map(to_sql)), |row| {
                    row_to_record(row, &columns)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(records)
        })
    }

    fn count(&self, query: &Query) -> Result<usize> {
        let (where_sql, params) = query.where_sql(1)?;
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            quote_identifier(query.table())?,
            where_sql
        );
        tracing::debug!(sql = %sql, params = params.len(), "count");

        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                &sql,
                params_from_iter(params.iter().map(to_sql)),
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
    }

    fn insert(&self, table: &str, record: &Record) -> Result<usize> {
        let table = quote_identifier(table)?;
        if record.is_empty() {
            return self.execute(&format!("INSERT INTO {table} DEFAULT VALUES"), Vec::new());
        }

        let mut columns = Vec::with_capacity(record.len());
        let mut placeholders = Vec::with_capacity(record.len());
        let mut params = Vec::with_capacity(record.len());
        for (i, (field, value)) in record.iter().enumerate() {
            columns.push(quote_identifier(field)?);
            placeholders.push(format!("?{}", i + 1));
            params.push(value.clone());
        }

        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );
        self.execute(&sql, params)
    }

    fn update(&self, query: &Query, record: &Record) -> Result<usize> {
        if record.is_empty() {
            return Ok(0);
        }

        let mut assignments = Vec::with_capacity(record.len());
        let mut params = Vec::with_capacity(record.len() + query.filters().len());
        for (i, (field, value)) in record.iter().enumerate() {
            assignments.push(format!("{} = ?{}", quote_identifier(field)?, i + 1));
            params.push(value.clone());
        }

        let (where_sql, filter_params) = query.where_sql(params.len() + 1)?;
        params.extend(filter_params);

        let sql = format!(
            "UPDATE {} SET {}{}",
            quote_identifier(query.table())?,
            assignments.join(", "),
            where_sql
        );
        self.execute(&sql, params)
    }

    fn delete(&self, query: &Query) -> Result<usize> {
        let (where_sql, params) = query.where_sql(1)?;
        let sql = format!("DELETE FROM {}{}", quote_identifier(query.table())?, where_sql);
        self.execute(&sql, params)
    }

    fn columns(&self, table: &str) -> Result<Vec<String>> {
        let sql = format!("SELECT * FROM {} LIMIT 0", quote_identifier(table)?);
        self.with_conn(|conn| {
            let stmt = conn.prepare(&sql)?;
            Ok(stmt.column_names().into_iter().map(String::from).collect())
        })
    }
}
