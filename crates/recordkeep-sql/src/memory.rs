//! In-memory implementation of the Backend trait.
//!
//! This is primarily for testing. It follows SQLite's semantics for the
//! operations the stores use (missing columns default to `NULL`, unknown
//! tables and columns are errors) but keeps everything in memory.
//!
//! Columns are untyped, so there is no type affinity: a filter on text
//! `"7"` does not match a stored integer `7`, while SQLite converts the text
//! for an `INTEGER` column and matches. Filter with the stored type.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use recordkeep_core::{Record, Value};

use crate::backend::Backend;
use crate::error::{Result, SqlError};
use crate::query::Query;

/// In-memory backend.
///
/// All data is lost when the backend is dropped. Thread-safe via RwLock.
pub struct MemoryBackend {
    inner: RwLock<HashMap<String, MemoryTable>>,
}

struct MemoryTable {
    /// Column names in declaration order.
    columns: Vec<String>,
    /// Rows in insertion order; every row carries every column.
    rows: Vec<Record>,
}

impl MemoryTable {
    fn check_column(&self, table: &str, column: &str) -> Result<()> {
        if self.columns.iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(SqlError::NoSuchColumn {
                table: table.to_string(),
                column: column.to_string(),
            })
        }
    }

    fn check_query(&self, query: &Query) -> Result<()> {
        for (field, _) in query.filters() {
            self.check_column(query.table(), field)?;
        }
        for field in query.ordering() {
            self.check_column(query.table(), field)?;
        }
        Ok(())
    }
}

impl MemoryBackend {
    /// Create an empty backend with no tables.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Create (or replace) a table with the given columns.
    pub fn create_table<I, S>(&self, table: &str, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        self.write()?.insert(
            table.to_string(),
            MemoryTable {
                columns,
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, MemoryTable>>> {
        self.inner
            .read()
            .map_err(|e| SqlError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, MemoryTable>>> {
        self.inner
            .write()
            .map_err(|e| SqlError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn no_such_table(table: &str) -> SqlError {
    SqlError::NoSuchTable(table.to_string())
}

impl Backend for MemoryBackend {
    fn select(&self, query: &Query) -> Result<Vec<Record>> {
        let inner = self.read()?;
        let table = inner
            .get(query.table())
            .ok_or_else(|| no_such_table(query.table()))?;
        table.check_query(query)?;

        let mut rows: Vec<Record> = table
            .rows
            .iter()
            .filter(|row| query.matches(row))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal keys, like a rowid scan.
        rows.sort_by(|a, b| query.compare(a, b));
        Ok(rows)
    }

    fn count(&self, query: &Query) -> Result<usize> {
        let inner = self.read()?;
        let table = inner
            .get(query.table())
            .ok_or_else(|| no_such_table(query.table()))?;
        table.check_query(query)?;

        Ok(table.rows.iter().filter(|row| query.matches(row)).count())
    }

    fn insert(&self, table_name: &str, record: &Record) -> Result<usize> {
        let mut inner = self.write()?;
        let table = inner
            .get_mut(table_name)
            .ok_or_else(|| no_such_table(table_name))?;
        for field in record.field_names() {
            table.check_column(table_name, field)?;
        }

        let row: Record = table
            .columns
            .iter()
            .map(|c| (c.clone(), record.get(c).cloned().unwrap_or(Value::Null)))
            .collect();
        table.rows.push(row);
        Ok(1)
    }

    fn update(&self, query: &Query, record: &Record) -> Result<usize> {
        let mut inner = self.write()?;
        let table = inner
            .get_mut(query.table())
            .ok_or_else(|| no_such_table(query.table()))?;
        table.check_query(query)?;
        for field in record.field_names() {
            table.check_column(query.table(), field)?;
        }
        if record.is_empty() {
            return Ok(0);
        }

        let mut changed = 0;
        for row in table.rows.iter_mut().filter(|row| query.matches(row)) {
            for (field, value) in record.iter() {
                row.set(field, value.clone());
            }
            changed += 1;
        }
        Ok(changed)
    }

    fn delete(&self, query: &Query) -> Result<usize> {
        let mut inner = self.write()?;
        let table = inner
            .get_mut(query.table())
            .ok_or_else(|| no_such_table(query.table()))?;
        table.check_query(query)?;

        let before = table.rows.len();
        table.rows.retain(|row| !query.matches(row));
        Ok(before - table.rows.len())
    }

    fn columns(&self, table: &str) -> Result<Vec<String>> {
        let inner = self.read()?;
        inner
            .get(table)
            .map(|t| t.columns.clone())
            .ok_or_else(|| no_such_table(table))
    }
}
