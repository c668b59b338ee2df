//! Query: the filter builder shared by every relational store.
//!
//! Equality filters and ordering directives accumulate on a [`Query`] until a
//! terminal [`Backend`](crate::Backend) call consumes it. Stores never build
//! SQL text themselves; they describe what they want here.

use std::cmp::Ordering;

use recordkeep_core::{Record, Value};

use crate::error::{Result, SqlError};

/// An equality-filtered, ordered view of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    filters: Vec<(String, Value)>,
    order_by: Vec<String>,
}

impl Query {
    /// Start a query over `table` with no filters and no ordering.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// Add `field = value`. Filters combine with AND.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Order ascending by `field`, after any previous ordering.
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(field.into());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    pub fn ordering(&self) -> &[String] {
        &self.order_by
    }

    /// Whether a record passes every filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|(field, value)| {
            record
                .get(field)
                .map(|v| v.sql_eq(value))
                .unwrap_or(false)
        })
    }

    /// Compare two records by this query's ordering.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for field in &self.order_by {
            let left = a.get(field).unwrap_or(&Value::Null);
            let right = b.get(field).unwrap_or(&Value::Null);
            match left.sql_cmp(right) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Render the `WHERE` clause with positional parameters starting at
    /// `?{first_param}`. Empty when there are no filters.
    pub(crate) fn where_sql(&self, first_param: usize) -> Result<(String, Vec<Value>)> {
        if self.filters.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let mut clauses = Vec::with_capacity(self.filters.len());
        let mut params = Vec::with_capacity(self.filters.len());
        for (i, (field, value)) in self.filters.iter().enumerate() {
            clauses.push(format!("{} = ?{}", quote_identifier(field)?, first_param + i));
            params.push(value.clone());
        }
        Ok((format!(" WHERE {}", clauses.join(" AND ")), params))
    }

    /// Render the `ORDER BY` clause. Empty when unordered.
    pub(crate) fn order_sql(&self) -> Result<String> {
        if self.order_by.is_empty() {
            return Ok(String::new());
        }
        let fields = self
            .order_by
            .iter()
            .map(|f| quote_identifier(f).map(|q| format!("{q} ASC")))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(" ORDER BY {}", fields.join(", ")))
    }
}

/// Quote a table or column name for SQLite.
pub(crate) fn quote_identifier(name: &str) -> Result<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(SqlError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
