//! Backend trait: the relational query executor the stores sit on.
//!
//! Every store operation is translated 1:1 into one call here. The trait is
//! synchronous; each call blocks until the backend has answered.

use recordkeep_core::Record;

use crate::error::Result;
use crate::query::Query;

/// A relational adapter: filtered selects plus the CRUD verbs.
///
/// Implementations include SQLite ([`SqliteBackend`](crate::SqliteBackend))
/// and an in-memory backend for tests
/// ([`MemoryBackend`](crate::MemoryBackend)).
///
/// No transactions are opened and no rows are locked; concurrency control
/// is whatever the underlying database provides.
pub trait Backend: Send + Sync {
    /// Rows matching the query's filters, in the query's order.
    fn select(&self, query: &Query) -> Result<Vec<Record>>;

    /// Number of rows matching the query's filters.
    fn count(&self, query: &Query) -> Result<usize>;

    /// Insert one row. Fields absent from the record take the column default.
    fn insert(&self, table: &str, record: &Record) -> Result<usize>;

    /// Overwrite the record's fields on every row matching the query.
    fn update(&self, query: &Query, record: &Record) -> Result<usize>;

    /// Delete every row matching the query.
    fn delete(&self, query: &Query) -> Result<usize>;

    /// Column names of a table, in declaration order.
    fn columns(&self, table: &str) -> Result<Vec<String>>;
}
