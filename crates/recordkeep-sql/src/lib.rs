//! # recordkeep SQL
//!
//! Relational record stores. Each store binds a table and its key field(s)
//! and translates every operation 1:1 into a query against a [`Backend`].
//!
//! ## Key Types
//!
//! - [`SingleKeyStore`] - Records keyed by one field
//! - [`CompositeKeyStore`] - Records keyed by a pair of fields, with
//!   partial lookups on the first
//! - [`Query`] - The equality-filter/ordering builder every store shares
//! - [`Backend`] - The relational adapter trait
//! - [`SqliteBackend`] - SQLite via rusqlite
//! - [`MemoryBackend`] - In-memory backend for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use recordkeep_core::Record;
//! use recordkeep_sql::{CompositeKeyStore, SqliteBackend};
//!
//! let backend = Arc::new(SqliteBackend::open("league.db").unwrap());
//! let schedule = CompositeKeyStore::with_keys(backend, "schedule", "season", "week");
//!
//! schedule
//!     .add(Record::new().with("season", 2024).with("week", 1).with("opponent", "MIA"))
//!     .unwrap();
//! let games = schedule.get_some(2024).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Absence is not an error**: lookups return `Option`, `exists` returns `false`
//! - **Keys come from the record**: `update` reads its match clause from the
//!   record's own key field(s)
//! - **No transactions**: concurrency control is left to the database

pub mod backend;
pub mod composite;
pub mod error;
pub mod memory;
pub mod query;
pub mod single;
pub mod sqlite;

pub use backend::Backend;
pub use composite::{CompositeKeyStore, DEFAULT_SECOND_KEY_FIELD};
pub use error::{Result, SqlError};
pub use memory::MemoryBackend;
pub use query::Query;
pub use single::{SingleKeyStore, DEFAULT_KEY_FIELD};
pub use sqlite::SqliteBackend;
