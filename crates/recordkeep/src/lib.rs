//! # recordkeep
//!
//! One CRUD and query surface over three kinds of backing store: relational
//! tables keyed by one field, relational tables keyed by a pair of fields,
//! and XML documents keyed by one or two attributes.
//!
//! ## Stores
//!
//! - [`SingleKeyStore`] - Table records keyed by one field (default `ID`)
//! - [`CompositeKeyStore`] - Table records keyed by `(key1, key2)`, with
//!   partial operations on `key1`
//! - [`XmlStore`] - Elements of an XML document, held in an ordered index
//!
//! All three implement [`KeyedStore`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use recordkeep::{Record, SingleKeyStore, SqliteBackend, XmlConfig, XmlSetup, XmlStore};
//!
//! fn example() -> recordkeep::Result<()> {
//!     let backend = Arc::new(SqliteBackend::open("league.db")?);
//!     let players = SingleKeyStore::new(backend, "players");
//!     players.add(Record::new().with("ID", 7).with("name", "A"))?;
//!
//!     let roster = XmlStore::setup(
//!         &XmlConfig::default().with_data_folder("data"),
//!         XmlSetup::new("roster", "roster.xml", "id"),
//!     )?;
//!     println!("{} players on file", roster.count());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `recordkeep::core` - Values, records and the store contract
//! - `recordkeep::sql` - Relational stores and backends
//! - `recordkeep::xml` - The XML document store

pub mod error;

pub use recordkeep_core as core;
pub use recordkeep_sql as sql;
pub use recordkeep_xml as xml;

pub use error::{Error, Result};

pub use recordkeep_core::{
    validate_email, validate_name, validate_phone, IntoRecord, KeyedStore, Record, Structured,
    Value,
};
pub use recordkeep_sql::{
    Backend, CompositeKeyStore, MemoryBackend, Query, SingleKeyStore, SqliteBackend,
};
pub use recordkeep_xml::{Cursor, Element, XmlConfig, XmlKey, XmlSetup, XmlStore};
