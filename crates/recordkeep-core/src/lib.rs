//! # recordkeep Core
//!
//! Pure primitives for recordkeep: scalar values, records, and the keyed
//! store contract shared by every backing store.
//!
//! This crate contains no I/O. Relational stores live in `recordkeep-sql`,
//! the XML-document store in `recordkeep-xml`.
//!
//! ## Key Types
//!
//! - [`Value`] - A scalar cell value, ordered the way SQLite orders values
//! - [`Record`] - A mapping from field name to [`Value`]
//! - [`IntoRecord`] - Anything a store accepts as a record (maps, records, serde types)
//! - [`KeyedStore`] - The uniform read contract implemented by every store
//!
//! ## Validation
//!
//! The [`validation`] module holds the input predicates used by form
//! handling code before records reach a store.

pub mod error;
pub mod record;
pub mod traits;
pub mod validation;
pub mod value;

pub use error::{CoreError, Result};
pub use record::{IntoRecord, Record, Structured};
pub use traits::KeyedStore;
pub use validation::{validate_email, validate_name, validate_phone};
pub use value::Value;
