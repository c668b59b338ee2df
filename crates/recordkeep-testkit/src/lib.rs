//! # recordkeep Testkit
//!
//! Testing utilities for recordkeep stores.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: ready-made players and schedule tables on SQLite or the
//!   in-memory backend, and a temporary XML data folder
//! - **Generators**: Proptest strategies for records, keys and documents
//!
//! ## Test Fixtures
//!
//! ```rust
//! use recordkeep_testkit::fixtures::SqlFixture;
//!
//! let fixture = SqlFixture::sqlite();
//! let players = fixture.players();
//! assert_eq!(players.size().unwrap(), 0);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use recordkeep_testkit::generators::players;
//!
//! proptest! {
//!     #[test]
//!     fn size_matches_inserts(records in players(16)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{sample_players, sample_schedule, Player, SqlFixture, XmlFixture};
pub use generators::{player_record, players, roster};
