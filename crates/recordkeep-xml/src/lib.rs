//! # recordkeep XML
//!
//! A record store over one XML document. Each direct child of the root
//! element is a record; its key is the value of a configured attribute, or
//! `key1-key2` when a second key attribute is configured.
//!
//! ## Key Types
//!
//! - [`XmlStore`] - The document, its ordered index, and CRUD over both
//! - [`XmlSetup`] - How a store binds to a document (type, file, keys)
//! - [`XmlConfig`] - Application-wide settings such as the data folder
//! - [`Cursor`] - Ordered traversal, independent of lookups
//! - [`Element`] - A record (or any node) in the document tree
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recordkeep_xml::{Element, XmlConfig, XmlSetup, XmlStore};
//!
//! let config = XmlConfig::default().with_data_folder("data");
//! let mut roster = XmlStore::setup(&config, XmlSetup::new("roster", "roster.xml", "id")).unwrap();
//!
//! roster
//!     .insert(Element::new("player").with_attribute("id", "12").with_attribute("name", "C"))
//!     .unwrap();
//! roster.store().unwrap();
//!
//! let mut cursor = roster.cursor();
//! while let Some(player) = cursor.current() {
//!     println!("{}", player.attribute("name").unwrap_or_default());
//!     cursor.next();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **The file is the durable copy**: changes live in memory until `store`
//! - **Byte-ordered keys**: `"10"` sorts before `"3"`
//! - **One writer per document**: no locking between stores

pub mod codec;
pub mod config;
pub mod cursor;
pub mod element;
pub mod error;
pub mod key;
pub mod store;

pub use codec::{parse_document, write_document};
pub use config::{XmlConfig, DEFAULT_DATA_FOLDER};
pub use cursor::Cursor;
pub use element::{Element, Node};
pub use error::{Result, XmlError};
pub use key::{XmlKey, KEY_SEPARATOR};
pub use store::{XmlSetup, XmlStore};
