//! XmlStore: records held in an XML document, looked up through an ordered
//! in-memory index.
//!
//! The document on disk is the durable copy. [`XmlStore::load`] replaces the
//! in-memory document with it; [`XmlStore::store`] overwrites it with the
//! in-memory document. Nothing reaches disk in between.
//!
//! Mutations go through the store ([`insert`](XmlStore::insert),
//! [`remove`](XmlStore::remove), [`modify`](XmlStore::modify)) and re-index
//! automatically, so the index never lags the document.
//!
//! An `XmlStore` is not safe to share between writers: two stores saving the
//! same file silently lose writes (last `store` wins). Confine each store to
//! one session, or guard it with one lock per document path.

use std::fs;
use std::path::{Path, PathBuf};

use recordkeep_core::KeyedStore;

use crate::codec::{parse_document, write_document};
use crate::config::XmlConfig;
use crate::cursor::Cursor;
use crate::element::{Element, Node};
use crate::error::{Result, XmlError};
use crate::key::{build_index, compose, IndexEntry, KeyAttributes, XmlKey};

/// How to bind an [`XmlStore`] to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSetup {
    doc_type: String,
    file_name: String,
    key_attr: String,
    folder: Option<PathBuf>,
    key_attr2: Option<String>,
}

impl XmlSetup {
    /// Bind to `file_name`, whose root element is `doc_type` and whose
    /// records are keyed on `key_attr`.
    pub fn new(
        doc_type: impl Into<String>,
        file_name: impl Into<String>,
        key_attr: impl Into<String>,
    ) -> Self {
        Self {
            doc_type: doc_type.into(),
            file_name: file_name.into(),
            key_attr: key_attr.into(),
            folder: None,
            key_attr2: None,
        }
    }

    /// Look for the document in `folder` instead of the configured data folder.
    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Key records on `(key_attr, key_attr2)`, joined as `key1-key2`.
    pub fn second_key(mut self, key_attr2: impl Into<String>) -> Self {
        self.key_attr2 = Some(key_attr2.into());
        self
    }
}

/// A keyed, ordered view over one XML document.
#[derive(Debug)]
pub struct XmlStore {
    doc_type: String,
    file_name: String,
    folder: PathBuf,
    keys: KeyAttributes,
    /// Where the document was last loaded from; `store` writes here.
    path: PathBuf,
    root: Element,
    index: Vec<IndexEntry>,
    dirty: bool,
}

impl XmlStore {
    /// Bind a store to a document and load it.
    ///
    /// If the file does not exist the store starts with an empty root
    /// element named after the document type.
    pub fn setup(config: &XmlConfig, setup: XmlSetup) -> Result<Self> {
        let folder = setup
            .folder
            .unwrap_or_else(|| config.data_folder.clone());
        let path = folder.join(&setup.file_name);

        let mut store = Self {
            root: Element::new(setup.doc_type.as_str()),
            doc_type: setup.doc_type,
            file_name: setup.file_name,
            folder,
            keys: KeyAttributes {
                first: setup.key_attr,
                second: setup.key_attr2,
            },
            path,
            index: Vec::new(),
            dirty: false,
        };
        store.load(None)?;
        Ok(store)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the in-memory document with the one on disk, discarding any
    /// unsaved changes.
    ///
    /// `file` overrides the configured location; it is used as given and
    /// becomes the target of later [`store`](Self::store) calls. If loading
    /// fails the store is left exactly as it was.
    pub fn load(&mut self, file: Option<&Path>) -> Result<&Element> {
        let path = match file {
            Some(file) => file.to_path_buf(),
            None => self.folder.join(&self.file_name),
        };

        let root = if path.exists() {
            let text = fs::read_to_string(&path)?;
            parse_document(&text)?
        } else {
            tracing::debug!(path = %path.display(), "document absent, starting empty");
            Element::new(self.doc_type.as_str())
        };
        let index = build_index(&root, &self.keys)?;

        tracing::debug!(path = %path.display(), records = index.len(), "loaded document");
        self.path = path;
        self.root = root;
        self.index = index;
        self.dirty = false;
        Ok(&self.root)
    }

    /// Write the in-memory document to its file, pretty-printed.
    ///
    /// The file is overwritten in place; there is no atomic rename and no
    /// backup of the previous version. Comments and processing instructions
    /// outside the root element were dropped at load and are not written.
    pub fn store(&mut self) -> Result<()> {
        let xml = write_document(&self.root)?;
        fs::write(&self.path, xml)?;
        tracing::debug!(path = %self.path.display(), records = self.index.len(), "stored document");
        self.dirty = false;
        Ok(())
    }

    /// Rebuild the ordered index from the root's direct children.
    ///
    /// Every child must carry the key attribute(s); otherwise this fails
    /// with [`XmlError::MissingKeyAttribute`] and the old index stays.
    pub fn reindex(&mut self) -> Result<()> {
        self.index = build_index(&self.root, &self.keys)?;
        tracing::debug!(records = self.index.len(), "reindexed");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup and Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Find a record by key; `key2` is the second part of a composite key.
    pub fn get(&self, key: &str, key2: Option<&str>) -> Option<&Element> {
        let slot = self.slot(&compose(key, key2))?;
        self.entry(slot).map(|(_, element)| element)
    }

    /// Find a record by a prepared key.
    pub fn get_key(&self, key: &XmlKey) -> Option<&Element> {
        self.get(key.first(), key.second())
    }

    /// The record with the lowest key.
    pub fn first(&self) -> Option<&Element> {
        self.entry(0).map(|(_, element)| element)
    }

    /// The record with the highest key.
    pub fn last(&self) -> Option<&Element> {
        let slot = self.index.len().checked_sub(1)?;
        self.entry(slot).map(|(_, element)| element)
    }

    /// A cursor over the records in key order, positioned on the first.
    ///
    /// Lookups through [`get`](Self::get) never move a cursor.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self)
    }

    /// Records in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> + '_ {
        (0..self.index.len()).filter_map(move |slot| self.entry(slot).map(|(_, e)| e))
    }

    /// Index keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.iter().map(|entry| entry.key.as_str())
    }

    /// Number of indexed records.
    pub fn count(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn entry(&self, slot: usize) -> Option<(&str, &Element)> {
        let entry = self.index.get(slot)?;
        let element = self.root.node(entry.node).and_then(Node::as_element)?;
        Some((entry.key.as_str(), element))
    }

    fn slot(&self, key: &str) -> Option<usize> {
        self.index
            .binary_search_by(|entry| entry.key.as_str().cmp(key))
            .ok()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a record to the document.
    ///
    /// The element must carry the key attribute(s). A record with the key of
    /// an existing one shadows it in the index.
    pub fn insert(&mut self, element: Element) -> Result<()> {
        self.keys.key_of(&element, self.root.child_elements().count())?;
        self.root.push_child(element);
        self.changed()
    }

    /// Remove a record, returning it.
    pub fn remove(&mut self, key: &str, key2: Option<&str>) -> Result<Option<Element>> {
        let Some(slot) = self.slot(&compose(key, key2)) else {
            return Ok(None);
        };
        let removed = self.root.remove_node(self.index[slot].node);
        self.changed()?;
        Ok(removed.and_then(Node::into_element))
    }

    /// Edit a record in place. Returns `false` if no record has this key.
    ///
    /// If the edit drops a key attribute the record is left unchanged and
    /// [`XmlError::MissingKeyAttribute`] is returned.
    pub fn modify<F>(&mut self, key: &str, key2: Option<&str>, edit: F) -> Result<bool>
    where
        F: FnOnce(&mut Element),
    {
        let Some(slot) = self.slot(&compose(key, key2)) else {
            return Ok(false);
        };
        let node = self.index[slot].node;
        let Some(mut element) = self.root.node(node).and_then(Node::as_element).cloned() else {
            return Ok(false);
        };

        edit(&mut element);
        self.keys.key_of(&element, slot)?;
        self.root.replace_node(node, Node::Element(element));
        self.changed()?;
        Ok(true)
    }

    fn changed(&mut self) -> Result<()> {
        self.dirty = true;
        self.reindex()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Whether the in-memory document has changes not yet stored.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The file `store` writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn key_attr(&self) -> &str {
        &self.keys.first
    }

    pub fn key_attr2(&self) -> Option<&str> {
        self.keys.second.as_deref()
    }
}

impl KeyedStore for XmlStore {
    type Key = XmlKey;
    type Record = Element;
    type Error = XmlError;

    fn fetch(&self, key: &XmlKey) -> Result<Option<Element>> {
        Ok(self.get_key(key).cloned())
    }

    fn fetch_all(&self) -> Result<Vec<Element>> {
        Ok(self.iter().cloned().collect())
    }

    fn record_count(&self) -> Result<usize> {
        Ok(self.count())
    }
}
