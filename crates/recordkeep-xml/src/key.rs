//! Record keys and the ordered index built from them.
//!
//! A record's key is the value of its key attribute, or `key1-key2` when a
//! second key attribute is configured. The same rule builds index entries
//! during reindex and lookup keys in `get`.

use std::fmt;

use crate::element::Element;
use crate::error::{Result, XmlError};

/// Separator between the two parts of a composite key.
pub const KEY_SEPARATOR: char = '-';

/// A lookup key for an XML store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlKey {
    first: String,
    second: Option<String>,
}

impl XmlKey {
    /// A single-attribute key.
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: None,
        }
    }

    /// A two-attribute key.
    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: Some(second.into()),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> Option<&str> {
        self.second.as_deref()
    }

    /// The string the index is keyed on.
    pub fn index_key(&self) -> String {
        compose(&self.first, self.second.as_deref())
    }
}

impl fmt::Display for XmlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.index_key())
    }
}

pub(crate) fn compose(first: &str, second: Option<&str>) -> String {
    match second {
        Some(second) => format!("{first}{KEY_SEPARATOR}{second}"),
        None => first.to_string(),
    }
}

/// Which attributes identify a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyAttributes {
    pub(crate) first: String,
    pub(crate) second: Option<String>,
}

impl KeyAttributes {
    /// Build the index key for a record element.
    pub(crate) fn key_of(&self, element: &Element, position: usize) -> Result<String> {
        let attr = |name: &str| {
            element
                .attribute(name)
                .ok_or_else(|| XmlError::MissingKeyAttribute {
                    element: element.name().to_string(),
                    attribute: name.to_string(),
                    position,
                })
        };

        let first = attr(&self.first)?;
        let second = self.second.as_deref().map(attr).transpose()?;
        Ok(compose(first, second))
    }
}

/// One index slot: a key and the position of its element among the root's
/// child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexEntry {
    pub(crate) key: String,
    pub(crate) node: usize,
}

/// Build the sorted index over the root's direct child elements.
///
/// Keys sort by byte order. When two records share a key, the later one in
/// document order owns the slot.
pub(crate) fn build_index(root: &Element, keys: &KeyAttributes) -> Result<Vec<IndexEntry>> {
    let mut entries = Vec::new();
    for (record, (node, element)) in root
        .children()
        .iter()
        .enumerate()
        .filter_map(|(i, n)| n.as_element().map(|e| (i, e)))
        .enumerate()
    {
        entries.push(IndexEntry {
            key: keys.key_of(element, record)?,
            node,
        });
    }

    // Stable: equal keys stay in document order, so the last one wins below.
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let mut index: Vec<IndexEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match index.last_mut() {
            Some(last) if last.key == entry.key => {
                tracing::warn!(key = %entry.key, "duplicate record key; later record wins");
                *last = entry;
            }
            _ => index.push(entry),
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn keys(first: &str, second: Option<&str>) -> KeyAttributes {
        KeyAttributes {
            first: first.to_string(),
            second: second.map(str::to_string),
        }
    }

    fn roster(ids: &[&str]) -> Element {
        ids.iter().fold(Element::new("roster"), |root, id| {
            root.with_child(Element::new("player").with_attribute("id", *id))
        })
    }

    #[test]
    fn test_xml_key_composition() {
        assert_eq!(XmlKey::new("7").index_key(), "7");
        assert_eq!(XmlKey::pair("2024", "3").index_key(), "2024-3");
        assert_eq!(XmlKey::pair("a", "b").to_string(), "a-b");
    }

    #[test]
    fn test_index_sorted_by_bytes() {
        let index = build_index(&roster(&["7", "3", "10"]), &keys("id", None)).unwrap();
        let sorted: Vec<_> = index.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(sorted, vec!["10", "3", "7"]);
    }

    #[test]
    fn test_index_skips_text_nodes() {
        let root = Element::new("roster")
            .with_text("header")
            .with_child(Element::new("player").with_attribute("id", "1"));
        let index = build_index(&root, &keys("id", None)).unwrap();
        assert_eq!(index, vec![IndexEntry { key: "1".into(), node: 1 }]);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let index = build_index(&roster(&["5", "2", "5"]), &keys("id", None)).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index[1], IndexEntry { key: "5".into(), node: 2 });
    }

    #[test]
    fn test_missing_key_attribute() {
        let root = Element::new("schedule").with_child(
            Element::new("game")
                .with_attribute("season", "2024"),
        );
        let err = build_index(&root, &keys("season", Some("week"))).unwrap_err();
        assert!(matches!(
            err,
            XmlError::MissingKeyAttribute { attribute, position: 0, .. } if attribute == "week"
        ));
    }

    proptest! {
        #[test]
        fn test_index_sorted_and_unique(ids in prop::collection::vec("[0-9a-z]{1,4}", 0..24)) {
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let index = build_index(&roster(&refs), &keys("id", None)).unwrap();

            prop_assert!(index.windows(2).all(|w| w[0].key < w[1].key));
            let distinct: std::collections::BTreeSet<_> = ids.iter().collect();
            prop_assert_eq!(index.len(), distinct.len());
        }
    }
}
