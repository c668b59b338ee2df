//! Ordered traversal over an [`XmlStore`].

use crate::element::Element;
use crate::store::XmlStore;

/// A position in a store's index.
///
/// A new cursor sits on the first record. [`next`](Cursor::next) and
/// [`previous`](Cursor::previous) move first and then return the record they
/// land on. Stepping past either end exhausts the cursor; it stays exhausted
/// until [`first`](Cursor::first) or [`last`](Cursor::last) repositions it.
///
/// The cursor borrows the store, so the index cannot change under it.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    store: &'a XmlStore,
    position: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(store: &'a XmlStore) -> Self {
        let position = (store.count() > 0).then_some(0);
        Self { store, position }
    }

    /// The record under the cursor.
    pub fn current(&self) -> Option<&'a Element> {
        self.position
            .and_then(|slot| self.store.entry(slot))
            .map(|(_, element)| element)
    }

    /// The index key under the cursor.
    pub fn key(&self) -> Option<&'a str> {
        self.position
            .and_then(|slot| self.store.entry(slot))
            .map(|(key, _)| key)
    }

    pub fn first(&mut self) -> Option<&'a Element> {
        self.position = (self.store.count() > 0).then_some(0);
        self.current()
    }

    pub fn last(&mut self) -> Option<&'a Element> {
        self.position = self.store.count().checked_sub(1);
        self.current()
    }

    /// Advance one record.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a Element> {
        self.position = self
            .position
            .map(|slot| slot + 1)
            .filter(|&slot| slot < self.store.count());
        self.current()
    }

    /// Step back one record.
    pub fn previous(&mut self) -> Option<&'a Element> {
        self.position = self.position.and_then(|slot| slot.checked_sub(1));
        self.current()
    }
}
