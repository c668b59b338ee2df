//! KeyedStore trait: the uniform read contract of every record store.
//!
//! Relational stores (single and composite keys) and the XML-document store
//! all implement it, so code that only looks records up by key can stay
//! agnostic of the backing store.

/// Uniform keyed lookup over a record store.
///
/// Mutation is not part of the contract: relational stores write
/// through their backend immediately, while the XML store mutates an
/// in-memory document that must be persisted explicitly.
pub trait KeyedStore {
    /// How a record is identified (a value, a pair of values, an XML key).
    type Key;
    /// What a lookup returns.
    type Record;
    /// Errors from the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one record by exact key. `None` when no record matches.
    fn fetch(&self, key: &Self::Key) -> Result<Option<Self::Record>, Self::Error>;

    /// Whether a record with this key exists.
    fn contains_key(&self, key: &Self::Key) -> Result<bool, Self::Error> {
        Ok(self.fetch(key)?.is_some())
    }

    /// All records, ascending by key.
    fn fetch_all(&self) -> Result<Vec<Self::Record>, Self::Error>;

    /// Total number of records.
    fn record_count(&self) -> Result<usize, Self::Error>;
}
