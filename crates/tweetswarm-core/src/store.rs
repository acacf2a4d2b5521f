//! Immutable record store for the current dataset

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tweetswarm_io::{Category, Record};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Read-only view of the ingested records
///
/// A store is never modified; a new upload produces a new store with a fresh
/// version. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[Record]>,
    version: u64,
}

impl RecordStore {
    /// Create a store from freshly ingested records
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Process-unique dataset version (0 for the initial empty store)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one category, in ingestion order
    pub fn by_category(&self, category: Category) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Min and max projection over the whole dataset, ignoring non-finite values
    pub fn projection_extent(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|r| r.projection)
            .filter(|p| p.is_finite())
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            version: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("a", Category::March).with_projection(2.0),
            Record::new("b", Category::May).with_projection(-1.0),
            Record::new("c", Category::March).with_projection(5.0),
        ]
    }

    #[test]
    fn test_by_category_keeps_order() {
        let store = RecordStore::new(sample());
        let march: Vec<&str> = store
            .by_category(Category::March)
            .iter()
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(march, vec!["a", "c"]);
        assert!(store.by_category(Category::April).is_empty());
    }

    #[test]
    fn test_projection_extent_spans_all_categories() {
        let store = RecordStore::new(sample());
        assert_eq!(store.projection_extent(), Some((-1.0, 5.0)));
    }

    #[test]
    fn test_projection_extent_skips_non_finite() {
        let mut records = sample();
        records.push(Record::new("d", Category::April).with_projection(f64::NAN));
        let store = RecordStore::new(records);
        assert_eq!(store.projection_extent(), Some((-1.0, 5.0)));
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert_eq!(store.version(), 0);
        assert_eq!(store.projection_extent(), None);
    }

    #[test]
    fn test_versions_are_unique() {
        let a = RecordStore::new(sample());
        let b = RecordStore::new(sample());
        assert_ne!(a.version(), b.version());
        assert_ne!(a.version(), 0);
        assert_eq!(a.clone().version(), a.version());
    }
}
