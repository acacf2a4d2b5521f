//! Ordered multi-selection of records

use serde::{Deserialize, Serialize};

use tweetswarm_io::Record;

/// Selected records, most recently selected first
///
/// Membership is decided by record text. A set is never mutated in place;
/// [`SelectionSet::toggled`] returns the next set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSet {
    records: Vec<Record>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the record if present, otherwise put it in front
    pub fn toggled(&self, record: &Record) -> Self {
        let mut records = self.records.clone();
        match records.iter().position(|r| r.text == record.text) {
            Some(index) => {
                records.remove(index);
            }
            None => records.insert(0, record.clone()),
        }
        Self { records }
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.contains_text(&record.text)
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.records.iter().any(|r| r.text == text)
    }

    /// Selected texts in display order
    pub fn texts(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
