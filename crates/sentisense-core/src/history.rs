use std::collections::BTreeMap;

use crate::types::{AnalysisRecord, SentimentLabel};

/// Append-only, insertion-ordered record of the analyses in one session.
///
/// Records are never edited or removed individually; the only way to shrink
/// the store is [`HistoryStore::clear`].
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<AnalysisRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn append(&mut self, record: AnalysisRecord) {
        self.records.push(record);
    }

    /// Drop every record. Calling this on an empty store is a no-op.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Completed records in insertion order.
    pub fn snapshot(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&AnalysisRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn label_counts(&self) -> BTreeMap<SentimentLabel, usize> {
        label_counts(&self.records)
    }
}

/// Number of records per label. Every label is present, possibly with 0.
pub fn label_counts(records: &[AnalysisRecord]) -> BTreeMap<SentimentLabel, usize> {
    let mut counts: BTreeMap<SentimentLabel, usize> =
        SentimentLabel::ALL.iter().map(|l| (*l, 0)).collect();
    for record in records {
        *counts.entry(record.label()).or_insert(0) += 1;
    }
    counts
}

impl<'a> IntoIterator for &'a HistoryStore {
    type Item = &'a AnalysisRecord;
    type IntoIter = std::slice::Iter<'a, AnalysisRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
