//! Read-only record collection with stub-on-miss lookup.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::record::Record;

/// All records of one run, in load order.
///
/// When the export carries the same id twice, the first occurrence answers
/// lookups; every occurrence still contributes edges to the graphs.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            index.entry(record.id.clone()).or_insert(pos);
        }
        if index.len() != records.len() {
            tracing::debug!(
                records = records.len(),
                distinct = index.len(),
                "record export contains duplicate ids"
            );
        }
        Self { records, index }
    }

    /// Resolve `id`, degrading to [`Record::stub`] when it is not loaded.
    pub fn lookup(&self, id: &str) -> Cow<'_, Record> {
        match self.get(id) {
            Some(record) => Cow::Borrowed(record),
            None => Cow::Owned(Record::stub(id)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Display name for `id` (the id itself for unknown references).
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|r| r.name.as_str()).unwrap_or(id)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
