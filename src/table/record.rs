//! Member records and the in-memory collection that owns them.

use std::fmt;

/// Field name/value pairs of one record, in source order.
pub type RecordFields = Vec<(String, String)>;

/// Stable identity of a record for the lifetime of a session.
///
/// Ids are handed out in load order and never reused, so selection and
/// edit state keyed by id survive deletions of other records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
    /// The raw numeric id.
    #[cfg(test)]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single member record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Stable identity assigned at load.
    id: RecordId,
    /// Field name/value pairs in source order.
    fields: RecordFields,
}

impl Record {
    /// The record's stable id.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// All fields in source order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Look up a field value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a field value, appending the field if the record lacks it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Iterate over field values.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    /// Check whether any value contains `needle_lower`, ignoring case.
    ///
    /// `needle_lower` must already be lowercase. An empty needle matches.
    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self
                .values()
                .any(|v| v.to_lowercase().contains(needle_lower))
    }

    /// A short label for notifications, preferring the `name` field.
    pub fn label(&self) -> String {
        self.get("name")
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// The full working set of records.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Records in load order; the position is the absolute index.
    records: Vec<Record>,
    /// Next id to hand out. Never decreases.
    next_id: u64,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record, assigning fresh ids.
    pub fn replace(&mut self, rows: Vec<RecordFields>) {
        self.records = Vec::with_capacity(rows.len());
        for fields in rows {
            self.push(fields);
        }
    }

    /// Append a record and return its new id.
    pub fn push(&mut self, fields: RecordFields) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(Record { id, fields });
        id
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in absolute index order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Get a record by absolute index.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Absolute index of the record with the given id.
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Get a record by id.
    pub fn get_by_id(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Get a mutable record by id.
    pub fn get_by_id_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Remove a record; later records shift down one position.
    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    /// Column names, taken from the first record.
    pub fn columns(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|r| r.fields.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default()
    }
}
