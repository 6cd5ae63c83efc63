//! The record table: collection plus view state and mutation handlers.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::pipeline::{self, PageView, ITEMS_PER_PAGE};
use super::record::{Collection, Record, RecordFields, RecordId};

/// Per-record edit buffer.
///
/// Field edits land here and only reach the collection on [`RecordTable::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Copy of the record's fields with pending edits applied.
    fields: RecordFields,
}

impl Draft {
    fn from_record(record: &Record) -> Self {
        Self {
            fields: record.fields().to_vec(),
        }
    }

    /// Draft fields in source order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Draft value of a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }
}

/// All record state for the admin table.
#[derive(Debug, Clone)]
pub struct RecordTable {
    /// Every loaded record.
    records: Collection,
    /// 1-based page, kept within the pages that exist.
    current_page: usize,
    /// Case-insensitive filter; empty shows everything.
    search_term: String,
    /// Selected records.
    selected: BTreeSet<RecordId>,
    /// Rows in edit mode and their pending values.
    drafts: HashMap<RecordId, Draft>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    /// Create an empty table on page 1.
    pub fn new() -> Self {
        Self {
            records: Collection::new(),
            current_page: 1,
            search_term: String::new(),
            selected: BTreeSet::new(),
            drafts: HashMap::new(),
        }
    }

    /// Replace the collection with freshly loaded rows.
    ///
    /// Selection and edit state belong to the previous records and are cleared.
    pub fn load(&mut self, rows: Vec<RecordFields>) {
        self.records.replace(rows);
        self.selected.clear();
        self.drafts.clear();
        self.current_page = 1;
        debug!(count = self.records.len(), "Records loaded into table");
    }

    /// The underlying collection.
    pub fn records(&self) -> &Collection {
        &self.records
    }

    /// Number of records, ignoring the filter.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names for the table header.
    pub fn columns(&self) -> Vec<&str> {
        self.records.columns()
    }

    // ========================================================================
    // Search and pagination
    // ========================================================================

    /// The active filter.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Change the search term and keep the current page in range.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.clamp_page();
    }

    /// The current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Go to a page, clamped to the pages that exist.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = pipeline::clamp_page(page, self.total_pages());
    }

    /// Go forward one page, staying on the last.
    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    /// Go back one page, staying on the first.
    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    /// Total pages for the current filter.
    pub fn total_pages(&self) -> usize {
        let filtered = pipeline::filter_indices(self.records.records(), &self.search_term);
        pipeline::total_pages(filtered.len(), ITEMS_PER_PAGE)
    }

    /// Derive the rows of the current page.
    pub fn view(&self) -> PageView {
        pipeline::derive(
            self.records.records(),
            &self.search_term,
            self.current_page,
            ITEMS_PER_PAGE,
        )
    }

    fn clamp_page(&mut self) {
        let clamped = pipeline::clamp_page(self.current_page, self.total_pages());
        if clamped != self.current_page {
            debug!(from = self.current_page, to = clamped, "Clamping current page");
            self.current_page = clamped;
        }
    }

    /// Record shown at a visible row of the current page.
    pub fn visible_id(&self, visible_index: usize) -> Option<RecordId> {
        self.view().rows.get(visible_index).map(|row| row.id)
    }

    /// Absolute collection index of a visible row.
    #[cfg(test)]
    pub fn absolute_index(&self, visible_index: usize) -> Option<usize> {
        self.view()
            .rows
            .get(visible_index)
            .map(|row| row.absolute_index)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Toggle selection of a visible row.
    ///
    /// Returns the row's new selection state, or `None` if no such row.
    pub fn toggle_selection(&mut self, visible_index: usize) -> Option<bool> {
        let id = self.visible_id(visible_index)?;
        let selected = if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        };
        debug!(record = %id, selected, "Toggled selection");
        Some(selected)
    }

    /// Whether a record is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    /// Selection state of the record at an absolute index.
    pub fn is_selected_at(&self, index: usize) -> bool {
        self.records
            .get(index)
            .is_some_and(|r| self.selected.contains(&r.id()))
    }

    #[cfg(test)]
    pub fn selected_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.selected.iter().copied()
    }

    /// Number of selected records, across all pages.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Checked state of the header checkbox.
    pub fn all_visible_selected(&self) -> bool {
        let view = self.view();
        !view.is_empty() && view.rows.iter().all(|row| self.is_selected(row.id))
    }

    /// Header checkbox action: select every visible row, or deselect them all
    /// when they are already selected.
    ///
    /// Returns the new checked state.
    pub fn toggle_select_visible(&mut self) -> bool {
        let view = self.view();
        if view.is_empty() {
            return false;
        }
        let all = view.rows.iter().all(|row| self.is_selected(row.id));
        for row in &view.rows {
            if all {
                self.selected.remove(&row.id);
            } else {
                self.selected.insert(row.id);
            }
        }
        debug!(rows = view.len(), selected = !all, "Toggled visible selection");
        !all
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Put a visible row into edit mode.
    ///
    /// Returns the record id, or `None` if no such row. A row that is already
    /// editing keeps its current draft.
    pub fn begin_edit(&mut self, visible_index: usize) -> Option<RecordId> {
        let id = self.visible_id(visible_index)?;
        self.begin_edit_id(id).then_some(id)
    }

    /// Put a record into edit mode by id.
    pub fn begin_edit_id(&mut self, id: RecordId) -> bool {
        let Some(record) = self.records.get_by_id(id) else {
            return false;
        };
        self.drafts
            .entry(id)
            .or_insert_with(|| Draft::from_record(record));
        debug!(record = %id, "Editing record");
        true
    }

    /// Whether a record is in edit mode.
    pub fn is_editing(&self, id: RecordId) -> bool {
        self.drafts.contains_key(&id)
    }

    /// Edit state of the record at an absolute index.
    pub fn is_editing_at(&self, index: usize) -> bool {
        self.records
            .get(index)
            .is_some_and(|r| self.drafts.contains_key(&r.id()))
    }

    /// A record's pending edits.
    pub fn draft(&self, id: RecordId) -> Option<&Draft> {
        self.drafts.get(&id)
    }

    /// Number of rows in edit mode.
    pub fn editing_count(&self) -> usize {
        self.drafts.len()
    }

    /// Write a field into a record's draft.
    ///
    /// Returns `false` if the record is not in edit mode.
    pub fn edit_field(&mut self, id: RecordId, key: &str, value: impl Into<String>) -> bool {
        match self.drafts.get_mut(&id) {
            Some(draft) => {
                draft.set(key, value.into());
                true
            }
            None => false,
        }
    }

    /// Save a visible row's draft into the collection.
    pub fn save_edit(&mut self, visible_index: usize) -> Option<RecordId> {
        let id = self.visible_id(visible_index)?;
        self.commit(id).then_some(id)
    }

    /// Apply a record's draft to the collection and leave edit mode.
    ///
    /// All draft fields are applied together. Returns `false` if the record
    /// was not editing.
    pub fn commit(&mut self, id: RecordId) -> bool {
        let Some(draft) = self.drafts.remove(&id) else {
            return false;
        };
        if let Some(record) = self.records.get_by_id_mut(id) {
            for (key, value) in draft.fields {
                record.set(&key, value);
            }
        }
        debug!(record = %id, "Saved record");
        // An edit can change whether the record passes the filter.
        self.clamp_page();
        true
    }

    /// Discard a record's draft, leaving the record unchanged.
    pub fn cancel_edit(&mut self, id: RecordId) -> bool {
        let cancelled = self.drafts.remove(&id).is_some();
        if cancelled {
            debug!(record = %id, "Discarded edit");
        }
        cancelled
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Delete the record at a visible row.
    ///
    /// Its selection and draft go with it; no other record's state changes.
    pub fn delete_row(&mut self, visible_index: usize) -> Option<Record> {
        let id = self.visible_id(visible_index)?;
        self.delete(id)
    }

    /// Delete a record by id.
    pub fn delete(&mut self, id: RecordId) -> Option<Record> {
        let removed = self.records.remove(id)?;
        self.selected.remove(&id);
        self.drafts.remove(&id);
        debug!(record = %id, remaining = self.records.len(), "Deleted record");
        self.clamp_page();
        Some(removed)
    }
}
