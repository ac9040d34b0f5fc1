use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::edits::SectionEdit;
use crate::editor::factory::RecordFactory;
use crate::editor::fields::FieldSet;
use crate::editor::ordered::{OrderedCollection, Prioritized};

/// A record that can live in an editable section.
pub trait SectionRecord: Prioritized + FieldSet + Clone {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
}

/// The add/remove/update/reorder surface for one section of a document.
///
/// A `SectionEditor` is a value: every operation returns the next editor and
/// leaves `self` as it was. It serializes as the plain record array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "T: Prioritized + Deserialize<'de>"))]
pub struct SectionEditor<T> {
    records: OrderedCollection<T>,
}

impl<T> Default for SectionEditor<T> {
    fn default() -> Self {
        Self {
            records: OrderedCollection::default(),
        }
    }
}

impl<T: SectionRecord + RecordFactory> SectionEditor<T> {
    pub fn new(records: impl Into<OrderedCollection<T>>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &OrderedCollection<T> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.records.to_vec()
    }

    fn with_records(&self, records: OrderedCollection<T>) -> Self {
        Self { records }
    }

    /// Starts an empty section with one blank record.
    pub fn seeded(&self) -> Self {
        self.with_records(self.records.ensure_non_empty(|| T::blank(0)))
    }

    pub fn add_record(&self) -> Self {
        self.add_record_as(T::Mode::default())
    }

    pub fn add_record_as(&self, mode: T::Mode) -> Self {
        let record = T::create(self.records.len() as i32, mode);
        self.with_records(self.records.append(record))
    }

    pub fn delete_record(&self, index: usize) -> Self {
        self.with_records(self.records.remove_at(index))
    }

    pub fn change_field(&self, index: usize, field: T::Field, value: &Value) -> Self {
        self.with_records(
            self.records
                .update_at(index, |record| record.set_field(field, value)),
        )
    }

    pub fn toggle_visible(&self, index: usize) -> Self {
        self.with_records(self.records.update_at(index, |record| {
            let visible = record.is_visible();
            record.set_visible(!visible);
        }))
    }

    pub fn reorder(&self, new_order: Vec<T>) -> Self {
        self.with_records(self.records.reorder(new_order))
    }

    pub fn reorder_positions(&self, order: &[usize]) -> Self {
        self.with_records(self.records.reorder_positions(order))
    }

    pub fn move_record(&self, from: usize, to: usize) -> Self {
        self.with_records(self.records.move_item(from, to))
    }

    pub fn apply(&self, edit: &SectionEdit<T::Field, T::Mode>) -> Self {
        match edit {
            SectionEdit::Add { mode } => self.add_record_as(*mode),
            SectionEdit::Delete { index } => self.delete_record(*index),
            SectionEdit::ChangeField {
                index,
                field,
                value,
            } => self.change_field(*index, *field, value),
            SectionEdit::ToggleVisible { index } => self.toggle_visible(*index),
            SectionEdit::Reorder { order } => self.reorder_positions(order),
            SectionEdit::Move { from, to } => self.move_record(*from, *to),
        }
    }
}
