//! Sections whose records each own a child collection (a language skill and
//! its test scores, a job application and its stages).
//!
//! Parent and child priorities are independent sequences. Child edits are
//! expressed as a function from one parent's child collection to the next one,
//! and the parent reducer swaps in that single result; sibling parents are
//! carried over as they were.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::edits::NestedEdit;
use crate::editor::factory::RecordFactory;
use crate::editor::fields::FieldSet;
use crate::editor::ordered::{OrderedCollection, Prioritized};
use crate::editor::section::{SectionEditor, SectionRecord};

pub trait NestedRecord: SectionRecord + RecordFactory {
    type Child: SectionRecord + RecordFactory;

    fn children(&self) -> &OrderedCollection<Self::Child>;
    fn set_children(&mut self, children: OrderedCollection<Self::Child>);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "T: Prioritized + Deserialize<'de>"))]
pub struct NestedSectionEditor<T> {
    section: SectionEditor<T>,
}

impl<T> Default for NestedSectionEditor<T> {
    fn default() -> Self {
        Self {
            section: SectionEditor::default(),
        }
    }
}

type Children<T> = OrderedCollection<<T as NestedRecord>::Child>;

impl<T: NestedRecord> NestedSectionEditor<T> {
    pub fn new(records: impl Into<OrderedCollection<T>>) -> Self {
        Self {
            section: SectionEditor::new(records),
        }
        .reconciled()
    }

    fn wrap(section: SectionEditor<T>) -> Self {
        Self { section }
    }

    pub fn records(&self) -> &OrderedCollection<T> {
        self.section.records()
    }

    pub fn section(&self) -> &SectionEditor<T> {
        &self.section
    }

    pub fn len(&self) -> usize {
        self.section.len()
    }

    pub fn is_empty(&self) -> bool {
        self.section.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.section.to_vec()
    }

    pub fn children(&self, parent_index: usize) -> Option<&Children<T>> {
        self.records().get(parent_index).map(|p| p.children())
    }

    /// Re-derives parent priorities and every parent's child priorities from
    /// current array positions.
    pub fn reconciled(&self) -> Self {
        let records = self.records().map_records(|mut parent| {
            let children = parent.children().to_vec().into();
            parent.set_children(children);
            parent
        });
        Self::wrap(SectionEditor::new(records))
    }

    pub fn seeded(&self) -> Self {
        Self::wrap(self.section.seeded())
    }

    // Parent-level operations. Deleting a parent drops its children with it.

    pub fn add_record(&self) -> Self {
        Self::wrap(self.section.add_record())
    }

    pub fn delete_record(&self, index: usize) -> Self {
        Self::wrap(self.section.delete_record(index))
    }

    pub fn change_field(&self, index: usize, field: T::Field, value: &Value) -> Self {
        Self::wrap(self.section.change_field(index, field, value))
    }

    pub fn toggle_visible(&self, index: usize) -> Self {
        Self::wrap(self.section.toggle_visible(index))
    }

    pub fn reorder(&self, new_order: Vec<T>) -> Self {
        Self::wrap(self.section.reorder(new_order))
    }

    pub fn reorder_positions(&self, order: &[usize]) -> Self {
        Self::wrap(self.section.reorder_positions(order))
    }

    pub fn move_record(&self, from: usize, to: usize) -> Self {
        Self::wrap(self.section.move_record(from, to))
    }

    // Child-level operations, scoped to a single parent.

    fn with_children(
        &self,
        parent_index: usize,
        edit: impl FnOnce(&Children<T>) -> Children<T>,
    ) -> Self {
        let records = self.records().update_at(parent_index, |parent| {
            let next = edit(parent.children());
            parent.set_children(next);
        });
        Self::wrap(SectionEditor::new(records))
    }

    pub fn add_child(&self, parent_index: usize) -> Self {
        self.add_child_as(parent_index, Default::default())
    }

    pub fn add_child_as(
        &self,
        parent_index: usize,
        mode: <T::Child as RecordFactory>::Mode,
    ) -> Self {
        self.with_children(parent_index, |children| {
            children.append(T::Child::create(children.len() as i32, mode))
        })
    }

    pub fn remove_child(&self, parent_index: usize, child_index: usize) -> Self {
        self.with_children(parent_index, |children| children.remove_at(child_index))
    }

    pub fn change_child_field(
        &self,
        parent_index: usize,
        child_index: usize,
        field: <T::Child as FieldSet>::Field,
        value: &Value,
    ) -> Self {
        self.with_children(parent_index, |children| {
            children.update_at(child_index, |child| child.set_field(field, value))
        })
    }

    pub fn toggle_child_visible(&self, parent_index: usize, child_index: usize) -> Self {
        self.with_children(parent_index, |children| {
            children.update_at(child_index, |child| {
                let visible = child.is_visible();
                child.set_visible(!visible);
            })
        })
    }

    pub fn reorder_children(&self, parent_index: usize, new_order: Vec<T::Child>) -> Self {
        self.with_children(parent_index, |children| children.reorder(new_order))
    }

    pub fn reorder_children_positions(&self, parent_index: usize, order: &[usize]) -> Self {
        self.with_children(parent_index, |children| children.reorder_positions(order))
    }

    pub fn move_child(&self, parent_index: usize, from: usize, to: usize) -> Self {
        self.with_children(parent_index, |children| children.move_item(from, to))
    }

    pub fn apply(
        &self,
        edit: &NestedEdit<T::Field, <T::Child as FieldSet>::Field>,
    ) -> Self {
        match edit {
            NestedEdit::Add => self.add_record(),
            NestedEdit::Delete { index } => self.delete_record(*index),
            NestedEdit::ChangeField {
                index,
                field,
                value,
            } => self.change_field(*index, *field, value),
            NestedEdit::ToggleVisible { index } => self.toggle_visible(*index),
            NestedEdit::Reorder { order } => self.reorder_positions(order),
            NestedEdit::Move { from, to } => self.move_record(*from, *to),
            NestedEdit::AddChild { parent_index } => self.add_child(*parent_index),
            NestedEdit::DeleteChild {
                parent_index,
                child_index,
            } => self.remove_child(*parent_index, *child_index),
            NestedEdit::ChangeChildField {
                parent_index,
                child_index,
                field,
                value,
            } => self.change_child_field(*parent_index, *child_index, *field, value),
            NestedEdit::ToggleChildVisible {
                parent_index,
                child_index,
            } => self.toggle_child_visible(*parent_index, *child_index),
            NestedEdit::ReorderChildren {
                parent_index,
                order,
            } => self.reorder_children_positions(*parent_index, order),
            NestedEdit::MoveChild {
                parent_index,
                from,
                to,
            } => self.move_child(*parent_index, *from, *to),
        }
    }
}
