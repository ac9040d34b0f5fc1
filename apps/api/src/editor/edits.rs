//! Serializable edit commands.
//!
//! A remote UI drives the reducers by sending these as JSON, e.g.
//! `{"op": "changeField", "index": 0, "field": "companyName", "value": "Acme"}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One mutation of a flat section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
#[serde(bound(deserialize = "F: Deserialize<'de>, M: Deserialize<'de> + Default"))]
pub enum SectionEdit<F, M = ()> {
    Add {
        #[serde(default)]
        mode: M,
    },
    Delete {
        index: usize,
    },
    ChangeField {
        index: usize,
        field: F,
        #[serde(default)]
        value: Value,
    },
    ToggleVisible {
        index: usize,
    },
    /// `order[i]` is the current position of the record that moves to `i`.
    Reorder {
        order: Vec<usize>,
    },
    Move {
        from: usize,
        to: usize,
    },
}

/// One mutation of a section whose records own child collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum NestedEdit<F, G> {
    Add,
    Delete {
        index: usize,
    },
    ChangeField {
        index: usize,
        field: F,
        #[serde(default)]
        value: Value,
    },
    ToggleVisible {
        index: usize,
    },
    Reorder {
        order: Vec<usize>,
    },
    Move {
        from: usize,
        to: usize,
    },
    AddChild {
        #[serde(rename = "parentIndex")]
        parent_index: usize,
    },
    DeleteChild {
        #[serde(rename = "parentIndex")]
        parent_index: usize,
        #[serde(rename = "childIndex")]
        child_index: usize,
    },
    ChangeChildField {
        #[serde(rename = "parentIndex")]
        parent_index: usize,
        #[serde(rename = "childIndex")]
        child_index: usize,
        field: G,
        #[serde(default)]
        value: Value,
    },
    ToggleChildVisible {
        #[serde(rename = "parentIndex")]
        parent_index: usize,
        #[serde(rename = "childIndex")]
        child_index: usize,
    },
    ReorderChildren {
        #[serde(rename = "parentIndex")]
        parent_index: usize,
        order: Vec<usize>,
    },
    MoveChild {
        #[serde(rename = "parentIndex")]
        parent_index: usize,
        from: usize,
        to: usize,
    },
}

/// A write to one of the parent document's own scalar fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEdit<F> {
    pub field: F,
    #[serde(default)]
    pub value: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    enum Field {
        SchoolName,
    }

    #[test]
    fn test_parse_change_field() {
        let edit: SectionEdit<Field> = serde_json::from_value(json!({
            "op": "changeField",
            "index": 2,
            "field": "schoolName",
            "value": "KAIST"
        }))
        .unwrap();
        assert_eq!(
            edit,
            SectionEdit::ChangeField {
                index: 2,
                field: Field::SchoolName,
                value: json!("KAIST"),
            }
        );
    }

    #[test]
    fn test_add_without_mode_uses_default() {
        let edit: SectionEdit<Field> = serde_json::from_value(json!({"op": "add"})).unwrap();
        assert_eq!(edit, SectionEdit::Add { mode: () });
    }

    #[test]
    fn test_parse_nested_child_edit() {
        let edit: NestedEdit<Field, Field> = serde_json::from_value(json!({
            "op": "deleteChild",
            "parentIndex": 1,
            "childIndex": 0
        }))
        .unwrap();
        assert_eq!(
            edit,
            NestedEdit::DeleteChild {
                parent_index: 1,
                child_index: 0,
            }
        );
    }
}
