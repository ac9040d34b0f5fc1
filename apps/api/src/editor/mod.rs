// Record-collection editor core.
// Pure reducers over immutable snapshots: no I/O, no errors, no shared state.
// Every operation re-derives `priority` from array position before returning.

pub mod edits;
pub mod factory;
pub mod fields;
pub mod nested;
pub mod ordered;
pub mod section;

pub use edits::{HeaderEdit, NestedEdit, SectionEdit};
pub use factory::RecordFactory;
pub use fields::FieldSet;
pub use nested::{NestedRecord, NestedSectionEditor};
pub use ordered::{OrderedCollection, Prioritized};
pub use section::{SectionEditor, SectionRecord};
