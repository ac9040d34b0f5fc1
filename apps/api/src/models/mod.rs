// Section record schemas for resume and turn-over documents.
// JSON is camelCase; category codes are SCREAMING_SNAKE_CASE strings.

/// Implements `Prioritized` and `SectionRecord` for records carrying the
/// common `priority` / `is_visible` fields.
macro_rules! section_record {
    ($($record:ty),+ $(,)?) => {
        $(
            impl $crate::editor::Prioritized for $record {
                fn priority(&self) -> i32 {
                    self.priority
                }

                fn set_priority(&mut self, priority: i32) {
                    self.priority = priority;
                }
            }

            impl $crate::editor::SectionRecord for $record {
                fn is_visible(&self) -> bool {
                    self.is_visible
                }

                fn set_visible(&mut self, visible: bool) {
                    self.is_visible = visible;
                }
            }
        )+
    };
}

/// Implements `RecordFactory` for single-shape records: a blank, visible
/// record at the requested priority.
macro_rules! blank_record {
    ($($record:ty),+ $(,)?) => {
        $(
            impl $crate::editor::RecordFactory for $record {
                type Mode = ();

                fn create(priority: i32, _mode: ()) -> Self {
                    Self {
                        priority,
                        is_visible: true,
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

pub(crate) use blank_record;
pub(crate) use section_record;

pub mod attachment;
pub mod resume;
pub mod turnover;

pub(crate) fn visible_by_default() -> bool {
    true
}
