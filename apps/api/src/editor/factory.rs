use crate::editor::ordered::Prioritized;

/// Produces the blank record a section starts a new entry with.
///
/// `Mode` selects between record variants fixed at creation time. Sections
/// with a single shape use `()`; attachments choose between file and URL.
pub trait RecordFactory: Prioritized + Sized {
    type Mode: Default + Copy + std::fmt::Debug;

    fn create(priority: i32, mode: Self::Mode) -> Self;

    fn blank(priority: i32) -> Self {
        Self::create(priority, Self::Mode::default())
    }
}
