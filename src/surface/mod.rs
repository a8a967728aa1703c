//! Host UI surfaces
//!
//! The controller never draws anything itself. It drives a text field and a
//! suggestion popup through these traits, which a host toolkit implements.

mod headless;

pub use headless::{HeadlessField, HeadlessPopup};

/// Screen position the popup hangs from (bottom-left corner of the field)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    /// Field width; the list is sized to match
    pub width: f64,
}

/// Single-line text input
pub trait TextSurface {
    /// Replace the visible text
    fn set_text(&mut self, text: &str);

    /// Move the caret to a character offset
    fn set_caret(&mut self, position: usize);

    /// Give keyboard focus to the field
    fn focus(&mut self);

    /// Where the popup should appear, or `None` while the field is not on screen
    fn anchor(&self) -> Option<Anchor>;
}

/// Transient popup holding a selectable list
pub trait SuggestionSurface {
    fn show(&mut self, anchor: Anchor);

    fn hide(&mut self);

    fn is_visible(&self) -> bool;

    /// Replace the rows shown in the list
    fn set_items(&mut self, items: &[String]);

    /// Highlight a row, or clear the highlight
    fn set_highlighted(&mut self, index: Option<usize>);

    /// Give keyboard focus to the list
    fn focus(&mut self);
}
