//! In-memory surfaces for tests and the console host

use super::{Anchor, SuggestionSurface, TextSurface};

/// Text field that only records what it was told
#[derive(Debug, Clone)]
pub struct HeadlessField {
    pub text: String,
    pub caret: usize,
    pub focused: bool,
    pub anchor: Option<Anchor>,
}

impl HeadlessField {
    /// A field attached to the screen at the origin
    pub fn new() -> Self {
        Self {
            text: String::new(),
            caret: 0,
            focused: true,
            anchor: Some(Anchor {
                x: 0.0,
                y: 24.0,
                width: 320.0,
            }),
        }
    }

    /// A field that is not on screen yet
    pub fn detached() -> Self {
        Self {
            anchor: None,
            ..Self::new()
        }
    }
}

impl Default for HeadlessField {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for HeadlessField {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_caret(&mut self, position: usize) {
        self.caret = position;
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }
}

/// Popup that only records what it was told
#[derive(Debug, Clone, Default)]
pub struct HeadlessPopup {
    pub visible: bool,
    pub items: Vec<String>,
    pub highlighted: Option<usize>,
    pub focused: bool,
    pub shown_at: Option<Anchor>,
}

impl HeadlessPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain-text rendering, one row per line, highlighted row marked with `>`
    pub fn render(&self) -> String {
        if !self.visible {
            return String::new();
        }
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if self.highlighted == Some(i) { '>' } else { ' ' };
                format!("{} {}. {}", marker, i + 1, item)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SuggestionSurface for HeadlessPopup {
    fn show(&mut self, anchor: Anchor) {
        self.visible = true;
        self.shown_at = Some(anchor);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.focused = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_items(&mut self, items: &[String]) {
        self.items = items.to_vec();
        self.highlighted = None;
    }

    fn set_highlighted(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_highlight() {
        let mut popup = HeadlessPopup::new();
        popup.set_items(&["Rua A, SP".to_string(), "Rua B, SP".to_string()]);
        assert_eq!(popup.render(), "");

        popup.show(HeadlessField::new().anchor().unwrap());
        popup.set_highlighted(Some(1));
        assert_eq!(popup.render(), "  1. Rua A, SP\n> 2. Rua B, SP");
    }
}
