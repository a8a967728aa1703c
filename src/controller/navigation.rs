//! Key and mouse navigation policy
//!
//! A pure mapping from one user input plus the visible popup state to the
//! transition the controller should perform.

use super::models::Focus;

/// Keys the popup reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}

/// A user interaction with the field or the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    Key(Key),
    /// Mouse click on a suggestion row
    Click(usize),
    /// Interaction outside the popup (host auto-hide)
    OutsideClick,
}

/// What the policy needs to know about the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    /// Suggestions are held for the popup
    pub open: bool,
    /// The popup surface is actually on screen
    pub visible: bool,
    pub len: usize,
    pub highlighted: Option<usize>,
    pub focus: Focus,
}

/// Transition requested by an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Input not consumed
    Ignore,
    /// Move the highlight and give focus to `focus`
    Highlight { index: usize, focus: Focus },
    /// Commit the suggestion at `index`
    Commit(usize),
    /// Close the popup
    Dismiss { refocus_field: bool },
}

/// Map an input to a transition
pub fn navigate(input: UserInput, state: &NavState) -> NavAction {
    if !state.open || state.len == 0 {
        return NavAction::Ignore;
    }
    let last = state.len - 1;

    // An auto-hiding popup may already be gone; dismissal still has to land
    let dismissal = matches!(input, UserInput::Key(Key::Escape) | UserInput::OutsideClick);
    if !state.visible && !dismissal {
        return NavAction::Ignore;
    }

    match input {
        UserInput::Key(Key::Down) => {
            let index = match (state.focus, state.highlighted) {
                (Focus::List, Some(current)) => (current + 1).min(last),
                _ => 0,
            };
            NavAction::Highlight {
                index,
                focus: Focus::List,
            }
        }
        UserInput::Key(Key::Up) => {
            let index = match (state.focus, state.highlighted) {
                (Focus::List, Some(current)) => current.saturating_sub(1),
                _ => last,
            };
            NavAction::Highlight {
                index,
                focus: Focus::List,
            }
        }
        UserInput::Key(Key::Enter) => match state.highlighted {
            Some(index) if index <= last => NavAction::Commit(index),
            _ => NavAction::Ignore,
        },
        UserInput::Key(Key::Escape) => NavAction::Dismiss {
            refocus_field: state.focus == Focus::List,
        },
        UserInput::Click(index) if index <= last => NavAction::Commit(index),
        UserInput::Click(_) => NavAction::Ignore,
        UserInput::OutsideClick => NavAction::Dismiss {
            refocus_field: false,
        },
    }
}
