//! Autocomplete controller
//!
//! Debounces typing, fetches suggestions in the background, and turns key and
//! mouse input into committed addresses.

mod machine;
mod models;
mod navigation;
mod sink;

pub use machine::AutocompleteController;
pub use models::{ControllerEvent, Focus, Phase, SelectionState};
pub use navigation::{navigate, Key, NavAction, NavState, UserInput};
pub use sink::{ErrorSink, TracingErrorSink};
