//! Controller state and message types

use crate::address::{RawCandidate, SuggestionEntry};
use crate::geocode::FetchError;

/// Which surface owns keyboard focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Field,
    List,
}

/// What the popup is currently holding
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    Closed,
    Open {
        /// Generation of the fetch that produced the rows
        generation: u64,
        suggestions: Vec<SuggestionEntry>,
        highlighted: Option<usize>,
    },
}

impl SelectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn suggestions(&self) -> &[SuggestionEntry] {
        match self {
            Self::Open { suggestions, .. } => suggestions,
            Self::Closed => &[],
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self {
            Self::Open { highlighted, .. } => *highlighted,
            Self::Closed => None,
        }
    }
}

/// Background work in progress for the current input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Activity {
    #[default]
    Idle,
    Debouncing {
        generation: u64,
    },
    Fetching {
        generation: u64,
    },
}

/// Snapshot of the controller's overall phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Popup closed and nothing typed
    Idle,
    /// Timer armed; popup left as it was
    Debouncing { generation: u64 },
    /// Request in flight
    Fetching { generation: u64 },
    /// Popup showing suggestions
    Open {
        generation: u64,
        highlighted: Option<usize>,
    },
    /// Popup hidden; the field may still hold a prior selection
    Closed,
}

/// Messages handed back to the controller's owning task
#[derive(Debug)]
pub enum ControllerEvent {
    /// Quiet period for `query` elapsed
    DebounceElapsed { generation: u64, query: String },
    /// A background fetch finished
    FetchCompleted {
        generation: u64,
        query: String,
        result: Result<Vec<RawCandidate>, FetchError>,
    },
}
