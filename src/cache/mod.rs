//! Suggestion cache
//!
//! Maps each visible suggestion label back to the record it commits to.

use crate::address::{AddressResult, SuggestionEntry};
use std::collections::HashMap;

/// Label → address store for the current suggestion set
#[derive(Debug, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, AddressResult>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the cache and repopulate it from a fresh suggestion set
    pub fn replace_all(&mut self, suggestions: &[SuggestionEntry]) {
        self.entries.clear();
        for entry in suggestions {
            self.entries
                .entry(entry.label.clone())
                .or_insert_with(|| entry.data.clone());
        }
    }

    /// Look up the record behind a label
    pub fn get(&self, label: &str) -> Option<&AddressResult> {
        self.entries.get(label)
    }

    /// Clear the entire cache
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
