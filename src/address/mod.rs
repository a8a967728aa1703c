//! Address records and suggestion labels

mod types;

pub use types::{AddressResult, RawCandidate, SuggestionEntry};

/// Separator between label parts
pub const LABEL_SEPARATOR: &str = ", ";

/// Join address parts into a display label.
///
/// Empty parts are skipped, so a label never carries `", ,"` runs or a
/// trailing separator.
pub fn display_label(name: &str, suburb: &str, city: &str, state: &str) -> String {
    [name, suburb, city, state]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}
