//! Address record types

use serde::{Deserialize, Serialize};

/// A committed, structured address
///
/// The zero value (empty strings, 0.0 coordinates) is what a controller holds
/// before anything has been selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressResult {
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub full_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One candidate as returned by the geocoding provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub name: String,
    pub suburb: String,
    pub city: String,
    pub state: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl RawCandidate {
    /// Human-readable label shown in the suggestion list
    pub fn label(&self) -> String {
        super::display_label(&self.name, &self.suburb, &self.city, &self.state)
    }
}

impl From<RawCandidate> for AddressResult {
    fn from(candidate: RawCandidate) -> Self {
        Self {
            neighborhood: candidate.suburb,
            city: candidate.city,
            state: candidate.state,
            full_address: candidate.name,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
        }
    }
}

/// A suggestion row: its label and the record it commits to
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionEntry {
    pub label: String,
    pub data: AddressResult,
}

impl SuggestionEntry {
    /// Build entries for a fetch response, dropping repeated labels.
    ///
    /// The first candidate producing a label wins.
    pub fn from_candidates(candidates: Vec<RawCandidate>) -> Vec<SuggestionEntry> {
        let mut entries: Vec<SuggestionEntry> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let label = candidate.label();
            if entries.iter().any(|e| e.label == label) {
                continue;
            }
            entries.push(SuggestionEntry {
                label,
                data: candidate.into(),
            });
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, suburb: &str) -> RawCandidate {
        RawCandidate {
            name: name.to_string(),
            suburb: suburb.to_string(),
            city: "Curitiba".to_string(),
            state: "PR".to_string(),
            longitude: -49.27,
            latitude: -25.43,
        }
    }

    #[test]
    fn test_candidate_to_address() {
        let address: AddressResult = candidate("Rua XV", "Centro").into();
        assert_eq!(address.full_address, "Rua XV");
        assert_eq!(address.neighborhood, "Centro");
        assert_eq!(address.city, "Curitiba");
        assert_eq!(address.state, "PR");
        assert_eq!(address.latitude, -25.43);
        assert_eq!(address.longitude, -49.27);
    }

    #[test]
    fn test_duplicate_labels_keep_first() {
        let mut second = candidate("Rua XV", "Centro");
        second.latitude = 1.0;
        let entries = SuggestionEntry::from_candidates(vec![
            candidate("Rua XV", "Centro"),
            second,
            candidate("Rua XV", "Batel"),
        ]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "Rua XV, Centro, Curitiba, PR");
        assert_eq!(entries[0].data.latitude, -25.43);
        assert_eq!(entries[1].label, "Rua XV, Batel, Curitiba, PR");
    }

    #[test]
    fn test_zero_value() {
        let address = AddressResult::default();
        assert!(address.city.is_empty());
        assert_eq!(address.latitude, 0.0);
    }
}
