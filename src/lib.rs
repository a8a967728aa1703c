//! Address autocomplete: debounced geocoding suggestions for a text field
//!
//! Typing is debounced, each quiet period triggers one background lookup
//! against a geocoding provider, and picking a suggestion resolves it into a
//! structured [`AddressResult`].

pub mod address;
pub mod cache;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod geocode;
pub mod network;
pub mod surface;

pub use address::{AddressResult, RawCandidate, SuggestionEntry};
pub use config::Settings;
pub use controller::{AutocompleteController, Key, UserInput};
pub use geocode::{FetchError, Geocoder, PhotonGeocoder};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Photon search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://photon.komoot.io/api/";

/// Default number of candidates per lookup
pub const DEFAULT_LIMIT: usize = 5;

/// Default quiet period before a lookup fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Inputs this long or shorter (in characters) never trigger a lookup
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;
