//! Where fetch failures are reported

use crate::geocode::FetchError;
use tracing::warn;

/// Receives every fetch failure, stale or not
pub trait ErrorSink: Send {
    fn report(&self, query: &str, error: &FetchError);
}

/// Logs failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, query: &str, error: &FetchError) {
        warn!(kind = error.kind(), "Geocoding failed for '{}': {}", query, error);
    }
}
