//! Settings structures for address autocomplete configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geocoder: GeocoderSettings,
    pub autocomplete: AutocompleteSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Merge with environment variables (ADDRESS_AUTOCOMPLETE_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary key lookup
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ADDRESS_AUTOCOMPLETE_ENDPOINT") {
            self.geocoder.endpoint = val;
        }
        if let Some(val) = lookup("ADDRESS_AUTOCOMPLETE_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.geocoder.limit = limit;
            }
        }
        if let Some(val) = lookup("ADDRESS_AUTOCOMPLETE_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                self.autocomplete.debounce_ms = ms;
            }
        }
        if let Some(val) = lookup("ADDRESS_AUTOCOMPLETE_MIN_QUERY_CHARS") {
            if let Ok(chars) = val.parse() {
                self.autocomplete.min_query_chars = chars;
            }
        }
        if let Some(val) = lookup("ADDRESS_AUTOCOMPLETE_REQUEST_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.outgoing.request_timeout = secs;
            }
        }
        if let Some(val) = lookup("ADDRESS_AUTOCOMPLETE_USER_AGENT") {
            self.outgoing.user_agent = val;
        }
    }

    /// Reject values the controller cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.geocoder.endpoint.trim().is_empty() {
            bail!("geocoder.endpoint must not be empty");
        }
        if url::Url::parse(&self.geocoder.endpoint).is_err() {
            bail!("geocoder.endpoint is not a valid URL: {}", self.geocoder.endpoint);
        }
        if self.geocoder.limit == 0 {
            bail!("geocoder.limit must be at least 1");
        }
        if self.autocomplete.debounce_ms == 0 {
            bail!("autocomplete.debounce_ms must be at least 1");
        }
        if !(self.outgoing.request_timeout > 0.0) {
            bail!("outgoing.request_timeout must be positive");
        }
        Ok(())
    }
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    /// Photon-compatible search endpoint
    pub endpoint: String,
    /// Maximum candidates requested and consumed per query
    pub limit: usize,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: crate::DEFAULT_ENDPOINT.to_string(),
            limit: crate::DEFAULT_LIMIT,
        }
    }
}

/// Typing behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSettings {
    /// Quiet period before a fetch fires, in milliseconds
    pub debounce_ms: u64,
    /// Inputs with this many characters or fewer never trigger a fetch
    pub min_query_chars: usize,
}

impl AutocompleteSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            debounce_ms: crate::DEFAULT_DEBOUNCE_MS,
            min_query_chars: crate::DEFAULT_MIN_QUERY_CHARS,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// User agent sent to the provider
    pub user_agent: String,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 4,
            verify_ssl: true,
            user_agent: format!("address-autocomplete/{}", crate::VERSION),
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}
