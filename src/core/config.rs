//! Form engine configuration

use crate::types::Language;
use std::time::Duration;
use tracing::warn;

/// Default quiescence window before the payee account is checked
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Longest accepted quiescence window
pub const MAX_DEBOUNCE: Duration = Duration::from_millis(5_000);

/// Default timeout for a single payee-account check request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default payee-account validation endpoint
pub const DEFAULT_VALIDATION_ENDPOINT: &str = "https://matavi.eu/validate/";

/// Settings for one payment form instance
#[derive(Clone, Debug, PartialEq)]
pub struct FormConfig {
    /// Quiescence window for the payee-account check
    pub debounce: Duration,
    /// Per-request timeout for the payee-account check
    pub request_timeout: Duration,
    /// Validation endpoint queried with `?iban=<account>`
    pub validation_endpoint: String,
    /// Initial display language
    pub language: Language,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            validation_endpoint: DEFAULT_VALIDATION_ENDPOINT.to_string(),
            language: Language::default(),
        }
    }
}

impl FormConfig {
    /// Create a FormConfig, replacing unusable values with defaults
    ///
    /// A zero or over-long debounce window and a zero timeout are logged and
    /// fall back to their defaults.
    pub fn new(
        debounce: Duration,
        request_timeout: Duration,
        validation_endpoint: impl Into<String>,
        language: Language,
    ) -> Self {
        let default = Self::default();

        let debounce = if debounce.is_zero() || debounce > MAX_DEBOUNCE {
            warn!(
                requested_ms = debounce.as_millis() as u64,
                default_ms = default.debounce.as_millis() as u64,
                "invalid debounce window, using default"
            );
            default.debounce
        } else {
            debounce
        };

        let request_timeout = if request_timeout.is_zero() {
            warn!(
                default_ms = default.request_timeout.as_millis() as u64,
                "invalid request timeout, using default"
            );
            default.request_timeout
        } else {
            request_timeout
        };

        Self {
            debounce,
            request_timeout,
            validation_endpoint: validation_endpoint.into(),
            language,
        }
    }
}
