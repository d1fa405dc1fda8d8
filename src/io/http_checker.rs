//! HTTP implementation of the payee-account check
//!
//! Issues `GET <endpoint>?iban=<account>` and expects a JSON body of the form
//! `{"valid": true}`. Anything else (transport failure, non-success status,
//! malformed body) is reported as a `FormError::CheckFailed`, which the form
//! treats as invalid.

use crate::core::traits::PayeeAccountChecker;
use crate::types::FormError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ValidityResponse {
    valid: bool,
}

/// Payee-account checker backed by a remote validation endpoint
#[derive(Debug, Clone)]
pub struct HttpPayeeAccountChecker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPayeeAccountChecker {
    /// Create a checker for `endpoint` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidConfig` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FormError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FormError::invalid_config("http client", e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PayeeAccountChecker for HttpPayeeAccountChecker {
    async fn check(&self, account: &str) -> Result<bool, FormError> {
        debug!(account, endpoint = %self.endpoint, "checking payee account");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("iban", account)])
            .send()
            .await
            .map_err(|e| FormError::check_failed(account, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FormError::check_failed(
                account,
                format!("HTTP status {}", status.as_u16()),
            ));
        }

        let body: ValidityResponse = response
            .json()
            .await
            .map_err(|e| FormError::check_failed(account, format!("malformed response: {}", e)))?;

        Ok(body.valid)
    }
}
