//! Core traits for the form's external collaborators
//!
//! This module defines the seams where the form talks to the outside world:
//! the payee-account validity check and the submission sink. Both are async
//! and object safe so the form can hold them behind `Arc<dyn ...>` and tests
//! can substitute scripted implementations.

use crate::types::{FormError, PaymentSubmission};
use async_trait::async_trait;

/// External check that a payee account exists and is valid
#[async_trait]
pub trait PayeeAccountChecker: Send + Sync {
    /// Check a single account number
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the account is valid
    /// * `Ok(false)` if the service says the account does not exist or is invalid
    /// * `Err(FormError::CheckFailed)` if the service could not give an answer
    async fn check(&self, account: &str) -> Result<bool, FormError>;
}

/// Receives payments that passed validation
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver one payment
    async fn submit(&self, payment: &PaymentSubmission) -> Result<(), FormError>;
}
