//! Submission payload handed to the submission sink

use rust_decimal::Decimal;
use serde::Serialize;

/// A fully validated payment, as received by the submission sink
///
/// Field names and types are the sink contract, so a real backend can be
/// plugged in without reshaping anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    pub payer_account_iban: String,
    pub payee: String,
    pub payee_account: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub purpose: String,
}
