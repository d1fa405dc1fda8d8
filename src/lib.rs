//! Payment Form Library
//! # Overview
//!
//! This library implements the validation engine behind a single-page payment
//! initiation form: the user picks a payer account, enters payee name, payee
//! account, amount and purpose, and submits.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (fields, payer accounts, errors, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Form logic:
//!   - [`core::rules`] - Declarative per-field rule table
//!   - [`core::debounce`] - Debounced payee-account check with stale-result suppression
//!   - [`core::gate`] - Submission gate state machine
//!   - [`core::form`] - The form itself
//! - [`io`] - Account list loading, HTTP account check, submission sinks
//!
//! # Validation
//!
//! Synchronous rules run on every edit, blur and submit. The payee account is
//! additionally checked against a remote endpoint once the field has been
//! quiet for the debounce window; submission forces any pending check to
//! resolve first and is all or nothing across the five fields.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{
    FormConfig, PayeeAccountChecker, PaymentForm, RuleSet, SubmissionSink, SubmitOutcome,
};
pub use io::{HttpPayeeAccountChecker, JsonSink, LogSink};
pub use types::{
    Field, FormError, FormValues, Language, PayerAccount, PayerAccounts, PaymentSubmission,
    ValidationErrors,
};
