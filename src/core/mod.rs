//! Core form logic
//!
//! This module contains the validation and submission components:
//! - `traits` - Seams for the external collaborators (account check, sink)
//! - `rules` - Declarative per-field validation rules
//! - `debounce` - Debounced, staleness-aware payee-account validator
//! - `gate` - Submission gate state machine
//! - `form` - The payment form tying everything together
//! - `config` - Form configuration with validated defaults

pub mod config;
pub mod debounce;
pub mod form;
pub mod gate;
pub mod rules;
pub mod traits;

pub use config::FormConfig;
pub use debounce::{CheckSnapshot, CheckStatus, PayeeAccountValidator};
pub use form::{PaymentForm, SubmitOutcome};
pub use gate::{GateEvent, GateState};
pub use rules::{Rule, RuleContext, RuleSet, ValidationMode};
pub use traits::{PayeeAccountChecker, SubmissionSink};
