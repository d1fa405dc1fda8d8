//! Types module
//!
//! Contains core data structures used throughout the form engine.
//! This module organizes types into logical submodules:
//! - `account`: Payer account reference data
//! - `form`: Fields, raw values, and derived validation errors
//! - `submission`: The payload delivered to the submission sink
//! - `locale`: Display language and number formatting
//! - `error`: Error types for the form engine

pub mod account;
pub mod error;
pub mod form;
pub mod locale;
pub mod submission;

pub use account::{PayerAccount, PayerAccounts};
pub use error::FormError;
pub use form::{Field, FormValues, ValidationErrors};
pub use locale::{format_amount, Language};
pub use submission::PaymentSubmission;
