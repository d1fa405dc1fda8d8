//! Error types for the payment form engine
//!
//! This module defines the infrastructure errors that can occur while loading
//! configuration, talking to external collaborators, or driving the submission
//! gate. Field-level validation failures are not errors in this sense: they are
//! reported through [`ValidationErrors`](super::ValidationErrors) and never abort
//! anything.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed payer account files
//! - **Configuration Errors**: Empty account list, duplicate ids, bad settings
//! - **External Check Faults**: Network failures or bad responses from the
//!   payee-account validation endpoint
//! - **Submission Errors**: Sink failures and invalid gate transitions

use thiserror::Error;

/// Main error type for the payment form engine
///
/// Each variant carries enough context to be logged for diagnostics. None of
/// them is fatal to the form itself: the form always returns to an editable
/// state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred while loading payer accounts
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The payer account list is empty
    ///
    /// The first account is the default selection, so at least one is required.
    #[error("Payer account list is empty")]
    EmptyAccountList,

    /// Two payer accounts share the same id
    #[error("Duplicate payer account id '{id}'")]
    DuplicateAccount {
        /// The duplicated id
        id: String,
    },

    /// A configuration value is unusable
    #[error("Invalid configuration for {setting}: {message}")]
    InvalidConfig {
        /// Name of the offending setting
        setting: String,
        /// What is wrong with it
        message: String,
    },

    /// The external payee-account check failed
    ///
    /// Covers transport failures, non-success HTTP statuses and malformed
    /// response bodies. The message is for logs only; users see a generic text.
    #[error("Payee account check failed for '{account}': {message}")]
    CheckFailed {
        /// The account number that was being checked
        account: String,
        /// Underlying cause
        message: String,
    },

    /// The validator stopped publishing results before a check settled
    #[error("Payee account check for '{account}' was abandoned")]
    CheckAbandoned {
        /// The account number that was being checked
        account: String,
    },

    /// The submission sink rejected the payment
    #[error("Submission failed: {message}")]
    SubmissionFailed {
        /// Description of the sink failure
        message: String,
    },

    /// The submission gate was asked to make a move it does not allow
    #[error("Invalid gate transition from {from} on {event}")]
    InvalidTransition {
        /// State the gate was in
        from: String,
        /// Event that was rejected
        event: String,
    },
}

// Conversion from io::Error to FormError
impl From<std::io::Error> for FormError {
    fn from(error: std::io::Error) -> Self {
        FormError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to FormError
impl From<csv::Error> for FormError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FormError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for FormError {
    fn from(error: serde_json::Error) -> Self {
        FormError::SubmissionFailed {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl FormError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        FormError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(id: &str) -> Self {
        FormError::DuplicateAccount { id: id.to_string() }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(setting: &str, message: impl Into<String>) -> Self {
        FormError::InvalidConfig {
            setting: setting.to_string(),
            message: message.into(),
        }
    }

    /// Create a CheckFailed error
    pub fn check_failed(account: &str, message: impl Into<String>) -> Self {
        FormError::CheckFailed {
            account: account.to_string(),
            message: message.into(),
        }
    }

    /// Create a CheckAbandoned error
    pub fn check_abandoned(account: &str) -> Self {
        FormError::CheckAbandoned {
            account: account.to_string(),
        }
    }

    /// Create a SubmissionFailed error
    pub fn submission_failed(message: impl Into<String>) -> Self {
        FormError::SubmissionFailed {
            message: message.into(),
        }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(from: impl std::fmt::Debug, event: impl std::fmt::Debug) -> Self {
        FormError::InvalidTransition {
            from: format!("{:?}", from),
            event: format!("{:?}", event),
        }
    }
}
