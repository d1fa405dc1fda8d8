//! I/O module
//!
//! Adapters between the form engine and the outside world.
//!
//! # Components
//!
//! - `accounts_csv` - Payer account list loading from CSV
//! - `http_checker` - Payee-account check against the remote validation endpoint
//! - `sink` - Submission sinks (structured log, JSON lines)

pub mod accounts_csv;
pub mod http_checker;
pub mod sink;

pub use accounts_csv::{load_payer_accounts, read_payer_accounts};
pub use http_checker::HttpPayeeAccountChecker;
pub use sink::{JsonSink, LogSink};
