//! Payment Form CLI
//!
//! Fills the payment form from command-line arguments, runs the full
//! validation (including the remote payee-account check) and submits.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --payee "John Doe" --payee-account LT601010012345678901 \
//!     --amount 100 --purpose rent
//! cargo run -- --accounts accounts.csv --payer-account 2 --language lt ...
//! RUST_LOG=debug cargo run -- ...
//! ```
//!
//! A submitted payment is written to stdout as one JSON line. Field errors and
//! logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Payment submitted
//! - 1: Submission blocked by field errors, or a fatal error (unreadable
//!   account file, invalid configuration, sink failure)

use payment_form::cli::{self, CliArgs};
use payment_form::io::load_payer_accounts;
use payment_form::{
    Field, FormError, HttpPayeeAccountChecker, JsonSink, PayerAccounts, PaymentForm,
    SubmitOutcome,
};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the payment was submitted
fn run(args: CliArgs) -> Result<bool, FormError> {
    let config = args.to_form_config();

    let accounts = match &args.accounts {
        Some(path) => load_payer_accounts(path)?,
        None => PayerAccounts::sample(),
    };
    let checker = Arc::new(HttpPayeeAccountChecker::new(
        config.validation_endpoint.clone(),
        config.request_timeout,
    )?);
    let sink = Arc::new(JsonSink::new(std::io::stdout()));

    // Single logical thread: edits, timers and the account check interleave
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut form = PaymentForm::new(accounts, checker, sink, &config);

        if let Some(id) = &args.payer_account {
            form.select_payer_account(id);
        }
        form.set_field(Field::Payee, args.payee);
        form.set_field(Field::PayeeAccount, args.payee_account);
        form.set_field(Field::Amount, args.amount);
        form.set_field(Field::Purpose, args.purpose);

        if let Some(account) = form.current_account() {
            info!(
                payer_account = %account.iban,
                balance = %form.balance_display(),
                "payer account selected"
            );
        }

        match form.submit().await? {
            SubmitOutcome::Submitted(_) => Ok(true),
            SubmitOutcome::Blocked(errors) => {
                for (field, message) in errors.iter() {
                    eprintln!("{}: {}", field, message);
                }
                Ok(false)
            }
        }
    })
}
