//! Payer account list loading from CSV
//!
//! Expected columns: `id, iban, balance`. Whitespace around fields is trimmed
//! and the balance is parsed as an exact decimal.
//!
//! ```no_run
//! use payment_form::io::accounts_csv::load_payer_accounts;
//! use std::path::Path;
//!
//! let accounts = load_payer_accounts(Path::new("accounts.csv")).unwrap();
//! println!("Default payer account: {}", accounts.first().iban);
//! ```

use crate::types::{FormError, PayerAccount, PayerAccounts};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// CSV record structure for deserialization
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: String,
    pub iban: String,
    pub balance: String,
}

/// Convert an AccountRecord into a PayerAccount
///
/// # Errors
///
/// Returns an error message if the balance is not a decimal number or the id
/// or IBAN is blank.
pub fn convert_account_record(record: AccountRecord) -> Result<PayerAccount, String> {
    if record.id.is_empty() {
        return Err("Account id is empty".to_string());
    }
    if record.iban.is_empty() {
        return Err(format!("IBAN is empty for account '{}'", record.id));
    }

    let balance = Decimal::from_str(&record.balance).map_err(|_| {
        format!(
            "Invalid balance '{}' for account '{}'",
            record.balance, record.id
        )
    })?;

    Ok(PayerAccount::new(record.id, record.iban, balance))
}

/// Read a payer account list from any reader
///
/// # Errors
///
/// Returns an error if a row cannot be parsed, the list is empty, or an id
/// repeats.
pub fn read_payer_accounts<R: Read>(input: R) -> Result<PayerAccounts, FormError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    let mut accounts = Vec::new();
    for result in reader.deserialize::<AccountRecord>() {
        let record = result?;
        // Header is line 1, so the first record is on line 2
        let line = accounts.len() as u64 + 2;
        let account = convert_account_record(record).map_err(|message| FormError::ParseError {
            line: Some(line),
            message,
        })?;
        accounts.push(account);
    }

    PayerAccounts::new(accounts)
}

/// Load a payer account list from a CSV file
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read, or if its
/// content is rejected by [`read_payer_accounts`].
pub fn load_payer_accounts(path: &Path) -> Result<PayerAccounts, FormError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FormError::file_not_found(&path.display().to_string()),
        _ => FormError::from(e),
    })?;

    read_payer_accounts(file)
}
