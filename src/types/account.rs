//! Payer account types
//!
//! Payer accounts are read-only reference data: the form only ever selects one
//! of them and reads its balance. The list is passed explicitly to the form so
//! tests and real deployments can substitute their own.

use super::error::FormError;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// An account funds can be debited from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayerAccount {
    /// Identifier used by the account selector
    pub id: String,

    /// IBAN sent to the submission sink
    pub iban: String,

    /// Current balance, may be negative
    pub balance: Decimal,
}

impl PayerAccount {
    /// Create a new payer account
    pub fn new(id: impl Into<String>, iban: impl Into<String>, balance: Decimal) -> Self {
        PayerAccount {
            id: id.into(),
            iban: iban.into(),
            balance,
        }
    }
}

/// Ordered, non-empty list of payer accounts
///
/// The first entry is the form's default selection. Ids are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct PayerAccounts {
    accounts: Vec<PayerAccount>,
}

impl PayerAccounts {
    /// Build an account list
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The list is empty
    /// - Two accounts share an id
    pub fn new(accounts: Vec<PayerAccount>) -> Result<Self, FormError> {
        if accounts.is_empty() {
            return Err(FormError::EmptyAccountList);
        }

        let mut seen = HashSet::with_capacity(accounts.len());
        for account in &accounts {
            if !seen.insert(account.id.as_str()) {
                return Err(FormError::duplicate_account(&account.id));
            }
        }

        Ok(PayerAccounts { accounts })
    }

    /// The three reference accounts the form ships with
    pub fn sample() -> Self {
        PayerAccounts {
            accounts: vec![
                PayerAccount::new("1", "LT307300010172619160", Decimal::new(100012, 2)),
                PayerAccount::new("2", "LT307300010172619161", Decimal::new(243, 2)),
                PayerAccount::new("3", "LT307300010172619162", Decimal::new(-587, 2)),
            ],
        }
    }

    /// The default selection
    pub fn first(&self) -> &PayerAccount {
        // Non-emptiness is enforced by every constructor
        &self.accounts[0]
    }

    /// Look up an account by id
    pub fn find(&self, id: &str) -> Option<&PayerAccount> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PayerAccount> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
