//! Declarative validation rule set
//!
//! Every field maps to an ordered list of rules. A rule is plain data (a
//! constraint plus its message), and the same table drives both inline
//! validation on edit/blur and the full pass on submit.
//!
//! Evaluation short-circuits per field: the first failing rule supplies the
//! field's message and later rules for that field are skipped. Fields are
//! evaluated independently of each other.

use crate::core::debounce::{CheckSnapshot, CheckStatus};
use crate::types::{Field, FormValues, PayerAccounts, ValidationErrors};
use rust_decimal::Decimal;
use std::str::FromStr;

/// User-facing messages
pub mod messages {
    pub const PAYER_ACCOUNT_REQUIRED: &str = "Payer Account is required.";
    pub const PAYEE_REQUIRED: &str = "Payee name is required.";
    pub const PAYEE_TOO_LONG: &str = "Payee name cannot exceed 70 characters.";
    pub const PAYEE_ACCOUNT_REQUIRED: &str = "Payee account is required.";
    pub const PAYEE_ACCOUNT_INVALID: &str = "Payee account is invalid.";
    pub const PAYEE_ACCOUNT_CHECK_FAILED: &str = "Error validating account.";
    pub const PAYEE_ACCOUNT_UNVERIFIED: &str = "Payee account has not been verified yet.";
    pub const AMOUNT_REQUIRED: &str = "Amount is required.";
    pub const AMOUNT_NOT_A_NUMBER: &str = "Amount must be a number.";
    pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be a positive number.";
    pub const AMOUNT_TOO_SMALL: &str = "Amount must be at least 0.01.";
    pub const SELECT_ACCOUNT_FIRST: &str = "Payer account must be selected first.";
    pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds.";
    pub const PURPOSE_REQUIRED: &str = "Purpose is required.";
    pub const PURPOSE_TOO_SHORT: &str = "Purpose must have at least 3 characters.";
    pub const PURPOSE_TOO_LONG: &str = "Purpose must be less than 135 characters.";
}

/// Which validation pass is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// On edit or blur; an unresolved remote check is not an error yet
    Inline,
    /// On submit; every rule must be decided
    Submit,
}

/// Everything a rule may look at besides its own field value
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub accounts: &'a PayerAccounts,
    pub payee_check: Option<&'a CheckSnapshot>,
    pub mode: ValidationMode,
}

/// A single constraint on one field
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must not be empty or whitespace
    Required { message: &'static str },
    /// At most `max` characters, ignoring surrounding whitespace
    MaxLength { max: usize, message: &'static str },
    /// At least `min` characters, ignoring surrounding whitespace
    MinLength { min: usize, message: &'static str },
    /// Value parses as a decimal number
    Numeric { message: &'static str },
    /// Parsed value is strictly greater than zero
    Positive { message: &'static str },
    /// Parsed value is at least `min`
    MinValue { min: Decimal, message: &'static str },
    /// Parsed value does not exceed the selected payer account's balance
    WithinBalance {
        no_account: &'static str,
        insufficient: &'static str,
    },
    /// The external payee-account check resolved to valid
    RemoteCheck {
        invalid: &'static str,
        fault: &'static str,
        pending: &'static str,
    },
}

impl Rule {
    /// Evaluate the rule against `value`
    ///
    /// Numeric rules let unparsable input through; `Numeric` reports it.
    pub fn evaluate(
        &self,
        value: &str,
        values: &FormValues,
        ctx: &RuleContext<'_>,
    ) -> Result<(), &'static str> {
        match *self {
            Rule::Required { message } => check(!value.trim().is_empty(), message),
            Rule::MaxLength { max, message } => {
                check(value.trim().chars().count() <= max, message)
            }
            Rule::MinLength { min, message } => {
                check(value.trim().chars().count() >= min, message)
            }
            Rule::Numeric { message } => check(parse_amount(value).is_some(), message),
            Rule::Positive { message } => match parse_amount(value) {
                Some(amount) => check(amount > Decimal::ZERO, message),
                None => Ok(()),
            },
            Rule::MinValue { min, message } => match parse_amount(value) {
                Some(amount) => check(amount >= min, message),
                None => Ok(()),
            },
            Rule::WithinBalance {
                no_account,
                insufficient,
            } => {
                let Some(amount) = parse_amount(value) else {
                    return Ok(());
                };
                match ctx.accounts.find(&values.payer_account_id) {
                    None => Err(no_account),
                    Some(account) => check(amount <= account.balance, insufficient),
                }
            }
            Rule::RemoteCheck {
                invalid,
                fault,
                pending,
            } => {
                // A snapshot for another value says nothing about this one
                let status = ctx
                    .payee_check
                    .filter(|snapshot| snapshot.value == value.trim())
                    .map(|snapshot| snapshot.status);
                match status {
                    Some(CheckStatus::Valid) => Ok(()),
                    Some(CheckStatus::Invalid) => Err(invalid),
                    Some(CheckStatus::Fault) => Err(fault),
                    _ => match ctx.mode {
                        ValidationMode::Inline => Ok(()),
                        ValidationMode::Submit => Err(pending),
                    },
                }
            }
        }
    }
}

fn check(passes: bool, message: &'static str) -> Result<(), &'static str> {
    if passes {
        Ok(())
    } else {
        Err(message)
    }
}

/// Parse a user-entered amount
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Ordered rules per field
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    fields: Vec<(Field, Vec<Rule>)>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::payment_form()
    }
}

impl RuleSet {
    /// Build a rule set from an explicit table
    pub fn new(fields: Vec<(Field, Vec<Rule>)>) -> Self {
        RuleSet { fields }
    }

    /// The payment form's rule table
    pub fn payment_form() -> Self {
        use messages::*;

        RuleSet::new(vec![
            (
                Field::PayerAccount,
                vec![Rule::Required {
                    message: PAYER_ACCOUNT_REQUIRED,
                }],
            ),
            (
                Field::Payee,
                vec![
                    Rule::Required {
                        message: PAYEE_REQUIRED,
                    },
                    Rule::MaxLength {
                        max: 70,
                        message: PAYEE_TOO_LONG,
                    },
                ],
            ),
            (
                Field::PayeeAccount,
                vec![
                    Rule::Required {
                        message: PAYEE_ACCOUNT_REQUIRED,
                    },
                    Rule::RemoteCheck {
                        invalid: PAYEE_ACCOUNT_INVALID,
                        fault: PAYEE_ACCOUNT_CHECK_FAILED,
                        pending: PAYEE_ACCOUNT_UNVERIFIED,
                    },
                ],
            ),
            (
                Field::Amount,
                vec![
                    Rule::Required {
                        message: AMOUNT_REQUIRED,
                    },
                    Rule::Numeric {
                        message: AMOUNT_NOT_A_NUMBER,
                    },
                    Rule::Positive {
                        message: AMOUNT_NOT_POSITIVE,
                    },
                    Rule::MinValue {
                        min: Decimal::new(1, 2),
                        message: AMOUNT_TOO_SMALL,
                    },
                    Rule::WithinBalance {
                        no_account: SELECT_ACCOUNT_FIRST,
                        insufficient: INSUFFICIENT_FUNDS,
                    },
                ],
            ),
            (
                Field::Purpose,
                vec![
                    Rule::Required {
                        message: PURPOSE_REQUIRED,
                    },
                    Rule::MinLength {
                        min: 3,
                        message: PURPOSE_TOO_SHORT,
                    },
                    Rule::MaxLength {
                        max: 135,
                        message: PURPOSE_TOO_LONG,
                    },
                ],
            ),
        ])
    }

    /// Rules declared for a field, in evaluation order
    pub fn rules_for(&self, field: Field) -> &[Rule] {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    /// First failing rule's message for one field
    pub fn validate_field(
        &self,
        field: Field,
        values: &FormValues,
        ctx: &RuleContext<'_>,
    ) -> Option<&'static str> {
        let value = values.get(field);
        self.rules_for(field)
            .iter()
            .find_map(|rule| rule.evaluate(value, values, ctx).err())
    }

    /// Validate every field
    pub fn validate(&self, values: &FormValues, ctx: &RuleContext<'_>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, _) in &self.fields {
            if let Some(message) = self.validate_field(*field, values, ctx) {
                errors.insert(*field, message);
            }
        }
        errors
    }
}
