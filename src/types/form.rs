//! Form field types
//!
//! This module defines the five form fields, the raw values the user typed
//! into them, and the derived per-field error map.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The fields of the payment form, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PayerAccount,
    Payee,
    PayeeAccount,
    Amount,
    Purpose,
}

impl Field {
    /// All fields in declaration order
    pub const ALL: [Field; 5] = [
        Field::PayerAccount,
        Field::Payee,
        Field::PayeeAccount,
        Field::Amount,
        Field::Purpose,
    ];

    /// Stable field name used in error maps and logs
    pub fn name(self) -> &'static str {
        match self {
            Field::PayerAccount => "payerAccount",
            Field::Payee => "payee",
            Field::PayeeAccount => "payeeAccount",
            Field::Amount => "amount",
            Field::Purpose => "purpose",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("Unknown field: '{}'", s))
    }
}

/// Raw field values as entered by the user
///
/// Every value is kept as text; the amount is parsed during validation so a
/// non-numeric entry can be reported instead of rejected on input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub payer_account_id: String,
    pub payee: String,
    pub payee_account: String,
    pub amount: String,
    pub purpose: String,
}

impl FormValues {
    /// Initial values: the given payer account pre-selected, everything else empty
    pub fn with_payer_account(payer_account_id: impl Into<String>) -> Self {
        FormValues {
            payer_account_id: payer_account_id.into(),
            ..FormValues::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::PayerAccount => &self.payer_account_id,
            Field::Payee => &self.payee,
            Field::PayeeAccount => &self.payee_account,
            Field::Amount => &self.amount,
            Field::Purpose => &self.purpose,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::PayerAccount => &mut self.payer_account_id,
            Field::Payee => &mut self.payee,
            Field::PayeeAccount => &mut self.payee_account,
            Field::Amount => &mut self.amount,
            Field::Purpose => &mut self.purpose,
        };
        *slot = value;
    }
}

/// Per-field error messages
///
/// A field with no entry currently passes. This is derived state: it is
/// rebuilt from the form values whenever it is needed and never edited
/// in place by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Message for a field, if it fails
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields with their messages, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Keep only the errors of the given fields
    pub fn retain(mut self, mut keep: impl FnMut(Field) -> bool) -> Self {
        self.errors.retain(|field, _| keep(*field));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("payerAccount", Field::PayerAccount)]
    #[case("payee", Field::Payee)]
    #[case("payeeAccount", Field::PayeeAccount)]
    #[case("amount", Field::Amount)]
    #[case("purpose", Field::Purpose)]
    fn test_field_name_parsing(#[case] name: &str, #[case] expected: Field) {
        assert_eq!(name.parse::<Field>(), Ok(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_unknown_field_name() {
        assert!("iban".parse::<Field>().is_err());
    }

    #[test]
    fn test_values_get_and_set() {
        let mut values = FormValues::with_payer_account("1");
        values.set(Field::Amount, "12.50".to_string());

        assert_eq!(values.get(Field::PayerAccount), "1");
        assert_eq!(values.get(Field::Amount), "12.50");
        assert_eq!(values.get(Field::Payee), "");
    }

    #[test]
    fn test_errors_iterate_in_declaration_order() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Purpose, "Purpose is required.");
        errors.insert(Field::Payee, "Payee name is required.");

        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::Payee, Field::Purpose]);
    }

    #[test]
    fn test_errors_retain() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Payee, "Payee name is required.");
        errors.insert(Field::Amount, "Amount is required.");

        let errors = errors.retain(|field| field == Field::Amount);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Amount), Some("Amount is required."));
        assert!(!errors.contains(Field::Payee));
    }
}
