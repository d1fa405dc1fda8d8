//! Payment form engine
//!
//! `PaymentForm` owns the field values and wires the rule set, the debounced
//! payee-account validator, and the submission gate together:
//!
//! - edit: value stored, payee-account edits (re)start the debounce window
//! - errors: derived on demand from values, accounts and the latest check
//! - submit: full validation (forcing the remote check to resolve), then either
//!   every error is published or the payment goes to the sink

use crate::core::config::FormConfig;
use crate::core::debounce::{CheckSnapshot, PayeeAccountValidator};
use crate::core::gate::{GateEvent, GateState};
use crate::core::rules::{parse_amount, RuleContext, RuleSet, ValidationMode};
use crate::core::traits::{PayeeAccountChecker, SubmissionSink};
use crate::types::{
    format_amount, Field, FormError, FormValues, Language, PayerAccount, PayerAccounts,
    PaymentSubmission, ValidationErrors,
};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field passed and the sink accepted the payment
    Submitted(PaymentSubmission),
    /// At least one field failed; nothing was sent
    Blocked(ValidationErrors),
}

/// A single payment-initiation form
pub struct PaymentForm {
    accounts: PayerAccounts,
    rules: RuleSet,
    initial: FormValues,
    values: FormValues,
    touched: BTreeSet<Field>,
    payee_check: PayeeAccountValidator,
    sink: Arc<dyn SubmissionSink>,
    gate: GateState,
    language: Language,
}

impl PaymentForm {
    /// Create a form with the first payer account pre-selected
    pub fn new(
        accounts: PayerAccounts,
        checker: Arc<dyn PayeeAccountChecker>,
        sink: Arc<dyn SubmissionSink>,
        config: &FormConfig,
    ) -> Self {
        let initial = FormValues::with_payer_account(accounts.first().id.clone());

        PaymentForm {
            accounts,
            rules: RuleSet::payment_form(),
            values: initial.clone(),
            initial,
            touched: BTreeSet::new(),
            payee_check: PayeeAccountValidator::new(checker, config.debounce),
            sink,
            gate: GateState::Idle,
            language: config.language,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn accounts(&self) -> &PayerAccounts {
        &self.accounts
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Store a new value and return the field's inline error, if any
    ///
    /// Payee-account edits restart the debounce window; the remote verdict
    /// shows up in [`errors`](Self::errors) once it settles.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Option<&'static str> {
        let value = value.into();
        if field == Field::PayeeAccount {
            self.payee_check.schedule(&value);
        }
        self.values.set(field, value);
        self.field_error(field)
    }

    /// Select a payer account by id
    pub fn select_payer_account(&mut self, id: &str) -> Option<&'static str> {
        self.set_field(Field::PayerAccount, id)
    }

    /// Mark a field as visited and return its inline error, if any
    pub fn blur(&mut self, field: Field) -> Option<&'static str> {
        self.touched.insert(field);
        self.field_error(field)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Whether any value differs from the initial state
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    /// Latest state of the payee-account check
    pub fn payee_check(&self) -> CheckSnapshot {
        self.payee_check.snapshot()
    }

    /// Wait for the pending payee-account check, if any
    pub async fn settle_payee_account(&self) -> Result<CheckSnapshot, FormError> {
        self.payee_check.settled().await
    }

    /// Inline errors for every field
    pub fn errors(&self) -> ValidationErrors {
        self.validate(ValidationMode::Inline)
    }

    /// Inline errors restricted to fields the user has visited
    pub fn visible_errors(&self) -> ValidationErrors {
        self.errors().retain(|field| self.touched.contains(&field))
    }

    /// Currently selected payer account
    pub fn current_account(&self) -> Option<&PayerAccount> {
        self.accounts.find(&self.values.payer_account_id)
    }

    pub fn current_balance(&self) -> Option<Decimal> {
        self.current_account().map(|account| account.balance)
    }

    /// Balance of the selected account formatted for the display language
    pub fn balance_display(&self) -> String {
        format_amount(self.current_balance(), self.language)
    }

    /// Validate everything and, if all fields pass, hand the payment to the sink
    ///
    /// A payee-account check still inside its debounce window is forced to run
    /// now; one already in flight is awaited. The gate is back in `Idle` when
    /// this returns, whatever the outcome, and also when the returned future
    /// is dropped before completing.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the payment.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        self.advance(GateEvent::Submit)?;
        let attempt = GateReset(self);
        attempt.0.run_submit().await
    }

    async fn run_submit(&mut self) -> Result<SubmitOutcome, FormError> {
        self.touched.extend(Field::ALL);

        let payee_account = self.values.payee_account.clone();
        if !payee_account.trim().is_empty() {
            if let Err(e) = self.payee_check.resolve(&payee_account).await {
                warn!(error = %e, "payee account check did not resolve");
            }
        }

        let errors = self.validate(ValidationMode::Submit);
        if !errors.is_empty() {
            self.advance(GateEvent::Failed)?;
            for (field, message) in errors.iter() {
                debug!(field = field.name(), reason = message, "field blocks submission");
            }
            info!(failing_fields = errors.len(), "submission blocked");
            self.advance(GateEvent::Reset)?;
            return Ok(SubmitOutcome::Blocked(errors));
        }

        self.advance(GateEvent::Passed)?;
        let submission = self.build_submission().ok_or_else(|| {
            FormError::submission_failed("validated values could not be converted")
        })?;

        self.advance(GateEvent::Send)?;
        let sent = self.sink.submit(&submission).await;
        self.advance(GateEvent::Done)?;
        sent?;

        Ok(SubmitOutcome::Submitted(submission))
    }

    fn advance(&mut self, event: GateEvent) -> Result<(), FormError> {
        let next = self.gate.on(event)?;
        debug!(from = ?self.gate, to = ?next, ?event, "gate transition");
        self.gate = next;
        Ok(())
    }

    fn field_error(&self, field: Field) -> Option<&'static str> {
        let snapshot = self.payee_check.snapshot();
        let ctx = RuleContext {
            accounts: &self.accounts,
            payee_check: Some(&snapshot),
            mode: ValidationMode::Inline,
        };
        self.rules.validate_field(field, &self.values, &ctx)
    }

    fn validate(&self, mode: ValidationMode) -> ValidationErrors {
        let snapshot = self.payee_check.snapshot();
        let ctx = RuleContext {
            accounts: &self.accounts,
            payee_check: Some(&snapshot),
            mode,
        };
        self.rules.validate(&self.values, &ctx)
    }

    fn build_submission(&self) -> Option<PaymentSubmission> {
        let account = self.current_account()?;
        let amount = parse_amount(&self.values.amount)?;

        Some(PaymentSubmission {
            payer_account_iban: account.iban.clone(),
            payee: self.values.payee.trim().to_string(),
            payee_account: self.values.payee_account.trim().to_string(),
            amount,
            purpose: self.values.purpose.trim().to_string(),
        })
    }
}

/// Puts the gate back to `Idle` when a submit attempt ends early
///
/// Covers error returns and a dropped `submit()` future alike.
struct GateReset<'a>(&'a mut PaymentForm);

impl Drop for GateReset<'_> {
    fn drop(&mut self) {
        if self.0.gate != GateState::Idle {
            debug!(from = ?self.0.gate, "submit attempt ended early, gate reset");
            self.0.gate = GateState::Idle;
        }
    }
}
