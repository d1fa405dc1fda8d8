//! Shared test doubles for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use payment_form::{
    FormConfig, FormError, PayeeAccountChecker, PayerAccounts, PaymentForm, PaymentSubmission,
    SubmissionSink,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Payee-account checker with per-account latency and answers
///
/// Accounts without a scripted answer are reported invalid immediately.
#[derive(Default)]
pub struct ScriptedChecker {
    responses: HashMap<String, (Duration, Result<bool, FormError>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedChecker {
    pub fn respond(mut self, account: &str, delay_ms: u64, result: Result<bool, FormError>) -> Self {
        self.responses
            .insert(account.to_string(), (Duration::from_millis(delay_ms), result));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PayeeAccountChecker for ScriptedChecker {
    async fn check(&self, account: &str) -> Result<bool, FormError> {
        self.calls.lock().unwrap().push(account.to_string());
        let (delay, result) = self
            .responses
            .get(account)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(false)));
        tokio::time::sleep(delay).await;
        result
    }
}

/// Sink that keeps every payment it receives
#[derive(Default)]
pub struct RecordingSink {
    received: Mutex<Vec<PaymentSubmission>>,
}

impl RecordingSink {
    pub fn received(&self) -> Vec<PaymentSubmission> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn submit(&self, payment: &PaymentSubmission) -> Result<(), FormError> {
        self.received.lock().unwrap().push(payment.clone());
        Ok(())
    }
}

pub const VALID_PAYEE_ACCOUNT: &str = "LT601010012345678901";

/// Form over the sample accounts with the default 300 ms window
pub fn sample_form(checker: Arc<ScriptedChecker>, sink: Arc<RecordingSink>) -> PaymentForm {
    form_with_accounts(PayerAccounts::sample(), checker, sink)
}

pub fn form_with_accounts(
    accounts: PayerAccounts,
    checker: Arc<ScriptedChecker>,
    sink: Arc<RecordingSink>,
) -> PaymentForm {
    PaymentForm::new(accounts, checker, sink, &FormConfig::default())
}
