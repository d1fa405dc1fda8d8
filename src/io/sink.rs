//! Submission sinks
//!
//! No payment backend exists yet, so validated payments are only recorded:
//! `LogSink` emits a structured log event and `JsonSink` writes one JSON
//! document per line to any writer.

use crate::core::traits::SubmissionSink;
use crate::types::{FormError, PaymentSubmission};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tracing::info;

/// Sink that logs every submission
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&self, payment: &PaymentSubmission) -> Result<(), FormError> {
        info!(
            payer_account = %payment.payer_account_iban,
            payee = %payment.payee,
            payee_account = %payment.payee_account,
            amount = %payment.amount,
            purpose = %payment.purpose,
            "submitting payment"
        );
        Ok(())
    }
}

/// Sink that writes each submission as a JSON line
#[derive(Debug)]
pub struct JsonSink<W> {
    output: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> SubmissionSink for JsonSink<W> {
    async fn submit(&self, payment: &PaymentSubmission) -> Result<(), FormError> {
        let line = serde_json::to_string(payment)?;
        let mut output = self
            .output
            .lock()
            .map_err(|_| FormError::submission_failed("output writer poisoned"))?;
        writeln!(output, "{}", line)?;
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment() -> PaymentSubmission {
        PaymentSubmission {
            payer_account_iban: "LT307300010172619161".to_string(),
            payee: "Jane Roe".to_string(),
            payee_account: "LT601010012345678901".to_string(),
            amount: dec!(1.5),
            purpose: "books".to_string(),
        }
    }

    #[tokio::test]
    async fn test_json_sink_writes_one_line_per_submission() {
        let sink = JsonSink::new(Vec::new());
        sink.submit(&payment()).await.unwrap();
        sink.submit(&payment()).await.unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["payerAccountIban"], "LT307300010172619161");
        assert_eq!(parsed["amount"], 1.5);
    }

    #[tokio::test]
    async fn test_log_sink_accepts_everything() {
        assert!(LogSink.submit(&payment()).await.is_ok());
    }
}
