use crate::core::config::{
    FormConfig, DEFAULT_DEBOUNCE, DEFAULT_REQUEST_TIMEOUT, DEFAULT_VALIDATION_ENDPOINT,
};
use crate::types::Language;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Validate and submit a payment initiation
#[derive(Parser, Debug)]
#[command(name = "payment-form")]
#[command(about = "Validate and submit a payment initiation", long_about = None)]
pub struct CliArgs {
    /// Payer account id; defaults to the first account in the list
    #[arg(long = "payer-account", value_name = "ID")]
    pub payer_account: Option<String>,

    /// Payee name
    #[arg(long = "payee", value_name = "NAME", default_value = "")]
    pub payee: String,

    /// Payee account number, checked against the validation endpoint
    #[arg(long = "payee-account", value_name = "IBAN", default_value = "")]
    pub payee_account: String,

    /// Amount to transfer
    #[arg(long = "amount", value_name = "AMOUNT", default_value = "")]
    pub amount: String,

    /// Payment purpose
    #[arg(long = "purpose", value_name = "TEXT", default_value = "")]
    pub purpose: String,

    /// CSV file with payer accounts (columns: id, iban, balance)
    #[arg(
        long = "accounts",
        value_name = "CSV",
        help = "Payer account list (default: built-in sample accounts)"
    )]
    pub accounts: Option<PathBuf>,

    /// Payee-account validation endpoint
    #[arg(long = "endpoint", value_name = "URL", default_value = DEFAULT_VALIDATION_ENDPOINT)]
    pub endpoint: String,

    /// Debounce window for the payee-account check
    #[arg(
        long = "debounce-ms",
        value_name = "MS",
        help = "Debounce window in milliseconds (default: 300, range: 1-5000)"
    )]
    pub debounce_ms: Option<u64>,

    /// Timeout for a single payee-account check
    #[arg(
        long = "timeout-ms",
        value_name = "MS",
        help = "Payee-account check timeout in milliseconds (default: 5000)"
    )]
    pub timeout_ms: Option<u64>,

    /// Language used for number display
    #[arg(long = "language", value_name = "LANG", default_value = "en")]
    pub language: Language,
}

impl CliArgs {
    /// Create a FormConfig from CLI arguments
    ///
    /// Unset values use defaults; unusable ones are replaced by defaults with a
    /// warning (see [`FormConfig::new`]).
    pub fn to_form_config(&self) -> FormConfig {
        let debounce = self
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE);
        let timeout = self
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        FormConfig::new(debounce, timeout, self.endpoint.clone(), self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        let config = parsed.to_form_config();

        assert_eq!(parsed.payer_account, None);
        assert_eq!(parsed.payee, "");
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_form_fields() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--payer-account",
            "2",
            "--payee",
            "John Doe",
            "--payee-account",
            "LT601010012345678901",
            "--amount",
            "1.25",
            "--purpose",
            "rent",
        ])
        .unwrap();

        assert_eq!(parsed.payer_account.as_deref(), Some("2"));
        assert_eq!(parsed.payee, "John Doe");
        assert_eq!(parsed.payee_account, "LT601010012345678901");
        assert_eq!(parsed.amount, "1.25");
        assert_eq!(parsed.purpose, "rent");
    }

    #[rstest]
    #[case::en(&["program", "--language", "en"], Language::En)]
    #[case::lt(&["program", "--language", "lt"], Language::Lt)]
    fn test_language_parsing(#[case] args: &[&str], #[case] expected: Language) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.language, expected);
    }

    #[rstest]
    #[case::custom_debounce(&["program", "--debounce-ms", "450"], 450, 5_000)]
    #[case::custom_timeout(&["program", "--timeout-ms", "800"], 300, 800)]
    #[case::zero_debounce_falls_back(&["program", "--debounce-ms", "0"], 300, 5_000)]
    #[case::zero_timeout_falls_back(&["program", "--timeout-ms", "0"], 300, 5_000)]
    fn test_form_config_conversion(
        #[case] args: &[&str],
        #[case] expected_debounce_ms: u64,
        #[case] expected_timeout_ms: u64,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_form_config();

        assert_eq!(config.debounce, Duration::from_millis(expected_debounce_ms));
        assert_eq!(
            config.request_timeout,
            Duration::from_millis(expected_timeout_ms)
        );
    }

    #[rstest]
    #[case::invalid_language(&["program", "--language", "fr"])]
    #[case::non_numeric_debounce(&["program", "--debounce-ms", "soon"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
