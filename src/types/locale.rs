//! Display language and locale-aware number formatting
//!
//! The language only changes how balances and amounts are displayed. It never
//! affects validation.

use clap::ValueEnum;
use rust_decimal::{Decimal, RoundingStrategy};

/// Display languages offered by the language selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Lt,
}

impl Language {
    fn separators(self) -> Separators {
        match self {
            Language::En => Separators {
                group: ',',
                decimal: '.',
                minus: '-',
            },
            Language::Lt => Separators {
                group: '\u{a0}',
                decimal: ',',
                minus: '\u{2212}',
            },
        }
    }
}

struct Separators {
    group: char,
    decimal: char,
    minus: char,
}

/// Format a monetary value with two fraction digits for the given language
///
/// Returns an empty string when there is nothing to display.
pub fn format_amount(value: Option<Decimal>, language: Language) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let sep = language.separators();

    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    if negative {
        out.push(sep.minus);
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(sep.group);
        }
        out.push(ch);
    }
    out.push(sep.decimal);
    out.push_str(frac_part);
    out
}
