//! Conversion requests, quotes and their presentation

use super::currency::CurrencyCode;
use rust_decimal::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

/// A single rate for a currency pair, as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeQuote {
    pub rate: f64,
    /// Provider's "last updated" text, displayed verbatim.
    pub as_of: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub request: ConversionRequest,
    pub quote: ExchangeQuote,
    pub converted: f64,
}

impl Conversion {
    pub fn new(request: ConversionRequest, quote: ExchangeQuote) -> Self {
        let converted = convert_amount(request.amount, quote.rate);
        Self {
            request,
            quote,
            converted,
        }
    }

    pub fn result_text(&self) -> String {
        format_result(self.converted)
    }

    pub fn summary(&self) -> String {
        format_summary(self.request.from, self.request.to, &self.quote)
    }
}

pub fn convert_amount(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Rounds the exact binary value of `value` to `dp` places, ties away from
/// zero, and pads with zeros.
fn round_half_up(value: f64, dp: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => format!(
            "{:.*}",
            dp as usize,
            d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        ),
        // Outside Decimal's range
        None => format!("{value:.*}", dp as usize),
    }
}

/// Converted amount rounded to two decimals.
pub fn format_result(value: f64) -> String {
    round_half_up(value, 2)
}

pub fn format_summary(from: CurrencyCode, to: CurrencyCode, quote: &ExchangeQuote) -> String {
    format!(
        "1 {from} = {} {to} (updated: {})",
        round_half_up(quote.rate, 4),
        quote.as_of
    )
}
