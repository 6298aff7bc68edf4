//! The fixed set of currencies offered by the converter

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Rub,
    Gbp,
    Jpy,
    Cny,
    Chf,
    Kzt,
    Try,
    Uah,
}

impl CurrencyCode {
    /// All supported currencies, in the order they are offered to the user.
    pub const ALL: [CurrencyCode; 10] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Rub,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Cny,
        CurrencyCode::Chf,
        CurrencyCode::Kzt,
        CurrencyCode::Try,
        CurrencyCode::Uah,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Rub => "RUB",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Cny => "CNY",
            CurrencyCode::Chf => "CHF",
            CurrencyCode::Kzt => "KZT",
            CurrencyCode::Try => "TRY",
            CurrencyCode::Uah => "UAH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "US Dollar",
            CurrencyCode::Eur => "Euro",
            CurrencyCode::Rub => "Russian Ruble",
            CurrencyCode::Gbp => "British Pound",
            CurrencyCode::Jpy => "Japanese Yen",
            CurrencyCode::Cny => "Chinese Yuan",
            CurrencyCode::Chf => "Swiss Franc",
            CurrencyCode::Kzt => "Kazakhstani Tenge",
            CurrencyCode::Try => "Turkish Lira",
            CurrencyCode::Uah => "Ukrainian Hryvnia",
        }
    }

    /// Option text as shown in selectors, e.g. `USD - US Dollar`.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.code(), self.label())
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| anyhow::anyhow!("Unsupported currency code: {}", s.trim()))
    }
}
