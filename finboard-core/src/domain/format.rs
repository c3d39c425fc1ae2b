//! Currency and date formatting used by the display model

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Date pattern shown in the transaction table (yyyy/MM/dd)
pub const DISPLAY_DATE_FORMAT: &str = "%Y/%m/%d";

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Parse an ISO 4217 code (case-insensitive)
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(Error::config(format!(
                "Unsupported currency: {}. Available: BRL, USD, EUR",
                other
            ))),
        }
    }

    pub fn format(&self) -> CurrencyFormat {
        match self {
            Currency::Brl => CurrencyFormat::new("R$", ',', '.', true),
            Currency::Usd => CurrencyFormat::new("$", '.', ',', false),
            Currency::Eur => CurrencyFormat::new("€", ',', '.', false),
        }
    }
}

/// Locale rules for rendering an amount as currency text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
    decimal_separator: char,
    thousands_separator: char,
    space_after_symbol: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Currency::default().format()
    }
}

impl CurrencyFormat {
    pub fn new(
        symbol: impl Into<String>,
        decimal_separator: char,
        thousands_separator: char,
        space_after_symbol: bool,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            decimal_separator,
            thousands_separator,
            space_after_symbol,
        }
    }

    /// Format an amount with two decimal places, e.g. `R$ 1.234,50`
    ///
    /// Midpoints round away from zero. Negative amounts carry a leading `-`
    /// before the symbol.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        if self.space_after_symbol {
            out.push(' ');
        }
        out.push_str(&group_thousands(whole, self.thousands_separator));
        out.push(self.decimal_separator);
        out.push_str(fraction);
        out
    }
}

fn group_thousands(whole: &str, separator: char) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse an ISO-8601 timestamp into a UTC instant
///
/// Accepts RFC 3339 text (`2020-05-01T00:00:00.000Z`, with any offset),
/// an offset-less date-time (taken as UTC) or a bare date.
pub fn parse_iso(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(Error::validation(format!("Invalid ISO-8601 date: '{}'", text)))
}

/// Format an instant using the table's date pattern (UTC calendar date)
pub fn format_date(instant: &DateTime<Utc>) -> String {
    instant.format(DISPLAY_DATE_FORMAT).to_string()
}
