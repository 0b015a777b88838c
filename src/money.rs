// src/money.rs
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    GBP, // Pound sterling
    USD, // US dollar
    EUR, // Euro
    SEK, // Swedish Krona
    VAC, // Virtual auction currency
}

impl Currency {
    /// Prefix used when an amount is shown to a bidder.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "£",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::SEK => "kr ",
            Currency::VAC => "VAC ",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::GBP => write!(f, "GBP"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
            Currency::SEK => write!(f, "SEK"),
            Currency::VAC => write!(f, "VAC"),
        }
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GBP" => Ok(Currency::GBP),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "SEK" => Ok(Currency::SEK),
            "VAC" => Ok(Currency::VAC),
            _ => Err(MoneyError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Value in minor units (hundredths).
pub type AmountValue = i64;

const MINOR_UNITS: AmountValue = 100;

/// A whole number of units followed by at most two fractional digits.
/// Only ASCII digits count.
pub const MONEY_PATTERN: &str = r"^[0-9]+(\.[0-9]{1,2})?$";

fn money_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(MONEY_PATTERN).expect("money pattern compiles"))
}

/// Whether `text` is a monetary amount a bidder may type.
pub fn is_monetary(text: &str) -> bool {
    money_pattern().is_match(text)
}

/// A monetary amount with two fractional digits, held exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    minor: AmountValue,
}

impl Amount {
    pub fn from_minor(minor: AmountValue) -> Self {
        Amount { minor }
    }

    pub fn from_units(units: AmountValue) -> Self {
        Amount { minor: units.saturating_mul(MINOR_UNITS) }
    }

    pub fn minor(&self) -> AmountValue {
        self.minor
    }

    pub fn as_f64(&self) -> f64 {
        self.minor as f64 / MINOR_UNITS as f64
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid monetary amount: {0}")]
    InvalidAmount(String),

    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Self) -> Self::Output {
        Amount {
            minor: self.minor.saturating_add(other.minor),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        let units = MINOR_UNITS as u64;
        write!(f, "{}{}.{:02}", sign, abs / units, abs % units)
    }
}

impl FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_monetary(s) {
            return Err(MoneyError::InvalidAmount(s.to_string()));
        }

        let (units_str, fraction_str) = match s.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (s, ""),
        };

        let units = units_str
            .parse::<AmountValue>()
            .map_err(|_| MoneyError::OutOfRange(s.to_string()))?;
        let invalid = || MoneyError::InvalidAmount(s.to_string());
        // "5" is fifty hundredths, "05" is five
        let fraction = match fraction_str.len() {
            0 => 0,
            1 => fraction_str.parse::<AmountValue>().map_err(|_| invalid())? * 10,
            2 => fraction_str.parse::<AmountValue>().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        units
            .checked_mul(MINOR_UNITS)
            .and_then(|minor| minor.checked_add(fraction))
            .map(Amount::from_minor)
            .ok_or_else(|| MoneyError::OutOfRange(s.to_string()))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom(format!("amount is not finite: {}", value)));
        }
        Ok(Amount::from_minor((value * MINOR_UNITS as f64).round() as AmountValue))
    }
}

/// Renders `amount` the way bidders see it, e.g. `£12.50`.
pub fn format_money(currency: Currency, amount: Amount) -> String {
    format!("{}{}", currency.symbol(), amount)
}
