//! The canonical representation for monetary values.
//!
//! The wallet API reports values either as plain JSON numbers or as formatted
//! BRL strings such as "R$ 1.234,56". Both forms are converted to [Amount]
//! (integer centavos) when a response is decoded, so everything past the API
//! boundary works with integers.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, Neg, Sub},
};

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary value in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    /// Zero centavos.
    pub const ZERO: Amount = Amount(0);

    /// Create an [Amount] from a whole number of centavos.
    pub fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    /// Create an [Amount] from a value in reais, rounding to the nearest centavo.
    pub fn from_reais(reais: f64) -> Self {
        Self((reais * 100.0).round() as i64)
    }

    /// The value as a whole number of centavos.
    pub fn centavos(self) -> i64 {
        self.0
    }

    /// The magnitude of the value.
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Whether the value is below zero.
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parse a BRL currency string, e.g. "R$ 1.234,56".
    ///
    /// The currency symbol, whitespace and thousands separators (dots) are
    /// ignored, and a comma is accepted as the decimal separator. At most two
    /// decimal places are allowed.
    ///
    /// # Errors
    ///
    /// Returns a [ParseAmountError] containing the input if it is not a valid
    /// currency string.
    pub fn parse_brl(input: &str) -> Result<Self, ParseAmountError> {
        let invalid = || ParseAmountError(input.to_owned());

        let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let cleaned = cleaned.replace("R$", "").replace('.', "").replace(',', ".");

        let negative = cleaned.starts_with('-');
        let digits = cleaned.trim_start_matches(['-', '+']);
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => fraction.parse().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        let centavos = whole
            .checked_mul(100)
            .and_then(|whole| whole.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -centavos } else { centavos }))
    }
}

/// The input string could not be parsed as a currency value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse {0:?} as a currency value")]
pub struct ParseAmountError(pub String);

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_brl(*self))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireAmount {
            Number(f64),
            Text(String),
        }

        match WireAmount::deserialize(deserializer)? {
            WireAmount::Number(reais) => Ok(Amount::from_reais(reais)),
            WireAmount::Text(text) => Amount::parse_brl(&text).map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

/// Format an [Amount] as a BRL currency string, e.g. "R$ 1.234,56".
pub fn format_brl(amount: Amount) -> String {
    let centavos = amount.centavos();
    let sign = if centavos < 0 { "-" } else { "" };
    let whole = (centavos.abs() / 100).to_formatted_string(&Locale::pt);
    let fraction = centavos.abs() % 100;

    format!("{sign}R$ {whole},{fraction:02}")
}
