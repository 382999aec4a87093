//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (hundredths of the currency unit)
//! as i64 so that sums over line items and cost records are exact. Fractional
//! factors (quantities, percentages) go through [`Money::scale`], which is the
//! only place a monetary value gets rounded.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::lenient;

/// Minor units per major currency unit
pub const MINOR_PER_MAJOR: i64 = 100;

/// Symbols `Money::parse` strips from the front of an amount
const CURRENCY_SYMBOLS: &[&str] = &["₩", "$", "€", "£", "¥"];

/// A monetary amount stored as minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use sitebid::models::Money;
    /// let amount = Money::from_minor(1050); // 10.50
    /// assert_eq!(amount.major(), 10);
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole major units
    ///
    /// # Examples
    /// ```
    /// use sitebid::models::Money;
    /// assert_eq!(Money::from_major(5_000).minor(), 500_000);
    /// ```
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole major units (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Get the minor portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// The amount in major units as a float, for CSV and ratio output
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Multiply by a fractional factor, rounding half away from zero.
    ///
    /// A non-finite factor yields zero.
    pub fn scale(&self, factor: f64) -> Self {
        let scaled = self.0 as f64 * factor;
        if scaled.is_finite() {
            Self(scaled.round() as i64)
        } else {
            Self::zero()
        }
    }

    /// Take `percent` percent of this amount (`self × percent / 100`)
    ///
    /// # Examples
    /// ```
    /// use sitebid::models::Money;
    /// let direct = Money::from_major(80_000);
    /// assert_eq!(direct.percent(0.7), Money::from_major(560));
    /// ```
    pub fn percent(&self, percent: f64) -> Self {
        let scaled = self.0 as f64 * percent / 100.0;
        if scaled.is_finite() {
            Self(scaled.round() as i64)
        } else {
            Self::zero()
        }
    }

    /// Round down (toward negative infinity) to a multiple of `unit`.
    ///
    /// A non-positive unit leaves the amount unchanged.
    pub fn floor_to(&self, unit: Money) -> Self {
        if unit.0 <= 0 {
            return *self;
        }
        let quotient = self.0.div_euclid(unit.0);
        // Flooring near i64::MIN would step past the range; stay one unit up
        match quotient.checked_mul(unit.0) {
            Some(floored) => Self(floored),
            None => Self((quotient + 1) * unit.0),
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "-$10.50", "$-10.50",
    /// "₩90,000", "10". Only a leading currency symbol may precede the
    /// digits.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());
        let text = s.trim();

        let (mut negative, text) = match text.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, text),
        };

        let text = match CURRENCY_SYMBOLS.iter().find_map(|sym| text.strip_prefix(sym)) {
            Some(stripped) => stripped.trim_start(),
            None => text,
        };

        let text = match text.strip_prefix('-') {
            Some(stripped) if !negative => {
                negative = true;
                stripped
            }
            Some(_) => return Err(invalid()),
            None => text,
        };

        let cleaned: String = text.chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }

        let (whole, frac) = match cleaned.split_once('.') {
            Some((whole, frac)) => {
                if frac.contains('.') || (whole.is_empty() && frac.is_empty()) {
                    return Err(invalid());
                }
                (whole, frac)
            }
            None => (cleaned.as_str(), ""),
        };

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let minor = whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(frac))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs())
        } else {
            format!("{}{}", symbol, self)
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Whole amounts print without a fraction ("90,000"), others with two digits
/// ("1,250.50").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let whole = group_thousands(self.major().abs());
        let text = if self.minor_part() == 0 {
            format!("{}{}", sign, whole)
        } else {
            format!("{}{}.{:02}", sign, whole, self.minor_part())
        };
        f.pad(&text)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::minor_units(deserializer).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
