//! Fixed-point decimal type with 3 decimal places precision.
//!
//! CODA encodes every monetary amount as a sign character followed by 15
//! digits with 3 implied decimal places. This wraps `rust_decimal` with
//! scale enforcement so balances and amounts stay exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A decimal type that maintains exactly 3 decimal places of precision.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use coda_parser::Decimal3;
///
/// let amount = Decimal3::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Decimal3(Decimal);

impl Decimal3 {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 3;

    /// Zero value.
    pub const ZERO: Self = Decimal3(Decimal::ZERO);

    /// Creates a new `Decimal3` from a `Decimal`, normalizing to 3 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Decimal3(normalized)
    }

    /// Decodes the CODA wire form: a sign character ('0' positive, '1'
    /// negative) followed by digits carrying 3 implied decimal places.
    ///
    /// Returns `None` if the sign is unknown or the digits don't parse.
    pub fn from_coda(sign: char, digits: &str) -> Option<Self> {
        let negative = match sign {
            '0' => false,
            '1' => true,
            _ => return None,
        };
        let raw: i64 = digits.trim().parse().ok()?;
        let raw = if negative { -raw } else { raw };
        Some(Decimal3(Decimal::new(raw, Self::SCALE)))
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Decimal3 {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Decimal3::new(decimal))
    }
}

impl fmt::Display for Decimal3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Add for Decimal3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Decimal3::new(self.0 + rhs.0)
    }
}

impl AddAssign for Decimal3 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Sub for Decimal3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Decimal3::new(self.0 - rhs.0)
    }
}

impl SubAssign for Decimal3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Serialize for Decimal3 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.3}", self.0))
    }
}

impl<'de> Deserialize<'de> for Decimal3 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Decimal3::from_str(&s).map_err(serde::de::Error::custom)
    }
}
