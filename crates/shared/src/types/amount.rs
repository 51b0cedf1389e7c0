//! Exact monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Exchange files store every value as a rational `numerator/denominator`,
//! so this type wraps `num_rational::BigRational` and never rounds except
//! when producing the two-decimal display string.

use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// An exact rational amount of money.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(BigRational);

impl Amount {
    /// The additive identity.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Creates a whole amount.
    #[must_use]
    pub fn from_integer(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    /// Wraps an existing rational.
    #[must_use]
    pub const fn from_ratio(ratio: BigRational) -> Self {
        Self(ratio)
    }

    /// Returns the underlying rational.
    #[must_use]
    pub const fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Parses a bare integer (`-1250`) or a fraction (`-1250/100`).
    pub fn parse(text: &str) -> ParseResult<Self> {
        match text.split_once('/') {
            None => Ok(Self(BigRational::from_integer(parse_integer(text, text)?))),
            Some((numer, denom)) => {
                let numer = parse_integer(numer, text)?;
                if denom.starts_with('-') {
                    return Err(ParseError::amount(text, "negative denominator"));
                }
                let denom = parse_integer(denom, text)?;
                if denom.is_zero() {
                    return Err(ParseError::amount(text, "zero denominator"));
                }
                Ok(Self(BigRational::new(numer, denom)))
            }
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Formats the amount with exactly two decimals.
    ///
    /// Rounds to the nearest hundredth, halves away from zero. A value that
    /// rounds to zero is printed without a sign.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        let scale = BigInt::from(100u32);
        let scaled = self.0.numer().abs() * &scale;
        let denom = self.0.denom();

        let quotient = &scaled / denom;
        let remainder = &scaled % denom;
        let rounded = if remainder * 2u32 >= *denom {
            quotient + 1u32
        } else {
            quotient
        };

        let sign = if self.0.is_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let units = &rounded / &scale;
        let cents = &rounded % &scale;
        format!("{sign}{units}.{cents:02}")
    }

    /// Formats the amount as a reduced `numerator/denominator` pair.
    ///
    /// The denominator is always written, so whole amounts render as `n/1`.
    #[must_use]
    pub fn to_ratio_string(&self) -> String {
        format!("{}/{}", self.0.numer(), self.0.denom())
    }

    /// Returns the prefix sums of an ordered sequence of amounts.
    ///
    /// The `i`-th element is the total of the first `i + 1` inputs.
    pub fn running_totals<'a, I>(amounts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut total = Self::zero();
        amounts
            .into_iter()
            .map(|amount| {
                total += amount;
                total.clone()
            })
            .collect()
    }
}

fn parse_integer(part: &str, text: &str) -> ParseResult<BigInt> {
    let digits = part.strip_prefix('-').unwrap_or(part);
    if digits.is_empty() {
        return Err(ParseError::amount(text, "missing digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::amount(text, format!("{part:?} is not an integer")));
    }
    BigInt::from_str(part).map_err(|e| ParseError::amount(text, e.to_string()))
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.to_display_string())
    }
}

impl FromStr for Amount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_ratio_string()
    }
}

impl Add<&Amount> for &Amount {
    type Output = Amount;

    fn add(self, rhs: &Amount) -> Self::Output {
        Amount(&self.0 + &rhs.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl Sub<&Amount> for &Amount {
    type Output = Amount;

    fn sub(self, rhs: &Amount) -> Self::Output {
        Amount(&self.0 - &rhs.0)
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-&self.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut total, amount| {
            total += amount;
            total
        })
    }
}
