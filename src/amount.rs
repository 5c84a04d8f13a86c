use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;
use thiserror::Error;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Arithmetic saturates at the bounds of `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

/// Error returned when operator text is not a usable number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid amount")]
pub struct AmountParseError(pub String);

impl Amount {
    const SCALE: i64 = 10_000;

    pub const ZERO: Amount = Amount(0);

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub const fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole currency units, e.g. `from_units(1800)` is 1800.0000.
    pub const fn from_units(units: i64) -> Self {
        Amount(units.saturating_mul(Self::SCALE))
    }

    pub const fn scaled(self) -> i64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `self * num / den`, rounded to the nearest scaled unit.
    /// A non-positive or non-finite denominator yields zero.
    pub fn mul_ratio(self, num: f64, den: f64) -> Self {
        if !(den > 0.0) || !num.is_finite() || !den.is_finite() {
            return Amount::ZERO;
        }
        Amount(((self.0 as f64) * num / den).round() as i64)
    }

    /// Round to whole currency units, half away from zero.
    pub fn round_units(self) -> Self {
        Amount((self / Self::SCALE).0.saturating_mul(Self::SCALE))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        write!(f, "{sign}{whole}.{frac:04}")
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Amount::from_float(value)),
            _ => Err(AmountParseError(trimmed.to_string())),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::ops::Mul<i64> for Amount {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Amount(self.0.saturating_mul(rhs))
    }
}

/// Division rounds half away from zero. Dividing by zero yields zero.
impl std::ops::Div<i64> for Amount {
    type Output = Self;

    fn div(self, rhs: i64) -> Self::Output {
        if rhs == 0 {
            return Amount::ZERO;
        }
        let quotient = self.0.saturating_div(rhs);
        let remainder = self.0.wrapping_rem(rhs);
        if remainder.unsigned_abs() * 2 >= rhs.unsigned_abs() {
            Amount(quotient.saturating_add(self.0.signum() * rhs.signum()))
        } else {
            Amount(quotient)
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
