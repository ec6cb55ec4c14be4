//! Integer yen amounts.
//!
//! The shop only sells in Japanese yen, which has no minor unit, so a price
//! is a plain signed integer count of yen. Arithmetic saturates at the
//! `i64` bounds.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// An amount in yen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero yen.
    pub const ZERO: Self = Self(0);

    /// Create a price from a yen amount.
    #[must_use]
    pub const fn yen(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the amount in yen.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Formats as `¥3,500`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}¥{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::yen(0).to_string(), "¥0");
        assert_eq!(Price::yen(450).to_string(), "¥450");
        assert_eq!(Price::yen(3500).to_string(), "¥3,500");
        assert_eq!(Price::yen(1_234_567).to_string(), "¥1,234,567");
        assert_eq!(Price::yen(-1200).to_string(), "-¥1,200");
    }

    #[test]
    fn test_line_totals() {
        let total: Price = [Price::yen(3500) * 2, Price::yen(450) * 3].into_iter().sum();
        assert_eq!(total, Price::yen(8350));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Price::yen(i64::MAX - 10);
        assert_eq!(huge * 3, Price::yen(i64::MAX));
        assert_eq!(huge + Price::yen(500), Price::yen(i64::MAX));
        let total: Price = [huge, huge, Price::yen(450)].into_iter().sum();
        assert_eq!(total, Price::yen(i64::MAX));
    }
}
