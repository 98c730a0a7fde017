//! Money value object and rupee formatting.
//!
//! Amounts are held in paise (1/100 rupee) so that sums are exact and the
//! same column type works on every supported database.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::Serialize;

/// Currency symbol used for every rendered amount
pub const CURRENCY_SYMBOL: &str = "₹";

/// An amount of Indian rupees, stored in paise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create an amount from paise.
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create an amount from whole rupees.
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Create an amount from a floating point rupee value, rounded to the
    /// nearest paisa.
    pub fn from_rupees_f64(rupees: f64) -> Self {
        Self((rupees * 100.0).round() as i64)
    }

    pub const fn paise(&self) -> i64 {
        self.0
    }

    pub fn rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Mul<i32> for Money {
    type Output = Money;

    fn mul(self, rhs: i32) -> Money {
        Money(self.0 * i64::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Renders as `₹1,197` for whole rupees and `₹1,197.50` otherwise.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let rupees = group_thousands(abs / 100);
        let paise = abs % 100;

        if paise == 0 {
            write!(f, "{}{}{}", sign, CURRENCY_SYMBOL, rupees)
        } else {
            write!(f, "{}{}{}.{:02}", sign, CURRENCY_SYMBOL, rupees, paise)
        }
    }
}

/// Format a rupee amount with the currency symbol and comma grouping.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return Money::ZERO.to_string();
    }
    Money::from_rupees_f64(amount).to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_rupees_have_no_fraction() {
        assert_eq!(Money::from_rupees(499).to_string(), "₹499");
        assert_eq!(Money::from_rupees(1197).to_string(), "₹1,197");
        assert_eq!(Money::from_rupees(100000).to_string(), "₹100,000");
    }

    #[test]
    fn test_fractional_amounts_show_paise() {
        assert_eq!(Money::from_paise(200379).to_string(), "₹2,003.79");
        assert_eq!(Money::from_paise(105).to_string(), "₹1.05");
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(Money::ZERO.to_string(), "₹0");
        assert_eq!(Money::from_rupees(-1500).to_string(), "-₹1,500");
    }

    #[test]
    fn test_format_inr_rounds_to_paise() {
        assert_eq!(format_inr(2003.7948), "₹2,003.79");
        assert_eq!(format_inr(6000.0), "₹6,000");
        assert_eq!(format_inr(f64::NAN), "₹0");
    }

    #[test]
    fn test_arithmetic() {
        let total: Money = vec![Money::from_rupees(499), Money::from_rupees(349) * 2]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_rupees(1197));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
