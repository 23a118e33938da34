use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Number of minor units (paise) in one rupee.
pub const MINOR_PER_RUPEE: i64 = 100;

/// Fixed-point money amount counted in paise.
///
/// Scores, projections, and leak thresholds all run on this type so that
/// repeated additions never accumulate floating-point drift. Ratios that feed
/// the scoring engines convert to `f64` at the last moment via [`Money::to_f64`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(MINOR_PER_RUPEE))
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    /// Whole-rupee part, truncated toward zero.
    pub fn rupees(self) -> i64 {
        self.0 / MINOR_PER_RUPEE
    }

    /// Lossy conversion for ratio math in the scoring engines.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_RUPEE as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Money {
        Money(self.0.saturating_abs())
    }

    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }

    /// Scales by `permille / 1000` through a 128-bit intermediate, truncating
    /// fractional paise. Used for scenario multipliers like `×1.10`.
    pub fn scale_permille(self, permille: i64) -> Money {
        let widened = self.0 as i128 * permille as i128 / 1000;
        Money(clamp_i128(widened))
    }

    /// Integer division, truncating toward zero. Divisor of zero yields zero,
    /// matching the zero-guard convention of the scoring engines.
    pub fn div_by(self, divisor: i64) -> Money {
        if divisor == 0 {
            Money::ZERO
        } else {
            Money(self.0 / divisor)
        }
    }

    /// How many whole times `step` fits into this amount. Zero or negative
    /// steps yield `None`.
    pub fn div_floor(self, step: Money) -> Option<i64> {
        if step.0 <= 0 {
            None
        } else {
            Some(self.0.div_euclid(step.0))
        }
    }
}

fn clamp_i128(value: i128) -> i64 {
    if value > i64::MAX as i128 {
        i64::MAX
    } else if value < i64::MIN as i128 {
        i64::MIN
    } else {
        value as i64
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, item| acc + item)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_inr(*self))
    }
}

/// Formats an amount as Indian rupees with lakh/crore digit grouping,
/// e.g. `₹1,23,456.78`.
pub fn format_inr(amount: Money) -> String {
    let minor = amount.minor();
    let negative = minor < 0;
    let abs = minor.unsigned_abs();
    let rupees = abs / MINOR_PER_RUPEE as u64;
    let paise = abs % MINOR_PER_RUPEE as u64;
    let grouped = group_indian(&rupees.to_string());
    let sign = if negative { "-" } else { "" };
    format!("{}₹{}.{:02}", sign, grouped, paise)
}

/// Indian grouping: rightmost group of three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    let head_chars: Vec<char> = head.chars().collect();
    for (i, ch) in head_chars.iter().enumerate() {
        if i != 0 && (head_chars.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }
    format!("{},{}", grouped, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_lakh_grouping() {
        assert_eq!(format_inr(Money::from_rupees(123_456)), "₹1,23,456.00");
        assert_eq!(format_inr(Money::from_rupees(1_00_00_000)), "₹1,00,00,000.00");
        assert_eq!(format_inr(Money::from_minor(-1_234_50)), "-₹1,234.50");
        assert_eq!(format_inr(Money::from_rupees(800)), "₹800.00");
    }

    #[test]
    fn scale_permille_truncates_toward_zero() {
        let amount = Money::from_rupees(1000);
        assert_eq!(amount.scale_permille(1100), Money::from_rupees(1100));
        assert_eq!(amount.scale_permille(800), Money::from_rupees(800));
        assert_eq!(Money::from_minor(101).scale_permille(950), Money::from_minor(95));
    }

    #[test]
    fn div_floor_counts_whole_steps() {
        let balance = Money::from_rupees(5000);
        let step = Money::from_rupees(410);
        assert_eq!(balance.div_floor(step), Some(12));
        assert_eq!(balance.div_floor(Money::ZERO), None);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let near_max = Money::from_minor(i64::MAX - 1);
        assert_eq!(near_max + Money::from_minor(10), Money::from_minor(i64::MAX));
    }
}
