use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::EngineError;

/// Donation amount represented as **integer cents**.
///
/// Amounts are persisted as cents and summed by the database, so reports
/// never accumulate floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// assert!("ten".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// The sign is kept: rejecting non-positive amounts is the caller's job.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::Validation("amount must be numeric".to_string());
        let overflow = || EngineError::Validation("amount too large".to_string());

        let trimmed = s.trim();
        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim().replace(',', ".");
        let (units_str, frac_str) = match rest.split_once('.') {
            Some((units, frac)) => (units, Some(frac)),
            None => (rest.as_str(), None),
        };

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let cents: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) if !frac.chars().all(|c| c.is_ascii_digit()) => return Err(invalid()),
            Some(frac) if frac.len() == 1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            Some(frac) if frac.len() == 2 => frac.parse::<i64>().map_err(|_| invalid())?,
            Some(_) => {
                return Err(EngineError::Validation(
                    "amount has more than two decimals".to_string(),
                ));
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        Ok(MoneyCents(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(10).to_string(), "0.10");
        assert_eq!(MoneyCents::new(150_00).to_string(), "150.00");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("100".parse::<MoneyCents>().unwrap().cents(), 10000);
        assert_eq!("100.0".parse::<MoneyCents>().unwrap().cents(), 10000);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
        assert_eq!("-5".parse::<MoneyCents>().unwrap().cents(), -500);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
    }

    #[test]
    fn parse_rejects_non_numeric() {
        for raw in ["", "abc", "1.2.3", "1e3", "-", ".50", "12.3x"] {
            assert_eq!(
                raw.parse::<MoneyCents>(),
                Err(EngineError::Validation("amount must be numeric".to_string())),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("0.001".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn sum_adds_cents() {
        let total: MoneyCents = [MoneyCents::new(100_00), MoneyCents::new(50_00)]
            .into_iter()
            .sum();
        assert_eq!(total, MoneyCents::new(150_00));
    }
}
