//! Number formatting in the Indian digit grouping (`en-IN`): the last three integer digits form
//! one group, every further group has two digits.

use std::fmt::{Display, Formatter};

/// Number rounded to at most `precision` fraction digits, trailing zeros dropped.
pub struct Grouped {
    pub value: f64,
    pub precision: usize,
}

impl Grouped {
    pub const fn new(value: f64, precision: usize) -> Self {
        Self { value, precision }
    }
}

impl Display for Grouped {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.value.is_finite() {
            return Display::fmt(&self.value, f);
        }
        // Round half away from zero, `format!` alone would round half to even:
        let scale = 10_f64.powi(i32::try_from(self.precision).unwrap_or(i32::MAX));
        let rounded = format!("{:.*}", self.precision, (self.value.abs() * scale).round() / scale);
        let (integer, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));
        let fraction = fraction.trim_end_matches('0');
        let is_zero = integer.bytes().all(|digit| digit == b'0') && fraction.is_empty();

        if self.value.is_sign_negative() && !is_zero {
            f.write_str("-")?;
        }
        f.write_str(&group_indian(integer))?;
        if !fraction.is_empty() {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, digit) in head.chars().enumerate() {
        if i != 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("0"), "0");
        assert_eq!(group_indian("400"), "400");
        assert_eq!(group_indian("13300"), "13,300");
        assert_eq!(group_indian("130000"), "1,30,000");
        assert_eq!(group_indian("12345678"), "1,23,45,678");
    }

    #[test]
    fn test_grouped_precision() {
        assert_eq!(Grouped::new(13_300.0, 0).to_string(), "13,300");
        assert_eq!(Grouped::new(1.25, 1).to_string(), "1.3");
        assert_eq!(Grouped::new(7.0, 1).to_string(), "7");
        assert_eq!(Grouped::new(11.5, 1).to_string(), "11.5");
        assert_eq!(Grouped::new(1_234_567.891, 2).to_string(), "12,34,567.89");
    }

    #[test]
    fn test_grouped_sign() {
        assert_eq!(Grouped::new(-20_000.0, 0).to_string(), "-20,000");
        assert_eq!(Grouped::new(-0.01, 0).to_string(), "0");
    }
}
