//! Value types referenced by generated records.
//!
//! [`Decimal`] backs the packed and zoned descriptor types. It has no
//! `Default` implementation: a generated record always spells out its zero
//! value with [`Decimal::ZERO`].

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Fixed-point decimal number used for packed and zoned fields.
///
/// Equality is structural, so `1.0` and `1.00` compare unequal; use
/// [`Decimal::normalized`] before comparing values of different scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    /// The zero value with scale 0.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a decimal equal to `mantissa * 10^-scale`.
    #[must_use]
    pub const fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Returns the unscaled value.
    #[must_use]
    pub const fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Returns the number of fractional digits.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Returns true if the value is zero, whatever its scale.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Strips trailing fractional zeros.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut mantissa = self.mantissa;
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Self { mantissa, scale }
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDecimal {
            value: s.to_string(),
        };
        let overflow = || Error::DecimalOverflow {
            value: s.to_string(),
        };

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let mut mantissa: i128 = 0;
        for c in int_part.chars().chain(frac_part.chars()) {
            let digit = c.to_digit(10).ok_or_else(invalid)?;
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit)))
                .ok_or_else(overflow)?;
        }
        let scale = u32::try_from(frac_part.len()).map_err(|_| overflow())?;

        Ok(Self::new(if negative { -mantissa } else { mantissa }, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

/// Opaque element of an array whose element type was not declared.
///
/// The runtime fills these with the raw bytes of each occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawElement(pub Vec<u8>);

impl RawElement {
    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(Decimal::ZERO.is_zero());
        assert_eq!(Decimal::ZERO.to_string(), "0");
        assert_eq!("0".parse::<Decimal>(), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_parse_with_scale() {
        let d: Decimal = "-12.340".parse().expect("valid decimal");
        assert_eq!(d.mantissa(), -12340);
        assert_eq!(d.scale(), 3);
        assert_eq!(d.to_string(), "-12.340");
        assert_eq!(d.normalized(), Decimal::new(-1234, 2));
    }

    #[test]
    fn test_display_pads_leading_zeros() {
        assert_eq!(Decimal::new(5, 3).to_string(), "0.005");
        assert_eq!(Decimal::new(-5, 1).to_string(), "-0.5");
        assert_eq!(Decimal::new(12345, 2).to_string(), "123.45");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "".parse::<Decimal>(),
            Err(Error::InvalidDecimal { .. })
        ));
        assert!(matches!(
            "1.2.3".parse::<Decimal>(),
            Err(Error::InvalidDecimal { .. })
        ));
        assert!(matches!(
            "12a".parse::<Decimal>(),
            Err(Error::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "9".repeat(60);
        assert!(matches!(
            huge.parse::<Decimal>(),
            Err(Error::DecimalOverflow { .. })
        ));
    }

    #[test]
    fn test_raw_element() {
        let raw = RawElement(vec![0xC1, 0xC2]);
        assert_eq!(raw.as_bytes(), &[0xC1, 0xC2]);
        assert!(RawElement::default().as_bytes().is_empty());
    }
}
