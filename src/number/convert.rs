//! Exact conversions from a validated literal to `f64`, `i64` and `u64`.
//!
//! Integer paths never go through floating point: the magnitude is rebuilt
//! from the decimal digits and exponent, so `1.5e1` is `15` and `1.05e1` is an
//! error rather than a silent truncation.
use std::borrow::Cow;

use super::{Form, Number};
use crate::error::ConversionError;

fn split_sign(lit: &str) -> (bool, &str) {
    match lit.as_bytes().first() {
        Some(b'-') => (true, &lit[1..]),
        Some(b'+') => (false, &lit[1..]),
        _ => (false, lit),
    }
}

fn split_exponent(unsigned: &str) -> (&str, &str) {
    match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], &unsigned[at + 1..]),
        None => (unsigned, ""),
    }
}

fn out_of_range(num: &Number, target: &'static str) -> ConversionError {
    ConversionError::OutOfRange { literal: num.as_str().to_string(), target }
}

/// Hex digit run after the `0x` prefix, as an unsigned magnitude.
fn hex_magnitude(num: &Number, unsigned: &str, target: &'static str) -> Result<u64, ConversionError> {
    u64::from_str_radix(&unsigned[2..], 16).map_err(|_| out_of_range(num, target))
}

/// `.5` → `0.5`, `1.` → `1.0`, `1.e1` → `1.0e1`.
fn normalize_decimal(unsigned: &str) -> Cow<'_, str> {
    let at = unsigned.find(['e', 'E']).unwrap_or(unsigned.len());
    let (mantissa, exponent) = unsigned.split_at(at);
    let lead = mantissa.starts_with('.');
    let trail = mantissa.ends_with('.');
    if !lead && !trail {
        return Cow::Borrowed(unsigned);
    }
    let mut out = String::with_capacity(unsigned.len() + 2);
    if lead {
        out.push('0');
    }
    out.push_str(mantissa);
    if trail {
        out.push('0');
    }
    out.push_str(exponent);
    Cow::Owned(out)
}

/// Exact integer magnitude of a decimal literal (sign stripped).
fn decimal_magnitude(num: &Number, unsigned: &str, target: &'static str) -> Result<u128, ConversionError> {
    let (mantissa, exponent) = split_exponent(unsigned);
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    let trimmed = significant.trim_end_matches('0');
    let trailing_zeros = significant.len() - trimmed.len();

    let exp = if exponent.is_empty() {
        0
    } else {
        match exponent.parse::<i64>() {
            Ok(e) => e,
            // exponent too large for i64 either way
            Err(_) if exponent.starts_with('-') => {
                return Err(ConversionError::NotAnInteger { literal: num.as_str().to_string() });
            }
            Err(_) => return Err(out_of_range(num, target)),
        }
    };

    let scale = i128::from(exp) - frac_part.len() as i128 + trailing_zeros as i128;
    if scale < 0 {
        return Err(ConversionError::NotAnInteger { literal: num.as_str().to_string() });
    }

    let mut magnitude: u128 = trimmed.parse().map_err(|_| out_of_range(num, target))?;
    for _ in 0..scale {
        magnitude = magnitude.checked_mul(10).ok_or_else(|| out_of_range(num, target))?;
    }
    Ok(magnitude)
}

fn integer_magnitude(num: &Number, target: &'static str) -> Result<(bool, u128), ConversionError> {
    let (negative, unsigned) = split_sign(num.as_str());
    let magnitude = match num.form() {
        Form::Infinity | Form::NaN => {
            return Err(ConversionError::NotFinite { literal: num.as_str().to_string() });
        }
        Form::Hex => u128::from(hex_magnitude(num, unsigned, target)?),
        Form::Decimal => decimal_magnitude(num, unsigned, target)?,
    };
    Ok((negative, magnitude))
}

pub(crate) fn to_f64(num: &Number) -> Result<f64, ConversionError> {
    let (negative, unsigned) = split_sign(num.as_str());
    let magnitude = match num.form() {
        Form::NaN => return Ok(f64::NAN),
        Form::Infinity => f64::INFINITY,
        Form::Hex => hex_magnitude(num, unsigned, "f64")? as f64,
        Form::Decimal => {
            let value: f64 = normalize_decimal(unsigned)
                .parse()
                .map_err(|_| out_of_range(num, "f64"))?;
            if value.is_infinite() {
                return Err(out_of_range(num, "f64"));
            }
            value
        }
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parsed directly at 32-bit width so the result is rounded once.
pub(crate) fn to_f32(num: &Number) -> Result<f32, ConversionError> {
    let (negative, unsigned) = split_sign(num.as_str());
    let magnitude = match num.form() {
        Form::NaN => return Ok(f32::NAN),
        Form::Infinity => f32::INFINITY,
        Form::Hex => hex_magnitude(num, unsigned, "f32")? as f32,
        Form::Decimal => {
            let value: f32 = normalize_decimal(unsigned)
                .parse()
                .map_err(|_| out_of_range(num, "f32"))?;
            if value.is_infinite() {
                return Err(out_of_range(num, "f32"));
            }
            value
        }
    };
    Ok(if negative { -magnitude } else { magnitude })
}

pub(crate) fn to_i64(num: &Number) -> Result<i64, ConversionError> {
    let (negative, magnitude) = integer_magnitude(num, "i64")?;
    let magnitude = i128::try_from(magnitude).map_err(|_| out_of_range(num, "i64"))?;
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).map_err(|_| out_of_range(num, "i64"))
}

pub(crate) fn to_u64(num: &Number) -> Result<u64, ConversionError> {
    let (negative, magnitude) = integer_magnitude(num, "u64")?;
    if negative && magnitude != 0 {
        return Err(out_of_range(num, "u64"));
    }
    u64::try_from(magnitude).map_err(|_| out_of_range(num, "u64"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::parse(s).unwrap()
    }

    #[test]
    fn float_conversions() {
        let cases: &[(&str, f64)] = &[
            ("0xDeADb", 912091.0),
            ("+0xDeADb", 912091.0),
            ("-0xDeADb", -912091.0),
            ("-0XDeADb", -912091.0),
            (".5", 0.5),
            ("-.5", -0.5),
            ("+1.e1", 10.0),
            ("-1.e1", -10.0),
            ("1.", 1.0),
            ("12e-34", 12e-34),
            ("-Infinity", f64::NEG_INFINITY),
            ("Infinity", f64::INFINITY),
            ("+Infinity", f64::INFINITY),
        ];
        for (lit, want) in cases {
            assert_eq!(num(lit).as_f64().unwrap(), *want, "{lit}");
        }
        assert!(num("NaN").as_f64().unwrap().is_nan());
    }

    #[test]
    fn negative_zero_keeps_sign_bit() {
        for lit in ["-0", "-0x0", "-0.0", "-0e5", "-.0"] {
            let f = num(lit).as_f64().unwrap();
            assert_eq!(f, 0.0, "{lit}");
            assert!(f.is_sign_negative(), "{lit}");
            assert_eq!(num(lit).as_i64().unwrap(), 0);
            assert_eq!(num(lit).as_u64().unwrap(), 0);
        }
        assert!(num("0x0").as_f64().unwrap().is_sign_positive());
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(num("0xDeADb").as_i64().unwrap(), 912091);
        assert_eq!(num("+0xDeADb").as_i64().unwrap(), 912091);
        assert_eq!(num("-0xDeADb").as_i64().unwrap(), -912091);
        assert_eq!(num("-0XDeADb").as_i64().unwrap(), -912091);
        assert_eq!(num("0x0").as_i64().unwrap(), 0);
        assert_eq!(num("1.5e1").as_i64().unwrap(), 15);
        assert_eq!(num("1.0").as_i64().unwrap(), 1);
        assert_eq!(num("1.").as_i64().unwrap(), 1);
        assert_eq!(num("12e3").as_u64().unwrap(), 12000);
        assert_eq!(num("1200e-2").as_i64().unwrap(), 12);
        assert_eq!(num("0.0e999999999999999999999").as_i64().unwrap(), 0);
        assert_eq!(num("-9223372036854775808").as_i64().unwrap(), i64::MIN);
        assert_eq!(num("0xFFFFFFFFFFFFFFFF").as_u64().unwrap(), u64::MAX);
        assert_eq!(num("-0x8000000000000000").as_i64().unwrap(), i64::MIN);
    }

    #[test]
    fn integer_conversion_never_truncates() {
        assert!(matches!(num("1.5").as_i64(), Err(ConversionError::NotAnInteger { .. })));
        assert!(matches!(num("1.05e1").as_u64(), Err(ConversionError::NotAnInteger { .. })));
        assert!(matches!(num("5e-999999999999999999999").as_i64(), Err(ConversionError::NotAnInteger { .. })));
        assert!(matches!(num("Infinity").as_i64(), Err(ConversionError::NotFinite { .. })));
        assert!(matches!(num("NaN").as_u64(), Err(ConversionError::NotFinite { .. })));
    }

    #[test]
    fn integer_out_of_range() {
        for lit in ["9223372036854775808", "0x8000000000000000", "1e19", "1e40", "-9223372036854775809"] {
            assert!(matches!(num(lit).as_i64(), Err(ConversionError::OutOfRange { target: "i64", .. })), "{lit}");
        }
        for lit in ["-1", "-0x1", "18446744073709551616", "0x10000000000000000"] {
            assert!(matches!(num(lit).as_u64(), Err(ConversionError::OutOfRange { target: "u64", .. })), "{lit}");
        }
    }

    #[test]
    fn f32_rounds_once_at_its_own_width() {
        assert_eq!(num("3.4028235e38").as_f32().unwrap(), f32::MAX);
        assert_eq!(num("-3.4028235e38").as_f32().unwrap(), f32::MIN);
        // halfway-adjacent: rounding through f64 first would land on 1.0
        assert_eq!(num("1.0000000596046447753906251").as_f32().unwrap(), 1.0000001f32);
        assert_eq!(num("0xDeADb").as_f32().unwrap(), 912091.0);
        assert!(num("-0").as_f32().unwrap().is_sign_negative());
        assert_eq!(num("-Infinity").as_f32().unwrap(), f32::NEG_INFINITY);
        assert!(matches!(num("3.5e38").as_f32(), Err(ConversionError::OutOfRange { target: "f32", .. })));
    }

    #[test]
    fn float_overflow_is_an_error() {
        assert!(matches!(num("1e400").as_f64(), Err(ConversionError::OutOfRange { .. })));
        assert_eq!(num("1e-400").as_f64().unwrap(), 0.0);
    }
}
