//! Extended numeric literals.
//!
//! A [`Number`] is the verbatim text of a numeric token that has passed the
//! grammar in [`grammar`]. It is the only way a literal reaches the converter,
//! so conversion never sees unvalidated input.
pub mod convert;
pub mod grammar;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{ConversionError, GrammarError};
pub use grammar::{Form, is_valid_number};

/// A validated numeric literal with its numeric value left unmaterialized.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Number {
    lit: Box<str>,
    form: Form,
}

impl Number {
    /// Validate `span` and wrap it.
    pub fn parse(span: &str) -> Result<Self, GrammarError> {
        match grammar::classify(span) {
            Some(form) => Ok(Self { lit: span.into(), form }),
            None => Err(GrammarError { literal: span.to_string() }),
        }
    }

    pub fn as_str(&self) -> &str { &self.lit }
    pub fn form(&self) -> Form { self.form }
    pub fn is_negative(&self) -> bool { self.lit.starts_with('-') }

    pub fn as_f64(&self) -> Result<f64, ConversionError> { convert::to_f64(self) }
    pub fn as_f32(&self) -> Result<f32, ConversionError> { convert::to_f32(self) }
    pub fn as_i64(&self) -> Result<i64, ConversionError> { convert::to_i64(self) }
    pub fn as_u64(&self) -> Result<u64, ConversionError> { convert::to_u64(self) }
}

impl Default for Number {
    fn default() -> Self { Self { lit: "0".into(), form: Form::Decimal } }
}

impl FromStr for Number {
    type Err = GrammarError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.lit) }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.as_f64().map_err(serde::ser::Error::custom)?;
        crate::dynamic::serialize_f64(value, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_literal_verbatim() {
        let n: Number = "+0XDeAd".parse().unwrap();
        assert_eq!(n.as_str(), "+0XDeAd");
        assert_eq!(n.to_string(), "+0XDeAd");
        assert_eq!(n.form(), Form::Hex);
        assert!(!n.is_negative());
    }

    #[test]
    fn parse_rejects_with_grammar_error() {
        let err = Number::parse("01").unwrap_err();
        assert_eq!(err.literal, "01");
        assert_eq!(err.to_string(), "invalid number literal `01`");
    }

    #[test]
    fn serializes_as_canonical_json() {
        assert_eq!(serde_json::to_string(&Number::parse("0x10").unwrap()).unwrap(), "16");
        assert_eq!(serde_json::to_string(&Number::parse(".5").unwrap()).unwrap(), "0.5");
        assert!(serde_json::to_string(&Number::parse("NaN").unwrap()).is_err());
    }
}
