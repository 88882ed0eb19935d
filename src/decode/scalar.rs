//! Scalar targets: booleans, the eight integer kinds (plus pointer-sized),
//! both float widths, strings, raw literals and optionals.
use super::{Context, Decode, FloatKind, IntKind, TargetKind, numeric_source};
use crate::error::DecodeError;
use crate::number::Number;
use crate::value::Value;

impl Decode for bool {
    fn kind() -> TargetKind { TargetKind::Bool }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        match value {
            Value::Bool(b) => {
                *self = *b;
                Ok(())
            }
            other => Err(cx.mismatch(Self::kind(), other)),
        }
    }
}

// Integers go through the widest conversion of their signedness, then narrow.
macro_rules! impl_decode_int {
    ($($ty:ty => $kind:expr, $wide:ident);* $(;)?) => {
        $(impl Decode for $ty {
            fn kind() -> TargetKind { TargetKind::Int($kind) }

            fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
                let number = numeric_source::<Self>(value, cx)?;
                let wide = number.$wide().map_err(|e| cx.conversion(e, stringify!($ty)))?;
                *self = <$ty>::try_from(wide).map_err(|_| cx.overflow(&number, stringify!($ty)))?;
                Ok(())
            }
        })*
    };
}

impl_decode_int! {
    i8 => IntKind::I8, as_i64;
    i16 => IntKind::I16, as_i64;
    i32 => IntKind::I32, as_i64;
    i64 => IntKind::I64, as_i64;
    isize => IntKind::pointer_sized(true), as_i64;
    u8 => IntKind::U8, as_u64;
    u16 => IntKind::U16, as_u64;
    u32 => IntKind::U32, as_u64;
    u64 => IntKind::U64, as_u64;
    usize => IntKind::pointer_sized(false), as_u64;
}

impl Decode for f64 {
    fn kind() -> TargetKind { TargetKind::Float(FloatKind::F64) }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        let number = numeric_source::<Self>(value, cx)?;
        *self = number.as_f64().map_err(|e| cx.conversion(e, "f64"))?;
        Ok(())
    }
}

impl Decode for f32 {
    fn kind() -> TargetKind { TargetKind::Float(FloatKind::F32) }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        let number = numeric_source::<Self>(value, cx)?;
        *self = number.as_f32().map_err(|e| cx.conversion(e, "f32"))?;
        Ok(())
    }
}

impl Decode for String {
    fn kind() -> TargetKind { TargetKind::String }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        match value {
            Value::String(text) => {
                self.clear();
                self.push_str(text);
                Ok(())
            }
            other => Err(cx.mismatch(Self::kind(), other)),
        }
    }
}

impl Decode for Number {
    fn kind() -> TargetKind { TargetKind::Number }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        *self = numeric_source::<Self>(value, cx)?.into_owned();
        Ok(())
    }
}

/// `null` clears the option; anything else decodes into the (possibly fresh) inner value.
impl<T: Decode + Default> Decode for Option<T> {
    fn kind() -> TargetKind { TargetKind::Optional(Box::new(T::kind())) }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).decode(value, cx)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodeOptions, decode_value};

    fn decode<T: Decode + Default>(src: &str) -> Result<T, DecodeError> {
        let value: Value = src.parse().unwrap();
        let mut out = T::default();
        decode_value(&value, &mut out, &DecodeOptions::default())?;
        Ok(out)
    }

    #[test]
    fn hex_into_float_and_int() {
        assert_eq!(decode::<f64>("0xDeADb").unwrap(), 912091.0);
        assert_eq!(decode::<i64>("0xDeADb").unwrap(), 912091);
        let z = decode::<f64>("-0x0").unwrap();
        assert_eq!(z, 0.0);
        assert!(z.is_sign_negative());
        assert_eq!(decode::<i64>("-0x0").unwrap(), 0);
        assert_eq!(decode::<u8>("-0x0").unwrap(), 0);
    }

    #[test]
    fn quoted_numbers_decode_into_numeric_targets() {
        assert_eq!(decode::<i8>("'2'").unwrap(), 2);
        assert_eq!(decode::<u32>("\"0x10\"").unwrap(), 16);
        assert_eq!(decode::<f32>("'2.3'").unwrap(), 2.3f32);
        assert_eq!(decode::<f64>("\"-Infinity\"").unwrap(), f64::NEG_INFINITY);
        assert_eq!(decode::<Number>("'1e3'").unwrap().as_str(), "1e3");
    }

    #[test]
    fn non_numeric_strings_are_type_mismatches() {
        for src in ["'abc'", "'01'", "' 1'", "''"] {
            let err = decode::<i32>(src).unwrap_err();
            assert!(
                matches!(err, DecodeError::TypeMismatch { ref expected, .. } if *expected == TargetKind::Int(IntKind::I32)),
                "{src}: {err}"
            );
        }
    }

    #[test]
    fn mismatched_kinds() {
        assert!(matches!(decode::<i64>("true"), Err(DecodeError::TypeMismatch { .. })));
        assert!(matches!(decode::<f64>("null"), Err(DecodeError::TypeMismatch { .. })));
        assert!(matches!(decode::<bool>("'true'"), Err(DecodeError::TypeMismatch { .. })));
        assert!(matches!(decode::<String>("1"), Err(DecodeError::TypeMismatch { .. })));
        let err = decode::<u16>("[1]").unwrap_err();
        assert_eq!(err.to_string(), "at .: cannot decode sequence into u16");
    }

    #[test]
    fn overflow_names_target_width() {
        let err = decode::<i8>("300").unwrap_err();
        assert!(matches!(err, DecodeError::Overflow { ref literal, target: "i8", .. } if literal == "300"));
        assert_eq!(decode::<i64>("300").unwrap(), 300);
        assert!(matches!(decode::<u8>("-1"), Err(DecodeError::Overflow { target: "u8", .. })));
        assert!(matches!(decode::<i64>("1e19"), Err(DecodeError::Overflow { target: "i64", .. })));
        assert!(matches!(decode::<f32>("1e39"), Err(DecodeError::Overflow { target: "f32", .. })));
        assert!(matches!(decode::<f64>("1e400"), Err(DecodeError::Overflow { target: "f64", .. })));
        assert_eq!(decode::<f32>("Infinity").unwrap(), f32::INFINITY);
    }

    #[test]
    fn f32_parses_at_its_own_width() {
        assert_eq!(decode::<f32>("3.4028235e38").unwrap(), f32::MAX);
        assert_eq!(decode::<f32>("'-3.4028235e38'").unwrap(), f32::MIN);
        assert_eq!(decode::<f32>("1.0000000596046447753906251").unwrap(), 1.0000001f32);
    }

    #[test]
    fn fractional_into_integer_is_a_conversion_error() {
        assert!(matches!(decode::<i32>("1.5"), Err(DecodeError::Conversion { .. })));
        assert!(matches!(decode::<u64>("NaN"), Err(DecodeError::Conversion { .. })));
        assert_eq!(decode::<i32>("2.5e1").unwrap(), 25);
    }

    #[test]
    fn options_accept_null() {
        assert_eq!(decode::<Option<u8>>("null").unwrap(), None);
        assert_eq!(decode::<Option<u8>>("7").unwrap(), Some(7));
        assert_eq!(decode::<Option<String>>("'x'").unwrap().as_deref(), Some("x"));
    }
}
