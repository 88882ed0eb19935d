//! Dynamically-typed decode target.
//!
//! [`Dynamic`] takes any value. Numbers always land as `f64`, records as
//! insertion-ordered maps, and strings stay strings even when they look
//! numeric. It serializes back out as canonical JSON through serde.
use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::decode::{Context, Decode, Segment, TargetKind};
use crate::error::DecodeError;
use crate::value::Value;

/// Largest magnitude an integral `f64` is still written as a JSON integer.
const INTEGRAL_LIMIT: f64 = 1e15;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dynamic {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Dynamic>),
    Object(IndexMap<String, Dynamic>),
}

impl Dynamic {
    pub fn is_null(&self) -> bool { matches!(self, Self::Null) }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Dynamic]> {
        match self {
            Self::Array(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Dynamic>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Dynamic> { self.as_object()?.get(key) }
}

impl Decode for Dynamic {
    fn kind() -> TargetKind { TargetKind::Dynamic }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        *self = match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(number) => Self::Number(number.as_f64().map_err(|e| cx.conversion(e, "f64"))?),
            Value::String(text) => Self::String(text.clone()),
            Value::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let mut slot = Self::Null;
                    cx.descend(Segment::Index(index), |cx| slot.decode(item, cx))?;
                    out.push(slot);
                }
                Self::Array(out)
            }
            Value::Record(entries) => {
                let mut out = IndexMap::with_capacity(entries.len());
                for (key, item) in entries {
                    let mut slot = Self::Null;
                    cx.descend(Segment::Key(key.clone()), |cx| slot.decode(item, cx))?;
                    out.insert(key.clone(), slot);
                }
                Self::Object(out)
            }
        };
        Ok(())
    }
}

impl Serialize for Dynamic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serialize_f64(*n, serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(xs) => {
                let mut seq = serializer.serialize_seq(Some(xs.len()))?;
                for x in xs {
                    seq.serialize_element(x)?;
                }
                seq.end()
            }
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Write `value` the way canonical JSON spells it: integral values within
/// `±1e15` as integers, the rest as floats, non-finite values refused.
pub(crate) fn serialize_f64<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!("{value} cannot be represented in JSON")));
    }
    if value.fract() == 0.0 && value.abs() < INTEGRAL_LIMIT {
        return serializer.serialize_i64(value as i64);
    }
    serializer.serialize_f64(value)
}

// ------------------------------- Tests ------------------------------------ //
