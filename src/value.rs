// Decoded-value tree. No target types here: numbers stay as literals until a
// decode call knows what they should become.
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::number::Number;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    /// Keys in source order; duplicates allowed, the last one wins on decode.
    Record(Vec<(String, Value)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Record,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Last value stored under `key`, if this is a record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self { Value::Number(n) => Some(n), _ => None }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self { Value::String(s) => Some(s), _ => None }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self { Value::Sequence(xs) => Some(xs), _ => None }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Record => "record",
        })
    }
}

impl FromStr for Value {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { crate::parse::decode_literal_text(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_prefers_last_duplicate() {
        let v: Value = "{a: 1, b: 2, a: 3}".parse().unwrap();
        assert_eq!(v.get("a").and_then(Value::as_number).map(Number::as_str), Some("3"));
        assert_eq!(v.get("missing"), None);
        assert_eq!(v.kind(), ValueKind::Record);
    }

    #[test]
    fn kinds_display_lowercase() {
        assert_eq!(ValueKind::Sequence.to_string(), "sequence");
        assert_eq!(Value::Null.kind().to_string(), "null");
    }
}
