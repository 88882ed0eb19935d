//! Type-directed decode engine.
//!
//! A decode call walks a [`Value`] tree against a target implementing
//! [`Decode`], writing through `&mut` into the caller's value. The walk is
//! synchronous and holds no state across calls; everything a call needs lives
//! in its [`Context`] (options, current field path, depth).
//!
//! Rules in brief:
//! - numeric targets take numbers, or strings that pass the number grammar;
//! - dynamic targets take anything, numbers always as `f64`, strings as-is;
//! - records match incoming keys against field aliases and ignore the rest;
//! - the first error aborts the call; fields assigned before it stay assigned.
pub mod container;
pub mod kind;
pub mod record;
pub mod scalar;

use std::borrow::Cow;
use std::fmt;

use crate::error::{ConversionError, DecodeError, StructuralReason};
use crate::number::Number;
use crate::value::Value;

pub use kind::{FloatKind, IntKind, TargetKind};
pub use record::{AliasPolicy, FieldShape, Record, RecordShape, TagSource, decode_record};

/// Nesting limit shared by the parser and the decode walk.
pub const DEFAULT_MAX_DEPTH: usize = 128;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Per-call decode settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum container nesting accepted before a structural error.
    pub max_depth: usize,
    /// Which field annotations are consulted, in precedence order.
    pub alias_policy: AliasPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, alias_policy: AliasPolicy::default() }
    }
}

/// One step from a parent value to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a field inside the decoded document, e.g. `.items[2].id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Segment>);

/// Anything a value tree can be decoded into.
pub trait Decode {
    /// Descriptor of this target, for diagnostics and record shapes.
    fn kind() -> TargetKind
    where
        Self: Sized;

    /// Overwrite (or, for records, update) `self` from `value`.
    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError>;
}

/// State of one decode call.
pub struct Context<'o> {
    options: &'o DecodeOptions,
    path: Path,
    depth: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Path {
    pub fn segments(&self) -> &[Segment] { &self.0 }
    pub fn is_root(&self) -> bool { self.0.is_empty() }

    fn with(&self, segment: Segment) -> Self {
        let mut out = self.clone();
        out.0.push(segment);
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl<'o> Context<'o> {
    pub fn new(options: &'o DecodeOptions) -> Self {
        Self { options, path: Path::default(), depth: 0 }
    }

    pub fn options(&self) -> &DecodeOptions { self.options }
    pub fn alias_policy(&self) -> &AliasPolicy { &self.options.alias_policy }
    pub fn path(&self) -> &Path { &self.path }

    /// Run `f` one level deeper, under `segment`.
    pub fn descend<F>(&mut self, segment: Segment, f: F) -> Result<(), DecodeError>
    where
        F: FnOnce(&mut Self) -> Result<(), DecodeError>,
    {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::Structural {
                path: self.path.with(segment),
                reason: StructuralReason::DepthLimitExceeded { limit: self.options.max_depth },
            });
        }
        self.path.0.push(segment);
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        self.path.0.pop();
        result
    }

    pub fn mismatch(&self, expected: TargetKind, found: &Value) -> DecodeError {
        DecodeError::TypeMismatch { path: self.path.clone(), expected, found: found.kind() }
    }

    /// Out-of-range conversions surface as overflow of `target`; the rest keep
    /// their conversion error.
    pub fn conversion(&self, error: ConversionError, target: &'static str) -> DecodeError {
        match error {
            ConversionError::OutOfRange { literal, .. } => {
                DecodeError::Overflow { path: self.path.clone(), literal, target }
            }
            source => DecodeError::Conversion { path: self.path.clone(), source },
        }
    }

    pub fn overflow(&self, number: &Number, target: &'static str) -> DecodeError {
        DecodeError::Overflow { path: self.path.clone(), literal: number.as_str().to_string(), target }
    }
}

/// The literal behind a numeric target: a bare number, or a quoted string
/// that passes the number grammar.
pub fn numeric_source<'v, T: Decode>(value: &'v Value, cx: &Context<'_>) -> Result<Cow<'v, Number>, DecodeError> {
    match value {
        Value::Number(number) => Ok(Cow::Borrowed(number)),
        Value::String(text) => Number::parse(text).map(Cow::Owned).map_err(|_| cx.mismatch(T::kind(), value)),
        other => Err(cx.mismatch(T::kind(), other)),
    }
}

// ------------------------------- Front API -------------------------------- //

/// Decode `value` into `target`.
pub fn decode_value<T: Decode>(value: &Value, target: &mut T, options: &DecodeOptions) -> Result<(), DecodeError> {
    tracing::debug!(target_kind = %T::kind(), value_kind = %value.kind(), "decoding value");
    let mut cx = Context::new(options);
    target.decode(value, &mut cx)
}

// ------------------------------- Tests ------------------------------------ //
