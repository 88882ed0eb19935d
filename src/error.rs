//! Error taxonomy shared by the grammar, converter, parser and decode engine.
use thiserror::Error;

use crate::decode::{Path, TargetKind};
use crate::value::ValueKind;

/// Crate-level result type.
pub type Result<T> = std::result::Result<T, Error>;

/// A span that is not a well-formed extended numeric literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number literal `{literal}`")]
pub struct GrammarError {
    /// The rejected span, verbatim.
    pub literal: String,
}

/// A valid literal that cannot be represented in the requested numeric form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Integer requested for a literal with a non-zero fractional part.
    #[error("number {literal} is not an integer")]
    NotAnInteger {
        /// Offending literal.
        literal: String,
    },
    /// Magnitude does not fit the requested width.
    #[error("number {literal} overflows {target}")]
    OutOfRange {
        /// Offending literal.
        literal: String,
        /// Name of the numeric type that was requested.
        target: &'static str,
    },
    /// Integer requested for `Infinity` or `NaN`.
    #[error("number {literal} is not finite")]
    NotFinite {
        /// Offending literal.
        literal: String,
    },
}

/// What went wrong while reading JSON5 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxCode {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error(transparent)]
    InvalidNumber(#[from] GrammarError),
    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),
    #[error("invalid object key starting with `{0}`")]
    InvalidKey(char),
    #[error("expected `:` after object key")]
    ExpectedColon,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("unescaped line break in string")]
    LineBreakInString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("trailing characters after document")]
    TrailingCharacters,
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

/// Syntax error with the 1-based position it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} at line {line} column {column}")]
pub struct ParseError {
    pub code: SyntaxCode,
    pub line: usize,
    pub column: usize,
}

/// Malformed aggregate shape found while walking a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralReason {
    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

/// Errors raised by the type-directed decode engine. Each carries the path of
/// the field being decoded when it was raised.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The value's kind has no coercion into the target kind.
    #[error("at {path}: cannot decode {found} into {expected}")]
    TypeMismatch {
        path: Path,
        expected: TargetKind,
        found: ValueKind,
    },
    /// The literal is an integer that does not fit the target width.
    #[error("at {path}: number {literal} overflows {target}")]
    Overflow {
        path: Path,
        literal: String,
        target: &'static str,
    },
    /// Any other conversion failure (fractional, non-finite).
    #[error("at {path}: {source}")]
    Conversion {
        path: Path,
        source: ConversionError,
    },
    #[error("at {path}: {reason}")]
    Structural {
        path: Path,
        reason: StructuralReason,
    },
}

impl DecodeError {
    /// Path of the field that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::Overflow { path, .. }
            | Self::Conversion { path, .. }
            | Self::Structural { path, .. } => path,
        }
    }
}

/// Anything `unmarshal` can fail with.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
