//! Finite-state recognizer for extended numeric literals.
//!
//! The recognizer is purely syntactic: it walks the span byte by byte through
//! an explicit transition table and accepts only if the whole span is consumed
//! and the final state is accepting. The symbolic forms (`Infinity`, `NaN`) are
//! matched as whole words before the table runs.

/// Which family an accepted literal belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Form {
    /// Decimal digits with optional point and exponent.
    Decimal,
    /// `0x`/`0X` prefixed integer.
    Hex,
    /// `Infinity`, optionally signed.
    Infinity,
    /// `NaN`, never signed.
    NaN,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Sign,
    /// A leading `0`; only `.`, an exponent or a hex prefix may follow.
    Zero,
    Int,
    /// `.` with no digits before it; at least one digit must follow.
    LeadDot,
    /// `.` after integer digits; accepting (`1.`).
    Dot,
    Frac,
    Exp,
    ExpSign,
    ExpDigits,
    HexPrefix,
    HexDigits,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Class {
    Sign,
    Zero,
    Digit,
    Dot,
    /// `e`/`E`: exponent marker in decimal, digit in hex.
    ExpMark,
    HexMark,
    HexAlpha,
    Other,
}

impl Class {
    fn of(b: u8) -> Self {
        match b {
            b'+' | b'-' => Self::Sign,
            b'0' => Self::Zero,
            b'1'..=b'9' => Self::Digit,
            b'.' => Self::Dot,
            b'e' | b'E' => Self::ExpMark,
            b'x' | b'X' => Self::HexMark,
            b'a'..=b'd' | b'f' | b'A'..=b'D' | b'F' => Self::HexAlpha,
            _ => Self::Other,
        }
    }
}

impl State {
    fn step(self, class: Class) -> Option<Self> {
        use Class as C;
        use State::*;
        match (self, class) {
            (Start, C::Sign) => Some(Sign),
            (Start | Sign, C::Zero) => Some(Zero),
            (Start | Sign, C::Digit) => Some(Int),
            (Start | Sign, C::Dot) => Some(LeadDot),

            (Zero | Int, C::Dot) => Some(Dot),
            (Zero, C::HexMark) => Some(HexPrefix),
            (Int, C::Zero | C::Digit) => Some(Int),
            (Zero | Int | Dot | Frac, C::ExpMark) => Some(Exp),

            (LeadDot | Dot | Frac, C::Zero | C::Digit) => Some(Frac),

            (Exp, C::Sign) => Some(ExpSign),
            (Exp | ExpSign | ExpDigits, C::Zero | C::Digit) => Some(ExpDigits),

            (HexPrefix | HexDigits, C::Zero | C::Digit | C::ExpMark | C::HexAlpha) => Some(HexDigits),

            _ => None,
        }
    }

    fn is_accepting(self) -> bool {
        matches!(
            self,
            State::Zero | State::Int | State::Dot | State::Frac | State::ExpDigits | State::HexDigits
        )
    }
}

/// Classify `span` if it is a complete, well-formed literal.
pub fn classify(span: &str) -> Option<Form> {
    if span == "NaN" {
        return Some(Form::NaN);
    }
    if span.strip_prefix(['+', '-']).unwrap_or(span) == "Infinity" {
        return Some(Form::Infinity);
    }

    let mut state = State::Start;
    for b in span.bytes() {
        state = state.step(Class::of(b))?;
    }
    match state {
        State::HexDigits => Some(Form::Hex),
        s if s.is_accepting() => Some(Form::Decimal),
        _ => None,
    }
}

/// True when `span` is a well-formed extended numeric literal.
pub fn is_valid_number(span: &str) -> bool {
    classify(span).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &[&str] = &[
        "0", "-0", "1", "+1", "-1", "0.1", "-0.1", "+0.1", "1234", "-1234", "+1234",
        "12.34", "-12.34", "+12.34", "12E0", "12E1", "12e34", "12E-0", "12e+1", "12e-34",
        "-12E0", "-12e+1", "+12e-34", "1.2E0", "1.2e34", "-1.2E-0", "+1.2e+1",
        "0E0", "0E1", "0e34", "0E-0", "0e+1", "0e-34", "-0E0", "+0e-34",
        "1.", "+1.", "-1.", "1.e1", "+1.e1", "-1.e1", ".5", "-.5", "+.5",
        "0xa", "0xA", "0XA", "-0XA", "+0XA", "0x0", "0X0", "-0X0", "+0X0", "0x2", "-0X2",
        "0xDEADBeef", "-0xDEADBeef", "+0XDEADBeef", "0xDEAD3eef", "-0XDEAD3eef",
        "NaN", "+Infinity", "-Infinity", "Infinity",
    ];

    const INVALID: &[&str] = &[
        "", "invalid", "1.0.1", "1..1", "-1-2", "012a42", "01.2", "012", "12E12.12",
        "1e2e3", "1e+-2", "1e--23", "1e", "e1", "1e+", "1ea", "1a", "1.a", "01",
        "0xDsADBeef", ".0xDEADBeef", "0XDsADBeef", ".0XDEADBeef", "+NaN", "-NaN",
        ".NaN", ".Infinity", "0xs", ".", "-", "+", "0x", "-.", "1.5e", "0x1.5", "0x1p3",
        "Infinityy", "--1", "1 ", " 1", "１",
    ];

    #[test]
    fn accepts_extended_grammar() {
        for span in VALID {
            assert!(is_valid_number(span), "{span} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_literals() {
        for span in INVALID {
            assert!(!is_valid_number(span), "{span} should be invalid");
        }
    }

    #[test]
    fn classifies_forms() {
        assert_eq!(classify("-0x0"), Some(Form::Hex));
        assert_eq!(classify("0E0"), Some(Form::Decimal));
        assert_eq!(classify("0xE"), Some(Form::Hex));
        assert_eq!(classify("-Infinity"), Some(Form::Infinity));
        assert_eq!(classify("NaN"), Some(Form::NaN));
        assert_eq!(classify("nan"), None);
    }
}
