//! JSON5 text → [`Value`] tree.
//!
//! Recursive descent over the source with a byte cursor. Numeric tokens are
//! collected as maximal runs of word characters and handed to the number
//! grammar, so `1..1` or `0xZZ` fail as one invalid literal rather than as a
//! confusing stray character.
//!
//! Extensions over baseline JSON accepted here:
//! - `//` line and `/* */` block comments
//! - single-quoted strings, `\x`, `\v`, `\0` and line-continuation escapes
//! - unquoted identifier keys
//! - trailing commas in arrays and objects
//! - hex, signed, dot-led/dot-trailed numbers, `Infinity`, `NaN`
use crate::decode::DEFAULT_MAX_DEPTH;
use crate::error::{ParseError, SyntaxCode};
use crate::number::Number;
use crate::value::Value;

/// Parse a complete JSON5 document.
pub fn decode_literal_text(text: &str) -> Result<Value, ParseError> {
    decode_literal_text_with(text, DEFAULT_MAX_DEPTH)
}

/// Parse a complete JSON5 document, refusing nesting deeper than `max_depth`.
pub fn decode_literal_text_with(text: &str, max_depth: usize) -> Result<Value, ParseError> {
    let mut parser = Parser { src: text, idx: 0, depth: 0, max_depth };
    let value = parser.parse_value()?;
    parser.skip_unused()?;
    if parser.idx < parser.src.len() {
        return Err(parser.error(SyntaxCode::TrailingCharacters));
    }
    Ok(value)
}

// ————————————————————————————————————————————————————————————————————————————
// CHARACTER CLASSES
// ————————————————————————————————————————————————————————————————————————————

fn is_json5_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Characters that can appear in a bare literal (`true`, `-Infinity`, `0x1F`, `1e+5`).
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_ident_part(c: char) -> bool {
    is_ident_start(c) || c.is_alphanumeric() || matches!(c, '\u{200c}' | '\u{200d}')
}

// ————————————————————————————————————————————————————————————————————————————
// PARSER
// ————————————————————————————————————————————————————————————————————————————

struct Parser<'a> {
    src: &'a str,
    idx: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.idx..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.idx += c.len_utf8();
        Some(c)
    }

    fn error(&self, code: SyntaxCode) -> ParseError {
        self.error_at(self.idx, code)
    }

    fn error_at(&self, at: usize, code: SyntaxCode) -> ParseError {
        let before = &self.src[..at];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        let column = before[line_start..].chars().count() + 1;
        ParseError { code, line, column }
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(c) => self.error(SyntaxCode::UnexpectedChar(c)),
            None => self.error(SyntaxCode::UnexpectedEnd),
        }
    }

    /// Skip whitespace and comments.
    fn skip_unused(&mut self) -> Result<(), ParseError> {
        let src = self.src;
        loop {
            match self.peek() {
                Some(c) if is_json5_whitespace(c) => self.idx += c.len_utf8(),
                Some('/') => match src.as_bytes().get(self.idx + 1) {
                    Some(b'/') => {
                        let rest = &src[self.idx..];
                        self.idx += rest.find(is_line_terminator).unwrap_or(rest.len());
                    }
                    Some(b'*') => match src[self.idx + 2..].find("*/") {
                        Some(end) => self.idx += end + 4,
                        None => return Err(self.error(SyntaxCode::UnterminatedComment)),
                    },
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error(SyntaxCode::DepthLimitExceeded(self.max_depth)));
        }
        self.depth += 1;
        self.idx += 1;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_unused()?;
        match self.peek() {
            Some('{') => self.parse_record(),
            Some('[') => self.parse_sequence(),
            Some(quote @ ('"' | '\'')) => {
                self.idx += 1;
                self.parse_string(quote).map(Value::String)
            }
            Some(c) if is_word_char(c) => self.parse_word(),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_word(&mut self) -> Result<Value, ParseError> {
        let src = self.src;
        let start = self.idx;
        let len = src[start..].find(|c: char| !is_word_char(c)).unwrap_or(src.len() - start);
        let word = &src[start..start + len];
        self.idx += len;
        match word {
            "null" => Ok(Value::Null),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "Infinity" | "NaN" => Number::parse(word)
                .map(Value::Number)
                .map_err(|e| self.error_at(start, SyntaxCode::InvalidNumber(e))),
            _ if word.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                Err(self.error_at(start, SyntaxCode::InvalidLiteral(word.to_string())))
            }
            _ => Number::parse(word)
                .map(Value::Number)
                .map_err(|e| self.error_at(start, SyntaxCode::InvalidNumber(e))),
        }
    }

    /// Body of a quoted string; the opening quote is already consumed.
    fn parse_string(&mut self, quote: char) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            let at = self.idx;
            let c = self.bump().ok_or_else(|| self.error(SyntaxCode::UnexpectedEnd))?;
            match c {
                c if c == quote => return Ok(out),
                '\\' => self.parse_escape(&mut out)?,
                '\n' | '\r' => return Err(self.error_at(at, SyntaxCode::LineBreakInString)),
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let at = self.idx;
        let c = self.bump().ok_or_else(|| self.error(SyntaxCode::UnexpectedEnd))?;
        match c {
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
            '0'..='9' => return Err(self.error_at(at, SyntaxCode::InvalidEscape(c))),
            'x' => {
                let code = self.hex_digits(2)?;
                out.push(char::from(code as u8));
            }
            'u' => out.push(self.unicode_escape()?),
            // line continuations
            '\r' => {
                if self.peek() == Some('\n') {
                    self.idx += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
        Ok(())
    }

    fn hex_digits(&mut self, count: usize) -> Result<u32, ParseError> {
        let src = self.src;
        let digits = src
            .get(self.idx..self.idx + count)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error(SyntaxCode::InvalidUnicodeEscape))?;
        self.idx += count;
        u32::from_str_radix(digits, 16).map_err(|_| self.error(SyntaxCode::InvalidUnicodeEscape))
    }

    /// `\uXXXX`, joining a UTF-16 surrogate pair when one follows.
    fn unicode_escape(&mut self) -> Result<char, ParseError> {
        let at = self.idx;
        let first = self.hex_digits(4)?;
        let code = match first {
            0xD800..=0xDBFF => {
                if !self.src[self.idx..].starts_with("\\u") {
                    return Err(self.error_at(at, SyntaxCode::InvalidUnicodeEscape));
                }
                self.idx += 2;
                let low = self.hex_digits(4)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error_at(at, SyntaxCode::InvalidUnicodeEscape));
                }
                0x10000 + ((first - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.error_at(at, SyntaxCode::InvalidUnicodeEscape)),
            _ => first,
        };
        char::from_u32(code).ok_or_else(|| self.error_at(at, SyntaxCode::InvalidUnicodeEscape))
    }

    fn parse_key(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.idx += 1;
                self.parse_string(quote)
            }
            Some(c) if is_ident_start(c) => {
                let src = self.src;
                let start = self.idx;
                let len = src[start..].find(|c: char| !is_ident_part(c)).unwrap_or(src.len() - start);
                self.idx += len;
                Ok(src[start..start + len].to_string())
            }
            Some(c) => Err(self.error(SyntaxCode::InvalidKey(c))),
            None => Err(self.error(SyntaxCode::UnexpectedEnd)),
        }
    }

    fn parse_record(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut fields = Vec::new();
        loop {
            self.skip_unused()?;
            if self.peek() == Some('}') {
                self.idx += 1;
                break;
            }
            let key = self.parse_key()?;
            self.skip_unused()?;
            match self.peek() {
                Some(':') => self.idx += 1,
                Some(_) => return Err(self.error(SyntaxCode::ExpectedColon)),
                None => return Err(self.error(SyntaxCode::UnexpectedEnd)),
            }
            let value = self.parse_value()?;
            fields.push((key, value));
            self.skip_unused()?;
            match self.peek() {
                Some(',') => self.idx += 1,
                Some('}') => {
                    self.idx += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        self.depth -= 1;
        Ok(Value::Record(fields))
    }

    fn parse_sequence(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut items = Vec::new();
        loop {
            self.skip_unused()?;
            if self.peek() == Some(']') {
                self.idx += 1;
                break;
            }
            items.push(self.parse_value()?);
            self.skip_unused()?;
            match self.peek() {
                Some(',') => self.idx += 1,
                Some(']') => {
                    self.idx += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        self.depth -= 1;
        Ok(Value::Sequence(items))
    }
}

// ------------------------------- Tests ------------------------------------ //
