//! Byte-level reading: whitespace, punctuation, quoted strings, and
//! unquoted lexemes. This module knows nothing about compounds, lists, or
//! typed arrays — that structure lives in `snbt::mod`, which drives a
//! `Lexer` the way a recursive-descent parser drives any tokenizer.

use crate::error::{DecodeError, ParserErrorKind};
use crate::snbt::numeric;
use crate::source::ByteSource;
use crate::tag::NbtTag;

/// The outcome of classifying an unquoted lexeme (§4.2), before it has been
/// folded into an [`NbtTag`].
///
/// This stays a distinct type, rather than collapsing straight to
/// `NbtTag`, because typed-array coercion (§4.3) needs to tell a literal
/// boolean word apart from an explicitly-suffixed byte: both `true` and
/// `1b` decode to `Byte(1)` as a bare value, but only the former is a
/// legal element of `[I;...]` (where it widens to `Int(1)`) — a plain
/// `Byte` is never an accepted producer there.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Classified {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

impl Classified {
    pub(crate) fn into_tag(self) -> NbtTag {
        match self {
            Classified::Boolean(value) => NbtTag::Byte(value as i8),
            Classified::Byte(value) => NbtTag::Byte(value),
            Classified::Short(value) => NbtTag::Short(value),
            Classified::Int(value) => NbtTag::Int(value),
            Classified::Long(value) => NbtTag::Long(value),
            Classified::Float(value) => NbtTag::Float(value),
            Classified::Double(value) => NbtTag::Double(value),
            Classified::Str(value) => NbtTag::String(value),
        }
    }
}

/// Applies the priority-ordered rules of §4.2 to an already-read unquoted
/// lexeme. The lexeme is assumed non-empty and drawn entirely from the
/// unquoted alphabet, as guaranteed by [`Lexer::read_unquoted_lexeme`].
pub(crate) fn classify(lexeme: &str) -> Classified {
    if lexeme.eq_ignore_ascii_case("true") {
        return Classified::Boolean(true);
    }
    if lexeme.eq_ignore_ascii_case("false") {
        return Classified::Boolean(false);
    }

    if numeric::ends_with_suffix_letter(lexeme) {
        return match numeric::try_suffixed(lexeme) {
            Some(classified) => classified,
            None => {
                log::trace!("suffixed numeric literal {lexeme:?} rejected, falling to String");
                Classified::Str(lexeme.to_owned())
            }
        };
    }

    if let Some(classified) = numeric::try_decimal_double(lexeme) {
        return classified;
    }
    if let Some(classified) = numeric::try_bare_int(lexeme) {
        return classified;
    }

    Classified::Str(lexeme.to_owned())
}

/// A byte-offset checkpoint, pairing the underlying source's own
/// checkpoint with the logical position the lexer has counted locally.
/// The local counter is what lets [`DecodeError`] report a real byte
/// offset regardless of how the underlying [`ByteSource`] represents
/// positions internally.
#[derive(Clone, Copy)]
pub(crate) struct Mark<C> {
    source: C,
    position: usize,
}

pub(crate) struct Lexer<'a, S: ByteSource> {
    source: &'a mut S,
    position: usize,
}

impl<'a, S: ByteSource> Lexer<'a, S> {
    pub(crate) fn new(source: &'a mut S) -> Self {
        Lexer { source, position: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn peek_byte(&mut self) -> Option<u8> {
        self.source.peek()
    }

    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let byte = self.source.advance();
        if byte.is_some() {
            self.position += 1;
        }
        byte
    }

    pub(crate) fn mark(&self) -> Mark<S::Checkpoint> {
        Mark {
            source: self.source.checkpoint(),
            position: self.position,
        }
    }

    pub(crate) fn restore(&mut self, mark: Mark<S::Checkpoint>) {
        self.source.restore(mark.source);
        self.position = mark.position;
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(
            self.peek_byte(),
            Some(b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
        ) {
            self.next_byte();
        }
    }

    /// Reads the maximal run of unquoted-alphabet bytes (`[A-Za-z0-9_.+-]`)
    /// starting at the current position. May return an empty vector if the
    /// current byte is not in the alphabet; callers check for this.
    pub(crate) fn read_unquoted_lexeme(&mut self) -> Vec<u8> {
        let mut bytes = Vec::new();
        while let Some(byte) = self.peek_byte() {
            if is_unquoted_alphabet(byte) {
                bytes.push(byte);
                self.next_byte();
            } else {
                break;
            }
        }
        bytes
    }

    /// Reads a quoted string body, assuming the opening quote byte has
    /// already been consumed by the caller. `quote` is that opening byte
    /// (`"` or `'`), used to find the matching close; both escape forms
    /// (`\"` and `\'`) are legal inside either quote style (§4.6).
    ///
    /// On failure, the source is left positioned at the first byte past
    /// the opening quote, per the positional-recovery contract.
    pub(crate) fn read_quoted_string(&mut self, quote: u8) -> Result<String, DecodeError> {
        let recovery = self.mark();
        let mut bytes = Vec::new();

        loop {
            match self.next_byte() {
                None => {
                    self.restore(recovery);
                    return Err(DecodeError::syntax(
                        self.position(),
                        ParserErrorKind::UnmatchedQuote,
                    ));
                }
                Some(byte) if byte == quote => break,
                Some(b'\\') => match self.next_byte() {
                    Some(b'"') => bytes.push(b'"'),
                    Some(b'\'') => bytes.push(b'\''),
                    Some(b'\\') => bytes.push(b'\\'),
                    Some(other) => {
                        self.restore(recovery);
                        return Err(DecodeError::syntax(
                            self.position(),
                            ParserErrorKind::InvalidEscape(other),
                        ));
                    }
                    None => {
                        self.restore(recovery);
                        return Err(DecodeError::syntax(
                            self.position(),
                            ParserErrorKind::UnmatchedQuote,
                        ));
                    }
                },
                Some(byte) => bytes.push(byte),
            }
        }

        // The quoted-string reader is byte-oriented and performs no UTF-8
        // validation of its own (§4.6); the lossy conversion here is only
        // the boundary adaptation required to land the bytes in Rust's
        // UTF-8-enforcing `String`, not a grammar rule.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn is_unquoted_alphabet(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'+' | b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    #[test]
    fn classify_priority_order() {
        assert_eq!(classify("tRUe"), Classified::Boolean(true));
        assert_eq!(classify("66666666666"), Classified::Str("66666666666".into()));
        assert_eq!(classify("123_abc"), Classified::Str("123_abc".into()));
        assert_eq!(classify("-123"), Classified::Int(-123));
        assert_eq!(classify("3.2"), Classified::Double(3.2));
        assert_eq!(classify("103b"), Classified::Byte(103));
        assert_eq!(classify("200b"), Classified::Str("200b".into()));
    }

    #[test]
    fn quoted_string_escapes() {
        let mut source = SliceSource::from_str("abc()  _+:'\\\"\\\\\u{6d4b}\u{8bd5}\" rest");
        let mut lexer = Lexer::new(&mut source);
        let value = lexer.read_quoted_string(b'"').unwrap();
        assert_eq!(value, "abc()  _+:'\"\\\u{6d4b}\u{8bd5}");
    }

    #[test]
    fn quoted_string_invalid_escape_restores_position() {
        let mut source = SliceSource::from_str("a\\qb");
        let mut lexer = Lexer::new(&mut source);
        let err = lexer.read_quoted_string(b'"').unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 0),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_quote_restores_position() {
        let mut source = SliceSource::from_str("abc");
        let mut lexer = Lexer::new(&mut source);
        let err = lexer.read_quoted_string(b'"').unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 0),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }
}
