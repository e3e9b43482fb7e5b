//! SNBT decoding: turns a byte source into a single [`NbtTag`].
//!
//! The module is a small recursive-descent parser over [`Lexer`]: the
//! structural parser below dispatches on the first non-whitespace byte
//! (`{` compound, `[` list or typed array, `"`/`'` quoted string, anything
//! else an unquoted lexeme) exactly as described by the system overview,
//! and only the two leaf readers in `lexer` ever touch the byte source
//! directly.

mod lexer;
mod numeric;

use crate::error::{DecodeError, ParserErrorKind};
use crate::limits::DepthLimit;
use crate::source::ByteSource;
use crate::tag::{NbtCompound, NbtList, NbtTag};
use lexer::{Classified, Lexer};

/// Decodes a single SNBT value from `source`.
///
/// Leading and trailing whitespace around the value is allowed; the
/// decoder does not require the source to be exhausted afterwards (a
/// caller parsing an SNBT value embedded in a larger stream is expected to
/// decide for itself whether trailing bytes matter).
pub fn decode<S: ByteSource>(source: &mut S) -> Result<NbtTag, DecodeError> {
    decode_with_depth_limit(source, DepthLimit::default())
}

/// As [`decode`], but with an explicit nesting-depth ceiling instead of the
/// Minecraft-standard default of 512.
pub fn decode_with_depth_limit<S: ByteSource>(
    source: &mut S,
    depth_limit: DepthLimit,
) -> Result<NbtTag, DecodeError> {
    let mut lexer = Lexer::new(source);

    if lexer.peek_byte().is_none() {
        return Err(DecodeError::NoData);
    }
    lexer.skip_whitespace();
    if lexer.peek_byte().is_none() {
        return Err(DecodeError::NotSnbt);
    }

    parse_value(&mut lexer, 0, depth_limit)
}

fn parse_value<S: ByteSource>(
    lexer: &mut Lexer<'_, S>,
    depth: u32,
    depth_limit: DepthLimit,
) -> Result<NbtTag, DecodeError> {
    lexer.skip_whitespace();
    let Some(byte) = lexer.peek_byte() else {
        return Err(DecodeError::syntax(
            lexer.position(),
            ParserErrorKind::UnexpectedEof,
        ));
    };

    match byte {
        b'{' => parse_compound(lexer, depth, depth_limit).map(NbtTag::Compound),
        b'[' => parse_list_or_array(lexer, depth, depth_limit),
        b'"' | b'\'' => {
            lexer.next_byte();
            lexer.read_quoted_string(byte).map(NbtTag::String)
        }
        _ => parse_unquoted_value(lexer),
    }
}

fn parse_unquoted_value<S: ByteSource>(lexer: &mut Lexer<'_, S>) -> Result<NbtTag, DecodeError> {
    let lexeme = lexer.read_unquoted_lexeme();
    if lexeme.is_empty() {
        let byte = lexer.peek_byte();
        return Err(DecodeError::syntax(
            lexer.position(),
            match byte {
                Some(byte) => ParserErrorKind::UnexpectedByte(byte),
                None => ParserErrorKind::UnexpectedEof,
            },
        ));
    }
    // The unquoted alphabet is pure ASCII, so this can never fail.
    let lexeme = String::from_utf8(lexeme).expect("unquoted lexeme is ASCII");
    Ok(lexer::classify(&lexeme).into_tag())
}

fn enter_nesting(depth: u32, depth_limit: DepthLimit) -> Result<u32, ParserErrorKind> {
    let next = depth + 1;
    if next > depth_limit.0 {
        return Err(ParserErrorKind::ExceededDepthLimit);
    }
    log::trace!("entering nested SNBT container at depth {next}");
    Ok(next)
}

fn parse_compound<S: ByteSource>(
    lexer: &mut Lexer<'_, S>,
    depth: u32,
    depth_limit: DepthLimit,
) -> Result<NbtCompound, DecodeError> {
    let depth = enter_nesting(depth, depth_limit)
        .map_err(|kind| DecodeError::syntax(lexer.position(), kind))?;
    lexer.next_byte(); // '{'

    let mut compound = NbtCompound::new();
    let mut first = true;

    loop {
        lexer.skip_whitespace();
        if lexer.peek_byte() == Some(b'}') {
            lexer.next_byte();
            return Ok(compound);
        }
        if !first {
            expect_byte(lexer, b',')?;
            lexer.skip_whitespace();
        }
        first = false;

        let key = parse_key(lexer)?;
        lexer.skip_whitespace();
        expect_byte(lexer, b':')?;
        let value = parse_value(lexer, depth, depth_limit)?;

        if compound.contains_key(&key) {
            return Err(DecodeError::syntax(
                lexer.position(),
                ParserErrorKind::DuplicateKey(key),
            ));
        }
        compound.insert(key, value);
    }
}

fn parse_key<S: ByteSource>(lexer: &mut Lexer<'_, S>) -> Result<String, DecodeError> {
    lexer.skip_whitespace();
    match lexer.peek_byte() {
        Some(quote @ (b'"' | b'\'')) => {
            lexer.next_byte();
            lexer.read_quoted_string(quote)
        }
        Some(_) => {
            let lexeme = lexer.read_unquoted_lexeme();
            if lexeme.is_empty() {
                let byte = lexer.peek_byte();
                return Err(DecodeError::syntax(
                    lexer.position(),
                    match byte {
                        Some(byte) => ParserErrorKind::UnexpectedByte(byte),
                        None => ParserErrorKind::UnexpectedEof,
                    },
                ));
            }
            // A compound key is always a String, regardless of what the
            // classifier would make of the same bytes as a value (§4.5).
            Ok(String::from_utf8(lexeme).expect("unquoted lexeme is ASCII"))
        }
        None => Err(DecodeError::syntax(
            lexer.position(),
            ParserErrorKind::UnexpectedEof,
        )),
    }
}

fn expect_byte<S: ByteSource>(lexer: &mut Lexer<'_, S>, expected: u8) -> Result<(), DecodeError> {
    match lexer.peek_byte() {
        Some(byte) if byte == expected => {
            lexer.next_byte();
            Ok(())
        }
        Some(byte) => Err(DecodeError::syntax(
            lexer.position(),
            ParserErrorKind::UnexpectedByte(byte),
        )),
        None => Err(DecodeError::syntax(
            lexer.position(),
            ParserErrorKind::UnexpectedEof,
        )),
    }
}

/// The element type of a typed array, known once `[B;`/`[I;`/`[L;` has
/// been recognized.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ArrayKind {
    Byte,
    Int,
    Long,
}

fn parse_list_or_array<S: ByteSource>(
    lexer: &mut Lexer<'_, S>,
    depth: u32,
    depth_limit: DepthLimit,
) -> Result<NbtTag, DecodeError> {
    lexer.next_byte(); // '['

    match detect_array_marker(lexer) {
        Some(kind) => parse_typed_array(lexer, depth, depth_limit, kind),
        None => parse_list(lexer, depth, depth_limit).map(NbtTag::List),
    }
}

/// Peeks for `B;`, `I;`, or `L;` immediately after `[`, with no whitespace
/// permitted in between (§4.3). Restores the lexer to just after `[` if
/// the marker isn't present, so an ordinary list starting with a bare `B`,
/// `I`, or `L` identifier (e.g. `[Box, 1]`) is unaffected.
fn detect_array_marker<S: ByteSource>(lexer: &mut Lexer<'_, S>) -> Option<ArrayKind> {
    let mark = lexer.mark();
    let kind = match lexer.peek_byte() {
        Some(b'B') => ArrayKind::Byte,
        Some(b'I') => ArrayKind::Int,
        Some(b'L') => ArrayKind::Long,
        _ => return None,
    };
    lexer.next_byte();
    if lexer.peek_byte() == Some(b';') {
        lexer.next_byte();
        Some(kind)
    } else {
        lexer.restore(mark);
        None
    }
}

fn parse_list<S: ByteSource>(
    lexer: &mut Lexer<'_, S>,
    depth: u32,
    depth_limit: DepthLimit,
) -> Result<NbtList, DecodeError> {
    let depth = enter_nesting(depth, depth_limit)
        .map_err(|kind| DecodeError::syntax(lexer.position(), kind))?;

    let mut list = NbtList::new();
    let mut first = true;

    loop {
        lexer.skip_whitespace();
        if lexer.peek_byte() == Some(b']') {
            lexer.next_byte();
            return Ok(list);
        }
        if !first {
            expect_byte(lexer, b',')?;
            lexer.skip_whitespace();
        }
        first = false;

        list.push(parse_value(lexer, depth, depth_limit)?);
    }
}

/// Parses `[B;…]` / `[I;…]` / `[L;…]`, coercing each element per §4.3.
///
/// Per the positional-recovery contract, *any* failure while reading the
/// array's elements restores the lexer to the first byte of the first
/// element (not the specific element that failed) and reports that same
/// position — this matches the reference behavior for every failure shape
/// in §8 (a bad first element, a malformed later element, a doubled or
/// trailing comma, or an unterminated array all report the same position).
fn parse_typed_array<S: ByteSource>(
    lexer: &mut Lexer<'_, S>,
    depth: u32,
    depth_limit: DepthLimit,
    kind: ArrayKind,
) -> Result<NbtTag, DecodeError> {
    enter_nesting(depth, depth_limit)
        .map_err(|err_kind| DecodeError::syntax(lexer.position(), err_kind))?;

    lexer.skip_whitespace();
    let recovery = lexer.mark();

    match parse_typed_array_elements(lexer, kind) {
        Ok(tag) => Ok(tag),
        Err(err_kind) => {
            lexer.restore(recovery);
            Err(DecodeError::syntax(lexer.position(), err_kind))
        }
    }
}

fn parse_typed_array_elements<S: ByteSource>(
    lexer: &mut Lexer<'_, S>,
    kind: ArrayKind,
) -> Result<NbtTag, ParserErrorKind> {
    let mut bytes = Vec::new();
    let mut ints = Vec::new();
    let mut longs = Vec::new();
    let mut first = true;

    loop {
        lexer.skip_whitespace();
        if lexer.peek_byte() == Some(b']') {
            lexer.next_byte();
            return Ok(match kind {
                ArrayKind::Byte => NbtTag::ByteArray(bytes),
                ArrayKind::Int => NbtTag::IntArray(ints),
                ArrayKind::Long => NbtTag::LongArray(longs),
            });
        }
        if !first {
            match lexer.peek_byte() {
                Some(b',') => lexer.next_byte(),
                Some(byte) => return Err(ParserErrorKind::UnexpectedByte(byte)),
                None => return Err(ParserErrorKind::UnexpectedEof),
            };
            lexer.skip_whitespace();
            // A trailing comma puts `]` right where an element was
            // expected; a doubled comma puts another `,` there instead.
            // Both are caught by the ordinary element-parsing failure
            // below, since neither `]` nor `,` can start a value — but we
            // special-case them for a clearer error kind.
            match lexer.peek_byte() {
                Some(b']') => return Err(ParserErrorKind::UnexpectedComma),
                Some(b',') => return Err(ParserErrorKind::UnexpectedComma),
                _ => {}
            }
        }
        first = false;

        let classified = parse_array_element(lexer)?;
        match (kind, classified) {
            (ArrayKind::Byte, Classified::Byte(v)) => bytes.push(v),
            (ArrayKind::Byte, Classified::Boolean(v)) => bytes.push(v as i8),
            (ArrayKind::Int, Classified::Int(v)) => ints.push(v),
            (ArrayKind::Int, Classified::Boolean(v)) => ints.push(v as i32),
            (ArrayKind::Long, Classified::Long(v)) => longs.push(v),
            (ArrayKind::Long, Classified::Boolean(v)) => longs.push(v as i64),
            _ => return Err(ParserErrorKind::InvalidArrayElement),
        }
    }
}

/// Reads one typed-array element: an unquoted lexeme classified per §4.2.
/// Typed arrays never accept quoted strings, lists, or compounds as
/// elements (§4.3's producer table is exhaustive), so those are rejected
/// immediately rather than parsed and then found to mismatch.
fn parse_array_element<S: ByteSource>(
    lexer: &mut Lexer<'_, S>,
) -> Result<Classified, ParserErrorKind> {
    match lexer.peek_byte() {
        Some(b'"' | b'\'' | b'{' | b'[') => {
            Err(ParserErrorKind::InvalidArrayElement)
        }
        Some(_) => {
            let lexeme = lexer.read_unquoted_lexeme();
            if lexeme.is_empty() {
                return Err(ParserErrorKind::UnexpectedByte(lexer.peek_byte().unwrap()));
            }
            let lexeme = String::from_utf8(lexeme).expect("unquoted lexeme is ASCII");
            Ok(lexer::classify(&lexeme))
        }
        None => Err(ParserErrorKind::UnexpectedEof),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    fn decode_str(input: &str) -> Result<NbtTag, DecodeError> {
        let mut source = SliceSource::from_str(input);
        decode(&mut source)
    }

    #[test]
    fn empty_input_is_no_data() {
        assert!(matches!(decode_str(""), Err(DecodeError::NoData)));
    }

    #[test]
    fn whitespace_only_is_not_snbt() {
        assert!(matches!(
            decode_str(" \t\n\x0b\x0c\r  "),
            Err(DecodeError::NotSnbt)
        ));
    }

    #[test]
    fn plain_string_fallback() {
        assert_eq!(decode_str("abc").unwrap(), NbtTag::String("abc".into()));
    }

    #[test]
    fn bare_integer() {
        assert_eq!(decode_str("-123").unwrap(), NbtTag::Int(-123));
    }

    #[test]
    fn leading_plus_sign_is_a_string_not_a_number() {
        assert_eq!(decode_str("+123").unwrap(), NbtTag::String("+123".into()));
    }

    #[test]
    fn bare_digit_float_suffix_without_dot_or_exponent_falls_to_string() {
        assert_eq!(decode_str("5d").unwrap(), NbtTag::String("5d".into()));
        assert_eq!(decode_str("10f").unwrap(), NbtTag::String("10f".into()));
    }

    #[test]
    fn underscore_breaks_numeric_classification() {
        assert_eq!(
            decode_str("123_abc").unwrap(),
            NbtTag::String("123_abc".into())
        );
    }

    #[test]
    fn boolean_words_are_case_insensitive() {
        assert_eq!(decode_str("tRUe").unwrap(), NbtTag::Byte(1));
        assert_eq!(decode_str("FaLSE").unwrap(), NbtTag::Byte(0));
    }

    #[test]
    fn overflowing_bare_int_is_string_not_long() {
        assert_eq!(
            decode_str("66666666666").unwrap(),
            NbtTag::String("66666666666".into())
        );
    }

    #[test]
    fn overflowing_suffixed_byte_is_string_not_retried() {
        assert_eq!(decode_str("200b").unwrap(), NbtTag::String("200b".into()));
    }

    #[test]
    fn decimal_without_suffix_is_double() {
        assert_eq!(decode_str("-56.78").unwrap(), NbtTag::Double(-56.78));
        assert_eq!(decode_str("3.E1").unwrap(), NbtTag::Double(30.0));
    }

    #[test]
    fn quoted_string_with_escapes() {
        let value = decode_str(r#""abc()  _+:'\"\\测试""#).unwrap();
        assert_eq!(value, NbtTag::String("abc()  _+:'\"\\测试".into()));
    }

    #[test]
    fn byte_array_with_widened_booleans() {
        assert_eq!(
            decode_str("[B;1b,2b,true,false]").unwrap(),
            NbtTag::ByteArray(vec![1, 2, 1, 0])
        );
    }

    #[test]
    fn int_array_from_booleans() {
        assert_eq!(
            decode_str("[I; true,false]").unwrap(),
            NbtTag::IntArray(vec![1, 0])
        );
    }

    #[test]
    fn byte_literal_rejected_inside_int_array() {
        assert!(decode_str("[I;1b]").is_err());
    }

    #[test]
    fn heterogeneous_list() {
        let value = decode_str("[12, 123_abc, -12.34E3f, 'bcd', [a,b,bc], {a:1,b:1,c:2}]").unwrap();
        let NbtTag::List(list) = value else {
            panic!("expected a list");
        };
        assert_eq!(list.len(), 6);
        assert_eq!(list.iter().next().unwrap(), &NbtTag::Int(12));
    }

    #[test]
    fn compound_keys_are_always_strings() {
        let value = decode_str("{123: 1, true: 2}").unwrap();
        let NbtTag::Compound(compound) = value else {
            panic!("expected a compound");
        };
        assert_eq!(compound.get("123"), Some(&NbtTag::Int(1)));
        assert_eq!(compound.get("true"), Some(&NbtTag::Int(2)));
    }

    #[test]
    fn duplicate_compound_key_is_syntax_error() {
        assert!(decode_str("{a:1,a:2}").is_err());
    }

    #[test]
    fn unterminated_array_position_is_first_element() {
        let mut source = SliceSource::from_str("[I;12, -34 ,-567, 89,10,11 , -12 ,-13 ,14 ,15   ");
        let err = decode(&mut source).unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 3),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn malformed_element_position_is_first_element() {
        let mut source = SliceSource::from_str("[I;12, --34]");
        let err = decode(&mut source).unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 3),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn doubled_comma_position_is_first_element() {
        let mut source = SliceSource::from_str("[I;12,,3]");
        let err = decode(&mut source).unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 3),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn trailing_comma_position_is_first_element() {
        let mut source = SliceSource::from_str("[I;12,3,]");
        let err = decode(&mut source).unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 3),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn bad_first_array_element_position() {
        let mut source = SliceSource::from_str("[I;a,12]");
        let err = decode(&mut source).unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 3),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn quoted_string_failure_position_is_past_opening_quote() {
        let mut source = SliceSource::from_str(r#""abc"#);
        let err = decode(&mut source).unwrap_err();
        match err {
            DecodeError::Syntax { position, .. } => assert_eq!(position, 1),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_insensitivity() {
        let compact = decode_str("[B;1b,2B,3B]").unwrap();
        let spaced = decode_str("[B;\n\t1b,\n\t2B,\n\t3B\n]").unwrap();
        assert_eq!(compact, spaced);
    }

    #[test]
    fn bracket_that_is_not_an_array_marker_parses_as_a_list() {
        assert_eq!(
            decode_str("[Box, 1]").unwrap(),
            NbtTag::List(NbtList::from_iter([
                NbtTag::String("Box".into()),
                NbtTag::Int(1),
            ]))
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut nested = String::new();
        for _ in 0..600 {
            nested.push('[');
        }
        nested.push('1');
        for _ in 0..600 {
            nested.push(']');
        }
        assert!(decode_str(&nested).is_err());
    }
}
