//! The numeric half of the value classifier (§4.2, rules 2–4).
//!
//! Every function here takes the already-read unquoted lexeme as a plain
//! `&str` (the unquoted alphabet is ASCII-only, so the lexeme is always
//! valid UTF-8) and returns `None` when the rule it implements does not
//! apply. The caller (`lexer::classify`) is responsible for trying the
//! rules in priority order and stopping at the first match; rule 1
//! (boolean words) is handled directly in `lexer::classify` since it
//! doesn't need any numeric parsing.

use crate::snbt::lexer::Classified;

/// Rule 2: a lexeme ending in one of `b B s S l L f F d D`.
///
/// Returns `Some(classified)` when the prefix is well-formed *and* fits
/// the suffix's range, and `None` otherwise. Per §4.2, a `None` here is
/// final — the caller must not fall through to rules 3 or 4, only to rule
/// 5 (string). This function therefore only needs to be *tried*; whether
/// it is even applicable (does the lexeme end in a suffix letter at all)
/// is decided by the caller via [`ends_with_suffix_letter`], since that
/// decision also controls whether rules 3/4 remain eligible.
pub(super) fn try_suffixed(lexeme: &str) -> Option<Classified> {
    let (prefix, suffix) = lexeme.split_at(lexeme.len() - 1);
    let suffix = suffix.as_bytes()[0];

    match suffix {
        b'b' | b'B' => parse_signed_integer(prefix)
            .and_then(|v| i8::try_from(v).ok())
            .map(Classified::Byte),
        b's' | b'S' => parse_signed_integer(prefix)
            .and_then(|v| i16::try_from(v).ok())
            .map(Classified::Short),
        b'l' | b'L' => parse_signed_integer(prefix).map(Classified::Long),
        b'f' | b'F' => parse_float::<f32>(prefix).map(Classified::Float),
        b'd' | b'D' => parse_float::<f64>(prefix).map(Classified::Double),
        _ => None,
    }
}

/// Whether `lexeme`'s last byte is one of the recognized suffix letters.
/// Used by the caller to decide whether rule 2 even applies.
pub(super) fn ends_with_suffix_letter(lexeme: &str) -> bool {
    matches!(
        lexeme.as_bytes().last(),
        Some(b'b' | b'B' | b's' | b'S' | b'l' | b'L' | b'f' | b'F' | b'd' | b'D')
    )
}

/// Rule 3: no suffix, but the lexeme contains a decimal point or an
/// exponent marker, so it can only be a `Double`.
pub(super) fn try_decimal_double(lexeme: &str) -> Option<Classified> {
    if !has_decimal_shape(lexeme) {
        return None;
    }
    parse_float::<f64>(lexeme).map(Classified::Double)
}

/// Rule 4: no suffix, no decimal point or exponent, fits in 32 bits.
/// Overflow is *not* promoted to `Long` — the caller falls through to the
/// string rule instead.
pub(super) fn try_bare_int(lexeme: &str) -> Option<Classified> {
    if has_decimal_shape(lexeme) {
        return None;
    }
    parse_signed_integer(lexeme)
        .and_then(|v| i32::try_from(v).ok())
        .map(Classified::Int)
}

fn has_decimal_shape(lexeme: &str) -> bool {
    lexeme.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

/// Parses a signed integer literal (`-? digit+`, no point, no exponent) as
/// a 64-bit value so every narrower width can range-check against it.
/// Rejects anything that is not purely digits after an optional `-`, which
/// in particular rejects an empty digit run (`"b"` alone, `"-"` alone, and
/// so on). Per §4.2.a the sign is `-` only; a leading `+` is not part of
/// the integer grammar even though `+` is in the unquoted alphabet, so
/// `"+123"` falls through to the string rule rather than parsing as `123`.
fn parse_signed_integer(body: &str) -> Option<i64> {
    let digits = body.strip_prefix('-').unwrap_or(body);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse::<i64>().ok()
}

/// Parses a float literal matching the grammar `-? ( digit+ ('.' digit*)?
/// | '.' digit+ ) ( [eE] [+-]? digit+ )?`. Rust's own `f32`/`f64` parsers
/// accept exactly this shape (plus integer-only forms, which is fine since
/// callers only reach here once they've already decided a point/exponent is
/// present, or the bare-integer rule has already been ruled out). Like the
/// integer grammar, only `-` is a legal leading sign (§4.2.b); `+` is only
/// ever legal on the exponent.
fn parse_float<T: std::str::FromStr>(body: &str) -> Option<T> {
    if body.is_empty() {
        return None;
    }
    let digits = body.strip_prefix('-').unwrap_or(body);
    if digits.is_empty() || !is_well_formed_float_body(digits) {
        return None;
    }
    body.parse::<T>().ok()
}

/// Structural validation independent of Rust's parser: at least one digit
/// must appear in the mantissa, at most one `.`, a bare digit run with
/// neither a `.` nor an exponent is rejected (§4.2.b only permits that
/// shape when an exponent follows), and if an exponent marker is present
/// it must be followed by a sign-optional, non-empty digit run.
fn is_well_formed_float_body(digits: &str) -> bool {
    let (mantissa, exponent) = match digits.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (digits, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("");
    let fractional_part = parts.next();

    if !integer_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let has_integer_digit = integer_part.bytes().any(|b| b.is_ascii_digit());
    let fractional_ok = match fractional_part {
        Some(frac) => frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    };
    if !fractional_ok {
        return false;
    }
    let has_mantissa_digit =
        has_integer_digit || fractional_part.is_some_and(|frac| !frac.is_empty());
    if !has_mantissa_digit {
        return false;
    }
    // A bare digit run (no '.' anywhere in the mantissa) is only a legal
    // float body when an exponent follows; otherwise it's rule 4's
    // territory (or, on overflow, rule 5's), never rule 2/3's.
    if fractional_part.is_none() && exponent.is_none() {
        return false;
    }

    match exponent {
        Some(exponent) => {
            let exponent_digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            !exponent_digits.is_empty() && exponent_digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => true,
    }
}
