//! Typed scalar consumption: doubles, unsigned integers, bounded strings.

use rmp::Marker;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Double,
    Uint,
    String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Double(f64),
    Uint(u64),
    String(String),
}

/// Consume the next value, which must be a scalar of `kind`.
pub fn consume_scalar(cursor: &mut Cursor<'_>, kind: ScalarKind) -> DecodeResult<Scalar> {
    match kind {
        ScalarKind::Double => consume_double(cursor).map(Scalar::Double),
        ScalarKind::Uint => consume_uint(cursor).map(Scalar::Uint),
        ScalarKind::String => consume_string(cursor).map(Scalar::String),
    }
}

/// Consume a 64-bit float.
pub fn consume_double(cursor: &mut Cursor<'_>) -> DecodeResult<f64> {
    match cursor.peek_marker()? {
        Marker::F64 => cursor.read("double", |rd| rmp::decode::read_f64(rd)),
        other => Err(cursor.unexpected_scalar(other, "double")),
    }
}

/// Consume an unsigned integer of any width.
pub fn consume_uint(cursor: &mut Cursor<'_>) -> DecodeResult<u64> {
    match cursor.peek_marker()? {
        Marker::FixPos(_) | Marker::U8 | Marker::U16 | Marker::U32 | Marker::U64 => {
            cursor.read("unsigned integer", |rd| rmp::decode::read_int::<u64, _>(rd))
        }
        other => Err(cursor.unexpected_scalar(other, "unsigned integer")),
    }
}

/// Consume a string into an owned buffer.
///
/// The declared length is checked against the cursor's string limit before
/// any buffer is allocated.
pub fn consume_string(cursor: &mut Cursor<'_>) -> DecodeResult<String> {
    let s = consume_str(cursor)?;
    let mut out = String::new();
    out.try_reserve_exact(s.len())
        .map_err(|e| cursor.fail(DecodeError::AllocationFailure(e.to_string())))?;
    out.push_str(s);
    Ok(out)
}

/// Consume a string, borrowing it from the underlying buffer.
pub fn consume_str<'a>(cursor: &mut Cursor<'a>) -> DecodeResult<&'a str> {
    match cursor.peek_marker()? {
        Marker::FixStr(_) | Marker::Str8 | Marker::Str16 | Marker::Str32 => {}
        other => return Err(cursor.unexpected_scalar(other, "string")),
    }

    let len = cursor.read("string header", |rd| rmp::decode::read_str_len(rd))?;
    let limit = cursor.limits().max_string_length;
    if len > limit {
        tracing::debug!(len, limit, "string exceeds length limit");
        return Err(cursor.fail(DecodeError::ConsumeError(format!(
            "string of {len} bytes exceeds limit of {limit}"
        ))));
    }

    let bytes = cursor.take(len as usize)?;
    std::str::from_utf8(bytes)
        .map_err(|e| cursor.fail(DecodeError::ConsumeError(format!("invalid utf-8 in string: {e}"))))
}
