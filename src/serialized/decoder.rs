//! Recursive-descent decoder
//!
//! Every parse step returns the decoded value together with the offset just
//! past it. Each step either consumes input or fails, and nesting is capped
//! at [`MAX_DEPTH`], so arbitrary input terminates.

use super::value::SerializedValue;

/// Maximum array nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 64;

/// Errors during serialized-data decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("unsupported serialized type '{found}' at offset {offset}, context: \"{context}\"")]
    UnsupportedType {
        found: char,
        offset: usize,
        context: String,
    },

    #[error("invalid {kind} format at offset {offset}: \"{context}\"")]
    Malformed {
        kind: &'static str,
        offset: usize,
        context: String,
    },

    #[error("string at offset {offset} declares {declared} bytes but the input ends first")]
    TruncatedString { declared: usize, offset: usize },

    #[error("array key at offset {offset} is not a string or integer")]
    NonScalarKey { offset: usize },

    #[error("nesting exceeds {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },
}

impl DecodeError {
    /// Byte offset into the (normalized) input where decoding failed.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::UnexpectedEnd { offset }
            | DecodeError::UnsupportedType { offset, .. }
            | DecodeError::Malformed { offset, .. }
            | DecodeError::TruncatedString { offset, .. }
            | DecodeError::NonScalarKey { offset }
            | DecodeError::TooDeep { offset, .. } => *offset,
        }
    }
}

/// Decode one value from the start of `input`. Trailing text is ignored.
pub fn decode(input: &str) -> Result<SerializedValue, DecodeError> {
    parse_value(input, 0, 0).map(|(value, _)| value)
}

fn parse_value(
    input: &str,
    start: usize,
    depth: usize,
) -> Result<(SerializedValue, usize), DecodeError> {
    let bytes = input.as_bytes();
    let mut index = start;
    while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
        index += 1;
    }

    match bytes.get(index) {
        None => Err(DecodeError::UnexpectedEnd { offset: index }),
        Some(b'a') => parse_array(input, index, depth),
        Some(b's') => parse_string(input, index),
        Some(b'i') => parse_int(input, index),
        Some(_) => Err(DecodeError::UnsupportedType {
            found: input
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER),
            offset: index,
            context: window(input, index.saturating_sub(10), index + 20),
        }),
    }
}

/// `a:<count>:{<key><value>...}`
fn parse_array(
    input: &str,
    index: usize,
    depth: usize,
) -> Result<(SerializedValue, usize), DecodeError> {
    if depth >= MAX_DEPTH {
        return Err(DecodeError::TooDeep {
            limit: MAX_DEPTH,
            offset: index,
        });
    }
    let malformed = || DecodeError::Malformed {
        kind: "array",
        offset: index,
        context: window(input, index, index + 20),
    };

    let bytes = input.as_bytes();
    let (digits, after) = read_header_number(input, index, false).ok_or_else(malformed)?;
    if bytes.get(after) != Some(&b':') || bytes.get(after + 1) != Some(&b'{') {
        return Err(malformed());
    }
    let count: usize = digits.parse().map_err(|_| malformed())?;

    let mut cursor = after + 2;
    let mut entries = Vec::new();
    for _ in 0..count {
        let key_offset = cursor;
        let (key, next) = parse_value(input, cursor, depth + 1)?;
        let key = key
            .into_key()
            .ok_or(DecodeError::NonScalarKey { offset: key_offset })?;
        let (value, next) = parse_value(input, next, depth + 1)?;
        SerializedValue::push_entry(&mut entries, key, value);
        cursor = next;
    }

    while cursor < bytes.len() && bytes[cursor] != b'}' {
        cursor += 1;
    }
    if cursor < bytes.len() {
        cursor += 1;
    }

    Ok((SerializedValue::Array(entries), cursor))
}

/// `s:<len>:"<content>"` with an optional trailing `;`.
///
/// The content runs to the first closing quote. When that is shorter than
/// the declared length (the content itself contains a quote), exactly the
/// declared number of bytes is taken instead.
fn parse_string(input: &str, index: usize) -> Result<(SerializedValue, usize), DecodeError> {
    let malformed = || DecodeError::Malformed {
        kind: "string",
        offset: index,
        context: window(input, index, index + 30),
    };

    let bytes = input.as_bytes();
    let (digits, after) = read_header_number(input, index, false).ok_or_else(malformed)?;
    if bytes.get(after) != Some(&b':') || bytes.get(after + 1) != Some(&b'"') {
        return Err(malformed());
    }
    let declared: usize = digits.parse().map_err(|_| malformed())?;
    let content_start = after + 2;

    let first_quote = input[content_start..]
        .find('"')
        .map(|pos| content_start + pos)
        .ok_or_else(malformed)?;

    let content_end = if first_quote - content_start >= declared {
        first_quote
    } else {
        let end = content_start.checked_add(declared).ok_or_else(malformed)?;
        if end >= bytes.len() || !input.is_char_boundary(end) {
            return Err(DecodeError::TruncatedString {
                declared,
                offset: index,
            });
        }
        if bytes[end] != b'"' {
            return Err(malformed());
        }
        end
    };

    let content = input[content_start..content_end].to_string();
    let mut next = content_end + 1;
    if bytes.get(next) == Some(&b';') {
        next += 1;
    }
    Ok((SerializedValue::String(content), next))
}

/// `i:<signed-int>;`
fn parse_int(input: &str, index: usize) -> Result<(SerializedValue, usize), DecodeError> {
    let malformed = || DecodeError::Malformed {
        kind: "integer",
        offset: index,
        context: window(input, index, index + 20),
    };

    let (digits, after) = read_header_number(input, index, true).ok_or_else(malformed)?;
    if input.as_bytes().get(after) != Some(&b';') {
        return Err(malformed());
    }
    let value: i64 = digits.parse().map_err(|_| malformed())?;
    Ok((SerializedValue::Int(value), after + 1))
}

/// Read the `<tag>:<number>` prefix at `index`; returns the number text and
/// the offset after it.
fn read_header_number(input: &str, index: usize, signed: bool) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();
    if bytes.get(index + 1) != Some(&b':') {
        return None;
    }
    let start = index + 2;
    let mut end = start;
    if signed && bytes.get(end) == Some(&b'-') {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    Some((&input[start..end], end))
}

/// Slice `input[from..to]`, widened or narrowed to char boundaries.
fn window(input: &str, from: usize, to: usize) -> String {
    let mut from = from.min(input.len());
    while !input.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = to.clamp(from, input.len());
    while !input.is_char_boundary(to) {
        to += 1;
    }
    input[from..to].to_string()
}
