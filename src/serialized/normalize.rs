//! Pre-decode cleanup of serialized text copied out of XML exports.
//!
//! Exports that went through editors or XML pretty-printers tend to arrive
//! wrapped in quotes, broken over lines, and with spaces inside the token
//! headers (`a: 3: {`). This repair is a heuristic: it fixes the known
//! run-on patterns and leaves everything else alone.
//!
//! The rewrite does not track string boundaries. Whitespace runs and
//! header-like text inside quoted contents (`s:9:"a: 3: {x…"`) are rewritten
//! too, which changes their byte length. It is only applied by
//! [`decode_normalized`](super::decode_normalized) after the raw text has
//! failed to decode.

/// Trim, strip one layer of enclosing single quotes, collapse whitespace
/// runs, and compact spaced-out token headers.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim();
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        text = &text[1..text.len() - 1];
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    repair_token_spacing(&collapsed)
}

fn repair_token_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos < text.len() {
        if let Some((token, consumed)) = compact_header(text, pos) {
            out.push_str(&token);
            pos += consumed;
            continue;
        }
        match text[pos..].chars().next() {
            Some(ch) => {
                out.push(ch);
                pos += ch.len_utf8();
            }
            None => break,
        }
    }
    out
}

/// Rewrite a header such as `s: 5: "` at `pos` into `s:5:"`.
///
/// Returns the compact header and the number of bytes it replaces.
fn compact_header(text: &str, pos: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let tag = *bytes.get(pos)?;
    if !matches!(tag, b'a' | b's' | b'i') {
        return None;
    }
    if pos > 0 && !matches!(bytes[pos - 1], b'{' | b'}' | b';' | b'"' | b' ') {
        return None;
    }

    let skip_space = |at: usize| if bytes.get(at) == Some(&b' ') { at + 1 } else { at };

    let mut cursor = skip_space(pos + 1);
    if bytes.get(cursor) != Some(&b':') {
        return None;
    }
    cursor = skip_space(cursor + 1);

    let number_start = cursor;
    if tag == b'i' && bytes.get(cursor) == Some(&b'-') {
        cursor += 1;
    }
    let digits_start = cursor;
    while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
        cursor += 1;
    }
    if cursor == digits_start {
        return None;
    }
    let number = &text[number_start..cursor];
    cursor = skip_space(cursor);

    let tag = tag as char;
    match tag {
        'i' => {
            if bytes.get(cursor) != Some(&b';') {
                return None;
            }
            Some((format!("i:{};", number), cursor + 1 - pos))
        }
        _ => {
            if bytes.get(cursor) != Some(&b':') {
                return None;
            }
            cursor = skip_space(cursor + 1);
            let opener = if tag == 'a' { b'{' } else { b'"' };
            if bytes.get(cursor) != Some(&opener) {
                return None;
            }
            Some((
                format!("{}:{}:{}", tag, number, opener as char),
                cursor + 1 - pos,
            ))
        }
    }
}
