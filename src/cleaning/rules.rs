//! Field rules
//!
//! Each rule takes the (possibly missing) field value and its path, records
//! issues into the report, and returns `None` when the field is rejected.
//! Record validators in [`super::schema`] compose these.

use super::report::{indexed, join, ValidationReport};
use super::wrapped::unwrap;
use crate::serialized;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Required JSON object.
pub fn object<'a>(
    value: Option<&'a Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<&'a Map<String, Value>> {
    match value {
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            report.add_issue(path, format!("expected object, found {}", kind(other)));
            None
        }
        None => {
            report.add_issue(path, "required field is missing");
            None
        }
    }
}

/// Required JSON array.
pub fn array<'a>(
    value: Option<&'a Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<&'a Vec<Value>> {
    match value {
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            report.add_issue(path, format!("expected array, found {}", kind(other)));
            None
        }
        None => {
            report.add_issue(path, "required field is missing");
            None
        }
    }
}

/// Plain JSON string (no CDATA unwrapping).
pub fn string(value: Option<&Value>, path: &str, report: &mut ValidationReport) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            report.add_issue(path, format!("expected string, found {}", kind(other)));
            None
        }
        None => {
            report.add_issue(path, "required field is missing");
            None
        }
    }
}

/// String that may be CDATA-wrapped.
pub fn cdata_string(
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    string(value.map(unwrap), path, report)
}

/// Optional CDATA string; missing or `null` is `Some(None)`.
pub fn optional_cdata_string(
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<Option<String>> {
    match value.map(unwrap) {
        None | Some(Value::Null) => Some(None),
        inner => string(inner, path, report).map(Some),
    }
}

/// Integral JSON number.
pub fn integer(value: Option<&Value>, path: &str, report: &mut ValidationReport) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => {
            let integral = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            });
            if integral.is_none() {
                report.add_issue(path, format!("expected integer, found {}", n));
            }
            integral
        }
        Some(other) => {
            report.add_issue(path, format!("expected number, found {}", kind(other)));
            None
        }
        None => {
            report.add_issue(path, "required field is missing");
            None
        }
    }
}

/// Plain string holding an absolute URL.
pub fn url(value: Option<&Value>, path: &str, report: &mut ValidationReport) -> Option<String> {
    let s = string(value, path, report)?;
    if is_valid_url(&s) {
        Some(s)
    } else {
        report.add_issue(path, format!("invalid URL: {:?}", s));
        None
    }
}

/// CDATA string holding an email address.
pub fn email(value: Option<&Value>, path: &str, report: &mut ValidationReport) -> Option<String> {
    let s = cdata_string(value, path, report)?;
    if is_valid_email(&s) {
        Some(s)
    } else {
        report.add_issue(path, format!("invalid email address: {:?}", s));
        None
    }
}

/// Metadata value that may hold serialized data.
///
/// Strings that look serialized are decoded and converted to JSON; a decode
/// failure rejects the field. Everything else passes through unwrapped.
pub fn serialized_meta(
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<Value> {
    match value.map(unwrap) {
        None => Some(Value::Null),
        Some(Value::String(s)) if serialized::looks_serialized(s) => {
            match serialized::decode_normalized(s) {
                Ok(decoded) => Some(decoded.into_json()),
                Err(e) => {
                    report.add_issue(path, format!("failed to decode serialized value: {}", e));
                    None
                }
            }
        }
        Some(other) => Some(other.clone()),
    }
}

/// Optional publish date. Empty or missing is `Some(None)`.
pub fn optional_date(
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<Option<DateTime<Utc>>> {
    let raw = match value.map(unwrap) {
        None | Some(Value::Null) => return Some(None),
        Some(Value::String(s)) if s.is_empty() => return Some(None),
        Some(Value::String(s)) => s,
        Some(other) => {
            report.add_issue(path, format!("expected date string, found {}", kind(other)));
            return None;
        }
    };
    match parse_date(raw) {
        Some(date) => Some(Some(date)),
        None => {
            report.add_issue(path, format!("could not parse date {:?}", raw));
            None
        }
    }
}

/// Parse the date formats found in WordPress exports.
///
/// Accepts RFC 2822 (`pubDate`), RFC 3339, and the naive
/// `YYYY-MM-DD[ HH:MM:SS]` forms (`post_date`), which are read as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Fold a `[{meta_key, meta_value}, ...]` list into key/value pairs.
///
/// A missing or non-array source yields no pairs. Callers collect into a
/// map, so the last duplicate key wins.
pub fn key_value_list<T>(
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
    value_rule: impl Fn(Option<&Value>, &str, &mut ValidationReport) -> Option<T>,
) -> Option<Vec<(String, T)>> {
    let Some(Value::Array(entries)) = value else {
        return Some(Vec::new());
    };

    let mut pairs = Vec::with_capacity(entries.len());
    let mut valid = true;
    for (i, entry) in entries.iter().enumerate() {
        let entry_path = indexed(path, i);
        let Some(fields) = object(Some(entry), &entry_path, report) else {
            valid = false;
            continue;
        };
        let key = cdata_string(fields.get("meta_key"), &join(&entry_path, "meta_key"), report);
        let value = value_rule(
            fields.get("meta_value"),
            &join(&entry_path, "meta_value"),
            report,
        );
        match (key, value) {
            (Some(key), Some(value)) => pairs.push((key, value)),
            _ => valid = false,
        }
    }
    valid.then_some(pairs)
}

/// List of CDATA strings with empty entries dropped.
///
/// A missing or non-array source yields an empty list.
pub fn string_list(
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<Vec<String>> {
    let Some(Value::Array(entries)) = value else {
        return Some(Vec::new());
    };

    let mut strings = Vec::with_capacity(entries.len());
    let mut valid = true;
    for (i, entry) in entries.iter().enumerate() {
        match cdata_string(Some(entry), &indexed(path, i), report) {
            Some(s) if s.is_empty() => {}
            Some(s) => strings.push(s),
            None => valid = false,
        }
    }
    valid.then_some(strings)
}

/// `scheme://authority[/...]` with no whitespace.
pub fn is_valid_url(candidate: &str) -> bool {
    let Some((scheme, rest)) = candidate.split_once("://") else {
        return false;
    };

    let mut scheme_chars = scheme.chars();
    let scheme_ok = scheme_chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    if !scheme_ok {
        return false;
    }

    if rest.is_empty() || rest.chars().any(char::is_whitespace) {
        return false;
    }

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = if host_port.starts_with('[') {
        let Some(end_bracket) = host_port.find(']') else {
            return false;
        };
        &host_port[1..end_bracket]
    } else {
        host_port.split(':').next().unwrap_or_default()
    };

    !host.is_empty()
}

/// `local@domain.tld` without whitespace.
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
