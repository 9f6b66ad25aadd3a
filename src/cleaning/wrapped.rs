//! CDATA wrapper handling
//!
//! XML-to-JSON converters represent `<![CDATA[...]]>` text as an object with
//! a single `__cdata` key. Any scalar in the export may arrive either way.

use serde_json::Value;

/// Marker key of the CDATA wrapper object.
pub const CDATA_KEY: &str = "__cdata";

/// A JSON value seen through the CDATA convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wrapped<'a> {
    /// `{"__cdata": inner}`
    Cdata(&'a Value),
    /// Anything else, passed through unchanged.
    Plain(&'a Value),
}

impl<'a> Wrapped<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) if map.len() == 1 => match map.get(CDATA_KEY) {
                Some(inner) => Wrapped::Cdata(inner),
                None => Wrapped::Plain(value),
            },
            _ => Wrapped::Plain(value),
        }
    }

    pub fn into_inner(self) -> &'a Value {
        match self {
            Wrapped::Cdata(inner) | Wrapped::Plain(inner) => inner,
        }
    }

    pub fn is_cdata(&self) -> bool {
        matches!(self, Wrapped::Cdata(_))
    }
}

/// Unwrap one layer of CDATA, if present.
pub fn unwrap(value: &Value) -> &Value {
    Wrapped::classify(value).into_inner()
}
