//! Provider response primitives shared by every endpoint.
//!
//! AMap wraps each payload in `{status, info, infocode, ...}`. Leaf values
//! are nominally strings, but absent values come back as `[]` and a few
//! counters as bare numbers, so text fields go through [`text`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `status` value of a successful envelope.
pub const STATUS_OK: &str = "1";

/// Fields present on every envelope, successful or not.
#[derive(Debug, Deserialize)]
pub struct Status {
    #[serde(deserialize_with = "text")]
    pub status: String,
    #[serde(default, deserialize_with = "text")]
    pub info: String,
    #[serde(default, deserialize_with = "text")]
    pub infocode: String,
}

impl Status {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// A point of interest as returned by place search and reverse geocoding.
#[derive(Debug, Clone, Deserialize)]
pub struct Poi {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "text")]
    pub kind: String,
    #[serde(default, deserialize_with = "text")]
    pub address: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(default, deserialize_with = "text")]
    pub tel: String,
    #[serde(default, deserialize_with = "text")]
    pub distance: String,
    #[serde(alias = "businessarea", default, deserialize_with = "text")]
    pub business_area: String,
}

/// Lenient text field: string, null, number, or an array of strings.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => parts.push(s),
                    other => {
                        return Err(D::Error::custom(format!(
                            "expected text, found {} inside array",
                            kind_of(&other)
                        )))
                    }
                }
            }
            Ok(parts.join(","))
        }
        other => Err(D::Error::custom(format!(
            "expected text, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
