//! Shared domain types

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ScrapeError};

/// Metadata stored for a single CID.
///
/// Absent fields are empty strings; there is no null-vs-missing distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub cid: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub name: String,
}

/// Document shape served by the gateway. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
struct GatewayDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Metadata {
    pub fn new(
        cid: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            cid: cid.into(),
            image: image.into(),
            description: description.into(),
            name: name.into(),
        }
    }

    /// Decode a gateway response body and tag it with `cid`.
    ///
    /// The body is checked for JSON syntax first, then mapped onto the three
    /// known fields. A document that is not an object, or whose known fields
    /// are not strings, is a parse error.
    pub fn from_json(cid: &str, body: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ScrapeError::parse(format!("invalid JSON for CID {}: {}", cid, e)))?;

        if !value.is_object() {
            return Err(ScrapeError::parse(format!(
                "expected a JSON object for CID {}, got {}",
                cid,
                json_kind(&value)
            )));
        }

        let doc: GatewayDocument = serde_json::from_value(value)
            .map_err(|e| ScrapeError::parse(format!("schema mismatch for CID {}: {}", cid, e)))?;

        Ok(Self {
            cid: cid.to_string(),
            image: doc.image,
            description: doc.description,
            name: doc.name,
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
