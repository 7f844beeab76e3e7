//! # Value Codec
//!
//! Redis stores flat byte strings, so every value written through the
//! facade carries a one-byte format tag: plain scalars go down the wire
//! as-is behind a raw tag, while structured values (JSON trees, null,
//! non-ASCII text) are wrapped in a versioned JSON envelope. Blobs written
//! by other clients carry neither tag and decode as raw bytes unchanged.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Tag byte marking a raw scalar payload.
const TAG_RAW: u8 = b'R';

/// Tag byte marking a structured JSON envelope.
const TAG_STRUCTURED: u8 = b'S';

/// Envelope protocol version written after [`TAG_STRUCTURED`].
const ENVELOPE_VERSION: u8 = 1;

/// A value stored through the cache facade.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    /// Plain byte scalar, stored verbatim behind the raw tag.
    Raw(Vec<u8>),
    /// Structured value, stored as a versioned JSON envelope.
    Structured(Value),
}

impl CacheValue {
    /// The structured null value.
    #[must_use]
    pub const fn null() -> Self {
        Self::Structured(Value::Null)
    }

    /// Whether this is the structured null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Structured(Value::Null))
    }

    /// View the value as text: UTF-8 raw bytes or a structured JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Raw(bytes) => std::str::from_utf8(bytes).ok(),
            Self::Structured(Value::String(s)) => Some(s),
            Self::Structured(_) => None,
        }
    }

    /// View the raw scalar bytes, if this is a raw value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Raw(bytes) => Some(bytes),
            Self::Structured(_) => None,
        }
    }

    /// Build a structured value from any serializable type.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialization`] if `value` cannot be
    /// represented as JSON.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Structured(serde_json::to_value(value)?))
    }

    /// Reconstruct a typed value, the inverse of [`Self::from_serialize`].
    ///
    /// Raw payloads are parsed as JSON text; this is intended for values
    /// written via the structured path.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialization`] if the payload does not
    /// deserialize into `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Self::Structured(json) => Ok(serde_json::from_value(json.clone())?),
            Self::Raw(bytes) => Ok(serde_json::from_slice(bytes)?),
        }
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Raw(bytes.to_vec())
    }
}

impl From<String> for CacheValue {
    /// ASCII text is a plain scalar; anything wider goes through the
    /// structured envelope so multi-byte content survives the byte pipe
    /// self-describingly.
    fn from(s: String) -> Self {
        if s.is_ascii() {
            Self::Raw(s.into_bytes())
        } else {
            Self::Structured(Value::String(s))
        }
    }
}

impl From<&str> for CacheValue {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Value> for CacheValue {
    fn from(json: Value) -> Self {
        Self::Structured(json)
    }
}

impl From<bool> for CacheValue {
    fn from(v: bool) -> Self {
        Self::Structured(Value::from(v))
    }
}

impl From<i64> for CacheValue {
    fn from(v: i64) -> Self {
        Self::Structured(Value::from(v))
    }
}

impl From<u64> for CacheValue {
    fn from(v: u64) -> Self {
        Self::Structured(Value::from(v))
    }
}

impl From<f64> for CacheValue {
    fn from(v: f64) -> Self {
        Self::Structured(Value::from(v))
    }
}

/// Encode a value into its stored wire form.
///
/// # Errors
///
/// Returns [`CacheError::Serialization`] if a structured value cannot be
/// rendered as JSON.
pub fn encode(value: &CacheValue) -> Result<Vec<u8>> {
    match value {
        CacheValue::Raw(bytes) => {
            let mut out = Vec::with_capacity(bytes.len() + 1);
            out.push(TAG_RAW);
            out.extend_from_slice(bytes);
            Ok(out)
        }
        CacheValue::Structured(json) => {
            let payload = serde_json::to_vec(json)?;
            let mut out = Vec::with_capacity(payload.len() + 2);
            out.push(TAG_STRUCTURED);
            out.push(ENVELOPE_VERSION);
            out.extend_from_slice(&payload);
            Ok(out)
        }
    }
}

/// Decode a stored blob back into a [`CacheValue`].
///
/// Untagged blobs (written by other clients) pass through as raw bytes.
/// A structured envelope that fails to parse is an error, never silently
/// returned as bytes.
///
/// # Errors
///
/// Returns [`CacheError::Serialization`] on a corrupt envelope or an
/// unknown envelope version.
pub fn decode(bytes: &[u8]) -> Result<CacheValue> {
    match bytes {
        [TAG_STRUCTURED, version, payload @ ..] => {
            if *version != ENVELOPE_VERSION {
                return Err(CacheError::Serialization(format!(
                    "unsupported envelope version {version}"
                )));
            }
            Ok(CacheValue::Structured(serde_json::from_slice(payload)?))
        }
        [TAG_RAW, payload @ ..] => Ok(CacheValue::Raw(payload.to_vec())),
        _ => Ok(CacheValue::Raw(bytes.to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_raw_ascii_round_trip() {
        let value = CacheValue::from("plain-ascii");
        let wire = encode(&value).unwrap();
        assert_eq!(wire, b"Rplain-ascii");
        assert_eq!(decode(&wire).unwrap(), value);
    }

    #[test]
    fn test_structured_round_trip() {
        let value = CacheValue::from(json!({"hits": 3, "tags": ["a", "b"]}));
        let wire = encode(&value).unwrap();
        assert_eq!(wire[0], b'S');
        assert_eq!(wire[1], 1);
        assert_eq!(decode(&wire).unwrap(), value);
    }

    #[test]
    fn test_null_round_trip() {
        let value = CacheValue::null();
        let decoded = decode(&encode(&value).unwrap()).unwrap();
        assert!(decoded.is_null());
    }

    #[test]
    fn test_non_ascii_text_uses_envelope() {
        let value = CacheValue::from("héllo wörld");
        assert!(matches!(value, CacheValue::Structured(Value::String(_))));
        let decoded = decode(&encode(&value).unwrap()).unwrap();
        assert_eq!(decoded.as_str(), Some("héllo wörld"));
    }

    #[test]
    fn test_untagged_blob_passes_through() {
        let legacy = b"written by someone else";
        assert_eq!(
            decode(legacy).unwrap(),
            CacheValue::Raw(legacy.to_vec())
        );
    }

    #[test]
    fn test_empty_blob_is_empty_raw() {
        assert_eq!(decode(b"").unwrap(), CacheValue::Raw(Vec::new()));
        let wire = encode(&CacheValue::Raw(Vec::new())).unwrap();
        assert_eq!(decode(&wire).unwrap(), CacheValue::Raw(Vec::new()));
    }

    #[test]
    fn test_corrupt_envelope_propagates_error() {
        let result = decode(b"S\x01{not json");
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_unknown_envelope_version_is_error() {
        let result = decode(b"S\x7f{}");
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_typed_bridge_round_trip() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Entry {
            name: String,
            count: u32,
        }

        let entry = Entry {
            name: "session".into(),
            count: 7,
        };
        let value = CacheValue::from_serialize(&entry).unwrap();
        let back: Entry = decode(&encode(&value).unwrap())
            .unwrap()
            .deserialize_into()
            .unwrap();
        assert_eq!(back, entry);
    }
}
