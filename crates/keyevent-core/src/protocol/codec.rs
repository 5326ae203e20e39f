//! JSON codec for the key event channel.
//!
//! The messaging channel carries opaque bytes.  On the key event channel those
//! bytes are a UTF-8 JSON document: the canonical event record on the way out,
//! and an arbitrary JSON value on the way back (normally `{"handled": bool}`).
//!
//! An empty reply is the channel's way of saying "no one answered"; it decodes
//! to `null`.

use serde_json::Value;
use thiserror::Error;

use crate::domain::canonical::CanonicalKeyEvent;

/// Errors that can occur while encoding or decoding a message body.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The value could not be serialised.
    #[error("failed to encode message: {0}")]
    Encode(String),

    /// The bytes are not a valid message of the expected shape.
    #[error("failed to decode message: {0}")]
    Decode(String),
}

// ── Outgoing ──────────────────────────────────────────────────────────────────

/// Serialises a canonical key event into a message body.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialisation fails.
///
/// # Examples
///
/// ```rust
/// use keyevent_core::protocol::{decode_key_event, encode_key_event};
/// use keyevent_core::{KeyEventEncoder, ModifierLockState, NativeKeyEvent};
///
/// let record = KeyEventEncoder::default()
///     .encode(&NativeKeyEvent::press(0x41, 4), &ModifierLockState::new());
/// let bytes = encode_key_event(&record).unwrap();
/// assert_eq!(decode_key_event(&bytes).unwrap(), record);
/// ```
pub fn encode_key_event(event: &CanonicalKeyEvent) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(event).map_err(|e| ProtocolError::Encode(e.to_string()))
}

/// Parses a message body back into a canonical key event.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] if the bytes are not a key event record.
pub fn decode_key_event(bytes: &[u8]) -> Result<CanonicalKeyEvent, ProtocolError> {
    serde_json::from_slice(bytes).map_err(|e| ProtocolError::Decode(e.to_string()))
}

// ── Replies ───────────────────────────────────────────────────────────────────

/// Serialises a reply value.  Used by responders on the framework side.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialisation fails.
pub fn encode_reply(value: &Value) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(value).map_err(|e| ProtocolError::Encode(e.to_string()))
}

/// Parses a reply body into a JSON value.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] if the bytes are not valid JSON.
pub fn decode_reply(bytes: &[u8]) -> Result<Value, ProtocolError> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| ProtocolError::Decode(e.to_string()))
}

// ── Human-readable rendering ──────────────────────────────────────────────────

/// Renders a value in the compact `{key: value, ...}` form used in logs.
///
/// Strings are written without quotes and map entries keep their order:
///
/// ```rust
/// use keyevent_core::describe_value;
///
/// let value = serde_json::json!({"handled": true});
/// assert_eq!(describe_value(&value), "{handled: true}");
/// ```
pub fn describe_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push_str(": ");
                write_value(out, item);
            }
            out.push('}');
        }
    }
}
