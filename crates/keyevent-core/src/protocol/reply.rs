//! Classification of framework replies.
//!
//! Only a map with a boolean `handled` entry asserts a verdict.  Everything
//! else, including an echo of the outgoing record, is [`FrameworkVerdict::NoVerdict`].
//! The distinction matters: only an explicit `handled: false` hands the event
//! to the text-input fallback.

use serde_json::Value;

/// What the framework said about a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkVerdict {
    /// `{"handled": true}`.
    Handled,
    /// `{"handled": false}`.
    NotHandled,
    /// No boolean `handled` entry.
    NoVerdict,
}

impl FrameworkVerdict {
    /// Classifies a decoded reply body.
    ///
    /// ```rust
    /// use keyevent_core::FrameworkVerdict;
    /// use serde_json::json;
    ///
    /// let declined = FrameworkVerdict::from_reply(&json!({"handled": false}));
    /// assert_eq!(declined, FrameworkVerdict::NotHandled);
    ///
    /// let echo = FrameworkVerdict::from_reply(&json!({"type": "keydown"}));
    /// assert_eq!(echo, FrameworkVerdict::NoVerdict);
    /// ```
    pub fn from_reply(reply: &Value) -> Self {
        match reply.get("handled") {
            Some(Value::Bool(true)) => FrameworkVerdict::Handled,
            Some(Value::Bool(false)) => FrameworkVerdict::NotHandled,
            _ => FrameworkVerdict::NoVerdict,
        }
    }
}
