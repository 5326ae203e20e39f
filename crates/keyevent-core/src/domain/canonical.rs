//! The canonical key event record.
//!
//! A [`CanonicalKeyEvent`] is created once per native event by the encoder,
//! serialised into the outgoing message body, and then owned by the dispatch
//! that carries it.  Its JSON form is:
//!
//! ```json
//! {"type":"keydown","keymap":"linux","scanCode":4,"toolkit":"gtk",
//!  "keyCode":65,"modifiers":0,"unicodeScalarValues":65}
//! ```
//!
//! `unicodeScalarValues` is omitted entirely when the key produced no text.

use serde::{Deserialize, Serialize};

/// `"keydown"` or `"keyup"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEventKind {
    #[serde(rename = "keydown")]
    KeyDown,
    #[serde(rename = "keyup")]
    KeyUp,
}

impl KeyEventKind {
    /// The wire string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyEventKind::KeyDown => "keydown",
            KeyEventKind::KeyUp => "keyup",
        }
    }
}

/// Toolkit-independent key event record sent to the framework.
///
/// Field order matches the order the framework has always received them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalKeyEvent {
    #[serde(rename = "type")]
    pub kind: KeyEventKind,
    /// Platform keymap tag, e.g. `"linux"`.
    pub keymap: String,
    /// Hardware scan code, copied verbatim.
    pub scan_code: u32,
    /// Windowing toolkit tag, e.g. `"gtk"`.
    pub toolkit: String,
    /// Logical key symbol, copied verbatim.
    pub key_code: u32,
    /// Active modifier bitmask after lock-key correction.
    pub modifiers: u32,
    /// Scalar value of the first character the key produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_scalar_values: Option<u32>,
}
