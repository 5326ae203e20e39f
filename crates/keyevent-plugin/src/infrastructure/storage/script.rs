//! Replay scripts: native key events stored as TOML.
//!
//! ```toml
//! [[event]]
//! type = "press"
//! keyval = 0x41
//! hardware_keycode = 4
//! string = "A"
//!
//! [[event]]
//! type = "release"
//! keyval = 0x41
//! hardware_keycode = 4
//! string = "A"
//! ```
//!
//! Omitted fields default to zero / empty.

use std::path::Path;

use keyevent_core::NativeKeyEvent;
use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// Press or release, as written in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptEventType {
    Press,
    Release,
}

/// One `[[event]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedKeyEvent {
    #[serde(rename = "type")]
    pub event_type: ScriptEventType,
    pub keyval: u32,
    #[serde(default)]
    pub hardware_keycode: u16,
    #[serde(default)]
    pub state: u32,
    #[serde(default)]
    pub string: String,
    #[serde(default)]
    pub time: u32,
}

impl From<&ScriptedKeyEvent> for NativeKeyEvent {
    fn from(scripted: &ScriptedKeyEvent) -> Self {
        let event = match scripted.event_type {
            ScriptEventType::Press => {
                NativeKeyEvent::press(scripted.keyval, scripted.hardware_keycode)
            }
            ScriptEventType::Release => {
                NativeKeyEvent::release(scripted.keyval, scripted.hardware_keycode)
            }
        };
        event
            .with_state(scripted.state)
            .with_string(scripted.string.clone())
            .with_time(scripted.time)
    }
}

/// An ordered list of events to replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyScript {
    #[serde(rename = "event", default)]
    pub events: Vec<ScriptedKeyEvent>,
}

impl KeyScript {
    /// Parses a script from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses the script at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read (a missing
    /// script is an error) or [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// The script's events as native key events, in order.
    pub fn native_events(&self) -> Vec<NativeKeyEvent> {
        self.events.iter().map(NativeKeyEvent::from).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
