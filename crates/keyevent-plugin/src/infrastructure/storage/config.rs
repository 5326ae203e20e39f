//! TOML-based configuration for the key event plugin.
//!
//! ```toml
//! [plugin]
//! channel = "flutter/keyevent"
//! keymap = "linux"
//! toolkit = "gtk"
//! log_level = "info"
//!
//! [loopback]
//! responder = "echo"        # echo | handled | not-handled
//! fallback = "accept"       # accept | ignore | fail
//! reply_delay_ms = 0
//! ```
//!
//! Every field has a serde default, so an empty file (or no file at all)
//! yields [`PluginConfig::default`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;
use keyevent_core::domain::encoder::{DEFAULT_KEYMAP, DEFAULT_TOOLKIT};
use keyevent_core::KeyEventEncoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::key_event_plugin::DEFAULT_CHANNEL;
use crate::infrastructure::messenger::{ChannelResponder, EchoResponder, FixedVerdictResponder};
use crate::infrastructure::text_input::ScriptedTextInput;

/// Error type for configuration and script file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The value could not be serialized to TOML.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PluginConfig {
    #[serde(default)]
    pub plugin: PluginSettings,
    #[serde(default)]
    pub loopback: LoopbackSettings,
}

/// Settings of the plugin instance itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginSettings {
    /// Channel name every key event is addressed to.
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Keymap tag stamped on every record.
    #[serde(default = "default_keymap")]
    pub keymap: String,
    /// Toolkit tag stamped on every record.
    #[serde(default = "default_toolkit")]
    pub toolkit: String,
    /// `tracing` filter directive, e.g. `"info"` or `"keyevent_plugin=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl PluginSettings {
    /// Builds the encoder described by these settings.
    pub fn encoder(&self) -> KeyEventEncoder {
        KeyEventEncoder::new(self.keymap.clone(), self.toolkit.clone())
    }
}

/// Behaviour of the in-process framework stand-in used by `keyevent-replay`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopbackSettings {
    #[serde(default)]
    pub responder: ResponderKind,
    #[serde(default)]
    pub fallback: FallbackKind,
    /// Milliseconds between a send and its reply.
    #[serde(default)]
    pub reply_delay_ms: u64,
}

/// How the loopback framework answers key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResponderKind {
    /// Echo the record back (no verdict).
    #[default]
    Echo,
    /// Reply `{"handled": true}`.
    Handled,
    /// Reply `{"handled": false}`.
    NotHandled,
}

impl ResponderKind {
    pub fn responder(self) -> Arc<dyn ChannelResponder> {
        match self {
            ResponderKind::Echo => Arc::new(EchoResponder),
            ResponderKind::Handled => Arc::new(FixedVerdictResponder::handled()),
            ResponderKind::NotHandled => Arc::new(FixedVerdictResponder::not_handled()),
        }
    }
}

/// How the scripted text input answers events the framework declined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackKind {
    #[default]
    Accept,
    Ignore,
    Fail,
}

impl FallbackKind {
    pub fn text_input(self) -> ScriptedTextInput {
        match self {
            FallbackKind::Accept => ScriptedTextInput::accepting(),
            FallbackKind::Ignore => ScriptedTextInput::ignoring(),
            FallbackKind::Fail => ScriptedTextInput::failing("configured to fail"),
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}
fn default_keymap() -> String {
    DEFAULT_KEYMAP.to_string()
}
fn default_toolkit() -> String {
    DEFAULT_TOOLKIT.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            keymap: default_keymap(),
            toolkit: default_toolkit(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LoopbackSettings {
    fn default() -> Self {
        Self {
            responder: ResponderKind::default(),
            fallback: FallbackKind::default(),
            reply_delay_ms: 0,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

impl PluginConfig {
    /// Loads the config at `path`, returning the defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system errors other than "not
    /// found", and [`ConfigError::Parse`] if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the config to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
