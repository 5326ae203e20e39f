//! Storage infrastructure: TOML files read by the replay binary.
//!
//! - `config` – plugin settings (channel, tags, loopback behaviour).
//! - `script` – a list of native key events to replay.

pub mod config;
pub mod script;

pub use config::{
    ConfigError, FallbackKind, LoopbackSettings, PluginConfig, PluginSettings, ResponderKind,
};
pub use script::{KeyScript, ScriptedKeyEvent};
