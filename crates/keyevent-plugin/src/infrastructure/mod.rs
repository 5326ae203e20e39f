//! Infrastructure layer for the key event plugin.
//!
//! # Responsibilities
//!
//! - Delivering messages to the framework and replies back to the plugin
//!   (`messenger`)
//! - Providing a text-input fallback with scripted answers (`text_input`)
//! - Reading and writing TOML configuration and replay scripts (`storage`)
//!
//! # What does NOT belong here?
//!
//! - Reply classification or verdict merging (that is the application layer)
//! - The canonical record schema (that is `keyevent-core`)

pub mod messenger;
pub mod storage;
pub mod text_input;
