//! Text-input fallback adapters.
//!
//! The real fallback is the toolkit's text-input widget, owned by the
//! embedding.  [`scripted::ScriptedTextInput`] answers with a fixed result and
//! records what it was offered.

pub mod scripted;

pub use scripted::ScriptedTextInput;
