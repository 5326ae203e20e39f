//! Domain entities for the key event pipeline.
//!
//! This module contains pure logic with no infrastructure dependencies: no
//! toolkit bindings, no messaging transport, no async runtime.
//!
//! # Flow through the domain (for beginners)
//!
//! ```text
//! NativeKeyEvent ──► ModifierLockState::observe   (lock keys only)
//!                └─► KeyEventEncoder::encode      ──► CanonicalKeyEvent
//! ```
//!
//! The tracker is updated first so that the encoder sees the state the lock
//! key has *after* this event, which the native modifier field cannot report.

/// Raw key events as delivered by the toolkit.
pub mod native_event;

/// The toolkit-independent record sent to the framework.
pub mod canonical;

/// Per-plugin-instance lock-key state.
pub mod lock_state;

/// Native event + lock state → canonical record.
pub mod encoder;
