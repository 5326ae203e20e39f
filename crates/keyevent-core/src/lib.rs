//! # keyevent-core
//!
//! Shared library for the key event plugin containing the canonical key event
//! record, the lock-key state tracker, the event encoder, GDK key tables, and
//! the JSON message codec used on the key event channel.
//!
//! This crate has zero dependencies on windowing toolkits, async runtimes, or
//! messaging transports.
//!
//! # Architecture overview (for beginners)
//!
//! A native toolkit (GTK on Linux) reports every key press and release as a
//! raw event carrying toolkit-specific values: a GDK keysym, a hardware
//! keycode, and a modifier bitmask.  A remote framework that decides what the
//! key means must not depend on those toolkit details, so every raw event is
//! first translated into a **canonical key event** record and serialised into
//! a message body.
//!
//! - **`domain`** – The raw and canonical event types, the per-instance
//!   lock-key tracker, and the encoder that turns one into the other.
//!
//! - **`keymap`** – GDK keysym constants and modifier mask bits, including
//!   the classification of lock keys (NumLock, CapsLock, ShiftLock).
//!
//! - **`protocol`** – How canonical events and framework replies travel as
//!   bytes: a JSON codec, the reply verdict classifier, and a sequence
//!   counter used to number dispatches.

pub mod domain;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `keyevent_core::CanonicalKeyEvent` instead of the full module path.
pub use domain::canonical::{CanonicalKeyEvent, KeyEventKind};
pub use domain::encoder::KeyEventEncoder;
pub use domain::lock_state::ModifierLockState;
pub use domain::native_event::{NativeEventType, NativeKeyEvent};
pub use keymap::gdk::{LockKey, ModifierMask};
pub use protocol::codec::{decode_reply, describe_value, encode_key_event, ProtocolError};
pub use protocol::reply::FrameworkVerdict;
