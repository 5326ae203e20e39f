//! GDK key tables used by the encoder.
//!
//! The canonical record copies the native keysym verbatim, so no translation
//! tables are needed in the forward direction.  The tables here only answer
//! the questions the encoder has to ask about a keysym: is it a lock key, and
//! which modifier bit represents its state.

pub mod gdk;

pub use gdk::{LockKey, ModifierMask};
