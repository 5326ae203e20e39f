//! Lock-key state tracking.
//!
//! # Why track lock keys separately? (for beginners)
//!
//! Most modifiers are *momentary*: Shift is active while it is held, and the
//! toolkit's `state` field reports that accurately.  Lock keys (Num Lock,
//! Caps Lock, Shift Lock) are different.  The toolkit reports the modifier
//! state as it was *before* the event, so the press of Caps Lock arrives with
//! a `state` that says nothing about the key that is now down, and the
//! release arrives with a `state` that still carries the lock bit.
//!
//! [`ModifierLockState`] keeps its own record of which lock keys are held and
//! supplies the lock bits for lock-key events in place of the native ones.
//!
//! The state belongs to one plugin instance and lives exactly as long as it.
//! It is not part of the canonical record, only an input to producing it.

use tracing::trace;

use crate::domain::native_event::NativeKeyEvent;
use crate::keymap::gdk::{LockKey, ModifierMask};

/// Which lock keys are currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierLockState {
    num_lock: bool,
    caps_lock: bool,
    shift_lock: bool,
}

impl ModifierLockState {
    /// Creates a tracker with every lock released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the tracker for `event`.
    ///
    /// A press of a lock key sets its bit and the matching release clears it.
    /// Every other key leaves the tracker untouched.
    ///
    /// Returns the lock key the event refers to, or `None` for ordinary keys.
    pub fn observe(&mut self, event: &NativeKeyEvent) -> Option<LockKey> {
        let lock = LockKey::from_keyval(event.keyval)?;
        let held = event.is_press();
        match lock {
            LockKey::NumLock => self.num_lock = held,
            LockKey::CapsLock => self.caps_lock = held,
            LockKey::ShiftLock => self.shift_lock = held,
        }
        trace!(?lock, held, "lock key state updated");
        Some(lock)
    }

    /// Returns `true` if `lock` is currently held.
    pub fn is_held(&self, lock: LockKey) -> bool {
        match lock {
            LockKey::NumLock => self.num_lock,
            LockKey::CapsLock => self.caps_lock,
            LockKey::ShiftLock => self.shift_lock,
        }
    }

    /// The lock bits this tracker asserts.
    ///
    /// Caps Lock and Shift Lock both map to `LOCK`; Num Lock maps to `MOD2`.
    pub fn modifier_bits(&self) -> u32 {
        [LockKey::NumLock, LockKey::CapsLock, LockKey::ShiftLock]
            .into_iter()
            .filter(|&lock| self.is_held(lock))
            .fold(0, |bits, lock| bits | lock.modifier_bit())
    }

    /// Replaces the lock bits in a native modifier mask with this tracker's.
    pub fn apply_to(&self, native: ModifierMask) -> ModifierMask {
        native.without_lock_bits() | self.modifier_bits()
    }
}
