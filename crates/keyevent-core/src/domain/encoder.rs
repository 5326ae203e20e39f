//! Native key event → canonical key event.
//!
//! The encoder is a pure mapping.  It never fails: a keysym it does not know
//! still produces a record carrying whatever raw values were given.

use crate::domain::canonical::{CanonicalKeyEvent, KeyEventKind};
use crate::domain::lock_state::ModifierLockState;
use crate::domain::native_event::{NativeEventType, NativeKeyEvent};
use crate::keymap::gdk::{LockKey, ModifierMask};

/// Keymap tag sent by the Linux embedding.
pub const DEFAULT_KEYMAP: &str = "linux";

/// Toolkit tag sent by the GTK embedding.
pub const DEFAULT_TOOLKIT: &str = "gtk";

/// Builds [`CanonicalKeyEvent`]s with fixed platform and toolkit tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEventEncoder {
    keymap: String,
    toolkit: String,
}

impl KeyEventEncoder {
    /// Creates an encoder that stamps every record with `keymap` and `toolkit`.
    pub fn new(keymap: impl Into<String>, toolkit: impl Into<String>) -> Self {
        Self {
            keymap: keymap.into(),
            toolkit: toolkit.into(),
        }
    }

    pub fn keymap(&self) -> &str {
        &self.keymap
    }

    pub fn toolkit(&self) -> &str {
        &self.toolkit
    }

    /// Encodes `event` into a canonical record.
    ///
    /// `locks` must already have observed `event`.  For lock keys the lock
    /// bits of the native state are replaced with the tracker's; for every
    /// other key the native state is copied verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyevent_core::{KeyEventEncoder, ModifierLockState, NativeKeyEvent};
    ///
    /// let encoder = KeyEventEncoder::default();
    /// let locks = ModifierLockState::new();
    /// let event = NativeKeyEvent::press(0x41, 4).with_string("A");
    ///
    /// let record = encoder.encode(&event, &locks);
    /// assert_eq!(record.key_code, 65);
    /// assert_eq!(record.unicode_scalar_values, Some(65));
    /// ```
    pub fn encode(&self, event: &NativeKeyEvent, locks: &ModifierLockState) -> CanonicalKeyEvent {
        let kind = match event.event_type {
            NativeEventType::Press => KeyEventKind::KeyDown,
            NativeEventType::Release => KeyEventKind::KeyUp,
        };

        let native = ModifierMask(event.state);
        let modifiers = match LockKey::from_keyval(event.keyval) {
            Some(_) => locks.apply_to(native),
            None => native,
        };

        CanonicalKeyEvent {
            kind,
            keymap: self.keymap.clone(),
            scan_code: u32::from(event.hardware_keycode),
            toolkit: self.toolkit.clone(),
            key_code: event.keyval,
            modifiers: modifiers.0,
            unicode_scalar_values: event.string.chars().next().map(u32::from),
        }
    }
}

impl Default for KeyEventEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_KEYMAP, DEFAULT_TOOLKIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::gdk::{KEY_A, KEY_CAPS_LOCK, KEY_NUM_LOCK, KEY_RETURN};

    fn encode_observed(
        encoder: &KeyEventEncoder,
        locks: &mut ModifierLockState,
        event: &NativeKeyEvent,
    ) -> CanonicalKeyEvent {
        locks.observe(event);
        encoder.encode(event, locks)
    }

    #[test]
    fn test_press_and_release_kinds() {
        let encoder = KeyEventEncoder::default();
        let locks = ModifierLockState::new();

        let down = encoder.encode(&NativeKeyEvent::press(KEY_A, 4), &locks);
        let up = encoder.encode(&NativeKeyEvent::release(KEY_A, 4), &locks);

        assert_eq!(down.kind, KeyEventKind::KeyDown);
        assert_eq!(up.kind, KeyEventKind::KeyUp);
    }

    #[test]
    fn test_tags_come_from_the_encoder() {
        let encoder = KeyEventEncoder::new("android", "glfw");

        let record = encoder.encode(&NativeKeyEvent::press(KEY_A, 4), &ModifierLockState::new());

        assert_eq!(record.keymap, "android");
        assert_eq!(record.toolkit, "glfw");
    }

    #[test]
    fn test_codes_are_copied_verbatim() {
        // Arrange – a keysym no table knows about
        let event = NativeKeyEvent::press(0x1234_5678, 0xBEEF);

        // Act
        let record = KeyEventEncoder::default().encode(&event, &ModifierLockState::new());

        // Assert
        assert_eq!(record.key_code, 0x1234_5678);
        assert_eq!(record.scan_code, 0xBEEF);
    }

    #[test]
    fn test_non_lock_key_keeps_native_modifiers_exactly() {
        // Arrange – tracker holds Num Lock, native state has Shift + Lock + Mod2
        let encoder = KeyEventEncoder::default();
        let mut locks = ModifierLockState::new();
        locks.observe(&NativeKeyEvent::press(KEY_NUM_LOCK, 77));
        let native_state = ModifierMask::SHIFT | ModifierMask::LOCK | ModifierMask::MOD2;

        // Act
        let record = encode_observed(
            &encoder,
            &mut locks,
            &NativeKeyEvent::press(KEY_RETURN, 36).with_state(native_state),
        );

        // Assert
        assert_eq!(record.modifiers, native_state);
    }

    #[test]
    fn test_caps_lock_press_and_release_modifiers() {
        let encoder = KeyEventEncoder::default();
        let mut locks = ModifierLockState::new();
        let press = NativeKeyEvent::press(KEY_CAPS_LOCK, 4).with_state(0x10);

        let down = encode_observed(&encoder, &mut locks, &press);
        let up = encode_observed(&encoder, &mut locks, &press.into_release());

        assert_eq!(down.modifiers, 2);
        assert_eq!(up.modifiers, 0);
    }

    #[test]
    fn test_lock_key_keeps_unrelated_native_bits() {
        let encoder = KeyEventEncoder::default();
        let mut locks = ModifierLockState::new();

        let record = encode_observed(
            &encoder,
            &mut locks,
            &NativeKeyEvent::press(KEY_CAPS_LOCK, 4).with_state(ModifierMask::CONTROL),
        );

        assert_eq!(record.modifiers, ModifierMask::CONTROL | ModifierMask::LOCK);
    }

    #[test]
    fn test_unicode_is_first_character_only() {
        let record = KeyEventEncoder::default().encode(
            &NativeKeyEvent::press(KEY_A, 4).with_string("é!"),
            &ModifierLockState::new(),
        );

        assert_eq!(record.unicode_scalar_values, Some(0xE9));
    }

    #[test]
    fn test_empty_string_omits_unicode() {
        let record = KeyEventEncoder::default()
            .encode(&NativeKeyEvent::press(KEY_RETURN, 36), &ModifierLockState::new());

        assert_eq!(record.unicode_scalar_values, None);
    }
}
