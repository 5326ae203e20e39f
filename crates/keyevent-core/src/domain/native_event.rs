//! Raw key events as the toolkit reports them.
//!
//! [`NativeKeyEvent`] mirrors the fields of a GDK key event that matter to the
//! pipeline.  The plugin hands a clone of it to the text-input fallback so the
//! fallback sees the event exactly as the toolkit delivered it.

/// Whether the native event is a key press or a key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEventType {
    Press,
    Release,
}

/// A key event received from the windowing toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeKeyEvent {
    /// Press or release.
    pub event_type: NativeEventType,
    /// Toolkit timestamp in milliseconds.
    pub time: u32,
    /// Modifier state bitmask as reported by the toolkit (see
    /// [`crate::keymap::gdk::ModifierMask`]).
    pub state: u32,
    /// Logical key symbol (GDK keysym).
    pub keyval: u32,
    /// Text produced by the key, empty when the key produces none.
    pub string: String,
    /// Hardware scan code.
    pub hardware_keycode: u16,
    /// Keyboard layout group.
    pub group: u8,
    /// Whether the toolkit flagged the key as a modifier key.
    pub is_modifier: bool,
}

impl NativeKeyEvent {
    /// Creates a press event with no modifiers, no text, and time 0.
    pub fn press(keyval: u32, hardware_keycode: u16) -> Self {
        Self {
            event_type: NativeEventType::Press,
            time: 0,
            state: 0,
            keyval,
            string: String::new(),
            hardware_keycode,
            group: 0,
            is_modifier: false,
        }
    }

    /// Creates a release event with no modifiers, no text, and time 0.
    pub fn release(keyval: u32, hardware_keycode: u16) -> Self {
        Self {
            event_type: NativeEventType::Release,
            ..Self::press(keyval, hardware_keycode)
        }
    }

    /// Sets the modifier state.
    pub fn with_state(mut self, state: u32) -> Self {
        self.state = state;
        self
    }

    /// Sets the text representation.
    pub fn with_string(mut self, string: impl Into<String>) -> Self {
        self.string = string.into();
        self
    }

    /// Sets the timestamp.
    pub fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    /// Returns the same event as a release, keeping every other field.
    pub fn into_release(self) -> Self {
        Self {
            event_type: NativeEventType::Release,
            ..self
        }
    }

    pub fn is_press(&self) -> bool {
        self.event_type == NativeEventType::Press
    }
}
