//! Integration tests for the encoding pipeline.
//!
//! These tests run native events through the tracker, the encoder, and the
//! codec together and compare the message body with the strings the
//! framework has always received for the same key strokes.

use keyevent_core::{
    decode_reply, describe_value, encode_key_event,
    keymap::gdk::{KEY_A, KEY_CAPS_LOCK, KEY_NUM_LOCK, KEY_SHIFT_LOCK},
    KeyEventEncoder, ModifierLockState, NativeKeyEvent,
};

/// Observes, encodes, serialises, and renders one event.
fn render(locks: &mut ModifierLockState, event: &NativeKeyEvent) -> String {
    let encoder = KeyEventEncoder::default();
    locks.observe(event);
    let record = encoder.encode(event, locks);
    let bytes = encode_key_event(&record).expect("encode must succeed");
    describe_value(&decode_reply(&bytes).expect("body must be valid JSON"))
}

fn lock_fixture(keyval: u32, down_expected: &str, up_expected: &str) {
    let mut locks = ModifierLockState::new();
    // Lock fixtures carry native state 0x10 and no text.
    let press = NativeKeyEvent::press(keyval, 0x04)
        .with_state(0x10)
        .with_time(12345);

    assert_eq!(render(&mut locks, &press), down_expected);

    let release = press.into_release().with_time(12346);
    assert_eq!(render(&mut locks, &release), up_expected);
}

#[test]
fn test_letter_a_press_and_release() {
    let mut locks = ModifierLockState::new();
    let press = NativeKeyEvent::press(KEY_A, 0x04)
        .with_string("A")
        .with_time(12345);

    assert_eq!(
        render(&mut locks, &press),
        "{type: keydown, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65, \
         modifiers: 0, unicodeScalarValues: 65}"
    );

    let release = press.into_release().with_time(23456);
    assert_eq!(
        render(&mut locks, &release),
        "{type: keyup, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65, \
         modifiers: 0, unicodeScalarValues: 65}"
    );
}

#[test]
fn test_num_lock_press_and_release() {
    lock_fixture(
        KEY_NUM_LOCK,
        "{type: keydown, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65407, modifiers: 16}",
        "{type: keyup, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65407, modifiers: 0}",
    );
}

#[test]
fn test_caps_lock_press_and_release() {
    lock_fixture(
        KEY_CAPS_LOCK,
        "{type: keydown, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65509, modifiers: 2}",
        "{type: keyup, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65509, modifiers: 0}",
    );
}

#[test]
fn test_shift_lock_press_and_release() {
    lock_fixture(
        KEY_SHIFT_LOCK,
        "{type: keydown, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65510, modifiers: 2}",
        "{type: keyup, keymap: linux, scanCode: 4, toolkit: gtk, keyCode: 65510, modifiers: 0}",
    );
}

#[test]
fn test_repeated_lock_cycles_toggle_one_bit_each_time() {
    let mut locks = ModifierLockState::new();
    let encoder = KeyEventEncoder::default();
    let press = NativeKeyEvent::press(KEY_NUM_LOCK, 0x4D);

    for _ in 0..3 {
        locks.observe(&press);
        assert_eq!(encoder.encode(&press, &locks).modifiers, 16);

        let release = press.clone().into_release();
        locks.observe(&release);
        assert_eq!(encoder.encode(&release, &locks).modifiers, 0);
    }
}

#[test]
fn test_non_lock_keys_never_carry_tracker_bits() {
    // Arrange – hold Caps Lock, then type with assorted native states
    let mut locks = ModifierLockState::new();
    let encoder = KeyEventEncoder::default();
    locks.observe(&NativeKeyEvent::press(KEY_CAPS_LOCK, 0x42));

    for state in [0u32, 0x1, 0x4, 0x10, 0x8 | 0x4, 0x0400_0000] {
        let event = NativeKeyEvent::press(KEY_A, 0x26).with_state(state);

        // Act
        locks.observe(&event);
        let record = encoder.encode(&event, &locks);

        // Assert
        assert_eq!(record.modifiers, state, "state 0x{state:X} must pass through");
    }
}
