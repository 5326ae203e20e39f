//! KeyEventPlugin: the public entry point for native key events.
//!
//! The plugin owns the per-instance lock-key state, the encoder, and the
//! dispatch arbiter.  The toolkit calls [`KeyEventPlugin::send_key_event`] on
//! its event-loop thread for every key press and release.
//!
//! # Architecture
//!
//! The plugin depends only on the [`BinaryMessenger`] and
//! [`TextInputHandler`] ports.  Concrete implementations are injected at
//! construction time, so the whole pipeline runs in unit tests with an
//! in-process messenger.

use std::sync::Arc;

use keyevent_core::{KeyEventEncoder, ModifierLockState, NativeKeyEvent};
use tracing::trace;

use crate::application::dispatch::DispatchArbiter;
use crate::application::ports::{BinaryMessenger, KeyEventResponseCallback, TextInputHandler};

/// Channel the framework listens on for key events.
pub const DEFAULT_CHANNEL: &str = "flutter/keyevent";

/// One plugin instance per view.
pub struct KeyEventPlugin {
    encoder: KeyEventEncoder,
    locks: ModifierLockState,
    arbiter: DispatchArbiter,
}

impl KeyEventPlugin {
    /// Creates a plugin that sends key events on `channel`.
    ///
    /// `on_complete` is invoked once per event with the framework's reply and
    /// the final verdict.
    pub fn new(
        messenger: Arc<dyn BinaryMessenger>,
        text_input: Arc<dyn TextInputHandler>,
        on_complete: KeyEventResponseCallback,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            encoder: KeyEventEncoder::default(),
            locks: ModifierLockState::new(),
            arbiter: DispatchArbiter::new(messenger, text_input, on_complete, channel),
        }
    }

    /// Replaces the encoder, e.g. to stamp different keymap/toolkit tags.
    pub fn with_encoder(mut self, encoder: KeyEventEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Handles one native key event.
    ///
    /// Always returns `true`: the toolkit must stop propagating the event now.
    /// The verdict arrives later through the completion callback, and the
    /// event loop is free to deliver further events in the meantime.
    pub fn send_key_event(&mut self, event: &NativeKeyEvent) -> bool {
        if let Some(lock) = self.locks.observe(event) {
            trace!(?lock, "lock key event");
        }
        let record = self.encoder.encode(event, &self.locks);
        self.arbiter.dispatch(event.clone(), &record)
    }

    pub fn channel(&self) -> &str {
        self.arbiter.channel()
    }

    pub fn encoder(&self) -> &KeyEventEncoder {
        &self.encoder
    }

    pub fn lock_state(&self) -> &ModifierLockState {
        &self.locks
    }

    /// Number of events still waiting for a verdict.
    pub fn pending_events(&self) -> usize {
        self.arbiter.in_flight()
    }

    /// Number of events sent over the plugin's lifetime.
    pub fn events_sent(&self) -> u64 {
        self.arbiter.dispatched()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MessengerError, MockTextInputHandler, ReplyHandler, ResponseError,
    };
    use keyevent_core::keymap::gdk::{KEY_A, KEY_CAPS_LOCK};
    use keyevent_core::LockKey;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Echoes every message back synchronously.
    #[derive(Default)]
    struct EchoMessenger {
        channels: Mutex<Vec<String>>,
    }

    impl BinaryMessenger for EchoMessenger {
        fn send(&self, channel: &str, message: Vec<u8>, on_reply: ReplyHandler) {
            self.channels.lock().unwrap().push(channel.to_string());
            on_reply(Ok(message)).unwrap();
        }
    }

    /// Fails every send.
    struct ClosedMessenger;

    impl BinaryMessenger for ClosedMessenger {
        fn send(&self, _channel: &str, _message: Vec<u8>, on_reply: ReplyHandler) {
            on_reply(Err(MessengerError::Closed)).unwrap();
        }
    }

    fn collecting_plugin(
        messenger: Arc<dyn BinaryMessenger>,
        channel: &str,
    ) -> (KeyEventPlugin, Arc<Mutex<Vec<(Option<Value>, bool)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut text_input = MockTextInputHandler::new();
        text_input.expect_filter_keypress().times(0);
        let plugin = KeyEventPlugin::new(
            messenger,
            Arc::new(text_input),
            Arc::new(move |reply: Result<&Value, &ResponseError>, handled: bool| {
                sink.lock().unwrap().push((reply.ok().cloned(), handled));
            }),
            channel,
        );
        (plugin, seen)
    }

    #[test]
    fn test_send_key_event_returns_true_and_uses_channel() {
        // Arrange
        let messenger = Arc::new(EchoMessenger::default());
        let (mut plugin, seen) =
            collecting_plugin(Arc::clone(&messenger) as Arc<dyn BinaryMessenger>, "test/echo");

        // Act
        let propagate = plugin.send_key_event(&NativeKeyEvent::press(KEY_A, 4).with_string("A"));

        // Assert
        assert!(propagate);
        assert_eq!(*messenger.channels.lock().unwrap(), vec!["test/echo".to_string()]);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let echoed = seen[0].0.as_ref().expect("echo body");
        assert_eq!(echoed["unicodeScalarValues"], 65);
        assert!(!seen[0].1);
    }

    #[test]
    fn test_lock_state_follows_lock_key_events() {
        let (mut plugin, _) = collecting_plugin(Arc::new(EchoMessenger::default()), "test/echo");

        plugin.send_key_event(&NativeKeyEvent::press(KEY_CAPS_LOCK, 66));
        assert!(plugin.lock_state().is_held(LockKey::CapsLock));

        plugin.send_key_event(&NativeKeyEvent::release(KEY_CAPS_LOCK, 66));
        assert!(!plugin.lock_state().is_held(LockKey::CapsLock));
    }

    #[test]
    fn test_transport_failure_still_returns_true() {
        // Arrange
        let (mut plugin, seen) = collecting_plugin(Arc::new(ClosedMessenger), "test/closed");

        // Act
        let propagate = plugin.send_key_event(&NativeKeyEvent::press(KEY_A, 4));

        // Assert
        assert!(propagate);
        assert_eq!(*seen.lock().unwrap(), vec![(None::<Value>, false)]);
        assert_eq!(plugin.pending_events(), 0);
        assert_eq!(plugin.events_sent(), 1);
    }

    #[test]
    fn test_custom_encoder_tags_reach_the_wire() {
        let (plugin, seen) = collecting_plugin(Arc::new(EchoMessenger::default()), "test/echo");
        let mut plugin = plugin.with_encoder(KeyEventEncoder::new("linux", "wayland"));

        plugin.send_key_event(&NativeKeyEvent::press(KEY_A, 4));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0.as_ref().unwrap()["toolkit"], "wayland");
        assert_eq!(plugin.encoder().toolkit(), "wayland");
    }

    #[test]
    fn test_default_channel_name() {
        assert_eq!(DEFAULT_CHANNEL, "flutter/keyevent");
    }
}
