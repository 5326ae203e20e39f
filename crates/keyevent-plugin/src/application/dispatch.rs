//! Dispatch arbitration: framework first, text input second.
//!
//! Every key event becomes one [`PendingDispatch`].  It is sent to the
//! framework, waits for the reply, optionally consults the text-input
//! fallback, and resolves by calling the completion callback exactly once.
//!
//! # State machine
//!
//! ```text
//!  Sent ──► AwaitingFramework ──┬─► FrameworkHandled ──► Resolved
//!                               ├─► AwaitingFallback ──► Resolved
//!                               └──────────────────────► Resolved
//! ```
//!
//! | Reply                         | Path                      | Verdict        |
//! |-------------------------------|---------------------------|----------------|
//! | `{"handled": true}`           | via `FrameworkHandled`    | `true`         |
//! | `{"handled": false}`          | via `AwaitingFallback`    | fallback's     |
//! | anything else (e.g. an echo)  | direct                    | `false`        |
//! | transport / decode error      | direct                    | `false`        |
//!
//! A `PendingDispatch` is consumed when it resolves, so it cannot complete
//! twice.  If a messenger drops the reply handler without calling it, the
//! dispatch resolves from `Drop` with [`MessengerError::ReplyDropped`].  If
//! the fallback panics, the panic keeps unwinding and the dispatch resolves
//! on the way out with [`TextInputError::Panicked`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use keyevent_core::protocol::{DispatchId, DispatchSequence};
use keyevent_core::{
    decode_reply, encode_key_event, CanonicalKeyEvent, FrameworkVerdict, NativeKeyEvent,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::ports::{
    BinaryMessenger, KeyEventResponseCallback, MessengerError, ReplyError, ResponseError,
    TextInputError, TextInputHandler,
};

/// Fault raised on the reply path after the dispatch has been resolved.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    /// The text-input fallback failed.  The dispatch resolved as unhandled.
    #[error("dispatch {id}: text input fallback failed: {source}")]
    Fallback {
        id: DispatchId,
        #[source]
        source: TextInputError,
    },
}

/// Lifecycle of one dispatched key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// The record has been encoded and is about to be sent.
    Sent,
    /// The messenger owns the reply handler.
    AwaitingFramework,
    /// The framework replied `handled: true`.
    FrameworkHandled,
    /// The framework replied `handled: false`; the fallback is running.
    AwaitingFallback,
    /// The completion callback has been invoked.
    Resolved { handled: bool },
}

impl DispatchState {
    /// Returns `true` if moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: DispatchState) -> bool {
        use DispatchState::*;
        matches!(
            (self, next),
            (Sent, AwaitingFramework)
                | (Sent, Resolved { .. })
                | (AwaitingFramework, FrameworkHandled)
                | (AwaitingFramework, AwaitingFallback)
                | (AwaitingFramework, Resolved { .. })
                | (FrameworkHandled, Resolved { handled: true })
                | (AwaitingFallback, Resolved { .. })
        )
    }
}

/// One in-flight key event.
pub struct PendingDispatch {
    id: DispatchId,
    native: NativeKeyEvent,
    text_input: Arc<dyn TextInputHandler>,
    on_complete: Option<KeyEventResponseCallback>,
    in_flight: Arc<AtomicUsize>,
    state: DispatchState,
}

impl PendingDispatch {
    fn new(
        id: DispatchId,
        native: NativeKeyEvent,
        text_input: Arc<dyn TextInputHandler>,
        on_complete: KeyEventResponseCallback,
        in_flight: Arc<AtomicUsize>,
    ) -> Self {
        in_flight.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            native,
            text_input,
            on_complete: Some(on_complete),
            in_flight,
            state: DispatchState::Sent,
        }
    }

    pub fn id(&self) -> DispatchId {
        self.id
    }

    fn advance(&mut self, next: DispatchState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal dispatch transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// Handles the messenger's answer and resolves the dispatch.
    ///
    /// Returns the final verdict.  The completion callback has always been
    /// invoked by the time this returns, including on `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Fallback`] if the framework declined the
    /// event and the text-input fallback failed.  The dispatch is resolved
    /// as unhandled before the error is returned.
    pub fn on_reply(
        mut self,
        reply: Result<Vec<u8>, MessengerError>,
    ) -> Result<bool, DispatchError> {
        let bytes = match reply {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(id = %self.id, "key event not delivered: {e}");
                self.resolve_with_error(ResponseError::Transport(e));
                return Ok(false);
            }
        };

        let body = match decode_reply(&bytes) {
            Ok(body) => body,
            Err(e) => {
                warn!(id = %self.id, "ignoring malformed key event reply: {e}");
                self.resolve_with_error(ResponseError::Malformed(e));
                return Ok(false);
            }
        };

        match FrameworkVerdict::from_reply(&body) {
            FrameworkVerdict::Handled => {
                self.advance(DispatchState::FrameworkHandled);
                self.resolve(&body, true);
                Ok(true)
            }
            FrameworkVerdict::NotHandled => {
                self.advance(DispatchState::AwaitingFallback);
                match self.text_input.filter_keypress(&self.native) {
                    Ok(handled) => {
                        debug!(id = %self.id, handled, "text input fallback answered");
                        self.resolve(&body, handled);
                        Ok(handled)
                    }
                    Err(e) => {
                        self.resolve_with_error(ResponseError::Fallback(e.clone()));
                        Err(DispatchError::Fallback {
                            id: self.id,
                            source: e,
                        })
                    }
                }
            }
            FrameworkVerdict::NoVerdict => {
                self.resolve(&body, false);
                Ok(false)
            }
        }
    }

    fn resolve(&mut self, body: &Value, handled: bool) {
        self.finish(Ok(body), handled);
    }

    fn resolve_with_error(&mut self, error: ResponseError) {
        self.finish(Err(&error), false);
    }

    fn finish(&mut self, reply: Result<&Value, &ResponseError>, handled: bool) {
        let Some(on_complete) = self.on_complete.take() else {
            return;
        };
        self.advance(DispatchState::Resolved { handled });
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
        debug!(id = %self.id, handled, "key event resolved");
        on_complete(reply, handled);
    }
}

impl Drop for PendingDispatch {
    fn drop(&mut self) {
        if self.on_complete.is_none() {
            return;
        }
        if std::thread::panicking() && self.state == DispatchState::AwaitingFallback {
            // Unwinding out of `filter_keypress`.
            warn!(id = %self.id, "text input fallback panicked");
            self.resolve_with_error(ResponseError::Fallback(TextInputError::Panicked));
        } else {
            warn!(id = %self.id, "reply handler dropped without a reply");
            self.resolve_with_error(ResponseError::Transport(MessengerError::ReplyDropped));
        }
    }
}

/// Sends encoded key events and resolves them as replies arrive.
pub struct DispatchArbiter {
    messenger: Arc<dyn BinaryMessenger>,
    text_input: Arc<dyn TextInputHandler>,
    on_complete: KeyEventResponseCallback,
    channel: String,
    sequence: DispatchSequence,
    in_flight: Arc<AtomicUsize>,
}

impl DispatchArbiter {
    pub fn new(
        messenger: Arc<dyn BinaryMessenger>,
        text_input: Arc<dyn TextInputHandler>,
        on_complete: KeyEventResponseCallback,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            messenger,
            text_input,
            on_complete,
            channel: channel.into(),
            sequence: DispatchSequence::new(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The channel every event is addressed to.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Number of dispatches sent but not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Number of dispatches started over the arbiter's lifetime.
    pub fn dispatched(&self) -> u64 {
        self.sequence.issued()
    }

    /// Sends `event` to the framework.
    ///
    /// Always returns `true`: the event is provisionally consumed and the
    /// verdict arrives later through the completion callback.  `native` is
    /// kept so the text-input fallback can see the original event.
    pub fn dispatch(&self, native: NativeKeyEvent, event: &CanonicalKeyEvent) -> bool {
        let mut pending = PendingDispatch::new(
            self.sequence.next(),
            native,
            Arc::clone(&self.text_input),
            Arc::clone(&self.on_complete),
            Arc::clone(&self.in_flight),
        );

        let body = match encode_key_event(event) {
            Ok(body) => body,
            Err(e) => {
                warn!(id = %pending.id(), "failed to encode key event: {e}");
                pending.resolve_with_error(ResponseError::Encode(e));
                return true;
            }
        };

        debug!(
            id = %pending.id(),
            channel = %self.channel,
            kind = event.kind.as_str(),
            key_code = event.key_code,
            "sending key event"
        );
        pending.advance(DispatchState::AwaitingFramework);
        self.messenger.send(
            &self.channel,
            body,
            Box::new(move |reply| {
                pending
                    .on_reply(reply)
                    .map(|_| ())
                    .map_err(|e| Box::new(e) as ReplyError)
            }),
        );
        true
    }
}
