//! Ports: the interfaces the dispatch pipeline calls into.
//!
//! The plugin never talks to a concrete transport or text-input widget.  It
//! calls the traits in this module, and infrastructure adapters (or test
//! doubles) implement them.

use std::sync::Arc;

use keyevent_core::{NativeKeyEvent, ProtocolError};
use serde_json::Value;
use thiserror::Error;

// ── Messenger ─────────────────────────────────────────────────────────────────

/// Errors reported by a [`BinaryMessenger`] instead of a reply.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MessengerError {
    /// Nothing on the other side listens on the channel.
    #[error("no handler registered for channel {channel:?}")]
    NoHandler { channel: String },

    /// The messenger has shut down.
    #[error("messenger is closed")]
    Closed,

    /// The reply handler was dropped without being invoked.
    #[error("reply was dropped before it was delivered")]
    ReplyDropped,

    /// The remote side failed while producing a reply.
    #[error("responder failed: {0}")]
    Responder(String),
}

/// Error a reply handler hands back to the messenger that invoked it.
pub type ReplyError = Box<dyn std::error::Error + Send + Sync>;

/// Invoked exactly once with the raw reply bytes or a transport error.
pub type ReplyHandler =
    Box<dyn FnOnce(Result<Vec<u8>, MessengerError>) -> Result<(), ReplyError> + Send>;

/// A request/response channel to the framework.
///
/// Implementations must invoke `on_reply` exactly once.  They may invoke it
/// from inside `send` when the send fails immediately; a successful send
/// must deliver the reply later without blocking the caller.  An error
/// returned by `on_reply` is a fault of the reply path and must be reported
/// by the messenger, not discarded.
pub trait BinaryMessenger: Send + Sync {
    /// Sends `message` on `channel`.
    fn send(&self, channel: &str, message: Vec<u8>, on_reply: ReplyHandler);
}

// ── Text input fallback ───────────────────────────────────────────────────────

/// Errors raised by a [`TextInputHandler`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TextInputError {
    #[error("text input rejected the event: {0}")]
    Rejected(String),

    /// `filter_keypress` panicked.  Only produced while the panic unwinds.
    #[error("text input handler panicked")]
    Panicked,
}

/// The local consumer tried when the framework declines an event.
///
/// Called synchronously from the reply path; it must answer without waiting
/// on further asynchronous work.
#[cfg_attr(test, mockall::automock)]
pub trait TextInputHandler: Send + Sync {
    /// Offers `event` to the text input.  Returns `Ok(true)` if it consumed it.
    fn filter_keypress(&self, event: &NativeKeyEvent) -> Result<bool, TextInputError>;
}

// ── Completion ────────────────────────────────────────────────────────────────

/// Why a dispatch resolved without a usable reply body.
#[derive(Debug, Error, PartialEq)]
pub enum ResponseError {
    /// The messenger could not deliver the request or its reply.
    #[error("transport failure: {0}")]
    Transport(#[from] MessengerError),

    /// The reply bytes were not valid JSON.
    #[error("malformed reply: {0}")]
    Malformed(ProtocolError),

    /// The key event record could not be serialised.
    #[error("could not encode key event: {0}")]
    Encode(ProtocolError),

    /// The framework declined the event and the fallback failed, including
    /// by panicking ([`TextInputError::Panicked`]).
    #[error("text input fallback failed: {0}")]
    Fallback(#[from] TextInputError),
}

/// Receives the reply body (or why there is none) and the final verdict.
///
/// Called exactly once per dispatched key event.
pub type KeyEventResponseCallback =
    Arc<dyn Fn(Result<&Value, &ResponseError>, bool) + Send + Sync>;
