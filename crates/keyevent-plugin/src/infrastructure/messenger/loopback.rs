//! In-process messenger with per-channel responders.
//!
//! [`LoopbackMessenger`] plays the framework's side of the channel.  Each
//! `send` spawns a task on the tokio runtime it was built with; the task
//! looks up the responder for the channel, produces the reply bytes, and
//! invokes the reply handler.  `send` itself never blocks and never calls the
//! reply handler, so replies always arrive later, on a later turn of the
//! runtime.
//!
//! # Why a runtime handle? (for beginners)
//!
//! On a current-thread runtime the spawned reply task only runs when the
//! task that called `send` yields (for example while awaiting a completion).
//! That reproduces the toolkit model exactly: one thread, the event handler
//! returns immediately, and replies are processed when the loop comes round.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use keyevent_core::protocol::encode_reply;
use serde_json::json;
use tokio::runtime::Handle;
use tracing::{debug, error};

use crate::application::ports::{BinaryMessenger, MessengerError, ReplyHandler};

/// Produces the framework's reply for one message.
pub trait ChannelResponder: Send + Sync {
    fn respond(&self, message: &[u8]) -> Result<Vec<u8>, MessengerError>;
}

/// Replies with the request body, unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoResponder;

impl ChannelResponder for EchoResponder {
    fn respond(&self, message: &[u8]) -> Result<Vec<u8>, MessengerError> {
        Ok(message.to_vec())
    }
}

/// Replies `{"handled": <handled>}` to every message.
#[derive(Debug, Clone, Copy)]
pub struct FixedVerdictResponder {
    handled: bool,
}

impl FixedVerdictResponder {
    pub fn new(handled: bool) -> Self {
        Self { handled }
    }

    pub fn handled() -> Self {
        Self::new(true)
    }

    pub fn not_handled() -> Self {
        Self::new(false)
    }
}

impl ChannelResponder for FixedVerdictResponder {
    fn respond(&self, _message: &[u8]) -> Result<Vec<u8>, MessengerError> {
        encode_reply(&json!({ "handled": self.handled }))
            .map_err(|e| MessengerError::Responder(e.to_string()))
    }
}

/// Messenger that answers from in-process responders on a tokio runtime.
pub struct LoopbackMessenger {
    runtime: Handle,
    responders: RwLock<HashMap<String, Arc<dyn ChannelResponder>>>,
    reply_delay: Duration,
}

impl LoopbackMessenger {
    /// Creates a messenger whose replies run on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            responders: RwLock::new(HashMap::new()),
            reply_delay: Duration::ZERO,
        }
    }

    /// Delays every reply by `delay`.
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Installs `responder` for `channel`, replacing any previous one.
    pub fn set_responder(&self, channel: impl Into<String>, responder: Arc<dyn ChannelResponder>) {
        let mut responders = self
            .responders
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        responders.insert(channel.into(), responder);
    }

    /// Removes the responder for `channel`.  Later sends fail with
    /// [`MessengerError::NoHandler`].
    pub fn remove_responder(&self, channel: &str) {
        let mut responders = self
            .responders
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        responders.remove(channel);
    }

    fn responder(&self, channel: &str) -> Option<Arc<dyn ChannelResponder>> {
        let responders = self
            .responders
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        responders.get(channel).cloned()
    }
}

impl BinaryMessenger for LoopbackMessenger {
    fn send(&self, channel: &str, message: Vec<u8>, on_reply: ReplyHandler) {
        let responder = self.responder(channel);
        let channel = channel.to_string();
        let delay = self.reply_delay;

        self.runtime.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let reply = match responder {
                Some(responder) => responder.respond(&message),
                None => Err(MessengerError::NoHandler {
                    channel: channel.clone(),
                }),
            };
            debug!(%channel, ok = reply.is_ok(), "delivering reply");
            if let Err(e) = on_reply(reply) {
                error!(%channel, "reply handler failed: {e}");
            }
        });
    }
}
