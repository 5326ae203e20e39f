//! A text-input fallback with a fixed answer.

use std::sync::Mutex;

use keyevent_core::NativeKeyEvent;

use crate::application::ports::{TextInputError, TextInputHandler};

/// Answers every offered event the same way and keeps a copy of each.
pub struct ScriptedTextInput {
    answer: Result<bool, TextInputError>,
    received: Mutex<Vec<NativeKeyEvent>>,
}

impl ScriptedTextInput {
    pub fn new(answer: Result<bool, TextInputError>) -> Self {
        Self {
            answer,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Consumes every event.
    pub fn accepting() -> Self {
        Self::new(Ok(true))
    }

    /// Declines every event.
    pub fn ignoring() -> Self {
        Self::new(Ok(false))
    }

    /// Fails on every event.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(Err(TextInputError::Rejected(reason.into())))
    }

    /// Events offered so far, oldest first.
    pub fn received(&self) -> Vec<NativeKeyEvent> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl TextInputHandler for ScriptedTextInput {
    fn filter_keypress(&self, event: &NativeKeyEvent) -> Result<bool, TextInputError> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
        self.answer.clone()
    }
}
