//! keyevent-plugin library crate.
//!
//! Intercepts native key events, sends their canonical encoding to the
//! framework over a binary messenger, and arbitrates between the framework
//! and a local text-input fallback to produce one handled/unhandled verdict
//! per event.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Toolkit event loop
//!         │ NativeKeyEvent
//!         ▼
//! [keyevent-plugin]
//!   ├── application/
//!   │     ├── ports            BinaryMessenger, TextInputHandler, error types
//!   │     ├── dispatch         PendingDispatch state machine, DispatchArbiter
//!   │     └── key_event_plugin KeyEventPlugin (the public entry point)
//!   └── infrastructure/
//!         ├── messenger/       In-process loopback messenger + responders
//!         ├── text_input/      Scripted text-input fallback
//!         └── storage/         TOML config and replay scripts
//! ```
//!
//! # Two answers per event
//!
//! [`application::KeyEventPlugin::send_key_event`] answers the toolkit
//! immediately with `true` ("consumed for now") so the event loop never
//! waits.  The real verdict arrives later through the completion callback,
//! once the framework (and, if it declined, the fallback) has decided.

/// Application layer: ports, dispatch state machine, plugin entry point.
pub mod application;

/// Infrastructure layer: messenger, fallback, and configuration adapters.
pub mod infrastructure;
