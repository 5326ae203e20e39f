//! Messenger adapters.
//!
//! The production messenger belongs to the embedding engine and is injected
//! through [`crate::application::BinaryMessenger`].  This module provides an
//! in-process implementation that answers with registered responders, used
//! by the replay binary and the integration tests.

pub mod loopback;

pub use loopback::{ChannelResponder, EchoResponder, FixedVerdictResponder, LoopbackMessenger};
