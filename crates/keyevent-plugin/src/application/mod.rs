//! Application layer for the key event plugin.
//!
//! The application layer owns the request lifecycle of every key event.  It
//! depends only on the ports defined in [`ports`] and on `keyevent-core`;
//! concrete messengers and fallbacks are injected at construction time.

pub mod dispatch;
pub mod key_event_plugin;
pub mod ports;

pub use dispatch::{DispatchArbiter, DispatchError, DispatchState, PendingDispatch};
pub use key_event_plugin::KeyEventPlugin;
pub use ports::{
    BinaryMessenger, KeyEventResponseCallback, MessengerError, ReplyError, ReplyHandler,
    ResponseError, TextInputError, TextInputHandler,
};
