//! Protocol module containing the key event message codec, reply
//! classification, and dispatch numbering.

pub mod codec;
pub mod reply;
pub mod sequence;

pub use codec::{
    decode_key_event, decode_reply, describe_value, encode_key_event, encode_reply, ProtocolError,
};
pub use reply::FrameworkVerdict;
pub use sequence::{DispatchId, DispatchSequence};
