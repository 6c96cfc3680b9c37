//! Email input: the raw message adapter and header normalization.

pub mod message;
pub mod normalize;

pub use message::InboundEmail;
pub use normalize::{decode_subject, parse_sent_date};
