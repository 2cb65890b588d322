//! Encode/decode services sitting between the HTTP layer and the crypto core.
//!
//! [`encode`] produces both a base64 and an encrypted representation of a
//! payload; [`decode`] reverses either, with the base64 representation taking
//! priority when both are supplied. Round-trip invariant: decoding an encode
//! output for platform P with P's current secret reproduces the payload
//! exactly.

pub mod decode;
pub mod encode;

pub use decode::decode;
pub use encode::encode;
