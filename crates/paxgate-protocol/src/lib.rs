//! Wire-protocol core for the people-counter sensor gateway.
//!
//! Sensors speak a binary/text hybrid framing: a 3-byte head marker, an
//! ASCII payload of `<tag>value</tag>` pairs, and a 3-byte foot marker.
//! This crate owns frame delimiting, tag parsing, message classification,
//! the two message handlers, and byte-exact response encoding. Persistence
//! and device configuration are injected through the `paxgate-domain`
//! repository traits.

mod decoder;
mod encoder;
mod error;
mod frame;
mod message;
mod service;
mod tag;

pub use decoder::*;
pub use encoder::*;
pub use error::*;
pub use frame::*;
pub use message::*;
pub use service::*;
pub use tag::*;
