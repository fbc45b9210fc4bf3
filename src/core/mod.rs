//! # Core Protocol Components
//!
//! DHCPv6 message representation and wire format.
//!
//! ## Components
//! - **Types**: message type, option code and status enumerations
//! - **Options**: ordered TLV option collection
//! - **Packet**: message type + transaction id + options
//! - **Values**: typed accessors for frequently used options
//! - **Codec**: Tokio codec for one-message-per-datagram framing
//!
//! ## Wire Format
//! ```text
//! [MessageType(1)] [TransactionID(3)] { [Code(2)] [Length(2)] [Payload(Length)] }*
//! ```
//!
//! All integers are big-endian. Decoding is strictly bounds-checked and
//! returns a [`FormatError`](crate::error::FormatError) instead of panicking.

pub mod codec;
pub mod options;
pub mod packet;
pub mod types;
pub mod values;
