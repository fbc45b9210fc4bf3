//! # Request Dispatch
//!
//! The server-side half of a DHCPv6 exchange: a read-only [`Request`] view
//! of an inbound packet, a [`Responser`] through which a handler declares
//! its reply, and a [`ServeMux`] that routes requests by message type.
//!
//! ```rust
//! use dhcp6::core::packet::Packet;
//! use dhcp6::core::types::MessageType;
//! use dhcp6::protocol::{Handler, Request, Response, Responser, ServeMux};
//!
//! let mux = ServeMux::new();
//! mux.handle_func(MessageType::SOLICIT, |w, _r| w.send(MessageType::ADVERTISE));
//!
//! let packet = Packet::new(MessageType::SOLICIT, &[0, 1, 2], None).unwrap();
//! let request = Request::parse(packet, None);
//! let mut response = Response::new(request.transaction_id());
//! mux.serve_dhcp(&mut response, &request);
//!
//! assert_eq!(response.message_type(), Some(MessageType::ADVERTISE));
//! ```

pub mod dispatcher;
pub mod request;

pub use dispatcher::{Handler, HandlerFunc, ServeMux};
pub use request::{Request, Response, Responser};
