//! # dhcp6
//!
//! DHCPv6 message model and server-side request multiplexer.
//!
//! ## Layers
//! - [`core`]: wire format (enumerations, option collection, packet, codec)
//! - [`protocol`]: request/response types and the message-type keyed [`ServeMux`]
//! - [`service`]: UDP server that decodes datagrams and sends declared replies
//! - [`config`], [`error`], [`utils`]: configuration, error taxonomy, logging and metrics
//!
//! ## Example
//! ```rust,no_run
//! use dhcp6::config::Config;
//! use dhcp6::core::types::{MessageType, OptionCode};
//! use dhcp6::protocol::{Request, Responser};
//! use dhcp6::{Server, ServeMux};
//!
//! # async fn run() -> dhcp6::Result<()> {
//! let config = Config::from_env()?;
//! dhcp6::utils::logging::init_logging(&config.logging)?;
//!
//! let mux = ServeMux::new();
//! mux.handle_func(MessageType::SOLICIT, |w: &mut dyn Responser, r: &Request| {
//!     if let Some(client_id) = r.options().client_id() {
//!         w.options().add(OptionCode::CLIENT_ID, client_id.clone());
//!     }
//!     w.send(MessageType::ADVERTISE);
//! });
//!
//! Server::new(config.server, mux).listen_and_serve().await
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod utils;

pub use crate::core::options::Options;
pub use crate::core::packet::{Packet, TransactionId};
pub use crate::core::types::{MessageType, OptionCode, Status};
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::{Handler, HandlerFunc, Request, Response, Responser, ServeMux};
pub use crate::service::Server;
