//! # Service Layer
//!
//! Network-facing server built on the core message model and the
//! request multiplexer.

pub mod server;

pub use server::Server;
