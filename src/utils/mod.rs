//! # Utility Modules
//!
//! Supporting utilities for the DHCPv6 server.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` setup driven by [`LoggingConfig`](crate::config::LoggingConfig)
//! - **Metrics**: Atomic per-server counters

pub mod logging;
pub mod metrics;
