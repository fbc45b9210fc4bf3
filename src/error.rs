//! # Error Types
//!
//! Error handling for DHCPv6 message processing.
//!
//! Decoding and encoding failures are split in two families:
//! - **Format errors**: the bytes on the wire are malformed (short header,
//!   truncated option header, payload shorter than its declared length)
//! - **Validation errors**: a caller-built value breaks an invariant
//!   (transaction id not exactly 3 bytes, option payload over 65535 bytes)
//!
//! A request with no registered handler is *not* an error; it is silently
//! dropped by the dispatcher.
//!
//! ## Example Usage
//! ```rust
//! use dhcp6::core::packet::Packet;
//! use dhcp6::error::{FormatError, ProtocolError};
//!
//! match Packet::decode(&[1, 0, 1]) {
//!     Err(ProtocolError::Format(FormatError::PacketTooShort(3))) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use crate::core::types::OptionCode;
use std::io;
use thiserror::Error;

/// Malformed bytes encountered while decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("packet too short: {0} bytes (need at least 4)")]
    PacketTooShort(usize),

    #[error("truncated option header at offset {offset}: {remaining} bytes remaining")]
    TruncatedOptionHeader { offset: usize, remaining: usize },

    #[error("option {code} declares {declared} bytes but only {available} remain")]
    TruncatedOptionPayload {
        code: OptionCode,
        declared: usize,
        available: usize,
    },

    #[error("malformed {code} option payload: {reason}")]
    InvalidOptionValue {
        code: OptionCode,
        reason: &'static str,
    },
}

/// A caller-constructed value violates a wire invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("transaction id must be exactly 3 bytes, got {0}")]
    InvalidTransactionId(usize),

    #[error("option {code} payload too long: {len} bytes (max 65535)")]
    OptionTooLong { code: OptionCode, len: usize },
}

// ProtocolError is the primary error type for all DHCPv6 operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Whether this error came from malformed wire bytes.
    pub fn is_format(&self) -> bool {
        matches!(self, ProtocolError::Format(_))
    }

    /// Whether this error came from an invalid caller-built value.
    pub fn is_validation(&self) -> bool {
        matches!(self, ProtocolError::Validation(_))
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
