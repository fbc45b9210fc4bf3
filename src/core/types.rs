//! # Protocol Enumerations
//!
//! Message types, option codes and status codes from RFC 3315 and the IANA
//! DHCPv6 parameters registry.
//!
//! Each enumeration is a plain integer newtype with named constants for the
//! assigned values. Unassigned and reserved values stay representable so that
//! unknown messages and options round-trip untouched; interpreting them is up
//! to the application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A DHCPv6 message type (RFC 3315, Section 5.3), one byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageType(pub u8);

impl MessageType {
    // RFC 3315
    pub const SOLICIT: MessageType = MessageType(1);
    pub const ADVERTISE: MessageType = MessageType(2);
    pub const REQUEST: MessageType = MessageType(3);
    pub const CONFIRM: MessageType = MessageType(4);
    pub const RENEW: MessageType = MessageType(5);
    pub const REBIND: MessageType = MessageType(6);
    pub const REPLY: MessageType = MessageType(7);
    pub const RELEASE: MessageType = MessageType(8);
    pub const DECLINE: MessageType = MessageType(9);
    pub const RECONFIGURE: MessageType = MessageType(10);
    pub const INFORMATION_REQUEST: MessageType = MessageType(11);
    pub const RELAY_FORW: MessageType = MessageType(12);
    pub const RELAY_REPL: MessageType = MessageType(13);

    // RFC 5007
    pub const LEASEQUERY: MessageType = MessageType(14);
    pub const LEASEQUERY_REPLY: MessageType = MessageType(15);

    // RFC 5460
    pub const LEASEQUERY_DONE: MessageType = MessageType(16);
    pub const LEASEQUERY_DATA: MessageType = MessageType(17);

    // RFC 6977
    pub const RECONFIGURE_REQUEST: MessageType = MessageType(18);
    pub const RECONFIGURE_REPLY: MessageType = MessageType(19);

    // RFC 7341
    pub const DHCPV4_QUERY: MessageType = MessageType(20);
    pub const DHCPV4_RESPONSE: MessageType = MessageType(21);

    /// Registry name for assigned values.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            1 => "Solicit",
            2 => "Advertise",
            3 => "Request",
            4 => "Confirm",
            5 => "Renew",
            6 => "Rebind",
            7 => "Reply",
            8 => "Release",
            9 => "Decline",
            10 => "Reconfigure",
            11 => "Information-request",
            12 => "Relay-forw",
            13 => "Relay-repl",
            14 => "Leasequery",
            15 => "Leasequery-reply",
            16 => "Leasequery-done",
            17 => "Leasequery-data",
            18 => "Reconfigure-request",
            19 => "Reconfigure-reply",
            20 => "DHCPv4-query",
            21 => "DHCPv4-response",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        MessageType(value)
    }
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self {
        value.0
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "MessageType({})", self.0),
        }
    }
}

/// A DHCPv6 option code (RFC 3315, Section 22), two bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionCode(pub u16);

impl OptionCode {
    pub const CLIENT_ID: OptionCode = OptionCode(1);
    pub const SERVER_ID: OptionCode = OptionCode(2);
    pub const IA_NA: OptionCode = OptionCode(3);
    pub const IA_TA: OptionCode = OptionCode(4);
    pub const IA_ADDR: OptionCode = OptionCode(5);
    pub const ORO: OptionCode = OptionCode(6);
    pub const PREFERENCE: OptionCode = OptionCode(7);
    pub const ELAPSED_TIME: OptionCode = OptionCode(8);
    pub const RELAY_MSG: OptionCode = OptionCode(9);
    // 10 is unassigned
    pub const AUTH: OptionCode = OptionCode(11);
    pub const UNICAST: OptionCode = OptionCode(12);
    pub const STATUS_CODE: OptionCode = OptionCode(13);
    pub const RAPID_COMMIT: OptionCode = OptionCode(14);
    pub const USER_CLASS: OptionCode = OptionCode(15);
    pub const VENDOR_CLASS: OptionCode = OptionCode(16);
    pub const VENDOR_OPTS: OptionCode = OptionCode(17);
    pub const INTERFACE_ID: OptionCode = OptionCode(18);
    pub const RECONF_MSG: OptionCode = OptionCode(19);
    pub const RECONF_ACCEPT: OptionCode = OptionCode(20);

    /// Registry name for assigned values.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            1 => "OPTION_CLIENTID",
            2 => "OPTION_SERVERID",
            3 => "OPTION_IA_NA",
            4 => "OPTION_IA_TA",
            5 => "OPTION_IAADDR",
            6 => "OPTION_ORO",
            7 => "OPTION_PREFERENCE",
            8 => "OPTION_ELAPSED_TIME",
            9 => "OPTION_RELAY_MSG",
            11 => "OPTION_AUTH",
            12 => "OPTION_UNICAST",
            13 => "OPTION_STATUS_CODE",
            14 => "OPTION_RAPID_COMMIT",
            15 => "OPTION_USER_CLASS",
            16 => "OPTION_VENDOR_CLASS",
            17 => "OPTION_VENDOR_OPTS",
            18 => "OPTION_INTERFACE_ID",
            19 => "OPTION_RECONF_MSG",
            20 => "OPTION_RECONF_ACCEPT",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u16> for OptionCode {
    fn from(value: u16) -> Self {
        OptionCode(value)
    }
}

impl From<OptionCode> for u16 {
    fn from(value: OptionCode) -> Self {
        value.0
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "OptionCode({})", self.0),
        }
    }
}

/// A DHCPv6 status code (RFC 3315, Section 24.4), carried in the
/// status code option of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(pub u16);

impl Status {
    pub const SUCCESS: Status = Status(0);
    pub const UNSPEC_FAIL: Status = Status(1);
    pub const NO_ADDRS_AVAIL: Status = Status(2);
    pub const NO_BINDING: Status = Status(3);
    pub const NOT_ON_LINK: Status = Status(4);
    pub const USE_MULTICAST: Status = Status(5);

    /// Registry name for assigned values.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "Success",
            1 => "UnspecFail",
            2 => "NoAddrsAvail",
            3 => "NoBinding",
            4 => "NotOnLink",
            5 => "UseMulticast",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u16> for Status {
    fn from(value: u16) -> Self {
        Status(value)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Status({})", self.0),
        }
    }
}
