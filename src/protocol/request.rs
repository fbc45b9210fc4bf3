use crate::core::options::Options;
use crate::core::packet::{Packet, TransactionId};
use crate::core::types::MessageType;
use crate::error::Result;
use std::net::SocketAddr;

/// An inbound message as seen by a handler.
///
/// Built once per received packet and handed to exactly one dispatch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    message_type: MessageType,
    transaction_id: TransactionId,
    options: Options,
    length: usize,
    remote_addr: Option<SocketAddr>,
}

impl Request {
    /// Wrap a decoded packet together with the address it came from.
    pub fn parse(packet: Packet, remote_addr: Option<SocketAddr>) -> Self {
        let length = packet.encoded_len();
        Self {
            message_type: packet.message_type,
            transaction_id: packet.transaction_id,
            options: packet.options,
            length,
            remote_addr,
        }
    }

    pub fn from_bytes(data: &[u8], remote_addr: Option<SocketAddr>) -> Result<Self> {
        let packet = Packet::decode(data)?;
        Ok(Self {
            length: data.len(),
            ..Self::parse(packet, remote_addr)
        })
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Size of the request on the wire in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }
}

/// Write side of a dispatch: how a handler declares its reply.
pub trait Responser {
    /// Declare the reply message type. Calling it again replaces the
    /// previous value.
    fn send(&mut self, message_type: MessageType);

    /// Options to attach to the reply.
    fn options(&mut self) -> &mut Options;
}

/// Reply accumulator paired 1:1 with a [`Request`].
///
/// Starts with no message type; if the handler never calls
/// [`Responser::send`] nothing is transmitted at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    transaction_id: TransactionId,
    message_type: Option<MessageType>,
    options: Options,
}

impl Response {
    /// A reply that will echo `transaction_id`.
    pub fn new(transaction_id: TransactionId) -> Self {
        Self {
            transaction_id,
            message_type: None,
            options: Options::new(),
        }
    }

    /// Reply type declared by the handler, `None` for "no reply".
    pub fn message_type(&self) -> Option<MessageType> {
        self.message_type
    }

    pub fn reply_options(&self) -> &Options {
        &self.options
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    /// Whether a reply should be sent.
    pub fn has_reply(&self) -> bool {
        self.message_type.is_some()
    }

    /// The outgoing packet, or `None` when no reply was declared.
    pub fn into_packet(self) -> Option<Packet> {
        let message_type = self.message_type?;
        Some(Packet {
            message_type,
            transaction_id: self.transaction_id,
            options: self.options,
        })
    }
}

impl Responser for Response {
    fn send(&mut self, message_type: MessageType) {
        self.message_type = Some(message_type);
    }

    fn options(&mut self) -> &mut Options {
        &mut self.options
    }
}
