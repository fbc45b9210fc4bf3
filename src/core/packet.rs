use crate::core::options::Options;
use crate::core::types::MessageType;
use crate::error::{FormatError, Result, ValidationError};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// Message type byte + transaction id.
pub const HEADER_SIZE: usize = 4;

/// Length of a transaction id on the wire.
pub const TRANSACTION_ID_LEN: usize = 3;

/// Opaque 3-byte correlator echoed between a request and its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransactionId(pub [u8; TRANSACTION_ID_LEN]);

impl TransactionId {
    pub fn as_bytes(&self) -> &[u8; TRANSACTION_ID_LEN] {
        &self.0
    }
}

impl From<[u8; TRANSACTION_ID_LEN]> for TransactionId {
    fn from(bytes: [u8; TRANSACTION_ID_LEN]) -> Self {
        TransactionId(bytes)
    }
}

impl TryFrom<&[u8]> for TransactionId {
    type Error = ValidationError;

    fn try_from(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        bytes
            .try_into()
            .map(TransactionId)
            .map_err(|_| ValidationError::InvalidTransactionId(bytes.len()))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// A single DHCPv6 client/server message.
///
/// ```text
/// [MessageType(1)] [TransactionID(3)] [Options(N)]
/// ```
///
/// The message type is not range-checked: unknown values decode and encode
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub message_type: MessageType,
    pub transaction_id: TransactionId,
    pub options: Options,
}

impl Packet {
    /// Build a packet from a raw transaction id, which must be exactly 3 bytes.
    pub fn new(
        message_type: MessageType,
        transaction_id: &[u8],
        options: Option<Options>,
    ) -> Result<Self> {
        let transaction_id = TransactionId::try_from(transaction_id)?;
        Ok(Self {
            message_type,
            transaction_id,
            options: options.unwrap_or_default(),
        })
    }

    /// Decode a complete message. Bytes that don't form whole options are an
    /// error, never silently dropped.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(FormatError::PacketTooShort(data.len()).into());
        }

        let message_type = MessageType(data[0]);
        let transaction_id = TransactionId([data[1], data[2], data[3]]);
        let options = Options::decode(&data[HEADER_SIZE..])?;

        Ok(Self {
            message_type,
            transaction_id,
            options,
        })
    }

    pub fn encode(&self) -> Result<Bytes> {
        let mut dst = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut dst)?;
        Ok(dst.freeze())
    }

    /// Append the encoded message to `dst`. On error `dst` is unchanged.
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<()> {
        let mut options = BytesMut::with_capacity(self.options.encoded_len());
        self.options.encode_into(&mut options)?;

        dst.reserve(HEADER_SIZE + options.len());
        dst.put_u8(self.message_type.0);
        dst.put_slice(self.transaction_id.as_bytes());
        dst.put_slice(&options);
        Ok(())
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.options.encoded_len()
    }
}
