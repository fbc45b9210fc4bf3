use crate::core::packet::Packet;
use crate::error::{FormatError, ProtocolError};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

/// Codec for DHCPv6 over UDP, one message per datagram.
///
/// The decoder always takes the whole buffer before decoding, so a malformed
/// datagram is discarded as a unit and never bleeds into the next one.
///
/// `UdpFramed` calls the decoder once per received datagram and then once
/// more on the drained buffer. The codec tracks which call it is on, so a
/// zero-length datagram is reported as too short instead of being mistaken
/// for the drained buffer.
#[derive(Debug, Clone, Default)]
pub struct Dhcp6Codec {
    drained: bool,
}

impl Dhcp6Codec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for Dhcp6Codec {
    type Item = Packet;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() && self.drained {
            self.drained = false;
            return Ok(None);
        }
        self.drained = true;

        if src.is_empty() {
            return Err(FormatError::PacketTooShort(0).into());
        }
        let datagram = src.split();
        Packet::decode(&datagram).map(Some)
    }
}

impl Encoder<Packet> for Dhcp6Codec {
    type Error = ProtocolError;

    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.encode_into(dst)
    }
}
