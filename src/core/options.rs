//! # Option Collection
//!
//! An ordered multimap of option code to raw payload, with the TLV encoding
//! used inside every DHCPv6 message:
//!
//! ```text
//! [Code(2)] [Length(2)] [Payload(Length)]   repeated, big-endian
//! ```
//!
//! Entries keep their insertion order across the whole collection, so
//! `decode` followed by `encode` reproduces the original byte run. A code may
//! appear any number of times; `get` returns every occurrence in order.
//! Payloads are never interpreted here (see [`crate::core::values`]).

use crate::core::types::OptionCode;
use crate::error::{FormatError, Result, ValidationError};
use bytes::{BufMut, Bytes, BytesMut};

/// Size of an option header: 2-byte code + 2-byte length.
pub const OPTION_HEADER_LEN: usize = 4;

/// Largest payload a single option can carry.
pub const MAX_OPTION_LEN: usize = u16::MAX as usize;

/// Ordered collection of DHCPv6 options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: Vec<(OptionCode, Bytes)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one more occurrence of `code`. Existing entries are kept.
    pub fn add(&mut self, code: OptionCode, payload: impl Into<Bytes>) {
        self.entries.push((code, payload.into()));
    }

    /// All payloads stored under `code`, in insertion order.
    pub fn get(&self, code: OptionCode) -> Vec<&Bytes> {
        self.entries
            .iter()
            .filter(|(c, _)| *c == code)
            .map(|(_, payload)| payload)
            .collect()
    }

    /// First payload stored under `code`.
    pub fn get_one(&self, code: OptionCode) -> Option<&Bytes> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, payload)| payload)
    }

    pub fn has(&self, code: OptionCode) -> bool {
        self.entries.iter().any(|(c, _)| *c == code)
    }

    /// Remove every occurrence of `code`, returning how many were dropped.
    pub fn remove(&mut self, code: OptionCode) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(c, _)| *c != code);
        before - self.entries.len()
    }

    /// Number of entries, counting repeated codes separately.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(code, payload)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionCode, &Bytes)> + '_ {
        self.entries.iter().map(|(code, payload)| (*code, payload))
    }

    /// Size of the encoded option run in bytes.
    pub fn encoded_len(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, payload)| OPTION_HEADER_LEN + payload.len())
            .sum()
    }

    /// Decode a complete option run. The whole input must be consumed.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut offset = 0;

        while offset < buf.len() {
            let remaining = buf.len() - offset;
            if remaining < OPTION_HEADER_LEN {
                return Err(FormatError::TruncatedOptionHeader { offset, remaining }.into());
            }

            let code = OptionCode(u16::from_be_bytes([buf[offset], buf[offset + 1]]));
            let declared = u16::from_be_bytes([buf[offset + 2], buf[offset + 3]]) as usize;
            offset += OPTION_HEADER_LEN;

            let available = buf.len() - offset;
            if available < declared {
                return Err(FormatError::TruncatedOptionPayload {
                    code,
                    declared,
                    available,
                }
                .into());
            }

            entries.push((code, Bytes::copy_from_slice(&buf[offset..offset + declared])));
            offset += declared;
        }

        Ok(Self { entries })
    }

    /// Encode all entries in insertion order.
    pub fn encode(&self) -> Result<Bytes> {
        let mut dst = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut dst)?;
        Ok(dst.freeze())
    }

    /// Append the encoded option run to `dst`.
    ///
    /// Every payload length is checked before anything is written, so `dst`
    /// is left untouched on error.
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<()> {
        self.validate()?;

        dst.reserve(self.encoded_len());
        for (code, payload) in &self.entries {
            dst.put_u16(code.0);
            dst.put_u16(payload.len() as u16);
            dst.put_slice(payload);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        match self
            .entries
            .iter()
            .find(|(_, payload)| payload.len() > MAX_OPTION_LEN)
        {
            Some((code, payload)) => Err(ValidationError::OptionTooLong {
                code: *code,
                len: payload.len(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl FromIterator<(OptionCode, Bytes)> for Options {
    fn from_iter<I: IntoIterator<Item = (OptionCode, Bytes)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_decode_empty() {
        let options = Options::decode(&[]).expect("empty run is valid");
        assert!(options.is_empty());
        assert_eq!(options.encoded_len(), 0);
    }

    #[test]
    fn test_decode_preserves_order_across_codes() {
        let bytes = [
            0x00, 0x01, 0x00, 0x01, 0xAA, // client id
            0x00, 0x08, 0x00, 0x02, 0x00, 0x10, // elapsed time
            0x00, 0x01, 0x00, 0x01, 0xBB, // client id again
        ];
        let options = Options::decode(&bytes).unwrap();

        let codes: Vec<_> = options.iter().map(|(code, _)| code).collect();
        assert_eq!(
            codes,
            vec![
                OptionCode::CLIENT_ID,
                OptionCode::ELAPSED_TIME,
                OptionCode::CLIENT_ID
            ]
        );
        assert_eq!(
            options.get(OptionCode::CLIENT_ID),
            vec![&Bytes::from_static(&[0xAA]), &Bytes::from_static(&[0xBB])]
        );
        assert_eq!(options.encode().unwrap().as_ref(), &bytes[..]);
    }

    #[test]
    fn test_zero_length_payload() {
        let options = Options::decode(&[0x00, 0x0E, 0x00, 0x00]).unwrap();
        assert!(options.has(OptionCode::RAPID_COMMIT));
        assert_eq!(options.get_one(OptionCode::RAPID_COMMIT).unwrap().len(), 0);
    }

    #[test]
    fn test_truncated_header_rejected() {
        let err = Options::decode(&[0x00, 0x01, 0x00]).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Format(FormatError::TruncatedOptionHeader {
                offset: 0,
                remaining: 3
            })
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let err = Options::decode(&[0x00, 0x02, 0x00, 0x05, 1, 2, 3]).unwrap_err();
        match err {
            ProtocolError::Format(FormatError::TruncatedOptionPayload {
                code,
                declared,
                available,
            }) => {
                assert_eq!(code, OptionCode::SERVER_ID);
                assert_eq!(declared, 5);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_garbage_after_valid_option_rejected() {
        let err = Options::decode(&[0x00, 0x0E, 0x00, 0x00, 0xFF]).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_absent_code_is_empty_not_error() {
        let options = Options::new();
        assert!(options.get(OptionCode::SERVER_ID).is_empty());
        assert!(options.get_one(OptionCode::SERVER_ID).is_none());
        assert!(!options.has(OptionCode::SERVER_ID));
    }

    #[test]
    fn test_oversized_payload_rejected_on_encode() {
        let mut options = Options::new();
        options.add(OptionCode::CLIENT_ID, vec![1u8; 4]);
        options.add(OptionCode::VENDOR_OPTS, vec![0u8; MAX_OPTION_LEN + 1]);

        let mut dst = BytesMut::new();
        let err = options.encode_into(&mut dst).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Validation(ValidationError::OptionTooLong {
                code: OptionCode::VENDOR_OPTS,
                len: 65536
            })
        ));
        assert!(dst.is_empty(), "nothing should be written on error");
    }

    #[test]
    fn test_max_payload_accepted() {
        let mut options = Options::new();
        options.add(OptionCode::VENDOR_OPTS, vec![0x5A; MAX_OPTION_LEN]);
        let encoded = options.encode().unwrap();
        assert_eq!(&encoded[..4], &[0x00, 0x11, 0xFF, 0xFF]);

        let decoded = Options::decode(&encoded).unwrap();
        assert_eq!(decoded, options);
    }

    #[test]
    fn test_remove() {
        let mut options = Options::new();
        options.add(OptionCode::CLIENT_ID, vec![1]);
        options.add(OptionCode::SERVER_ID, vec![2]);
        options.add(OptionCode::CLIENT_ID, vec![3]);

        assert_eq!(options.remove(OptionCode::CLIENT_ID), 2);
        assert_eq!(options.len(), 1);
        assert!(options.has(OptionCode::SERVER_ID));
    }
}
