//! Typed accessors for the handful of options a server reads or writes on
//! nearly every exchange. Everything else stays raw bytes in [`Options`].

use crate::core::options::Options;
use crate::core::types::{OptionCode, Status};
use crate::error::{FormatError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::time::Duration;

/// Payload of the status code option: a status followed by a UTF-8 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCode {
    pub status: Status,
    pub message: String,
}

impl StatusCode {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < 2 {
            return Err(invalid(OptionCode::STATUS_CODE, "shorter than 2 bytes"));
        }
        let status = Status(u16::from_be_bytes([payload[0], payload[1]]));
        let message = std::str::from_utf8(&payload[2..])
            .map_err(|_| invalid(OptionCode::STATUS_CODE, "message is not UTF-8"))?
            .to_string();
        Ok(Self { status, message })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(2 + self.message.len());
        buf.put_u16(self.status.0);
        buf.put_slice(self.message.as_bytes());
        buf.freeze()
    }
}

fn invalid(code: OptionCode, reason: &'static str) -> crate::error::ProtocolError {
    FormatError::InvalidOptionValue { code, reason }.into()
}

impl Options {
    /// DUID of the client, if present.
    pub fn client_id(&self) -> Option<&Bytes> {
        self.get_one(OptionCode::CLIENT_ID)
    }

    /// DUID of the server, if present.
    pub fn server_id(&self) -> Option<&Bytes> {
        self.get_one(OptionCode::SERVER_ID)
    }

    pub fn status_code(&self) -> Result<Option<StatusCode>> {
        self.get_one(OptionCode::STATUS_CODE)
            .map(|payload| StatusCode::decode(payload))
            .transpose()
    }

    pub fn add_status_code(&mut self, status: Status, message: impl Into<String>) {
        self.add(
            OptionCode::STATUS_CODE,
            StatusCode::new(status, message).encode(),
        );
    }

    /// Time since the client began the exchange. The wire unit is
    /// hundredths of a second.
    pub fn elapsed_time(&self) -> Result<Option<Duration>> {
        let Some(payload) = self.get_one(OptionCode::ELAPSED_TIME) else {
            return Ok(None);
        };
        let raw = <[u8; 2]>::try_from(&payload[..])
            .map_err(|_| invalid(OptionCode::ELAPSED_TIME, "length must be 2"))?;
        let hundredths = u16::from_be_bytes(raw) as u64;
        Ok(Some(Duration::from_millis(hundredths * 10)))
    }

    /// Saturates at 0xFFFF hundredths of a second.
    pub fn add_elapsed_time(&mut self, elapsed: Duration) {
        let hundredths = (elapsed.as_millis() / 10).min(u16::MAX as u128) as u16;
        self.add(
            OptionCode::ELAPSED_TIME,
            Bytes::copy_from_slice(&hundredths.to_be_bytes()),
        );
    }

    /// Option codes the client asked for (option request option).
    pub fn option_request(&self) -> Result<Option<Vec<OptionCode>>> {
        let Some(payload) = self.get_one(OptionCode::ORO) else {
            return Ok(None);
        };
        if payload.len() % 2 != 0 {
            return Err(invalid(OptionCode::ORO, "length must be a multiple of 2"));
        }
        let codes = payload
            .chunks_exact(2)
            .map(|pair| OptionCode(u16::from_be_bytes([pair[0], pair[1]])))
            .collect();
        Ok(Some(codes))
    }

    pub fn add_option_request(&mut self, codes: &[OptionCode]) {
        let mut buf = BytesMut::with_capacity(codes.len() * 2);
        for code in codes {
            buf.put_u16(code.0);
        }
        self.add(OptionCode::ORO, buf.freeze());
    }

    pub fn preference(&self) -> Result<Option<u8>> {
        match self.get_one(OptionCode::PREFERENCE) {
            None => Ok(None),
            Some(payload) if payload.len() == 1 => Ok(Some(payload[0])),
            Some(_) => Err(invalid(OptionCode::PREFERENCE, "length must be 1")),
        }
    }

    pub fn add_preference(&mut self, preference: u8) {
        self.add(OptionCode::PREFERENCE, Bytes::copy_from_slice(&[preference]));
    }

    pub fn rapid_commit(&self) -> bool {
        self.has(OptionCode::RAPID_COMMIT)
    }
}
