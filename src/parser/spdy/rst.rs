// Copyright 2022 Ryan Seipp
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! RST_STREAM frame and its status codes

use std::fmt::Display;

use crate::parser::{cursor::Cursor, ensure_len, primitives::mask_stream_id, ParseResult};

/// RST_STREAM status codes defined by SPDY/2
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RstStatus {
    /// Generic error, used when nothing more specific applies
    ProtocolError = 1,
    /// Frame received for a stream that is not active
    InvalidStream = 2,
    /// Stream refused before any processing happened
    RefusedStream = 3,
    /// Recipient does not support the SPDY version requested
    UnsupportedVersion = 4,
    /// Stream is no longer needed
    Cancel = 5,
    /// Failure not related to the protocol
    InternalError = 6,
    /// Peer violated the flow control protocol
    FlowControlError = 7,
}

impl TryFrom<u32> for RstStatus {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ProtocolError),
            2 => Ok(Self::InvalidStream),
            3 => Ok(Self::RefusedStream),
            4 => Ok(Self::UnsupportedVersion),
            5 => Ok(Self::Cancel),
            6 => Ok(Self::InternalError),
            7 => Ok(Self::FlowControlError),
            other => Err(other),
        }
    }
}

impl Display for RstStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ProtocolError => "PROTOCOL_ERROR",
            Self::InvalidStream => "INVALID_STREAM",
            Self::RefusedStream => "REFUSED_STREAM",
            Self::UnsupportedVersion => "UNSUPPORTED_VERSION",
            Self::Cancel => "CANCEL",
            Self::InternalError => "INTERNAL_ERROR",
            Self::FlowControlError => "FLOW_CONTROL_ERROR",
        })
    }
}

/// Decoded RST_STREAM payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reset {
    /// Stream being reset, 31 bits
    pub stream_id: u32,
    /// Raw status code
    pub status_code: u32,
}

impl Reset {
    /// Status code as a known [`RstStatus`], if it is one
    pub fn status(&self) -> Option<RstStatus> {
        RstStatus::try_from(self.status_code).ok()
    }
}

/// Decodes a RST_STREAM payload of at least 8 bytes.
pub fn decode_rst_stream(payload: &[u8]) -> ParseResult<Reset> {
    ensure_len(payload, 8)?;

    let mut cur = Cursor::new(payload);
    let stream_id = mask_stream_id(cur.read_u32()?);
    let status_code = cur.read_u32()?;

    Ok(Reset {
        stream_id,
        status_code,
    })
}
