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

//! Frame header

use tracing::trace;

use super::{FrameType, FRAME_HEADER_SIZE};
use crate::parser::{cursor::Cursor, ensure_len, primitives::mask_stream_id, ParseResult};

const CONTROL_BIT: u8 = 0x80;
const VERSION_MASK: u16 = 0x7fff;

/// The fixed 8 bytes at the start of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameHeader {
    /// Control bit set
    Control {
        /// Protocol version, 15 bits
        version: u16,
        /// Raw control frame type, see [`FrameType`]
        frame_type: u16,
        /// Frame flags
        flags: u8,
        /// Payload length, 24 bits
        length: u32,
    },
    /// Control bit clear
    Data {
        /// Stream id, 31 bits
        stream_id: u32,
        /// Frame flags
        flags: u8,
        /// Payload length, 24 bits
        length: u32,
    },
}

impl FrameHeader {
    /// True for control frames
    #[inline]
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Control { .. })
    }

    /// Frame flags
    #[inline]
    pub fn flags(&self) -> u8 {
        match *self {
            Self::Control { flags, .. } | Self::Data { flags, .. } => flags,
        }
    }

    /// Payload length
    #[inline]
    pub fn length(&self) -> u32 {
        match *self {
            Self::Control { length, .. } | Self::Data { length, .. } => length,
        }
    }

    /// Control frame type, `None` for data frames
    #[inline]
    pub fn frame_type(&self) -> Option<FrameType> {
        match *self {
            Self::Control { frame_type, .. } => Some(FrameType::from(frame_type)),
            Self::Data { .. } => None,
        }
    }

    /// Stream id, `None` for control frames
    #[inline]
    pub fn stream_id(&self) -> Option<u32> {
        match *self {
            Self::Data { stream_id, .. } => Some(stream_id),
            Self::Control { .. } => None,
        }
    }
}

/// Decodes the 8-byte frame header at the start of `buf`.
///
/// Any bit pattern is accepted; whether the type and flags make sense together is up to the
/// caller. Bytes past the header are ignored.
///
/// # Example
/// ```
/// # use spdy_frame::parser::spdy::{decode_frame_header, FrameHeader};
/// # fn main() -> Result<(), spdy_frame::parser::ParseError> {
/// let header = decode_frame_header(&[0x00, 0x00, 0x00, 0x05, 0x01, 0x00, 0x01, 0x02])?;
/// assert_eq!(FrameHeader::Data { stream_id: 5, flags: 1, length: 258 }, header);
/// # Ok(())
/// # }
/// ```
pub fn decode_frame_header(buf: &[u8]) -> ParseResult<FrameHeader> {
    ensure_len(buf, FRAME_HEADER_SIZE)?;

    let mut cur = Cursor::new(buf);
    let header = if buf[0] & CONTROL_BIT == CONTROL_BIT {
        let version = cur.read_u16()? & VERSION_MASK;
        let frame_type = cur.read_u16()?;
        let flags = cur.read_u8()?;
        let length = cur.read_u24()?;
        FrameHeader::Control {
            version,
            frame_type,
            flags,
            length,
        }
    } else {
        let stream_id = mask_stream_id(cur.read_u32()?);
        let flags = cur.read_u8()?;
        let length = cur.read_u24()?;
        FrameHeader::Data {
            stream_id,
            flags,
            length,
        }
    };

    trace!(?header, "decoded frame header");
    Ok(header)
}
