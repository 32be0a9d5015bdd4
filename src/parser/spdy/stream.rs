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

//! SYN_STREAM, SYN_REPLY and HEADERS frame heads
//!
//! Only the fixed part in front of the header block is decoded here. The returned
//! `header_block_offset` tells the caller where to slice the payload for
//! [`decode_header_block`](super::decode_header_block).

use super::flags::{has_flag, FIN, UNIDIRECTIONAL};
use crate::parser::{cursor::Cursor, ensure_len, primitives::mask_stream_id, ParseResult};

/// Which of the two stream-opening frames is being decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynKind {
    /// SYN_STREAM
    Stream,
    /// SYN_REPLY
    Reply,
}

impl SynKind {
    /// Offset of the header block within the payload
    #[inline]
    pub const fn header_block_offset(self) -> u16 {
        match self {
            Self::Stream => 10,
            Self::Reply => 6,
        }
    }
}

/// Fixed part of a SYN_STREAM or SYN_REPLY payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynHead {
    /// Frame kind
    pub kind: SynKind,
    /// Stream id, 31 bits
    pub stream_id: u32,
    /// Stream this one is associated with. Always 0 for SYN_REPLY.
    pub associated_stream_id: u32,
    /// Priority, 0 (highest) to 3. Always 0 for SYN_REPLY.
    pub priority: u8,
    /// FIN flag
    pub fin: bool,
    /// UNIDIRECTIONAL flag
    pub unidirectional: bool,
    /// Where the header block starts within the payload
    pub header_block_offset: u16,
}

/// Decodes the fixed part of a SYN_STREAM or SYN_REPLY payload.
///
/// `payload` is everything after the 8-byte frame header and must hold at least
/// `kind.header_block_offset()` bytes.
///
/// # Example
/// ```
/// # use spdy_frame::parser::spdy::{decode_syn_head, SynKind};
/// # fn main() -> Result<(), spdy_frame::parser::ParseError> {
/// let payload = [0, 0, 0, 1, 0, 0, 0, 0, 0x40, 0, 0, 0];
/// let head = decode_syn_head(SynKind::Stream, 0x01, &payload)?;
/// assert_eq!(1, head.stream_id);
/// assert_eq!(1, head.priority);
/// assert!(head.fin);
/// assert_eq!(10, head.header_block_offset);
/// # Ok(())
/// # }
/// ```
pub fn decode_syn_head(kind: SynKind, flags: u8, payload: &[u8]) -> ParseResult<SynHead> {
    let header_block_offset = kind.header_block_offset();
    ensure_len(payload, header_block_offset as usize)?;

    let mut cur = Cursor::new(payload);
    let stream_id = mask_stream_id(cur.read_u32()?);
    let (associated_stream_id, priority) = match kind {
        SynKind::Stream => {
            let associated = mask_stream_id(cur.read_u32()?);
            // SPDY/2 priority is the top two bits of this byte
            let priority = cur.read_u8()? >> 6;
            (associated, priority)
        }
        SynKind::Reply => (0, 0),
    };

    Ok(SynHead {
        kind,
        stream_id,
        associated_stream_id,
        priority,
        fin: has_flag(flags, FIN),
        unidirectional: has_flag(flags, UNIDIRECTIONAL),
        header_block_offset,
    })
}

/// Fixed part of a HEADERS payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadersHead {
    /// Stream id, 31 bits
    pub stream_id: u32,
    /// FIN flag
    pub fin: bool,
    /// Where the header block starts within the payload
    pub header_block_offset: u16,
}

/// Decodes the stream id and reserved bytes at the start of a HEADERS payload.
pub fn decode_headers_head(flags: u8, payload: &[u8]) -> ParseResult<HeadersHead> {
    const OFFSET: u16 = 6;
    ensure_len(payload, OFFSET as usize)?;

    let stream_id = mask_stream_id(Cursor::new(payload).read_u32()?);
    Ok(HeadersHead {
        stream_id,
        fin: has_flag(flags, FIN),
        header_block_offset: OFFSET,
    })
}
