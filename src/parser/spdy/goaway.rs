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

//! GOAWAY frame

use crate::parser::{cursor::Cursor, ensure_len, primitives::mask_stream_id, ParseResult};

/// Decoded GOAWAY payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goaway {
    /// Last stream id the sender accepted, 31 bits
    pub last_good_stream_id: u32,
}

/// Decodes a GOAWAY payload of at least 4 bytes.
pub fn decode_goaway(payload: &[u8]) -> ParseResult<Goaway> {
    ensure_len(payload, 4)?;

    Ok(Goaway {
        last_good_stream_id: mask_stream_id(Cursor::new(payload).read_u32()?),
    })
}
