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

//! PING frame

use crate::parser::{cursor::Cursor, ensure_len, ParseResult};

/// Decoded PING payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ping {
    /// Opaque id, echoed back by the recipient
    pub id: u32,
}

impl Ping {
    /// Clients send odd ids and servers even ones, so a ping with our own parity is a reply.
    pub fn is_reply(&self, is_server: bool) -> bool {
        (self.id % 2 == 0) == is_server
    }
}

/// Decodes a PING payload of at least 4 bytes.
pub fn decode_ping(payload: &[u8]) -> ParseResult<Ping> {
    ensure_len(payload, 4)?;

    Ok(Ping {
        id: Cursor::new(payload).read_u32()?,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_id_without_masking() {
        assert_eq!(Ok(Ping { id: 0x8000_0001 }), decode_ping(&[0x80, 0, 0, 1]));
    }

    #[test]
    fn reply_parity() {
        let ping = Ping { id: 2 };
        assert!(ping.is_reply(true));
        assert!(!ping.is_reply(false));
        assert!(Ping { id: 1 }.is_reply(false));
    }

    #[test]
    fn short_payload_fails() {
        assert!(decode_ping(&[0, 1]).is_err());
    }
}
