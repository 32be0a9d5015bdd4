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

//! SETTINGS frame
//!
//! Each entry is 8 bytes. SPDY/2 implementations wrote the id/flags word in host (little-endian)
//! order, and the protocol kept that quirk:
//!
//! ```text
//! +----------------------------------+----------+
//! | id (24, little-endian)           | flags (8)|
//! +----------------------------------+----------+
//! | value (32, big-endian)                      |
//! +---------------------------------------------+
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::parser::{cursor::Cursor, ParseError, ParseResult};

const ENTRY_SIZE: usize = 8;

/// Setting flag: the sender asks the recipient to persist the value
pub const FLAG_PERSIST_VALUE: u8 = 0x01;
/// Setting flag: the value was previously persisted by the recipient
pub const FLAG_PERSISTED: u8 = 0x02;

/// Known setting ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingId {
    /// Expected upload bandwidth, kbps
    UploadBandwidth,
    /// Expected download bandwidth, kbps
    DownloadBandwidth,
    /// Expected round trip time, ms
    RoundTripTime,
    /// Concurrent streams the sender allows
    MaxConcurrentStreams,
    /// Current TCP congestion window, packets
    CurrentCwnd,
    /// Retransmission rate, percent
    DownloadRetransRate,
    /// Initial stream window size, bytes
    InitialWindowSize,
    /// Any id this crate has no name for
    Unknown(u32),
}

impl From<u32> for SettingId {
    fn from(value: u32) -> Self {
        match value {
            1 => Self::UploadBandwidth,
            2 => Self::DownloadBandwidth,
            3 => Self::RoundTripTime,
            4 => Self::MaxConcurrentStreams,
            5 => Self::CurrentCwnd,
            6 => Self::DownloadRetransRate,
            7 => Self::InitialWindowSize,
            other => Self::Unknown(other),
        }
    }
}

/// One SETTINGS entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// Setting id
    pub id: SettingId,
    /// Per-entry flags
    pub flags: u8,
    /// Setting value
    pub value: u32,
}

impl Setting {
    /// True if the entry carries [`FLAG_PERSISTED`]
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.flags & FLAG_PERSISTED != 0
    }
}

/// Decoded SETTINGS payload, entries in wire order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Entries
    pub entries: Vec<Setting>,
}

impl Settings {
    /// Value of the last entry with `id`
    pub fn get(&self, id: SettingId) -> Option<u32> {
        self.entries
            .iter()
            .rev()
            .find(|s| s.id == id)
            .map(|s| s.value)
    }
}

/// Decodes a SETTINGS payload.
///
/// Fails if the payload is shorter than the entry count prefix, or than the declared entries.
pub fn decode_settings(payload: &[u8]) -> ParseResult<Settings> {
    let mut cur = Cursor::new(payload);
    let declared = cur.read_u32()?;

    let available = cur.remaining() / ENTRY_SIZE;
    if u64::from(declared) > available as u64 {
        return Err(ParseError::Settings {
            declared,
            available,
        });
    }

    let mut entries = Vec::with_capacity(declared as usize);
    for _ in 0..declared {
        let word = LittleEndian::read_u32(cur.take(4)?);
        let value = cur.read_u32()?;
        entries.push(Setting {
            id: SettingId::from(word & 0x00ff_ffff),
            flags: (word >> 24) as u8,
            value,
        });
    }

    Ok(Settings { entries })
}
