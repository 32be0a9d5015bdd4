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

//! SPDY/2 frame decoders
//!
//! ```text
//! Control frame                      Data frame
//! +-+--------------+---------------+ +-+------------------------------+
//! |1| version (15) | type (16)     | |0| stream id (31)              |
//! +-+--------------+---------------+ +-+------------------------------+
//! | flags (8) | length (24)        | | flags (8) | length (24)        |
//! +-----------+--------------------+ +-----------+--------------------+
//! | payload ...                      | payload ...                    |
//! ```
//!
//! [`decode_frame_header`] classifies a frame, after which the payload (the `length` bytes after
//! the header) is handed to the decoder for its type. [`FrameParser`] does that routing in one
//! call for callers that hold a complete frame.

use std::fmt::Display;

mod config;
mod frame;
mod goaway;
mod header;
mod header_block;
mod ping;
mod rst;
mod settings;
mod stream;
mod version;

pub use config::{HeaderBlockPolicy, ParserConfig};
pub use frame::{parse_frame, DataFrame, Frame, FrameParser, HeadersFrame, SynFrame};
pub use goaway::{decode_goaway, Goaway};
pub use header::{decode_frame_header, FrameHeader};
pub use header_block::{
    decode_header_block, decode_header_block_with, Header, HeaderBlock, HeaderBlockStatus,
};
pub use ping::{decode_ping, Ping};
pub use rst::{decode_rst_stream, Reset, RstStatus};
pub use settings::{
    decode_settings, Setting, SettingId, Settings, FLAG_PERSISTED, FLAG_PERSIST_VALUE,
};
pub use stream::{decode_headers_head, decode_syn_head, HeadersHead, SynHead, SynKind};
pub use version::Version;

/// Size of every frame header
pub const FRAME_HEADER_SIZE: usize = 8;

/// Largest payload length expressible in the 24-bit length field
pub const MAX_FRAME_LENGTH: u32 = 0x00ff_ffff;

/// Frame flag bits. Which bits apply depends on the frame type.
pub mod flags {
    /// Last frame sent on the stream by this endpoint (control and data frames)
    pub const FIN: u8 = 0x01;
    /// SYN_STREAM: the recipient may not reply on this stream
    pub const UNIDIRECTIONAL: u8 = 0x02;
    /// DATA: payload is compressed
    pub const COMPRESS: u8 = 0x02;

    /// Check if a specific flag is set.
    #[inline]
    pub const fn has_flag(flags: u8, flag: u8) -> bool {
        flags & flag != 0
    }
}

/// Control frame types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Opens a stream
    SynStream,
    /// Accepts a stream
    SynReply,
    /// Aborts a stream
    RstStream,
    /// Connection settings
    Settings,
    /// Ignored by the recipient
    Noop,
    /// Round-trip measurement
    Ping,
    /// Connection shutdown
    Goaway,
    /// Additional headers for a stream
    Headers,
    /// Flow control window increase
    WindowUpdate,
    /// Any type this crate has no name for
    Unknown(u16),
}

impl From<u16> for FrameType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::SynStream,
            2 => Self::SynReply,
            3 => Self::RstStream,
            4 => Self::Settings,
            5 => Self::Noop,
            6 => Self::Ping,
            7 => Self::Goaway,
            8 => Self::Headers,
            9 => Self::WindowUpdate,
            other => Self::Unknown(other),
        }
    }
}

impl From<FrameType> for u16 {
    fn from(value: FrameType) -> Self {
        match value {
            FrameType::SynStream => 1,
            FrameType::SynReply => 2,
            FrameType::RstStream => 3,
            FrameType::Settings => 4,
            FrameType::Noop => 5,
            FrameType::Ping => 6,
            FrameType::Goaway => 7,
            FrameType::Headers => 8,
            FrameType::WindowUpdate => 9,
            FrameType::Unknown(other) => other,
        }
    }
}

impl Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SynStream => f.write_str("SYN_STREAM"),
            Self::SynReply => f.write_str("SYN_REPLY"),
            Self::RstStream => f.write_str("RST_STREAM"),
            Self::Settings => f.write_str("SETTINGS"),
            Self::Noop => f.write_str("NOOP"),
            Self::Ping => f.write_str("PING"),
            Self::Goaway => f.write_str("GOAWAY"),
            Self::Headers => f.write_str("HEADERS"),
            Self::WindowUpdate => f.write_str("WINDOW_UPDATE"),
            Self::Unknown(t) => write!(f, "UNKNOWN({t})"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frame_type_from_known_values() {
        assert_eq!(FrameType::SynStream, FrameType::from(1u16));
        assert_eq!(FrameType::SynReply, FrameType::from(2u16));
        assert_eq!(FrameType::RstStream, FrameType::from(3u16));
        assert_eq!(FrameType::Goaway, FrameType::from(7u16));
        assert_eq!(FrameType::WindowUpdate, FrameType::from(9u16));
    }

    #[test]
    fn frame_type_keeps_unknown_value() {
        assert_eq!(FrameType::Unknown(0xf000), FrameType::from(0xf000u16));
        assert_eq!(0xf000u16, u16::from(FrameType::Unknown(0xf000)));
    }

    #[test]
    fn frame_type_converts_back_to_wire_value() {
        for t in 0..=10u16 {
            assert_eq!(t, u16::from(FrameType::from(t)));
        }
    }

    #[test]
    fn frame_type_display() {
        assert_eq!("SYN_STREAM", FrameType::SynStream.to_string());
        assert_eq!("UNKNOWN(12)", FrameType::Unknown(12).to_string());
    }

    #[test]
    fn flags_has_flag() {
        assert!(flags::has_flag(0x03, flags::FIN));
        assert!(flags::has_flag(0x03, flags::UNIDIRECTIONAL));
        assert!(!flags::has_flag(0x02, flags::FIN));
    }
}
