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

//! Whole-frame dispatch

use tracing::{debug, trace};

use super::flags::{has_flag, COMPRESS, FIN};
use super::{
    decode_frame_header, decode_goaway, decode_header_block_with, decode_headers_head,
    decode_ping, decode_rst_stream, decode_settings, decode_syn_head, FrameHeader, FrameType,
    Goaway, HeaderBlock, HeadersHead, ParserConfig, Ping, Reset, Settings, SynHead, SynKind,
    Version, FRAME_HEADER_SIZE,
};
use crate::parser::{ensure_len, ParseError, ParseResult};

/// DATA frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFrame<'buf> {
    /// Stream id, 31 bits
    pub stream_id: u32,
    /// FIN flag
    pub fin: bool,
    /// COMPRESS flag
    pub compressed: bool,
    /// Stream data
    pub payload: &'buf [u8],
}

/// SYN_STREAM or SYN_REPLY frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynFrame<'buf> {
    /// Fixed part of the payload
    pub head: SynHead,
    /// Header block as received. Inflate it, then decode with [`FrameParser::header_block`].
    pub header_block: &'buf [u8],
}

/// HEADERS frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadersFrame<'buf> {
    /// Fixed part of the payload
    pub head: HeadersHead,
    /// Header block as received
    pub header_block: &'buf [u8],
}

/// A complete frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<'buf> {
    /// DATA
    Data(DataFrame<'buf>),
    /// SYN_STREAM
    SynStream(SynFrame<'buf>),
    /// SYN_REPLY
    SynReply(SynFrame<'buf>),
    /// RST_STREAM
    RstStream(Reset),
    /// SETTINGS
    Settings(Settings),
    /// NOOP
    Noop,
    /// PING
    Ping(Ping),
    /// GOAWAY
    Goaway(Goaway),
    /// HEADERS
    Headers(HeadersFrame<'buf>),
    /// Control frame whose payload is not decoded, WINDOW_UPDATE included
    Unknown {
        /// Frame header
        header: FrameHeader,
        /// Raw payload
        payload: &'buf [u8],
    },
}

impl Frame<'_> {
    /// Stream the frame belongs to, `None` for connection-level frames
    pub fn stream_id(&self) -> Option<u32> {
        match self {
            Self::Data(data) => Some(data.stream_id),
            Self::SynStream(syn) | Self::SynReply(syn) => Some(syn.head.stream_id),
            Self::RstStream(reset) => Some(reset.stream_id),
            Self::Headers(headers) => Some(headers.head.stream_id),
            _ => None,
        }
    }
}

/// Decodes complete frames and routes each payload to the decoder for its type
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    config: ParserConfig,
}

impl FrameParser {
    /// Creates a parser with `config`
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses the frame at the start of `buf`, returning it with the number of bytes it occupied.
    ///
    /// `buf` must hold the whole frame; bytes after it are left for the next call.
    ///
    /// # Example
    /// ```
    /// # use spdy_frame::parser::spdy::{Frame, FrameParser, Goaway};
    /// # fn main() -> Result<(), spdy_frame::parser::ParseError> {
    /// let parser = FrameParser::default();
    /// let buf = [0x80, 0x02, 0x00, 0x07, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x03];
    /// let (frame, consumed) = parser.parse(&buf)?;
    /// assert_eq!(Frame::Goaway(Goaway { last_good_stream_id: 3 }), frame);
    /// assert_eq!(12, consumed);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse<'b>(&self, buf: &'b [u8]) -> ParseResult<(Frame<'b>, usize)> {
        let header = decode_frame_header(buf)?;

        let length = header.length();
        if length > self.config.max_frame_length {
            return Err(ParseError::FrameTooLarge {
                length,
                limit: self.config.max_frame_length,
            });
        }

        let consumed = FRAME_HEADER_SIZE + length as usize;
        ensure_len(buf, consumed)?;
        let payload = &buf[FRAME_HEADER_SIZE..consumed];

        let frame = match header {
            FrameHeader::Data {
                stream_id, flags, ..
            } => Frame::Data(DataFrame {
                stream_id,
                fin: has_flag(flags, FIN),
                compressed: has_flag(flags, COMPRESS),
                payload,
            }),
            FrameHeader::Control {
                version,
                frame_type,
                flags,
                ..
            } => {
                if !Version::try_from(version)?.is_supported() {
                    return Err(ParseError::UnsupportedVersion(version));
                }
                Self::parse_control(header, FrameType::from(frame_type), flags, payload)?
            }
        };

        trace!(?frame, consumed, "parsed frame");
        Ok((frame, consumed))
    }

    /// Decodes an inflated header block using the configured policy
    pub fn header_block(&self, buf: &[u8]) -> ParseResult<HeaderBlock> {
        decode_header_block_with(buf, self.config.header_block_policy)
    }

    fn parse_control<'b>(
        header: FrameHeader,
        frame_type: FrameType,
        flags: u8,
        payload: &'b [u8],
    ) -> ParseResult<Frame<'b>> {
        match frame_type {
            FrameType::SynStream => {
                Self::parse_syn(SynKind::Stream, flags, payload).map(Frame::SynStream)
            }
            FrameType::SynReply => {
                Self::parse_syn(SynKind::Reply, flags, payload).map(Frame::SynReply)
            }
            FrameType::RstStream => decode_rst_stream(payload).map(Frame::RstStream),
            FrameType::Settings => decode_settings(payload).map(Frame::Settings),
            FrameType::Noop => Ok(Frame::Noop),
            FrameType::Ping => decode_ping(payload).map(Frame::Ping),
            FrameType::Goaway => decode_goaway(payload).map(Frame::Goaway),
            FrameType::Headers => {
                let head = decode_headers_head(flags, payload)?;
                Ok(Frame::Headers(HeadersFrame {
                    head,
                    header_block: &payload[usize::from(head.header_block_offset)..],
                }))
            }
            FrameType::WindowUpdate | FrameType::Unknown(_) => {
                debug!(%frame_type, "payload not decoded");
                Ok(Frame::Unknown { header, payload })
            }
        }
    }

    fn parse_syn(kind: SynKind, flags: u8, payload: &[u8]) -> ParseResult<SynFrame<'_>> {
        let head = decode_syn_head(kind, flags, payload)?;
        Ok(SynFrame {
            head,
            header_block: &payload[usize::from(head.header_block_offset)..],
        })
    }
}

/// Parses the frame at the start of `buf` with the default configuration.
pub fn parse_frame(buf: &[u8]) -> ParseResult<(Frame<'_>, usize)> {
    FrameParser::default().parse(buf)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::spdy::{HeaderBlockPolicy, RstStatus};

    fn control(frame_type: u16, flags: u8, payload: &[u8]) -> Vec<u8> {
        let mut buf = vec![0x80, 0x02];
        buf.extend_from_slice(&frame_type.to_be_bytes());
        buf.push(flags);
        buf.extend_from_slice(&(payload.len() as u32).to_be_bytes()[1..]);
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn parses_data_frame() {
        let buf = [0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x00, 0x03, b'a', b'b', b'c'];
        let (frame, consumed) = parse_frame(&buf).unwrap();
        assert_eq!(
            Frame::Data(DataFrame {
                stream_id: 1,
                fin: true,
                compressed: false,
                payload: b"abc"
            }),
            frame
        );
        assert_eq!(11, consumed);
        assert_eq!(Some(1), frame.stream_id());
    }

    #[test]
    fn parses_syn_stream_and_exposes_header_block() {
        let mut payload = vec![0, 0, 0, 1, 0, 0, 0, 0, 0x40, 0];
        payload.extend_from_slice(b"\x00\x01\x00\x04host\x00\x07example");
        let buf = control(1, 0x01, &payload);

        let parser = FrameParser::default();
        let (frame, _) = parser.parse(&buf).unwrap();
        let Frame::SynStream(syn) = frame else {
            panic!("expected SYN_STREAM");
        };
        assert_eq!(1, syn.head.stream_id);
        assert_eq!(1, syn.head.priority);
        assert!(syn.head.fin);

        let headers = parser.header_block(syn.header_block).unwrap();
        assert_eq!(Some("example"), headers.get("host"));
    }

    #[test]
    fn parses_syn_reply() {
        let buf = control(2, 0, &[0, 0, 0, 4, 0, 0, 0, 0]);
        let (frame, _) = parse_frame(&buf).unwrap();
        let Frame::SynReply(syn) = frame else {
            panic!("expected SYN_REPLY");
        };
        assert_eq!(4, syn.head.stream_id);
        assert_eq!(&[0, 0], syn.header_block);
    }

    #[test]
    fn parses_rst_stream() {
        let buf = control(3, 0, &[0, 0, 0, 9, 0, 0, 0, 3]);
        let (frame, _) = parse_frame(&buf).unwrap();
        let Frame::RstStream(reset) = frame else {
            panic!("expected RST_STREAM");
        };
        assert_eq!(9, reset.stream_id);
        assert_eq!(Some(RstStatus::RefusedStream), reset.status());
    }

    #[test]
    fn parses_noop_ping_and_headers() {
        assert_eq!(Frame::Noop, parse_frame(&control(5, 0, &[])).unwrap().0);
        assert_eq!(
            Frame::Ping(Ping { id: 1 }),
            parse_frame(&control(6, 0, &[0, 0, 0, 1])).unwrap().0
        );

        let buf = control(8, 0, &[0, 0, 0, 3, 0, 0, 0, 0]);
        let (frame, _) = parse_frame(&buf).unwrap();
        assert_eq!(Some(3), frame.stream_id());
    }

    #[test]
    fn window_update_is_not_decoded() {
        let buf = control(9, 0, &[0, 0, 0, 1, 0, 0, 0x10, 0]);
        let (frame, _) = parse_frame(&buf).unwrap();
        assert!(matches!(
            frame,
            Frame::Unknown {
                header: FrameHeader::Control { frame_type: 9, .. },
                payload: &[0, 0, 0, 1, 0, 0, 0x10, 0]
            }
        ));
    }

    #[test]
    fn leaves_following_frame_in_buffer() {
        let mut buf = control(6, 0, &[0, 0, 0, 2]);
        buf.extend(control(5, 0, &[]));

        let (first, consumed) = parse_frame(&buf).unwrap();
        assert_eq!(Frame::Ping(Ping { id: 2 }), first);
        let (second, _) = parse_frame(&buf[consumed..]).unwrap();
        assert_eq!(Frame::Noop, second);
    }

    #[test]
    fn incomplete_payload_fails() {
        let mut buf = control(3, 0, &[0, 0, 0, 9, 0, 0, 0, 3]);
        buf.pop();
        assert_eq!(
            Err(ParseError::BufferTooShort {
                needed: 16,
                actual: 15
            }),
            parse_frame(&buf)
        );
    }

    #[test]
    fn declared_length_too_small_for_payload_fails() {
        // RST_STREAM claiming a 4 byte payload
        let buf = [0x80, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00, 0x04, 0, 0, 0, 1, 0, 0, 0, 1];
        assert_eq!(
            Err(ParseError::BufferTooShort {
                needed: 8,
                actual: 4
            }),
            parse_frame(&buf)
        );
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut buf = control(7, 0, &[0, 0, 0, 1]);
        buf[1] = 0x03;
        assert_eq!(Err(ParseError::UnsupportedVersion(3)), parse_frame(&buf));
    }

    #[test]
    fn rejects_frame_over_limit() {
        let parser = FrameParser::new(ParserConfig::new().with_max_frame_length(4));
        let buf = control(3, 0, &[0, 0, 0, 9, 0, 0, 0, 3]);
        assert_eq!(
            Err(ParseError::FrameTooLarge {
                length: 8,
                limit: 4
            }),
            parser.parse(&buf)
        );
    }

    #[test]
    fn strict_parser_rejects_truncated_header_block() {
        let parser = FrameParser::new(
            ParserConfig::new().with_header_block_policy(HeaderBlockPolicy::Strict),
        );
        assert!(matches!(
            parser.header_block(&[0x00, 0x02, 0x00, 0x01, b'a', 0x00, 0x01, b'b']),
            Err(ParseError::MalformedHeaderBlock {
                declared: 2,
                decoded: 1
            })
        ));
    }
}
