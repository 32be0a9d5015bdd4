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

//! Parser implementations for SPDY

use thiserror::Error;

pub mod cursor;
pub mod primitives;
pub mod spdy;

/// Represents possible failures while parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Buffer is smaller than the fixed minimum of the structure being decoded.
    #[error("buffer too short: need {needed} bytes, have {actual}")]
    BufferTooShort {
        /// Bytes required
        needed: usize,
        /// Bytes supplied
        actual: usize,
    },
    /// Header block ended before all declared pairs were read.
    #[error("malformed header block: {declared} pairs declared, {decoded} decoded")]
    MalformedHeaderBlock {
        /// Pair count from the block prefix
        declared: u16,
        /// Pairs that were complete
        decoded: usize,
    },
    /// Control frame carries a protocol version this crate does not decode.
    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u16),
    /// Declared payload length is above the configured limit.
    #[error("frame length {length} exceeds limit {limit}")]
    FrameTooLarge {
        /// Declared payload length
        length: u32,
        /// Configured limit
        limit: u32,
    },
    /// SETTINGS entry count does not fit the payload.
    #[error("settings frame declares {declared} entries, payload holds {available}")]
    Settings {
        /// Entry count from the payload prefix
        declared: u32,
        /// Whole entries present in the payload
        available: usize,
    },
}

impl From<cursor::Error> for ParseError {
    fn from(value: cursor::Error) -> Self {
        match value {
            cursor::Error::ShortRead { pos, wanted, len } => ParseError::BufferTooShort {
                needed: pos + wanted,
                actual: len,
            },
        }
    }
}

/// Result type used by every decoder
pub type ParseResult<T> = Result<T, ParseError>;

/// Fails with [`ParseError::BufferTooShort`] when `buf` holds fewer than `needed` bytes.
#[inline]
pub(crate) fn ensure_len(buf: &[u8], needed: usize) -> ParseResult<()> {
    if buf.len() < needed {
        return Err(ParseError::BufferTooShort {
            needed,
            actual: buf.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ensure_len_accepts_exact_length() {
        assert_eq!(Ok(()), ensure_len(&[0; 8], 8));
    }

    #[test]
    fn ensure_len_rejects_short_buffer() {
        assert_eq!(
            Err(ParseError::BufferTooShort {
                needed: 8,
                actual: 4
            }),
            ensure_len(&[0; 4], 8)
        );
    }

    #[test]
    fn short_read_converts_to_buffer_too_short() {
        let err = cursor::Error::ShortRead {
            pos: 6,
            wanted: 4,
            len: 8,
        };
        assert_eq!(
            ParseError::BufferTooShort {
                needed: 10,
                actual: 8
            },
            ParseError::from(err)
        );
    }

    #[test]
    fn buffer_too_short_displays_sizes() {
        let err = ParseError::BufferTooShort {
            needed: 8,
            actual: 4,
        };
        assert_eq!("buffer too short: need 8 bytes, have 4", err.to_string());
    }
}
