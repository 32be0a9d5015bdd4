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

//! Name/value header block
//!
//! ```text
//! +------------------+
//! | pair count (16)  |
//! +------------------+------------------+------------------+------------------+
//! | name length (16) | name bytes       | value length (16)| value bytes      | ...
//! +------------------+------------------+------------------+------------------+
//! ```
//!
//! Every length is attacker controlled, so each one is checked against the bytes that remain
//! before anything is read.

use std::fmt::Display;

use tracing::debug;

use super::config::HeaderBlockPolicy;
use crate::parser::{cursor::Cursor, ParseError, ParseResult};

/// A single name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name
    pub name: String,
    /// Header value
    pub value: String,
}

impl Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Whether every declared pair was present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderBlockStatus {
    /// All declared pairs were decoded
    Complete,
    /// The block ended early; only the leading pairs were decoded
    Partial,
}

/// Decoded header block, in wire order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    headers: Vec<Header>,
    declared: u16,
    status: HeaderBlockStatus,
}

impl HeaderBlock {
    /// Completeness of the block
    #[inline]
    pub fn status(&self) -> HeaderBlockStatus {
        self.status
    }

    /// True if the block was truncated
    #[inline]
    pub fn is_partial(&self) -> bool {
        self.status == HeaderBlockStatus::Partial
    }

    /// Pair count announced by the block prefix
    #[inline]
    pub fn declared_count(&self) -> u16 {
        self.declared
    }

    /// Number of decoded pairs
    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// True if no pair was decoded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Pairs in wire order
    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    /// Value stored under `name`. When a name repeats, the last occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    /// Turns a partial block into [`ParseError::MalformedHeaderBlock`]
    pub fn into_strict(self) -> ParseResult<Self> {
        match self.status {
            HeaderBlockStatus::Complete => Ok(self),
            HeaderBlockStatus::Partial => Err(ParseError::MalformedHeaderBlock {
                declared: self.declared,
                decoded: self.headers.len(),
            }),
        }
    }

    /// Consumes the block, returning its pairs
    pub fn into_headers(self) -> Vec<Header> {
        self.headers
    }
}

impl<'a> IntoIterator for &'a HeaderBlock {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Decodes a header block with the default, lenient policy.
///
/// `buf` starts at the pair count. A block that ends before its declared pair count is returned
/// with [`HeaderBlockStatus::Partial`] and the pairs that were complete. Only a buffer too short
/// to hold the pair count is an error.
///
/// # Example
/// ```
/// # use spdy_frame::parser::spdy::decode_header_block;
/// # fn main() -> Result<(), spdy_frame::parser::ParseError> {
/// let block = decode_header_block(b"\x00\x01\x00\x06method\x00\x03GET")?;
/// assert_eq!(Some("GET"), block.get("method"));
/// assert!(!block.is_partial());
/// # Ok(())
/// # }
/// ```
pub fn decode_header_block(buf: &[u8]) -> ParseResult<HeaderBlock> {
    decode_header_block_with(buf, HeaderBlockPolicy::Lenient)
}

/// Decodes a header block, applying `policy` to truncated blocks.
pub fn decode_header_block_with(
    buf: &[u8],
    policy: HeaderBlockPolicy,
) -> ParseResult<HeaderBlock> {
    let mut cur = Cursor::new(buf);
    let declared = cur.read_u16()?;

    // each pair takes at least four bytes, so never reserve more than the buffer can hold
    let mut headers = Vec::with_capacity(usize::from(declared).min(cur.remaining() / 4));
    let mut pending = declared;

    while pending > 0 && !cur.is_empty() {
        let Some(name) = read_string(&mut cur) else {
            break;
        };
        let Some(value) = read_string(&mut cur) else {
            break;
        };

        headers.push(Header { name, value });
        pending -= 1;
    }

    let status = if pending == 0 {
        HeaderBlockStatus::Complete
    } else {
        debug!(
            declared,
            decoded = headers.len(),
            remaining = cur.remaining(),
            "header block truncated"
        );
        HeaderBlockStatus::Partial
    };

    let block = HeaderBlock {
        headers,
        declared,
        status,
    };

    match policy {
        HeaderBlockPolicy::Lenient => Ok(block),
        HeaderBlockPolicy::Strict => block.into_strict(),
    }
}

#[inline]
fn read_string(cur: &mut Cursor<'_>) -> Option<String> {
    let len = cur.read_u16().ok()?;
    let bytes = cur.take(usize::from(len)).ok()?;
    Some(String::from_utf8_lossy(bytes).into_owned())
}
