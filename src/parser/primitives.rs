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

//! Fixed-width big-endian readers
//!
//! These perform no bounds checking of their own. Callers track the remaining length and must
//! guarantee `offset + width <= buf.len()`; [`Cursor`](super::cursor::Cursor) is the checked
//! front end used by the decoders.

use byteorder::{BigEndian, ByteOrder};

/// Reserved top bit of every 32-bit stream id field
pub const STREAM_ID_MASK: u32 = 0x7fff_ffff;

/// Reads a big-endian `u16` at `offset`.
///
/// # Panics
///
/// Panics if fewer than 2 bytes are available at `offset`.
#[inline]
pub fn read_u16(buf: &[u8], offset: usize) -> u16 {
    BigEndian::read_u16(&buf[offset..offset + 2])
}

/// Reads a big-endian 24-bit unsigned integer at `offset`.
///
/// # Panics
///
/// Panics if fewer than 3 bytes are available at `offset`.
#[inline]
pub fn read_u24(buf: &[u8], offset: usize) -> u32 {
    BigEndian::read_u24(&buf[offset..offset + 3])
}

/// Reads a big-endian `u32` at `offset`.
///
/// # Panics
///
/// Panics if fewer than 4 bytes are available at `offset`.
#[inline]
pub fn read_u32(buf: &[u8], offset: usize) -> u32 {
    BigEndian::read_u32(&buf[offset..offset + 4])
}

/// Clears the reserved bit of a 32-bit stream id field.
#[inline]
pub const fn mask_stream_id(raw: u32) -> u32 {
    raw & STREAM_ID_MASK
}
