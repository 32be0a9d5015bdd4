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

//! Bounds-checked cursor over a borrowed frame buffer
use thiserror::Error;

use super::primitives::{read_u16, read_u24, read_u32};

/// Failure to read from a [`Cursor`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Fewer than `wanted` bytes remain after `pos`
    #[error("wanted {wanted} bytes at position {pos} of {len}")]
    ShortRead {
        /// Cursor position at the failed read
        pos: usize,
        /// Bytes the read required
        wanted: usize,
        /// Length of the underlying buffer
        len: usize,
    },
}

/// Read position plus remaining length over a byte slice.
///
/// Every read checks the remaining length first and leaves the position untouched on failure.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    inner: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at the start of `slice`
    pub fn new(slice: &'a [u8]) -> Self {
        Cursor {
            inner: slice,
            pos: 0,
        }
    }

    /// Current read position
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the underlying buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.inner.len() - self.pos
    }

    /// True once every byte has been consumed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.inner.len()
    }

    /// Unread portion of the buffer
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.inner[self.pos..]
    }

    #[inline]
    fn check(&self, wanted: usize) -> Result<(), Error> {
        if self.remaining() < wanted {
            return Err(Error::ShortRead {
                pos: self.pos,
                wanted,
                len: self.inner.len(),
            });
        }

        Ok(())
    }

    /// Skips `n` bytes
    #[inline]
    pub fn advance(&mut self, n: usize) -> Result<(), Error> {
        self.check(n)?;
        self.pos += n;
        Ok(())
    }

    /// Returns the next `n` bytes and moves past them
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        self.check(n)?;
        let slice = &self.inner[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads one byte
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.check(1)?;
        let b = self.inner[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Reads a big-endian `u16`
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.check(2)?;
        let v = read_u16(self.inner, self.pos);
        self.pos += 2;
        Ok(v)
    }

    /// Reads a big-endian 24-bit integer
    #[inline]
    pub fn read_u24(&mut self) -> Result<u32, Error> {
        self.check(3)?;
        let v = read_u24(self.inner, self.pos);
        self.pos += 3;
        Ok(v)
    }

    /// Reads a big-endian `u32`
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.check(4)?;
        let v = read_u32(self.inner, self.pos);
        self.pos += 4;
        Ok(v)
    }
}

impl AsRef<[u8]> for Cursor<'_> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.rest()
    }
}

#[cfg(test)]
mod test {
    use super::{Cursor, Error};

    #[test]
    fn cursor_constructs_with_len_and_pos() {
        let cur = Cursor::new(&[0, 1, 2, 3]);
        assert_eq!(0, cur.pos());
        assert_eq!(4, cur.len());
        assert_eq!(4, cur.remaining());
    }

    #[test]
    fn cursor_reads_advance_position() {
        let mut cur = Cursor::new(&[0x00, 0x02, 0x00, 0x00, 0x00, 0x07, 0xaa]);
        assert_eq!(Ok(2), cur.read_u16());
        assert_eq!(Ok(7), cur.read_u32());
        assert_eq!(Ok(0xaa), cur.read_u8());
        assert!(cur.is_empty());
    }

    #[test]
    fn cursor_take_returns_subslice() {
        let mut cur = Cursor::new(b"hostexample");
        assert_eq!(Ok(b"host" as &[u8]), cur.take(4));
        assert_eq!(b"example", cur.rest());
    }

    #[test]
    fn cursor_take_zero_is_empty_slice() {
        let mut cur = Cursor::new(b"");
        assert_eq!(Ok(b"" as &[u8]), cur.take(0));
    }

    #[test]
    fn cursor_short_read_leaves_position() {
        let mut cur = Cursor::new(&[0, 1, 2]);
        cur.advance(1).unwrap();
        assert_eq!(
            Err(Error::ShortRead {
                pos: 1,
                wanted: 4,
                len: 3
            }),
            cur.read_u32()
        );
        assert_eq!(1, cur.pos());
        assert_eq!(Ok(0x0102), cur.read_u16());
    }

    #[test]
    fn cursor_take_does_not_overflow_on_huge_length() {
        let mut cur = Cursor::new(&[0, 1]);
        assert!(cur.take(usize::MAX).is_err());
    }

    #[test]
    fn cursor_read_u24() {
        let mut cur = Cursor::new(&[0x00, 0x01, 0x02]);
        assert_eq!(Ok(258), cur.read_u24());
    }
}
