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

#![deny(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unused_imports,
    dead_code
)]
// Disallow warnings in examples.
#![doc(test(attr(deny(warnings))))]

//! spdy-frame is a low-level decoder for SPDY/2 frames, intended for personal learning purposes.
//!
//! The decoders are stateless: every call borrows the caller's buffer for its duration only and
//! returns owned records. Socket I/O, reassembly across reads, flow control and stream lifecycle
//! belong to whoever drives the decoder.
//!
//! ## Example
//!
//! ```
//! use spdy_frame::parser::spdy::{decode_frame_header, FrameHeader};
//!
//! let header = decode_frame_header(&[0x80, 0x02, 0x00, 0x01, 0x01, 0x00, 0x00, 0x08])?;
//! assert_eq!(
//!     FrameHeader::Control { version: 2, frame_type: 1, flags: 1, length: 8 },
//!     header
//! );
//! # Ok::<(), spdy_frame::parser::ParseError>(())
//! ```

pub mod parser;
