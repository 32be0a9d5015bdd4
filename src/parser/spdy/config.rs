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

//! Parser configuration

use super::MAX_FRAME_LENGTH;

/// What to do with a header block that ends before its declared pair count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderBlockPolicy {
    /// Keep the pairs that were complete and mark the block partial
    #[default]
    Lenient,
    /// Fail with [`MalformedHeaderBlock`](crate::parser::ParseError::MalformedHeaderBlock)
    Strict,
}

/// Settings for [`FrameParser`](super::FrameParser)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Treatment of truncated header blocks
    pub header_block_policy: HeaderBlockPolicy,
    /// Largest payload length accepted from a frame header
    pub max_frame_length: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_block_policy: HeaderBlockPolicy::Lenient,
            max_frame_length: MAX_FRAME_LENGTH,
        }
    }
}

impl ParserConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header block policy
    pub fn with_header_block_policy(mut self, policy: HeaderBlockPolicy) -> Self {
        self.header_block_policy = policy;
        self
    }

    /// Sets the payload length limit. Values above the 24-bit maximum have no further effect.
    pub fn with_max_frame_length(mut self, max_frame_length: u32) -> Self {
        self.max_frame_length = max_frame_length;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_accepts_every_frame_length() {
        let config = ParserConfig::default();
        assert_eq!(HeaderBlockPolicy::Lenient, config.header_block_policy);
        assert_eq!(0x00ff_ffff, config.max_frame_length);
    }

    #[test]
    fn builder_overrides() {
        let config = ParserConfig::new()
            .with_header_block_policy(HeaderBlockPolicy::Strict)
            .with_max_frame_length(16 * 1024);
        assert_eq!(HeaderBlockPolicy::Strict, config.header_block_policy);
        assert_eq!(16384, config.max_frame_length);
    }
}
