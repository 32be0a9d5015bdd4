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

//! SPDY protocol version carried in control frame headers

use std::fmt::Display;

use crate::parser::ParseError;

/// SPDY protocol versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// SPDY/2, the layout this crate decodes
    V2,
    /// SPDY/3. Recognised, but its payload layouts differ and are not decoded.
    V3,
}

impl Version {
    /// True for versions whose payloads this crate can decode
    #[inline]
    pub fn is_supported(self) -> bool {
        self == Self::V2
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::V2 => "SPDY/2",
            Self::V3 => "SPDY/3",
        })
    }
}

impl TryFrom<u16> for Version {
    type Error = ParseError;

    #[inline]
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            other => Err(ParseError::UnsupportedVersion(other)),
        }
    }
}

impl From<Version> for u16 {
    fn from(value: Version) -> Self {
        match value {
            Version::V2 => 2,
            Version::V3 => 3,
        }
    }
}
