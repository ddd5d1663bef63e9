//! Strict `major.minor.patch` version triple

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A released version as an ordered (major, minor, patch) triple
///
/// Ordering is lexicographic over the three components, which is what the
/// derived `Ord` gives us given the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Creates a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string of exactly three dot-separated integers
    ///
    /// Prefixes (`v1.2.3`), pre-release or build suffixes (`1.2.3-beta.1`),
    /// signs and surrounding whitespace are all rejected.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::malformed(
                input,
                format!("expected 3 components, found {}", parts.len()),
            ));
        }

        let component = |name: &str, part: &str| -> Result<u64, VersionError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::malformed(
                    input,
                    format!("{} component '{}' is not a non-negative integer", name, part),
                ));
            }
            part.parse::<u64>().map_err(|e| {
                VersionError::malformed(input, format!("{} component '{}': {}", name, part, e))
            })
        };

        Ok(Self {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
