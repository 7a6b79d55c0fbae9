//! Three-component version value with an "unspecified" sentinel

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Sentinel for a version component that was not present in the input.
pub const UNSPECIFIED: i64 = -1;

static STRING_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap());
static DECLARED_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v(\d+)\.(\d+)(?:\.(\d+))?").unwrap());
static BANNER_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Terraform v(\d+)\.(\d+)\.(\d+)").unwrap());

/// A `major.minor.patch` version where any component may be [`UNSPECIFIED`].
///
/// Partial inputs such as `"2.3"` keep their trailing components at `-1`
/// rather than defaulting to zero, so a policy target of `2.3` matches the
/// whole `2.3.x` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: i64,
    pub minor: i64,
    pub patch: i64,
}

impl Version {
    pub fn new(major: i64, minor: i64, patch: i64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a bare `major.minor[.patch]` string.
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_pattern(&STRING_VERSION, input)
    }

    /// Parse a `v`-prefixed fragment as it appears in provider declarations,
    /// e.g. `v3.117.0`.
    pub fn parse_declaration(input: &str) -> Result<Self> {
        Self::from_pattern(&DECLARED_VERSION, input)
    }

    /// Parse the `Terraform vX.Y.Z` banner out of tool output.
    pub fn parse_banner(input: &str) -> Result<Self> {
        Self::from_pattern(&BANNER_VERSION, input)
    }

    /// True when the `(major, minor)` pair equals `other`'s, ignoring patch.
    pub fn same_minor_line(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor
    }

    fn from_pattern(pattern: &Regex, input: &str) -> Result<Self> {
        let captures = pattern
            .captures(input)
            .ok_or_else(|| Error::UnmatchedVersion {
                input: input.to_string(),
            })?;

        let component = |index: usize| -> i64 {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(UNSPECIFIED)
        };

        Ok(Self {
            major: component(1),
            minor: component(2),
            patch: component(3),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: i64| {
            if v == UNSPECIFIED {
                "?".to_string()
            } else {
                v.to_string()
            }
        };
        write!(
            f,
            "{}.{}.{}",
            part(self.major),
            part(self.minor),
            part(self.patch)
        )
    }
}
