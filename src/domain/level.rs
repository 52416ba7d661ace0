use std::fmt;
use std::str::FromStr;

use crate::error::{ConventionalError, Result};

/// Semantic version bump level.
///
/// Variants are declared from most to least severe, so `Ord` follows severity:
/// `Major < Minor < Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Major,
    Minor,
    Patch,
}

impl Level {
    /// One step toward `patch`; `patch` stays `patch`
    pub fn relaxed(self) -> Self {
        match self {
            Level::Major => Level::Minor,
            Level::Minor | Level::Patch => Level::Patch,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Major => "major",
            Level::Minor => "minor",
            Level::Patch => "patch",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `major`, `minor` or `patch` in any case (used for `bump --level`)
impl FromStr for Level {
    type Err = ConventionalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(Level::Major),
            "minor" => Ok(Level::Minor),
            "patch" => Ok(Level::Patch),
            other => Err(ConventionalError::version(format!(
                "Unknown bump level '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}
