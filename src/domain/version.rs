use crate::domain::CommitId;
use crate::error::{Result, VersionError};
use std::fmt;

/// Release version declared by a tag (MAJOR.MINOR.PATCH)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a bare "X.Y.Z" version string
    pub fn parse(version: &str) -> Result<Self> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                version
            )));
        }

        let major = parts[0].parse::<u32>().map_err(|_| {
            VersionError::version(format!("Invalid major version: {}", parts[0]))
        })?;
        let minor = parts[1].parse::<u32>().map_err(|_| {
            VersionError::version(format!("Invalid minor version: {}", parts[1]))
        })?;
        let patch = parts[2].parse::<u32>().map_err(|_| {
            VersionError::version(format!("Invalid patch version: {}", parts[2]))
        })?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// How the target revision relates to the stable line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Target lies on the first-parent chain of stable
    Stable,
    /// The release tag is reachable from the (possibly re-anchored) stable commit
    Merged,
    /// The release tag never reached the stable line
    OffStable,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Stable => "stable",
            Classification::Merged => "merged",
            Classification::OffStable => "off-stable",
        };
        f.write_str(name)
    }
}

/// Outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResult {
    pub base: Version,
    /// Stabilization merges landed on the stable line since the release
    pub stable_dist: u32,
    /// Commits the target accumulated since it left the stable line
    pub dev_dist: u32,
    pub is_stable: bool,
    pub classification: Classification,
    /// Stable commit the distances were measured against, after re-anchoring
    pub stable_anchor: CommitId,
}
