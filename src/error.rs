use thiserror::Error;

/// Unified error type for version resolution
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Couldn't resolve revision: {0}")]
    RefResolution(String),

    #[error("Couldn't find a matching version tag: {0}")]
    NoReleaseTag(String),

    #[error("Unexpected query result: {0}")]
    MalformedQueryResult(String),

    #[error("History invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Packaging command failed: {0}")]
    Package(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-stable-version
pub type Result<T> = std::result::Result<T, VersionError>;

impl VersionError {
    /// Create a ref resolution error with context
    pub fn ref_resolution(msg: impl Into<String>) -> Self {
        VersionError::RefResolution(msg.into())
    }

    /// Create a missing release tag error with context
    pub fn no_release_tag(msg: impl Into<String>) -> Self {
        VersionError::NoReleaseTag(msg.into())
    }

    /// Create a malformed query result error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        VersionError::MalformedQueryResult(msg.into())
    }

    /// Create an invariant violation error with context
    pub fn invariant(msg: impl Into<String>) -> Self {
        VersionError::InvariantViolation(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        VersionError::Version(msg.into())
    }

    /// Create a packaging error with context
    pub fn package(msg: impl Into<String>) -> Self {
        VersionError::Package(msg.into())
    }
}
