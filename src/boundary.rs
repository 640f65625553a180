use std::fmt;

/// Warnings that occur when reading history near the edges of what the
/// algorithm expects. These are non-fatal issues that should be reported to
/// the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The stable branch only exists as a remote-tracking branch
    RemoteStableFallback { local: String, remote: String },
    /// The release tag was never merged into the stable line (`stable` is an
    /// abbreviated commit id)
    TagNotOnStable { tag: String, stable: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RemoteStableFallback { local, remote } => {
                write!(
                    f,
                    "Couldn't resolve {}, assuming {}. You should create a corresponding local branch",
                    local, remote
                )
            }
            BoundaryWarning::TagNotOnStable { tag, stable } => {
                write!(
                    f,
                    "Tag '{}' is not an ancestor of stable ({}), counting every commit since the tag",
                    tag, stable
                )
            }
        }
    }
}
