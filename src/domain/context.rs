use crate::domain::{CommitId, ReleaseTag};

/// The resolved inputs of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Revision under evaluation
    pub target: CommitId,
    /// Tip of the stable line
    pub stable: CommitId,
    /// Earliest commit ever considered; must be an ancestor of `target`
    pub bottom: CommitId,
    /// Nearest release tag reachable backward from `target`
    pub tag: ReleaseTag,
}

/// Knobs that change how distances are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Compute as if the target had just been merged into stable
    pub next_stable: bool,
}

impl ResolveOptions {
    pub fn next_stable() -> Self {
        ResolveOptions { next_stable: true }
    }
}
