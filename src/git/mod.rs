//! Revision graph abstraction layer
//!
//! The version resolver never talks to git directly. It asks the questions it
//! needs through the [RevisionGraph] trait, which has two implementations:
//!
//! - [repository::Git2Graph]: a real repository read through the `git2` crate
//! - [mock::MockGraph]: an in-memory DAG used as a test fixture
//!
//! # Usage
//!
//! ```rust
//! # use git_stable_version::git::RevisionGraph;
//! # fn example<G: RevisionGraph>(graph: &G) -> Result<(), Box<dyn std::error::Error>> {
//! let head = graph.resolve("HEAD")?;
//! let main = graph.resolve("main")?;
//! if graph.is_ancestor(&head, &main)? {
//!     println!("HEAD is already merged into main");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! All queries are read-only. Results are only meaningful if the history is
//! not rewritten while a resolution is running.

pub mod mock;
pub mod repository;

pub use mock::MockGraph;
pub use repository::Git2Graph;

use crate::domain::{CommitId, ReleaseTag, TagPattern};
use crate::error::{Result, VersionError};
use std::collections::HashSet;

/// Read-only query surface over a commit DAG
///
/// ## Range semantics
///
/// Ranges follow `git rev-list` conventions. `lower` is always excluded,
/// together with everything reachable from it.
///
/// ## Error Handling
///
/// Implementations report unknown refs as [VersionError::RefResolution], a
/// missing release tag as [VersionError::NoReleaseTag] and answers that do not
/// have the expected shape as [VersionError::MalformedQueryResult].
pub trait RevisionGraph {
    /// Resolve a ref (branch, tag, `HEAD`, revision expression or id) to a commit
    ///
    /// # Returns
    /// * `Ok(CommitId)` - The commit the ref points at (tags are peeled)
    /// * `Err(RefResolution)` - If the ref does not name a reachable commit
    fn resolve(&self, reference: &str) -> Result<CommitId>;

    /// Like [RevisionGraph::resolve] but tolerates absence
    ///
    /// Used to probe optional refs such as a remote-tracking variant of a
    /// branch name. Errors other than an unresolvable ref still propagate.
    fn try_resolve(&self, reference: &str) -> Result<Option<CommitId>> {
        match self.resolve(reference) {
            Ok(id) => Ok(Some(id)),
            Err(VersionError::RefResolution(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Find the closest tag reachable backward from `from` whose name matches `pattern`
    ///
    /// `from` itself is included. The declared version is parsed from the tag name.
    fn nearest_tag(&self, from: &CommitId, pattern: &TagPattern) -> Result<ReleaseTag>;

    /// Whether `ancestor` is reachable from `descendant` (a commit is its own ancestor)
    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool>;

    /// First parent of a commit (`commit^`)
    ///
    /// # Returns
    /// * `Err(MalformedQueryResult)` - If the commit is a root commit
    fn first_parent(&self, commit: &CommitId) -> Result<CommitId>;

    /// Commits on the first-parent chain of `from`, closest first, starting with `from`
    fn first_parent_chain(&self, from: &CommitId) -> Result<Vec<CommitId>>;

    /// Commits that descend from `lower` and are ancestors of `upper` (`--ancestry-path lower..upper`)
    ///
    /// With `first_parent_only`, only commits on `upper`'s first-parent chain are kept.
    fn ancestry_path(
        &self,
        lower: &CommitId,
        upper: &CommitId,
        first_parent_only: bool,
    ) -> Result<HashSet<CommitId>>;

    /// Merge commits of the ancestry path `lower..upper`, children before parents
    fn merge_commits_topo_order(&self, lower: &CommitId, upper: &CommitId)
        -> Result<Vec<CommitId>>;

    /// Number of commits reachable from `from` but not from `excluding`
    ///
    /// With `first_parent_only`, only first-parent edges are followed from `from`.
    fn count_exclusive(
        &self,
        from: &CommitId,
        excluding: &CommitId,
        first_parent_only: bool,
    ) -> Result<usize>;
}
