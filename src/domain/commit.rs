use git2::Oid;
use std::fmt;

/// Opaque identifier of a single revision.
///
/// Backends fill it with whatever uniquely names a commit for them: the
/// libgit2 backend uses the full hex object id, the in-memory fixture uses
/// plain labels. Two ids are the same commit iff they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Create a commit id from its textual form
    pub fn new(id: impl Into<String>) -> Self {
        CommitId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for diagnostics (first 7 characters)
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Oid> for CommitId {
    fn from(oid: Oid) -> Self {
        CommitId(oid.to_string())
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        CommitId::new(id)
    }
}
