use crate::domain::{CommitId, ReleaseTag, TagPattern};
use crate::error::{Result, VersionError};
use crate::git::RevisionGraph;
use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Oid, Repository, Sort};
use std::collections::HashSet;
use std::path::Path;

/// Revision graph backed by a real repository through libgit2
pub struct Git2Graph {
    repo: Repository,
}

impl Git2Graph {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;

        Ok(Git2Graph { repo })
    }

    /// Root of the work tree, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn oid(&self, id: &CommitId) -> Result<Oid> {
        Oid::from_str(id.as_str())
            .map_err(|_| VersionError::malformed(format!("'{}' is not a commit id", id)))
    }

    /// Topologically sorted walk (children first) from `push`, excluding `hide` and its ancestors
    fn walk(&self, push: Oid, hide: Option<Oid>, first_parent_only: bool) -> Result<Vec<Oid>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        if first_parent_only {
            revwalk.simplify_first_parent()?;
        }
        revwalk.push(push)?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut oids = Vec::new();
        for oid in revwalk {
            oids.push(oid?);
        }
        Ok(oids)
    }

    /// Ancestry path `lower..upper`, children first
    fn ancestry_oids(&self, lower: Oid, upper: Oid) -> Result<Vec<Oid>> {
        let candidates = self.walk(upper, Some(lower), false)?;

        // Parents come after all their children, so scan from the end
        let mut descendants = HashSet::new();
        for oid in candidates.iter().rev() {
            let commit = self.repo.find_commit(*oid)?;
            if commit
                .parent_ids()
                .any(|p| p == lower || descendants.contains(&p))
            {
                descendants.insert(*oid);
            }
        }

        Ok(candidates
            .into_iter()
            .filter(|oid| descendants.contains(oid))
            .collect())
    }
}

impl RevisionGraph for Git2Graph {
    fn resolve(&self, reference: &str) -> Result<CommitId> {
        let commit = self
            .repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| VersionError::ref_resolution(format!("{}: {}", reference, e.message())))?;

        Ok(commit.id().into())
    }

    fn nearest_tag(&self, from: &CommitId, pattern: &TagPattern) -> Result<ReleaseTag> {
        let commit = self.repo.find_commit(self.oid(from)?)?;

        let mut options = DescribeOptions::new();
        options.describe_tags().pattern(&pattern.glob());
        let describe = match commit.as_object().describe(&options) {
            Ok(describe) => describe,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(VersionError::no_release_tag(format!(
                    "no tag matching '{}' is reachable from {}",
                    pattern.glob(),
                    from.short()
                )))
            }
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        let name = describe.format(Some(&format))?;
        if !pattern.matches(&name) {
            return Err(VersionError::malformed(format!(
                "describe returned '{}', which does not match '{}'",
                name,
                pattern.as_str()
            )));
        }
        let version = pattern.parse_version(&name)?;

        let tagged = self
            .repo
            .revparse_single(&format!("refs/tags/{}", name))?
            .peel_to_commit()?;

        Ok(ReleaseTag::new(name, tagged.id().into(), version))
    }

    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool> {
        let ancestor = self.oid(ancestor)?;
        let descendant = self.oid(descendant)?;
        if ancestor == descendant {
            return Ok(true);
        }
        Ok(self.repo.graph_descendant_of(descendant, ancestor)?)
    }

    fn first_parent(&self, commit: &CommitId) -> Result<CommitId> {
        let found = self.repo.find_commit(self.oid(commit)?)?;
        found
            .parent_id(0)
            .map(CommitId::from)
            .map_err(|_| VersionError::malformed(format!("{} has no parent", commit.short())))
    }

    fn first_parent_chain(&self, from: &CommitId) -> Result<Vec<CommitId>> {
        let chain = self.walk(self.oid(from)?, None, true)?;
        if chain.is_empty() {
            return Err(VersionError::malformed(format!(
                "empty first-parent history for {}",
                from.short()
            )));
        }
        Ok(chain.into_iter().map(CommitId::from).collect())
    }

    fn ancestry_path(
        &self,
        lower: &CommitId,
        upper: &CommitId,
        first_parent_only: bool,
    ) -> Result<HashSet<CommitId>> {
        let lower = self.oid(lower)?;
        let upper = self.oid(upper)?;
        let mut path: HashSet<Oid> = self.ancestry_oids(lower, upper)?.into_iter().collect();

        if first_parent_only {
            let chain: HashSet<Oid> = self.walk(upper, Some(lower), true)?.into_iter().collect();
            path.retain(|oid| chain.contains(oid));
        }

        Ok(path.into_iter().map(CommitId::from).collect())
    }

    fn merge_commits_topo_order(
        &self,
        lower: &CommitId,
        upper: &CommitId,
    ) -> Result<Vec<CommitId>> {
        let mut merges = Vec::new();
        for oid in self.ancestry_oids(self.oid(lower)?, self.oid(upper)?)? {
            if self.repo.find_commit(oid)?.parent_count() > 1 {
                merges.push(CommitId::from(oid));
            }
        }
        Ok(merges)
    }

    fn count_exclusive(
        &self,
        from: &CommitId,
        excluding: &CommitId,
        first_parent_only: bool,
    ) -> Result<usize> {
        let commits = self.walk(
            self.oid(from)?,
            Some(self.oid(excluding)?),
            first_parent_only,
        )?;
        Ok(commits.len())
    }
}
