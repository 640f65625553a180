use crate::domain::{CommitId, ReleaseTag, TagPattern};
use crate::error::{Result, VersionError};
use crate::git::RevisionGraph;
use std::collections::{HashMap, HashSet, VecDeque};

/// In-memory commit DAG for exercising the resolver without a repository
///
/// Commits must be added parents first; insertion order doubles as the
/// topological order of the graph.
pub struct MockGraph {
    parents: HashMap<CommitId, Vec<CommitId>>,
    order: Vec<CommitId>,
    refs: HashMap<String, CommitId>,
    tags: Vec<(String, CommitId)>,
}

impl MockGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        MockGraph {
            parents: HashMap::new(),
            order: Vec::new(),
            refs: HashMap::new(),
            tags: Vec::new(),
        }
    }

    /// Add a commit with its parents, first parent first
    pub fn add_commit(&mut self, id: &str, parents: &[&str]) -> CommitId {
        let id = CommitId::from(id);
        let parents = parents.iter().map(|p| CommitId::from(*p)).collect();
        if self.parents.insert(id.clone(), parents).is_none() {
            self.order.push(id.clone());
        }
        id
    }

    /// Add a chain of single-parent commits on top of `base`, returning the tip
    pub fn add_chain(&mut self, base: &str, ids: &[&str]) -> CommitId {
        let mut parent = base.to_string();
        for id in ids {
            self.add_commit(id, &[parent.as_str()]);
            parent = id.to_string();
        }
        CommitId::new(parent)
    }

    /// Point a named ref (branch, `HEAD`, ...) at a commit
    pub fn set_ref(&mut self, name: impl Into<String>, id: &str) {
        self.refs.insert(name.into(), CommitId::from(id));
    }

    /// Add a tag pointing at a commit
    pub fn add_tag(&mut self, name: impl Into<String>, id: &str) {
        self.tags.push((name.into(), CommitId::from(id)));
    }

    fn parents_of(&self, id: &CommitId) -> Result<&[CommitId]> {
        self.parents
            .get(id)
            .map(|p| p.as_slice())
            .ok_or_else(|| VersionError::ref_resolution(format!("Unknown commit {}", id)))
    }

    fn position(&self, id: &CommitId) -> usize {
        self.order
            .iter()
            .position(|c| c == id)
            .unwrap_or(usize::MAX)
    }

    /// Everything reachable from `from`, including itself
    fn reachable(&self, from: &CommitId, first_parent_only: bool) -> Result<HashSet<CommitId>> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([from.clone()]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id.clone()) {
                continue;
            }
            let parents = self.parents_of(&id)?;
            let parents = if first_parent_only {
                &parents[..parents.len().min(1)]
            } else {
                parents
            };
            queue.extend(parents.iter().cloned());
        }
        Ok(seen)
    }

    /// Ancestry path `lower..upper` in topological order, parents first
    fn ancestry_ordered(&self, lower: &CommitId, upper: &CommitId) -> Result<Vec<CommitId>> {
        let hidden = self.reachable(lower, false)?;
        let mut candidates: Vec<CommitId> = self
            .reachable(upper, false)?
            .into_iter()
            .filter(|c| !hidden.contains(c))
            .collect();
        candidates.sort_by_key(|c| self.position(c));

        let mut descendants = HashSet::new();
        let mut path = Vec::new();
        for id in candidates {
            let descends = self
                .parents_of(&id)?
                .iter()
                .any(|p| p == lower || descendants.contains(p));
            if descends {
                descendants.insert(id.clone());
                path.push(id);
            }
        }
        Ok(path)
    }
}

impl Default for MockGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionGraph for MockGraph {
    fn resolve(&self, reference: &str) -> Result<CommitId> {
        if let Some(id) = self.refs.get(reference) {
            return Ok(id.clone());
        }
        if let Some((_, id)) = self.tags.iter().find(|(name, _)| name == reference) {
            return Ok(id.clone());
        }
        let id = CommitId::from(reference);
        if self.parents.contains_key(&id) {
            Ok(id)
        } else {
            Err(VersionError::ref_resolution(reference))
        }
    }

    /// Like `git describe`, the closest tag is the one leaving the fewest
    /// commits between it and `from`; ties go to the tag added first
    fn nearest_tag(&self, from: &CommitId, pattern: &TagPattern) -> Result<ReleaseTag> {
        let ancestors = self.reachable(from, false)?;
        let mut nearest: Option<(usize, &String, &CommitId)> = None;
        for (name, tagged) in &self.tags {
            if !ancestors.contains(tagged) || !pattern.matches(name) {
                continue;
            }
            let distance = self.count_exclusive(from, tagged, false)?;
            if nearest.map_or(true, |(best, _, _)| distance < best) {
                nearest = Some((distance, name, tagged));
            }
        }

        let (_, name, tagged) = nearest.ok_or_else(|| {
            VersionError::no_release_tag(format!(
                "no tag matching '{}' is reachable from {}",
                pattern.glob(),
                from.short()
            ))
        })?;
        let version = pattern.parse_version(name)?;
        Ok(ReleaseTag::new(name.clone(), tagged.clone(), version))
    }

    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool> {
        self.parents_of(ancestor)?;
        Ok(self.reachable(descendant, false)?.contains(ancestor))
    }

    fn first_parent(&self, commit: &CommitId) -> Result<CommitId> {
        self.parents_of(commit)?
            .first()
            .cloned()
            .ok_or_else(|| VersionError::malformed(format!("{} has no parent", commit)))
    }

    fn first_parent_chain(&self, from: &CommitId) -> Result<Vec<CommitId>> {
        let mut chain = vec![from.clone()];
        let mut current = from.clone();
        while let Some(parent) = self.parents_of(&current)?.first() {
            chain.push(parent.clone());
            current = parent.clone();
        }
        Ok(chain)
    }

    fn ancestry_path(
        &self,
        lower: &CommitId,
        upper: &CommitId,
        first_parent_only: bool,
    ) -> Result<HashSet<CommitId>> {
        let mut path: HashSet<CommitId> = self.ancestry_ordered(lower, upper)?.into_iter().collect();
        if first_parent_only {
            let chain: HashSet<CommitId> = self.first_parent_chain(upper)?.into_iter().collect();
            path.retain(|c| chain.contains(c));
        }
        Ok(path)
    }

    fn merge_commits_topo_order(
        &self,
        lower: &CommitId,
        upper: &CommitId,
    ) -> Result<Vec<CommitId>> {
        let mut merges = Vec::new();
        for id in self.ancestry_ordered(lower, upper)?.into_iter().rev() {
            if self.parents_of(&id)?.len() > 1 {
                merges.push(id);
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
        let hidden = self.reachable(excluding, false)?;
        Ok(self
            .reachable(from, first_parent_only)?
            .iter()
            .filter(|c| !hidden.contains(*c))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a - b - m - d   (main)
    ///      \ /
    ///       c         (feature)
    fn sample() -> MockGraph {
        let mut graph = MockGraph::new();
        graph.add_commit("a", &[]);
        graph.add_commit("b", &["a"]);
        graph.add_commit("c", &["b"]);
        graph.add_commit("m", &["b", "c"]);
        graph.add_commit("d", &["m"]);
        graph.set_ref("main", "d");
        graph.set_ref("feature", "c");
        graph
    }

    fn ids(names: &[&str]) -> HashSet<CommitId> {
        names.iter().map(|n| CommitId::from(*n)).collect()
    }

    #[test]
    fn test_resolve_refs_and_ids() {
        let mut graph = sample();
        graph.add_tag("gmic-1.0.0", "a");
        assert_eq!(graph.resolve("main").unwrap(), CommitId::from("d"));
        assert_eq!(graph.resolve("gmic-1.0.0").unwrap(), CommitId::from("a"));
        assert_eq!(graph.resolve("m").unwrap(), CommitId::from("m"));
        assert!(matches!(
            graph.resolve("nope"),
            Err(VersionError::RefResolution(_))
        ));
        assert_eq!(graph.try_resolve("nope").unwrap(), None);
    }

    #[test]
    fn test_first_parent_chain_skips_side_branch() {
        let graph = sample();
        let chain = graph.first_parent_chain(&"d".into()).unwrap();
        let names: Vec<&str> = chain.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["d", "m", "b", "a"]);
    }

    #[test]
    fn test_is_ancestor() {
        let graph = sample();
        assert!(graph.is_ancestor(&"c".into(), &"d".into()).unwrap());
        assert!(graph.is_ancestor(&"d".into(), &"d".into()).unwrap());
        assert!(!graph.is_ancestor(&"d".into(), &"c".into()).unwrap());
    }

    #[test]
    fn test_ancestry_path_full_and_first_parent() {
        let graph = sample();
        assert_eq!(
            graph.ancestry_path(&"c".into(), &"d".into(), false).unwrap(),
            ids(&["m", "d"])
        );
        assert_eq!(
            graph.ancestry_path(&"a".into(), &"d".into(), false).unwrap(),
            ids(&["b", "c", "m", "d"])
        );
        assert_eq!(
            graph.ancestry_path(&"a".into(), &"d".into(), true).unwrap(),
            ids(&["b", "m", "d"])
        );
        assert!(graph
            .ancestry_path(&"d".into(), &"d".into(), false)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_merge_commits_topo_order() {
        let graph = sample();
        let merges = graph
            .merge_commits_topo_order(&"c".into(), &"d".into())
            .unwrap();
        assert_eq!(merges, vec![CommitId::from("m")]);
    }

    #[test]
    fn test_count_exclusive() {
        let graph = sample();
        assert_eq!(graph.count_exclusive(&"d".into(), &"a".into(), false).unwrap(), 4);
        assert_eq!(graph.count_exclusive(&"d".into(), &"a".into(), true).unwrap(), 3);
        assert_eq!(graph.count_exclusive(&"c".into(), &"d".into(), false).unwrap(), 0);
    }

    #[test]
    fn test_nearest_tag_prefers_closest_match() {
        let mut graph = sample();
        graph.add_tag("gmic-1.0.0", "a");
        graph.add_tag("gmic-1.1.0", "c");
        graph.add_tag("unrelated", "m");
        let pattern = TagPattern::new("gmic-{version}").unwrap();

        let tag = graph.nearest_tag(&"d".into(), &pattern).unwrap();
        assert_eq!(tag.name, "gmic-1.1.0");
        assert_eq!(tag.commit, CommitId::from("c"));

        let tag = graph.nearest_tag(&"b".into(), &pattern).unwrap();
        assert_eq!(tag.name, "gmic-1.0.0");
    }

    #[test]
    fn test_nearest_tag_counts_commits_not_edges() {
        let mut graph = MockGraph::new();
        graph.add_commit("root", &[]);
        graph.add_commit("o", &["root"]);
        graph.add_tag("gmic-1.0.0", "o");
        graph.add_chain("o", &["n", "n1", "n2"]);
        graph.add_tag("gmic-2.0.0", "n");
        // x is one edge from gmic-1.0.0 yet leaves fewer commits after gmic-2.0.0
        graph.add_commit("x", &["o", "n2"]);
        let pattern = TagPattern::new("gmic-{version}").unwrap();

        let tag = graph.nearest_tag(&"x".into(), &pattern).unwrap();
        assert_eq!(tag.name, "gmic-2.0.0");
        assert_eq!(tag.commit, CommitId::from("n"));
    }

    #[test]
    fn test_nearest_tag_missing() {
        let graph = sample();
        let pattern = TagPattern::new("gmic-{version}").unwrap();
        assert!(matches!(
            graph.nearest_tag(&"d".into(), &pattern),
            Err(VersionError::NoReleaseTag(_))
        ));
    }

    #[test]
    fn test_first_parent_of_root_is_malformed() {
        let graph = sample();
        assert_eq!(graph.first_parent(&"m".into()).unwrap(), CommitId::from("b"));
        assert!(matches!(
            graph.first_parent(&"a".into()),
            Err(VersionError::MalformedQueryResult(_))
        ));
    }

    #[test]
    fn test_add_chain() {
        let mut graph = sample();
        let tip = graph.add_chain("c", &["c1", "c2"]);
        assert_eq!(tip, CommitId::from("c2"));
        assert_eq!(graph.count_exclusive(&tip, &"b".into(), true).unwrap(), 3);
    }
}
