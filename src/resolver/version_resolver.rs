use crate::boundary::BoundaryWarning;
use crate::domain::{
    Classification, CommitId, ResolutionContext, ResolveOptions, TagPattern, VersionResult,
};
use crate::error::{Result, VersionError};
use crate::git::RevisionGraph;
use crate::ui::Reporter;
use std::collections::HashSet;

/// Classifies a target revision against the stable line and measures its
/// distance from the last release
pub struct VersionResolver<'a, G: RevisionGraph> {
    graph: &'a G,
    reporter: Reporter,
}

impl<'a, G: RevisionGraph> VersionResolver<'a, G> {
    /// Create a new version resolver
    pub fn new(graph: &'a G, reporter: Reporter) -> Self {
        VersionResolver { graph, reporter }
    }

    /// Assemble the resolution context for already resolved commits
    ///
    /// Looks up the nearest release tag reachable from `target`.
    ///
    /// # Returns
    /// * `Err(NoReleaseTag)` - If no tag matching `pattern` is reachable from `target`
    pub fn context_for(
        &self,
        target: CommitId,
        stable: CommitId,
        bottom: CommitId,
        pattern: &TagPattern,
    ) -> Result<ResolutionContext> {
        let tag = self.graph.nearest_tag(&target, pattern)?;
        self.reporter
            .debug(format!("Found tag {}, parsed version {}", tag.name, tag.version));
        Ok(ResolutionContext {
            target,
            stable,
            bottom,
            tag,
        })
    }

    /// Compute the distances of `ctx.target` from its release tag
    ///
    /// Exactly one of three cases applies, checked in order:
    /// 1. the target is on the first-parent chain of stable;
    /// 2. the tag is an ancestor of stable, re-anchored to the merge that
    ///    absorbed the target when the target is already merged;
    /// 3. the tag never reached stable.
    pub fn resolve(
        &self,
        ctx: &ResolutionContext,
        options: ResolveOptions,
    ) -> Result<VersionResult> {
        if !self.graph.is_ancestor(&ctx.bottom, &ctx.target)? {
            return Err(VersionError::invariant(format!(
                "bottom ({}) is not an ancestor of ref ({})",
                ctx.bottom.short(),
                ctx.target.short()
            )));
        }

        if self.is_on_stable_line(&ctx.target, &ctx.stable)? {
            return self.resolve_stable(ctx, options);
        }

        let stable_commits = self.graph.ancestry_path(&ctx.bottom, &ctx.stable, true)?;
        let anchor = if self.graph.is_ancestor(&ctx.target, &ctx.stable)? {
            self.reanchor(ctx, &stable_commits)?
        } else {
            ctx.stable.clone()
        };

        if self.graph.is_ancestor(&ctx.tag.commit, &anchor)? {
            self.resolve_merged(ctx, anchor, &stable_commits)
        } else {
            self.resolve_off_stable(ctx, anchor)
        }
    }

    fn is_on_stable_line(&self, target: &CommitId, stable: &CommitId) -> Result<bool> {
        if target == stable {
            return Ok(true);
        }
        let chain = self.graph.first_parent_chain(stable)?;
        Ok(chain.contains(target))
    }

    fn resolve_stable(
        &self,
        ctx: &ResolutionContext,
        options: ResolveOptions,
    ) -> Result<VersionResult> {
        let since_tag = self.graph.ancestry_path(&ctx.tag.commit, &ctx.target, false)?;
        let stable_commits = self.graph.ancestry_path(&ctx.bottom, &ctx.target, true)?;
        let merged = to_distance(since_tag.intersection(&stable_commits).count())?;

        // The merge that carried the release itself is not a distance
        let stable_dist = if options.next_stable {
            merged
        } else {
            merged.saturating_sub(1)
        };
        self.reporter.debug(format!(
            "Ref is stable, counted {} merge commits since tag",
            stable_dist
        ));

        Ok(VersionResult {
            base: ctx.tag.version,
            stable_dist,
            dev_dist: 0,
            is_stable: true,
            classification: Classification::Stable,
            stable_anchor: ctx.target.clone(),
        })
    }

    /// Find the stable commit right before the merge that brought `target` in
    ///
    /// Candidates are the merges between target and stable, oldest first. The
    /// first one that is itself on the stable line wins; merges made on side
    /// branches never absorbed the target into stable.
    fn reanchor(
        &self,
        ctx: &ResolutionContext,
        stable_commits: &HashSet<CommitId>,
    ) -> Result<CommitId> {
        let merges = self.graph.merge_commits_topo_order(&ctx.target, &ctx.stable)?;
        if merges.is_empty() {
            return Err(VersionError::malformed(format!(
                "no merge commit between ref ({}) and stable ({})",
                ctx.target.short(),
                ctx.stable.short()
            )));
        }

        let merge = merges
            .iter()
            .rev()
            .find(|merge| stable_commits.contains(*merge))
            .ok_or_else(|| {
                VersionError::invariant(format!(
                    "couldn't find an earliest ancestor of stable that is not a descendant of ref ({})",
                    ctx.target.short()
                ))
            })?;
        // A stable-line merge has its first parent on the line too, or at bottom
        let anchor = self.graph.first_parent(merge)?;
        self.reporter.debug(format!(
            "Found earliest descendant {}, taking its first parent {} as stable",
            merge.short(),
            anchor.short()
        ));

        if self.graph.is_ancestor(&ctx.target, &anchor)? {
            return Err(VersionError::invariant(format!(
                "ref ({}) should not be an ancestor of stable ({})",
                ctx.target.short(),
                anchor.short()
            )));
        }
        Ok(anchor)
    }

    fn resolve_merged(
        &self,
        ctx: &ResolutionContext,
        anchor: CommitId,
        stable_commits: &HashSet<CommitId>,
    ) -> Result<VersionResult> {
        let dev_dist = to_distance(self.graph.count_exclusive(&ctx.target, &anchor, true)?)?;
        let since_tag = self.graph.ancestry_path(&ctx.tag.commit, &anchor, false)?;
        let stable_dist = to_distance(
            since_tag
                .iter()
                .filter(|c| stable_commits.contains(*c))
                .count(),
        )?;
        self.reporter.debug(format!(
            "Counted {} merge commits on stable since tag and {} commits since last merge",
            stable_dist, dev_dist
        ));

        Ok(VersionResult {
            base: ctx.tag.version,
            stable_dist,
            dev_dist,
            is_stable: false,
            classification: Classification::Merged,
            stable_anchor: anchor,
        })
    }

    fn resolve_off_stable(
        &self,
        ctx: &ResolutionContext,
        anchor: CommitId,
    ) -> Result<VersionResult> {
        let dev_dist = to_distance(
            self.graph
                .count_exclusive(&ctx.target, &ctx.tag.commit, false)?,
        )?;
        self.reporter.warn(&BoundaryWarning::TagNotOnStable {
            tag: ctx.tag.name.clone(),
            stable: anchor.short().to_string(),
        });
        self.reporter.debug(format!("Counted {} commits since tag", dev_dist));

        Ok(VersionResult {
            base: ctx.tag.version,
            stable_dist: 0,
            dev_dist,
            is_stable: false,
            classification: Classification::OffStable,
            stable_anchor: anchor,
        })
    }
}

fn to_distance(count: usize) -> Result<u32> {
    u32::try_from(count)
        .map_err(|_| VersionError::malformed(format!("commit count {} out of range", count)))
}
