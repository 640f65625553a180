//! Main workflow orchestration logic
//!
//! Turns the command-line request into a resolution: resolves the refs,
//! asks the resolver for distances, formats the version and optionally
//! persists it. Launching a packaging command is left to the caller so the
//! version can be printed first.

use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::config::{load_config, Config};
use crate::domain::{CommitId, ResolveOptions, VersionResult};
use crate::error::{Result, VersionError};
use crate::git::{Git2Graph, RevisionGraph};
use crate::packaging::{PackageAction, PackageCommand};
use crate::resolver::VersionResolver;
use crate::ui::Reporter;
use crate::version::{format_version, write_version_file};

/// Which ref designates the stable line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StableSelection {
    /// The stable branch from configuration
    #[default]
    Configured,
    /// An explicitly named ref
    Named(String),
    /// The evaluated ref itself
    SameAsRef,
}

/// Arguments for the version workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Where repository discovery starts
    pub repo_path: String,

    /// Ref whose version is computed
    pub reference: String,

    pub stable: StableSelection,

    /// Bottom ref override
    pub bottom: Option<String>,

    /// Compute as if `reference` had just been merged into stable
    pub next_stable: bool,

    /// Persist the result to the version file
    pub update: bool,

    /// Packaging step and its forwarded arguments; implies `update`
    pub package: Option<(PackageAction, Vec<String>)>,

    pub verbose: bool,
}

impl Default for VersionWorkflowArgs {
    fn default() -> Self {
        VersionWorkflowArgs {
            config_path: None,
            repo_path: ".".to_string(),
            reference: "HEAD".to_string(),
            stable: StableSelection::Configured,
            bottom: None,
            next_stable: false,
            update: false,
            package: None,
            verbose: false,
        }
    }
}

/// A computed version together with how it was derived
#[derive(Debug, Clone, PartialEq)]
pub struct VersionOutcome {
    pub version: String,
    pub result: VersionResult,
}

/// Result of a successful version workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub outcome: VersionOutcome,

    /// Work tree the version file and packaging commands refer to
    pub workdir: PathBuf,

    /// Version file written, if any
    pub written_to: Option<PathBuf>,

    /// Packaging command still to be launched
    pub package: Option<PackageCommand>,
}

impl WorkflowResult {
    pub fn version(&self) -> &str {
        &self.outcome.version
    }

    /// Run the pending packaging command, if any
    ///
    /// # Returns
    /// * `Ok(code)` - Exit code of the command, 0 when there is nothing to run
    pub fn launch(&self, reporter: Reporter) -> Result<i32> {
        match &self.package {
            Some(command) => {
                reporter.debug(format!("Invoking {} in {}", command, self.workdir.display()));
                command.run(&self.workdir, self.version())
            }
            None => Ok(0),
        }
    }
}

/// Compute the version of `args.reference` against any revision graph
pub fn compute_version<G: RevisionGraph>(
    graph: &G,
    args: &VersionWorkflowArgs,
    config: &Config,
    reporter: Reporter,
) -> Result<VersionOutcome> {
    let target = graph.resolve(&args.reference)?;
    reporter.debug(format!(
        "Using starting point '{}' i.e {}",
        args.reference,
        target.short()
    ));

    let (stable_ref, stable) = resolve_stable(graph, args, config, &target, reporter)?;
    reporter.debug(format!(
        "Using stable ref '{}' i.e {}",
        stable_ref,
        stable.short()
    ));

    let bottom_ref = args
        .bottom
        .as_deref()
        .unwrap_or(config.versioning.bottom.as_str());
    let bottom = graph.resolve(bottom_ref)?;
    reporter.debug(format!(
        "Using bottom ref '{}' i.e {}",
        bottom_ref,
        bottom.short()
    ));

    let pattern = config.versioning.tag_pattern()?;
    let resolver = VersionResolver::new(graph, reporter);
    let ctx = resolver.context_for(target, stable, bottom, &pattern)?;
    let result = resolver.resolve(
        &ctx,
        ResolveOptions {
            next_stable: args.next_stable,
        },
    )?;

    Ok(VersionOutcome {
        version: format_version(&result, args.next_stable),
        result,
    })
}

/// Resolve the stable line, falling back to the remote-tracking branch
fn resolve_stable<G: RevisionGraph>(
    graph: &G,
    args: &VersionWorkflowArgs,
    config: &Config,
    target: &CommitId,
    reporter: Reporter,
) -> Result<(String, CommitId)> {
    let name = match &args.stable {
        StableSelection::SameAsRef => return Ok((args.reference.clone(), target.clone())),
        StableSelection::Named(name) => name.clone(),
        StableSelection::Configured => config.versioning.stable_branch.clone(),
    };
    if name == args.reference {
        return Ok((name, target.clone()));
    }

    if let Some(stable) = graph.try_resolve(&name)? {
        return Ok((name, stable));
    }
    if name.contains('/') {
        return Err(VersionError::ref_resolution(name));
    }

    let remote = format!("{}/{}", config.versioning.remote, name);
    let stable = graph
        .try_resolve(&remote)?
        .ok_or_else(|| VersionError::ref_resolution(format!("{} or {}", name, remote)))?;
    reporter.warn(&BoundaryWarning::RemoteStableFallback {
        local: name,
        remote: remote.clone(),
    });
    Ok((remote, stable))
}

/// Main version workflow
///
/// Orchestrates one run against the repository found from `args.repo_path`:
/// 1. Load configuration
/// 2. Resolve refs and compute the version
/// 3. Write the version file when requested (or implied by packaging)
/// 4. Prepare the packaging command
pub fn run_version_workflow(args: &VersionWorkflowArgs) -> Result<WorkflowResult> {
    let reporter = Reporter::new(args.verbose);
    let graph = Git2Graph::open(&args.repo_path)?;
    let workdir = graph
        .workdir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&args.repo_path));

    let config = load_config(args.config_path.as_deref(), Some(&workdir))?;
    let outcome = compute_version(&graph, args, &config, reporter)?;

    let written_to = if args.update || args.package.is_some() {
        let path = workdir.join(&config.versioning.output_file);
        reporter.debug(format!("Writing result to {}", path.display()));
        write_version_file(&path, &outcome.version)?;
        Some(path)
    } else {
        None
    };

    let package = match &args.package {
        Some((action, forwarded)) => {
            let base = match action {
                PackageAction::Build => &config.packaging.build,
                PackageAction::Install => &config.packaging.install,
            };
            Some(PackageCommand::new(*action, base, forwarded)?)
        }
        None => None,
    };

    Ok(WorkflowResult {
        outcome,
        workdir,
        written_to,
        package,
    })
}
