use anyhow::Result;
use clap::Parser;

use git_stable_version::cli::{run_version_workflow, StableSelection, VersionWorkflowArgs};
use git_stable_version::packaging::PackageAction;
use git_stable_version::ui::{self, Reporter};

#[derive(clap::Parser)]
#[command(
    name = "git-stable-version",
    about = "Calculate the project version from the shape of its git history",
    version
)]
struct Args {
    #[arg(
        short,
        long,
        help = "Write the version to the configured file instead of only printing it"
    )]
    update: bool,

    #[arg(short, long, help = "Print debug messages to stderr")]
    verbose: bool,

    #[arg(
        short,
        long = "ref",
        default_value = "HEAD",
        help = "Calculate the version of this ref"
    )]
    reference: String,

    #[arg(
        short,
        long,
        num_args = 0..=1,
        value_name = "REF",
        help = "Ref of the stable line; without a value, --ref itself is stable [default: configured stable branch]"
    )]
    stable: Option<Option<String>>,

    #[arg(
        short,
        long,
        help = "Calculate the version as if --ref had just been merged into stable"
    )]
    next_stable: bool,

    #[arg(
        short,
        long,
        value_name = "REF",
        help = "Earliest commit accounted for [default: configured bottom]"
    )]
    bottom: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long = "repo",
        default_value = ".",
        help = "Run as if started in this directory"
    )]
    repo: String,

    #[arg(
        long,
        num_args = 0..,
        allow_hyphen_values = true,
        conflicts_with = "install",
        value_name = "ARGS",
        help = "Write the version file, then run the configured build command with ARGS"
    )]
    build: Option<Vec<String>>,

    #[arg(
        long,
        num_args = 0..,
        allow_hyphen_values = true,
        value_name = "ARGS",
        help = "Write the version file, then run the configured install command with ARGS"
    )]
    install: Option<Vec<String>>,
}

impl Args {
    fn into_workflow_args(self) -> VersionWorkflowArgs {
        let stable = match self.stable {
            None => StableSelection::Configured,
            Some(None) => StableSelection::SameAsRef,
            Some(Some(name)) => StableSelection::Named(name),
        };
        let package = match (self.build, self.install) {
            (Some(forwarded), _) => Some((PackageAction::Build, forwarded)),
            (None, Some(forwarded)) => Some((PackageAction::Install, forwarded)),
            (None, None) => None,
        };

        VersionWorkflowArgs {
            config_path: self.config,
            repo_path: self.repo,
            reference: self.reference,
            stable,
            bottom: self.bottom,
            next_stable: self.next_stable,
            update: self.update,
            package,
            verbose: self.verbose,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse().into_workflow_args();
    let reporter = Reporter::new(args.verbose);

    let workflow = match run_version_workflow(&args) {
        Ok(workflow) => workflow,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    println!("{}", workflow.version());
    if let Some(command) = &workflow.package {
        ui::display_status(&format!("Running {}", command));
    }

    match workflow.launch(reporter) {
        Ok(0) => Ok(()),
        Ok(code) => {
            if let Some(command) = &workflow.package {
                ui::display_error(&format!("'{}' exited with code {}", command, code));
            }
            std::process::exit(code);
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
