//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{
    compute_version, run_version_workflow, StableSelection, VersionOutcome, VersionWorkflowArgs,
    WorkflowResult,
};
