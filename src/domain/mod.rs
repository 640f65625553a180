//! Domain types - pure values independent of the revision backend

pub mod commit;
pub mod context;
pub mod tag;
pub mod version;

pub use commit::CommitId;
pub use context::{ResolutionContext, ResolveOptions};
pub use tag::{ReleaseTag, TagPattern};
pub use version::{Classification, Version, VersionResult};
