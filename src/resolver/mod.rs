//! Resolution engine deriving a version from the shape of history

pub mod version_resolver;

pub use version_resolver::VersionResolver;
