use std::fs;
use std::path::Path;

use crate::domain::VersionResult;
use crate::error::Result;

/// Renders a resolution as the final version string.
///
/// The release version comes first as `MAJOR.MINOR.PATCH`. Then:
/// - `.r{stable_dist}` when at least one stabilization merge landed since the tag
/// - `.dev{dev_dist}` when the target is not stable, unless the next-stable
///   projection was requested
///
/// # Example
/// ```ignore
/// // 2 merges on stable since gmic-3.2.0, 5 commits on the feature branch
/// assert_eq!(format_version(&result, false), "3.2.0.r2.dev5");
/// assert_eq!(format_version(&result, true), "3.2.0.r2");
/// ```
pub fn format_version(result: &VersionResult, next_stable: bool) -> String {
    let mut version = result.base.to_string();
    if result.stable_dist > 0 {
        version.push_str(&format!(".r{}", result.stable_dist));
    }
    if !result.is_stable && !next_stable {
        version.push_str(&format!(".dev{}", result.dev_dist));
    }
    version
}

/// Writes the version string to `path`, replacing any previous content.
///
/// The file holds exactly the version, without a trailing newline.
pub fn write_version_file(path: &Path, version: &str) -> Result<()> {
    fs::write(path, version)?;
    Ok(())
}
