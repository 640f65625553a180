use crate::domain::{CommitId, Version};
use crate::error::{Result, VersionError};
use regex::Regex;

const VERSION_PLACEHOLDER: &str = "{version}";

/// A release tag found in history: the tag name, the commit it points at and
/// the version it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    pub commit: CommitId,
    pub version: Version,
}

impl ReleaseTag {
    pub fn new(name: impl Into<String>, commit: CommitId, version: Version) -> Self {
        ReleaseTag {
            name: name.into(),
            commit,
            version,
        }
    }
}

/// Release tag naming pattern (e.g., "gmic-{version}", "v{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pattern: String,
    regex: Regex,
}

impl TagPattern {
    /// Create a tag pattern, validating the `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches(VERSION_PLACEHOLDER).count() != 1 {
            return Err(VersionError::config(format!(
                "Tag pattern '{}' must contain exactly one {} placeholder",
                pattern, VERSION_PLACEHOLDER
            )));
        }

        // Escape everything, then open up the placeholder as a capture group
        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\{version\}", r"(\d+\.\d+\.\d+)");
        let regex = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| VersionError::config(format!("Invalid tag pattern: {}", e)))?;

        Ok(TagPattern { pattern, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Glob understood by `git describe --match` and libgit2's describe
    /// Example: "gmic-{version}" -> "gmic-[0-9]*.[0-9]*.[0-9]*"
    pub fn glob(&self) -> String {
        self.pattern.replace(VERSION_PLACEHOLDER, "[0-9]*.[0-9]*.[0-9]*")
    }

    /// Validate if a tag name matches this pattern
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    /// Extract the release version declared by a tag name
    pub fn parse_version(&self, tag: &str) -> Result<Version> {
        let captures = self.regex.captures(tag).ok_or_else(|| {
            VersionError::version(format!(
                "Couldn't parse tag '{}' with pattern '{}'",
                tag, self.pattern
            ))
        })?;
        let version = captures
            .get(1)
            .map(|m| m.as_str())
            .ok_or_else(|| VersionError::version(format!("No version in tag '{}'", tag)))?;
        Version::parse(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_glob() {
        let pattern = TagPattern::new("gmic-{version}").unwrap();
        assert_eq!(pattern.glob(), "gmic-[0-9]*.[0-9]*.[0-9]*");
    }

    #[test]
    fn test_pattern_matches() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert!(pattern.matches("v1.2.3"));
        assert!(!pattern.matches("release-1.2.3"));
        assert!(!pattern.matches("v1.2"));
        assert!(!pattern.matches("v1.2.3-rc1"));
    }

    #[test]
    fn test_pattern_escapes_dots_in_prefix() {
        let pattern = TagPattern::new("rel.{version}").unwrap();
        assert!(pattern.matches("rel.1.0.0"));
        assert!(!pattern.matches("relx1.0.0"));
    }

    #[test]
    fn test_parse_version() {
        let pattern = TagPattern::new("gmic-{version}").unwrap();
        assert_eq!(
            pattern.parse_version("gmic-3.2.0").unwrap(),
            Version::new(3, 2, 0)
        );
        assert!(pattern.parse_version("gmic-3.2").is_err());
    }

    #[test]
    fn test_pattern_requires_placeholder() {
        assert!(TagPattern::new("release").is_err());
        assert!(TagPattern::new("{version}-{version}").is_err());
    }

    #[test]
    fn test_multi_digit_components() {
        let pattern = TagPattern::new("gmic-{version}").unwrap();
        assert_eq!(pattern.as_str(), "gmic-{version}");
        assert_eq!(
            pattern.parse_version("gmic-10.20.301").unwrap(),
            Version::new(10, 20, 301)
        );
    }
}
