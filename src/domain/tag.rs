use semver::Version;

/// A git tag whose name is a prefix followed by a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Full tag name (e.g. "v1.2.3")
    pub value: String,
    pub version: Version,
    pub prefix: String,
}

impl Tag {
    /// Parse a tag name against a prefix.
    ///
    /// Returns `None` when the name does not start with `prefix` or the
    /// remainder is not a valid semantic version.
    ///
    /// # Example
    /// ```
    /// use conventional_bump::domain::Tag;
    ///
    /// assert!(Tag::parse("v1.2.3", "v").is_some());
    /// assert!(Tag::parse("release-1.2.3", "v").is_none());
    /// assert!(Tag::parse("v1.2", "v").is_none());
    /// ```
    pub fn parse(name: &str, prefix: &str) -> Option<Self> {
        let version = Version::parse(name.strip_prefix(prefix)?).ok()?;
        Some(Tag {
            value: name.to_string(),
            version,
            prefix: prefix.to_string(),
        })
    }

    /// Tag name for a version under a prefix (e.g. "v" + 1.2.3 -> "v1.2.3")
    pub fn format(prefix: &str, version: &Version) -> String {
        format!("{}{}", prefix, version)
    }

    /// Whether this tag's major component is 0
    pub fn is_pre_major(&self) -> bool {
        self.version.major == 0
    }
}

/// Whether a release line is pre-major: the latest tag has major 0, or no tag exists
pub fn is_pre_major(latest: Option<&Tag>) -> bool {
    latest.map_or(true, Tag::is_pre_major)
}
