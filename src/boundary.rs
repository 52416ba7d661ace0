use std::fmt;

/// Warnings that occur when the analyzed history sits at a repository boundary.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag matches `<prefix><semver>`; history is analyzed from the first commit
    NoMatchingTags { prefix: String },
    /// No new commits since the latest tag
    NoNewCommits { latest_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoMatchingTags { prefix } => {
                write!(
                    f,
                    "No tags matching '{}<version>' found, analyzing the whole history",
                    prefix
                )
            }
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
        }
    }
}
