//! Release execution: turn a decided level into a version-file edit, a commit,
//! an optional tag and an optional push.

pub mod executor;
pub mod mock;
pub mod version_file;

pub use executor::Git2Executor;
pub use mock::RecordingExecutor;

use semver::Version;

use crate::domain::Level;
use crate::error::Result;
use crate::git::DEFAULT_TAG_PREFIX;

/// Release commit message used when none is configured
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: Release v%{version} [skip ci]";

/// Placeholder replaced by the new version in commit message templates
pub const VERSION_PLACEHOLDER: &str = "%{version}";

/// Everything the executor needs to perform one release
#[derive(Debug, Clone, PartialEq)]
pub struct BumpRequest {
    pub level: Level,
    pub create_tag: bool,
    pub push: bool,
    pub dry_run: bool,
    /// Template containing a `%{version}` placeholder
    pub commit_message: String,
    pub tag_prefix: String,
}

impl BumpRequest {
    pub fn new(level: Level) -> Self {
        BumpRequest {
            level,
            create_tag: true,
            push: false,
            dry_run: false,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
        }
    }

    /// Commit message for the given version
    pub fn render_message(&self, version: &Version) -> String {
        self.commit_message
            .replace(VERSION_PLACEHOLDER, &version.to_string())
    }
}

/// What a release did (or, in dry-run, would do)
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    pub previous: Version,
    pub next: Version,
    pub message: String,
    pub tag: Option<String>,
    pub committed: bool,
    pub pushed: bool,
}

/// Performs the version bump for a decided level.
///
/// Implementations own the mechanics (files, commits, tags, remotes); callers
/// only hand over a [BumpRequest].
pub trait BumpExecutor: Send + Sync {
    fn execute(&self, request: &BumpRequest) -> Result<BumpOutcome>;
}
