//! History source abstraction
//!
//! The decision core only ever sees raw commit text and parsed tags. This module
//! defines the [HistorySource] trait that supplies them, with two
//! implementations:
//!
//! - [repository::Git2Repository]: reads a real repository through `git2`
//! - [mock::MockRepository]: in-memory history for tests
//!
//! ```rust
//! # use conventional_bump::git::HistorySource;
//! # fn example<H: HistorySource>(history: &H) -> conventional_bump::Result<()> {
//! let latest = history.semver_tags("v")?.into_iter().next();
//! let raw_commits = history.raw_commits(latest.as_ref().map(|t| t.value.as_str()), None)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::domain::Tag;
use crate::error::Result;

/// Tag prefix used when none is configured
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Format a raw commit record the way the parser expects it: id line, then message.
///
/// Messages stay as bytes; the parser decides whether they are valid text.
pub fn format_raw_commit(id: &str, message: &[u8]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(id.len() + 1 + message.len());
    raw.extend_from_slice(id.as_bytes());
    raw.push(b'\n');
    raw.extend_from_slice(message);
    raw
}

/// Supplier of raw commit records and semantic-version tags.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
pub trait HistorySource: Send + Sync {
    /// Raw commit records reachable from `HEAD` but not from `since`
    ///
    /// # Arguments
    /// * `since` - Tag name to start after (exclusive); `None` means the start of history
    /// * `path` - Only return commits touching this path (relative to the repository root)
    ///
    /// # Returns
    /// * `Ok(Vec<Vec<u8>>)` - `"<id>\n<message>"` records, oldest first. Message
    ///   bytes are passed through untouched, even when they are not UTF-8
    /// * `Err` - If `since` does not exist or there's a Git error
    fn raw_commits(&self, since: Option<&str>, path: Option<&Path>) -> Result<Vec<Vec<u8>>>;

    /// Tags named `prefix` + semantic version, most recent first
    ///
    /// Tags on the same commit are ordered by descending version. Tags whose
    /// remainder is not a valid semantic version are skipped.
    fn semver_tags(&self, prefix: &str) -> Result<Vec<Tag>>;
}
