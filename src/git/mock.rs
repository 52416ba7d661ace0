use std::path::{Path, PathBuf};

use crate::domain::Tag;
use crate::error::{ConventionalError, Result};
use crate::git::{format_raw_commit, HistorySource};

/// A commit in a [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct MockCommit {
    pub id: String,
    pub message: String,
    pub tags: Vec<String>,
    pub paths: Vec<PathBuf>,
}

/// Linear in-memory history for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    /// Oldest first
    commits: Vec<MockCommit>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository::default()
    }

    /// Append a commit on top of the history
    pub fn add_commit(&mut self, id: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.add_commit_touching(id, message, &[])
    }

    /// Append a commit that changes the given paths
    pub fn add_commit_touching(
        &mut self,
        id: impl Into<String>,
        message: impl Into<String>,
        paths: &[&str],
    ) -> &mut Self {
        self.commits.push(MockCommit {
            id: id.into(),
            message: message.into(),
            tags: Vec::new(),
            paths: paths.iter().map(PathBuf::from).collect(),
        });
        self
    }

    /// Tag the most recent commit
    pub fn add_tag(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(commit) = self.commits.last_mut() {
            commit.tags.push(name.into());
        }
        self
    }
}

impl HistorySource for MockRepository {
    fn raw_commits(&self, since: Option<&str>, path: Option<&Path>) -> Result<Vec<Vec<u8>>> {
        let start = match since {
            Some(tag) => {
                let position = self
                    .commits
                    .iter()
                    .position(|commit| commit.tags.iter().any(|t| t == tag))
                    .ok_or_else(|| ConventionalError::tag(format!("Cannot find tag '{}'", tag)))?;
                position + 1
            }
            None => 0,
        };

        Ok(self.commits[start..]
            .iter()
            .filter(|commit| match path {
                Some(path) => commit.paths.iter().any(|p| p.starts_with(path)),
                None => true,
            })
            .map(|commit| format_raw_commit(&commit.id, commit.message.as_bytes()))
            .collect())
    }

    fn semver_tags(&self, prefix: &str) -> Result<Vec<Tag>> {
        let mut tags = Vec::new();
        for commit in self.commits.iter().rev() {
            let mut on_commit: Vec<Tag> = commit
                .tags
                .iter()
                .filter_map(|name| Tag::parse(name, prefix))
                .collect();
            on_commit.sort_by(|a, b| b.version.cmp(&a.version));
            tags.extend(on_commit);
        }
        Ok(tags)
    }
}
