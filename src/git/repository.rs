use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use git2::{Commit, DiffOptions, ErrorCode, Oid, Repository as Git2Repo, Sort};
use log::debug;

use crate::domain::Tag;
use crate::error::{ConventionalError, Result};
use crate::git::{format_raw_commit, HistorySource};

/// Wrapper around git2::Repository implementing [HistorySource]
///
/// `git2::Repository` is `Send` but not `Sync`, so the handle sits behind a
/// mutex to satisfy the trait bounds.
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| git2::Error::from_str("repository handle poisoned").into())
    }
}

/// OID of the commit at HEAD, or `None` when HEAD is unborn
fn head_oid(repo: &Git2Repo) -> Result<Option<Oid>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve a tag name to the commit it points at (lightweight or annotated)
fn tag_commit_oid(repo: &Git2Repo, tag_name: &str) -> Result<Oid> {
    let reference = repo
        .find_reference(&format!("refs/tags/{}", tag_name))
        .map_err(|e| ConventionalError::tag(format!("Cannot find tag '{}': {}", tag_name, e)))?;
    Ok(reference.peel_to_commit()?.id())
}

/// Walk from HEAD newest first, optionally stopping at `hide`
fn walk_from_head(repo: &Git2Repo, head: Oid, hide: Option<Oid>) -> Result<Vec<Oid>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    revwalk.push(head)?;
    if let Some(hide) = hide {
        revwalk.hide(hide)?;
    }
    let oids = revwalk.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(oids)
}

/// Whether a commit changes anything under `path` relative to its first parent
fn touches_path(repo: &Git2Repo, commit: &Commit<'_>, path: &Path) -> Result<bool> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };

    let mut options = DiffOptions::new();
    options.pathspec(path);
    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut options))?;

    Ok(diff.deltas().len() > 0)
}

impl HistorySource for Git2Repository {
    fn raw_commits(&self, since: Option<&str>, path: Option<&Path>) -> Result<Vec<Vec<u8>>> {
        let repo = self.lock()?;
        let Some(head) = head_oid(&repo)? else {
            debug!("HEAD is unborn, no commits to analyze");
            return Ok(Vec::new());
        };

        let hide = since.map(|tag| tag_commit_oid(&repo, tag)).transpose()?;

        let mut raw_commits = Vec::new();
        for oid in walk_from_head(&repo, head, hide)? {
            let commit = repo.find_commit(oid)?;

            if let Some(path) = path {
                if !touches_path(&repo, &commit, path)? {
                    continue;
                }
            }

            raw_commits.push(format_raw_commit(&oid.to_string(), commit.message_bytes()));
        }

        // Chronological order (oldest first)
        raw_commits.reverse();

        debug!(
            "collected {} commits since {}",
            raw_commits.len(),
            since.unwrap_or("the start of history")
        );
        Ok(raw_commits)
    }

    fn semver_tags(&self, prefix: &str) -> Result<Vec<Tag>> {
        let repo = self.lock()?;
        let Some(head) = head_oid(&repo)? else {
            return Ok(Vec::new());
        };

        let mut tags_by_commit: HashMap<Oid, Vec<Tag>> = HashMap::new();
        let names = repo.tag_names(None)?;

        for name in names.iter().flatten() {
            let Some(tag) = Tag::parse(name, prefix) else {
                debug!("skipping tag '{}': not {}<semver>", name, prefix);
                continue;
            };
            match tag_commit_oid(&repo, name) {
                Ok(oid) => tags_by_commit.entry(oid).or_default().push(tag),
                Err(e) => debug!("skipping tag '{}': {}", name, e),
            }
        }

        let mut tags = Vec::new();
        for oid in walk_from_head(&repo, head, None)? {
            if let Some(mut on_commit) = tags_by_commit.remove(&oid) {
                on_commit.sort_by(|a, b| b.version.cmp(&a.version));
                tags.extend(on_commit);
            }
            if tags_by_commit.is_empty() {
                break;
            }
        }

        Ok(tags)
    }
}
