use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use git2::{Repository, Signature, Status, StatusOptions};
use log::{debug, info};

use crate::domain::{version, Tag};
use crate::error::{ConventionalError, Result};
use crate::release::{version_file, BumpExecutor, BumpOutcome, BumpRequest};

/// [BumpExecutor] that edits a version file and records the release with git2
pub struct Git2Executor {
    repo: Mutex<Repository>,
    /// Version file, relative to the repository working directory
    version_file: PathBuf,
    remote: String,
}

impl Git2Executor {
    /// Open or discover the repository containing `path`
    pub fn open<P: AsRef<Path>>(
        path: P,
        version_file: impl Into<PathBuf>,
        remote: impl Into<String>,
    ) -> Result<Self> {
        Ok(Git2Executor {
            repo: Mutex::new(Repository::discover(path)?),
            version_file: version_file.into(),
            remote: remote.into(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Repository>> {
        self.repo
            .lock()
            .map_err(|_| git2::Error::from_str("repository handle poisoned").into())
    }

    /// Fail when the index holds staged changes other than the version file
    fn ensure_clean_index(&self, repo: &Repository) -> Result<()> {
        let staged = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;

        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let paths: Vec<String> = repo
            .statuses(Some(&mut options))?
            .iter()
            .filter(|entry| entry.status().intersects(staged))
            .filter_map(|entry| entry.path().map(str::to_string))
            .filter(|path| Path::new(path) != self.version_file)
            .collect();

        if paths.is_empty() {
            Ok(())
        } else {
            Err(ConventionalError::StagedChanges(paths.join(", ")))
        }
    }

    /// Stage the version file and commit it on top of HEAD
    fn commit_version_file(&self, repo: &Repository, message: &str) -> Result<()> {
        let mut index = repo.index()?;
        index.add_path(&self.version_file)?;
        index.write()?;

        let tree = repo.find_tree(index.write_tree()?)?;
        let parent = repo.head()?.peel_to_commit()?;
        let signature = signature(repo)?;

        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        debug!("created release commit {}", oid);
        Ok(())
    }

    /// Pushes the current branch and, if given, a tag to the configured remote.
    ///
    /// Authenticates with the SSH agent, keys from ~/.ssh/, or default credentials.
    fn push(&self, repo: &Repository, tag_name: Option<&str>) -> Result<()> {
        let mut remote = repo.find_remote(&self.remote).map_err(|_| {
            ConventionalError::remote(format!("No remote named '{}' found", self.remote))
        })?;

        let head = repo.head()?;
        let branch_ref = head
            .name()
            .ok_or_else(|| ConventionalError::remote("HEAD is not a valid reference"))?
            .to_string();

        let mut refspecs = vec![branch_ref];
        if let Some(tag_name) = tag_name {
            refspecs.push(format!("refs/tags/{}", tag_name));
        }

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }
            git2::Cred::default()
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push failed for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        remote
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    ConventionalError::remote(format!("Network error during push: {}", e))
                }
                _ => ConventionalError::remote(format!(
                    "Failed to push to '{}': {}",
                    self.remote, e
                )),
            })
    }
}

fn workdir(repo: &Repository) -> Result<&Path> {
    repo.workdir()
        .ok_or_else(|| ConventionalError::config("Cannot release from a bare repository"))
}

fn signature(repo: &Repository) -> Result<Signature<'static>> {
    match repo.signature() {
        Ok(signature) => Ok(signature),
        Err(e) => {
            debug!("no git identity configured ({}), using fallback", e);
            Ok(Signature::now(
                "conventional-bump",
                "conventional-bump@localhost",
            )?)
        }
    }
}

/// Creates a lightweight tag on the current HEAD commit.
fn create_tag(repo: &Repository, tag_name: &str) -> Result<()> {
    let head = repo.head()?.peel_to_commit()?;
    repo.tag_lightweight(tag_name, head.as_object(), false)
        .map_err(|e| ConventionalError::tag(format!("Failed to create tag '{}': {}", tag_name, e)))?;
    Ok(())
}

impl BumpExecutor for Git2Executor {
    fn execute(&self, request: &BumpRequest) -> Result<BumpOutcome> {
        let repo = self.lock()?;
        let path = workdir(&repo)?.join(&self.version_file);
        self.ensure_clean_index(&repo)?;
        let contents = fs::read_to_string(&path).map_err(|e| {
            ConventionalError::config(format!(
                "Cannot read version file {}: {}",
                path.display(),
                e
            ))
        })?;

        let previous = version_file::read_version(&contents)?;
        let next = version::bump(&previous, request.level);
        let message = request.render_message(&next);
        let tag = request
            .create_tag
            .then(|| Tag::format(&request.tag_prefix, &next));

        let mut outcome = BumpOutcome {
            previous,
            next,
            message,
            tag,
            committed: false,
            pushed: false,
        };

        if request.dry_run {
            info!(
                "dry run: would bump {} -> {}",
                outcome.previous, outcome.next
            );
            return Ok(outcome);
        }

        fs::write(&path, version_file::replace_version(&contents, &outcome.next)?)?;
        self.commit_version_file(&repo, &outcome.message)?;
        outcome.committed = true;

        if let Some(tag) = &outcome.tag {
            create_tag(&repo, tag)?;
        }

        if request.push {
            self.push(&repo, outcome.tag.as_deref())?;
            outcome.pushed = true;
        }

        info!("bumped {} -> {}", outcome.previous, outcome.next);
        Ok(outcome)
    }
}
