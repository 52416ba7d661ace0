// Shared helpers for tests that need a real git repository.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use git2::{ObjectType, Oid, Repository, Signature};
use tempfile::TempDir;

pub fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test Author").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    (dir, repo)
}

pub fn commit_file(repo: &Repository, path: &str, contents: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    let full_path = workdir.join(path);
    fs::create_dir_all(full_path.parent().unwrap()).unwrap();
    fs::write(&full_path, contents).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Test Author", "test@example.com").unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parent_refs,
    )
    .unwrap()
}

/// Commit on top of HEAD with a message that does not have to be UTF-8
pub fn commit_raw_message(repo: &Repository, message: &[u8]) -> Oid {
    let head = repo.head().unwrap();
    let parent = head.peel_to_commit().unwrap();

    let mut object = format!(
        "tree {}\nparent {}\nauthor Test Author <test@example.com> 1700000000 +0000\ncommitter Test Author <test@example.com> 1700000000 +0000\n\n",
        parent.tree_id(),
        parent.id()
    )
    .into_bytes();
    object.extend_from_slice(message);

    let oid = repo.odb().unwrap().write(ObjectType::Commit, &object).unwrap();
    let branch = head.name().unwrap().to_string();
    repo.reference(&branch, oid, true, "raw commit").unwrap();
    oid
}

pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false).unwrap();
}

pub fn annotated_tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    let signature = Signature::now("Test Author", "test@example.com").unwrap();
    repo.tag(name, head.as_object(), &signature, name, false)
        .unwrap();
}

pub const MANIFEST: &str = "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n";
