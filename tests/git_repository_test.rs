mod common;

use std::fs;
use std::path::Path;

use common::{
    annotated_tag_head, commit_file, commit_raw_message, init_repo, tag_head, MANIFEST,
};
use conventional_bump::cli::{recommend, run_bump, AnalysisArgs, BumpWorkflowArgs};
use conventional_bump::domain::Level;
use conventional_bump::git::{Git2Repository, HistorySource};
use conventional_bump::release::{BumpExecutor, BumpRequest, Git2Executor};
use conventional_bump::ConventionalError;
use semver::Version;

#[test]
fn test_semver_tags_most_recent_first() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    tag_head(&repo, "v0.1.0");
    commit_file(&repo, "src/lib.rs", "// a\n", "feat: a");
    annotated_tag_head(&repo, "v0.2.0");
    tag_head(&repo, "v0.2.0-rc.1");
    tag_head(&repo, "release-candidate");
    commit_file(&repo, "src/lib.rs", "// b\n", "fix: b");

    let history = Git2Repository::open(dir.path()).unwrap();
    let tags = history.semver_tags("v").unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(names, vec!["v0.2.0", "v0.2.0-rc.1", "v0.1.0"]);
}

#[test]
fn test_raw_commits_since_tag_oldest_first() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    tag_head(&repo, "v1.0.0");
    let first = commit_file(&repo, "src/lib.rs", "// a\n", "feat: a");
    let second = commit_file(&repo, "src/lib.rs", "// b\n", "fix: b\n\nDetails.\n");

    let history = Git2Repository::open(dir.path()).unwrap();
    let raw = history.raw_commits(Some("v1.0.0"), None).unwrap();
    assert_eq!(
        raw,
        vec![
            format!("{}\nfeat: a", first).into_bytes(),
            format!("{}\nfix: b\n\nDetails.\n", second).into_bytes(),
        ]
    );
    assert_eq!(history.raw_commits(None, None).unwrap().len(), 3);
}

#[test]
fn test_raw_commits_unknown_tag_is_error() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");

    let history = Git2Repository::open(dir.path()).unwrap();
    assert!(history.raw_commits(Some("v9.9.9"), None).is_err());
}

#[test]
fn test_raw_commits_path_filter() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    tag_head(&repo, "v1.0.0");
    commit_file(&repo, "crates/core/src/lib.rs", "// core\n", "feat(core): engine");
    commit_file(&repo, "crates/cli/src/main.rs", "// cli\n", "feat(cli)!: flags");

    let history = Git2Repository::open(dir.path()).unwrap();
    let raw = history
        .raw_commits(Some("v1.0.0"), Some(Path::new("crates/core")))
        .unwrap();
    assert_eq!(raw.len(), 1);
    assert!(raw[0].ends_with(b"\nfeat(core): engine"));
}

#[test]
fn test_unborn_repository_is_empty() {
    let (dir, _repo) = init_repo();

    let history = Git2Repository::open(dir.path()).unwrap();
    assert!(history.semver_tags("v").unwrap().is_empty());
    assert!(history.raw_commits(None, None).unwrap().is_empty());
}

#[test]
fn test_raw_commits_keep_message_bytes() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    tag_head(&repo, "v1.0.0");
    let oid = commit_raw_message(&repo, b"fix: caf\xe9\n");

    let history = Git2Repository::open(dir.path()).unwrap();
    let raw = history.raw_commits(Some("v1.0.0"), None).unwrap();
    let mut expected = format!("{}\n", oid).into_bytes();
    expected.extend_from_slice(b"fix: caf\xe9\n");
    assert_eq!(raw, vec![expected]);
}

#[test]
fn test_non_utf8_message_aborts_recommendation() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    tag_head(&repo, "v1.0.0");
    commit_file(&repo, "src/lib.rs", "// a\n", "feat: widget");
    commit_raw_message(&repo, b"fix: caf\xe9\n");

    let history = Git2Repository::open(dir.path()).unwrap();
    let err = recommend(&history, &AnalysisArgs::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConventionalError>(),
        Some(ConventionalError::InvalidInput(_))
    ));

    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    assert!(run_bump(&history, &executor, &BumpWorkflowArgs::default()).is_err());
    let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert_eq!(manifest, MANIFEST);
}

#[test]
fn test_recommend_against_real_history() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    tag_head(&repo, "v1.3.0");
    commit_file(&repo, "src/lib.rs", "// a\n", "docs: readme");
    commit_file(
        &repo,
        "src/lib.rs",
        "// b\n",
        "refactor: config\n\nBREAKING CHANGE: config moved",
    );

    let history = Git2Repository::open(dir.path()).unwrap();
    let recommendation = recommend(&history, &AnalysisArgs::default()).unwrap();
    assert_eq!(recommendation.level(), Level::Major);
    assert_eq!(recommendation.decision.breaking_changes, 1);
    assert_eq!(
        recommendation.commits[1].breaking_change.as_deref(),
        Some("config moved")
    );
}

#[test]
fn test_executor_dry_run_leaves_repository_untouched() {
    let (dir, repo) = init_repo();
    let head = commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");

    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    let mut request = BumpRequest::new(Level::Minor);
    request.dry_run = true;

    let outcome = executor.execute(&request).unwrap();
    assert_eq!(outcome.previous, Version::new(0, 1, 0));
    assert_eq!(outcome.next, Version::new(0, 2, 0));
    assert_eq!(outcome.tag.as_deref(), Some("v0.2.0"));
    assert!(!outcome.committed);

    let contents = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert_eq!(contents, MANIFEST);
    assert_eq!(repo.head().unwrap().peel_to_commit().unwrap().id(), head);
    assert!(repo.find_reference("refs/tags/v0.2.0").is_err());
}

#[test]
fn test_executor_commits_and_tags() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");

    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    let outcome = executor.execute(&BumpRequest::new(Level::Minor)).unwrap();
    assert!(outcome.committed);
    assert!(!outcome.pushed);

    let contents = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert!(contents.contains("version = \"0.2.0\""));
    assert!(contents.contains("name = \"demo\""));

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("chore: Release v0.2.0 [skip ci]"));

    let tagged = repo
        .find_reference("refs/tags/v0.2.0")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(tagged.id(), head.id());
}

#[test]
fn test_executor_push_without_remote_fails_after_commit() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");

    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    let mut request = BumpRequest::new(Level::Patch);
    request.push = true;

    assert!(executor.execute(&request).is_err());
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("chore: Release v0.1.1 [skip ci]"));
}

#[test]
fn test_executor_missing_version_file() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "README.md", "# demo\n", "chore: init");

    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    assert!(executor.execute(&BumpRequest::new(Level::Patch)).is_err());
}

#[test]
fn test_bump_workflow_end_to_end() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    tag_head(&repo, "v0.1.0");
    commit_file(&repo, "src/lib.rs", "// a\n", "feat: widget");

    let history = Git2Repository::open(dir.path()).unwrap();
    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    let result = run_bump(&history, &executor, &BumpWorkflowArgs::default()).unwrap();

    // Pre-major: the feature is demoted to a patch release
    assert_eq!(result.recommendation.level(), Level::Patch);
    assert_eq!(result.outcome.next, Version::new(0, 1, 1));
    assert!(repo.find_reference("refs/tags/v0.1.1").is_ok());

    let tags = history.semver_tags("v").unwrap();
    assert_eq!(tags[0].value, "v0.1.1");
}

#[test]
fn test_executor_refuses_unrelated_staged_changes() {
    let (dir, repo) = init_repo();
    let head = commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");

    fs::write(dir.path().join("notes.txt"), "work in progress\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("notes.txt")).unwrap();
    index.write().unwrap();

    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    let err = executor
        .execute(&BumpRequest::new(Level::Patch))
        .unwrap_err();
    match err {
        ConventionalError::StagedChanges(paths) => assert_eq!(paths, "notes.txt"),
        other => panic!("unexpected error: {}", other),
    }

    let contents = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert_eq!(contents, MANIFEST);
    assert_eq!(repo.head().unwrap().peel_to_commit().unwrap().id(), head);
}

#[test]
fn test_executor_allows_staged_version_file() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "Cargo.toml", MANIFEST, "chore: init");
    fs::write(dir.path().join("untracked.txt"), "scratch\n").unwrap();

    let staged = MANIFEST.replace("edition = \"2021\"", "edition = \"2021\"\nlicense = \"MIT\"");
    fs::write(dir.path().join("Cargo.toml"), &staged).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("Cargo.toml")).unwrap();
    index.write().unwrap();

    let executor = Git2Executor::open(dir.path(), "Cargo.toml", "origin").unwrap();
    let outcome = executor.execute(&BumpRequest::new(Level::Patch)).unwrap();
    assert!(outcome.committed);
    assert_eq!(outcome.next, Version::new(0, 1, 1));
}
