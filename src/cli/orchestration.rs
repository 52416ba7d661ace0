//! Workflow orchestration
//!
//! Wires the collaborators together: tags -> pre-major flag -> raw commits ->
//! parsed commits -> level -> release. Kept separate from `main.rs` so the
//! workflows can run against any [HistorySource] / [BumpExecutor], including the
//! in-memory ones used in tests.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::analyzer::{Decision, LevelDecider};
use crate::boundary::BoundaryWarning;
use crate::conventional::CommitParser;
use crate::domain::{is_pre_major, Commit, Level, Tag};
use crate::git::{HistorySource, DEFAULT_TAG_PREFIX};
use crate::release::{BumpExecutor, BumpOutcome, BumpRequest, DEFAULT_COMMIT_MESSAGE};

/// Arguments for analyzing history
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisArgs {
    pub tag_prefix: String,
    /// Only consider commits touching this path
    pub path: Option<PathBuf>,
    /// Emit the decision summary
    pub verbose: bool,
}

impl Default for AnalysisArgs {
    fn default() -> Self {
        AnalysisArgs {
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            path: None,
            verbose: false,
        }
    }
}

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    pub analysis: AnalysisArgs,
    pub create_tag: bool,
    pub push: bool,
    pub dry_run: bool,
    pub commit_message: String,
    /// Release this level instead of the recommended one
    pub level: Option<Level>,
}

impl Default for BumpWorkflowArgs {
    fn default() -> Self {
        BumpWorkflowArgs {
            analysis: AnalysisArgs::default(),
            create_tag: true,
            push: false,
            dry_run: false,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            level: None,
        }
    }
}

/// Result of analyzing history since the latest matching tag
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub decision: Decision,
    pub latest_tag: Option<Tag>,
    /// Parsed commits, oldest first
    pub commits: Vec<Commit>,
    pub warnings: Vec<BoundaryWarning>,
}

impl Recommendation {
    pub fn level(&self) -> Level {
        self.decision.level
    }
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub recommendation: Recommendation,
    pub outcome: BumpOutcome,
}

/// Recommended bump level workflow
///
/// 1. Find the most recent `<prefix><semver>` tag
/// 2. Derive the pre-major flag from it
/// 3. Collect raw commits since that tag
/// 4. Parse every commit; the first malformed record aborts the workflow
/// 5. Reduce the commits to a level
pub fn recommend<H>(history: &H, args: &AnalysisArgs) -> Result<Recommendation>
where
    H: HistorySource + ?Sized,
{
    let latest_tag = history
        .semver_tags(&args.tag_prefix)
        .context("Failed to list version tags")?
        .into_iter()
        .next();
    let pre_major = is_pre_major(latest_tag.as_ref());
    let since = latest_tag.as_ref().map(|tag| tag.value.as_str());
    debug!("latest tag: {:?}, pre-major: {}", since, pre_major);

    let raw_commits = history
        .raw_commits(since, args.path.as_deref())
        .context("Failed to read commit history")?;

    let parser = CommitParser::new()?;
    let commits = raw_commits
        .iter()
        .map(|raw| parser.parse_bytes(raw))
        .collect::<crate::Result<Vec<_>>>()
        .context("Failed to parse commit history")?;

    let mut warnings = Vec::new();
    match &latest_tag {
        None => warnings.push(BoundaryWarning::NoMatchingTags {
            prefix: args.tag_prefix.clone(),
        }),
        Some(tag) if commits.is_empty() => warnings.push(BoundaryWarning::NoNewCommits {
            latest_tag: tag.value.clone(),
        }),
        Some(_) => {}
    }
    for warning in &warnings {
        warn!("{}", warning);
    }

    let decision = LevelDecider::new()
        .verbose(args.verbose)
        .report(&commits, pre_major);

    Ok(Recommendation {
        decision,
        latest_tag,
        commits,
        warnings,
    })
}

/// Bump workflow: recommend a level, then hand it (or the explicit
/// `args.level`) to the executor
pub fn run_bump<H, E>(history: &H, executor: &E, args: &BumpWorkflowArgs) -> Result<WorkflowResult>
where
    H: HistorySource + ?Sized,
    E: BumpExecutor + ?Sized,
{
    let recommendation = recommend(history, &args.analysis)?;
    let level = match args.level {
        Some(level) => {
            if level != recommendation.level() {
                warn!(
                    "releasing {} instead of the recommended {}",
                    level,
                    recommendation.level()
                );
            }
            level
        }
        None => recommendation.level(),
    };

    let request = BumpRequest {
        level,
        create_tag: args.create_tag,
        push: args.push,
        dry_run: args.dry_run,
        commit_message: args.commit_message.clone(),
        tag_prefix: args.analysis.tag_prefix.clone(),
    };
    let outcome = executor
        .execute(&request)
        .with_context(|| format!("Failed to perform {} bump", request.level))?;

    Ok(WorkflowResult {
        recommendation,
        outcome,
    })
}
