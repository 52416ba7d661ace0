//! Pure formatting functions for UI output.
//!
//! Everything here writes to stderr so that stdout carries only machine-readable
//! results (the recommended level).

use console::style;

use crate::analyzer::Decision;
use crate::boundary::BoundaryWarning;
use crate::domain::Commit;
use crate::release::BumpOutcome;

const MAX_LISTED_COMMITS: usize = 10;
const MAX_HEADER_WIDTH: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the one-line level decision summary.
pub fn display_decision(decision: &Decision) {
    eprintln!("{} {}", style("→").yellow(), style(decision).bold());
}

/// One listing line for a commit: short id and header, truncated to fit
pub fn commit_line(commit: &Commit) -> String {
    let short_id: String = commit.id.chars().take(7).collect();
    let header = if commit.header.chars().count() > MAX_HEADER_WIDTH {
        let truncated: String = commit.header.chars().take(MAX_HEADER_WIDTH).collect();
        format!("{}…", truncated)
    } else {
        commit.header.clone()
    };
    let marker = if commit.is_breaking() { " (!)" } else { "" };
    format!("{} {}{}", short_id, header, marker)
}

/// Display the analyzed commits.
///
/// Shows up to 10 commits; if more exist, displays the count of remaining commits.
///
/// # Arguments
/// * `commits` - Parsed commits, oldest first
/// * `since` - Tag the analysis starts after, if any
pub fn display_commit_analysis(commits: &[Commit], since: Option<&str>) {
    match since {
        Some(tag) => eprintln!("\n{}", style(format!("Commits since {}", tag)).bold()),
        None => eprintln!("\n{}", style("Commits since the start of history").bold()),
    }
    eprintln!("{}", style(format!("{} commits:", commits.len())).underlined());

    for (i, commit) in commits.iter().take(MAX_LISTED_COMMITS).enumerate() {
        eprintln!("  {}. {}", i + 1, commit_line(commit));
    }

    if commits.len() > MAX_LISTED_COMMITS {
        eprintln!(
            "  ... and {} more commits",
            commits.len() - MAX_LISTED_COMMITS
        );
    }
}

/// Display what a release did, or would do in dry-run.
pub fn display_outcome(outcome: &BumpOutcome, dry_run: bool) {
    let verb = if dry_run { "Would bump" } else { "Bumped" };
    display_success(&format!(
        "{} {} -> {}",
        verb,
        style(&outcome.previous).red(),
        style(&outcome.next).green()
    ));
    display_status(&format!("Commit message: {}", outcome.message));
    if let Some(tag) = &outcome.tag {
        display_status(&format!("Tag: {}", style(tag).cyan()));
    }
    if outcome.pushed {
        display_success("Pushed release commit and tag");
    }
}
