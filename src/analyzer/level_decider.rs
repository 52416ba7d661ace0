use std::fmt;

use log::info;

use crate::domain::{Commit, Level};
use crate::ui;

/// Outcome of reducing a commit sequence to a bump level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub level: Level,
    /// Commits carrying a breaking-change signal
    pub breaking_changes: usize,
    /// Non-breaking commits typed `feat` or `feature`
    pub features: usize,
    pub pre_major: bool,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "recommended bump: {} (breaking changes: {}, features: {}",
            self.level, self.breaking_changes, self.features
        )?;
        if self.pre_major {
            f.write_str(", pre-major adjustment applied")?;
        }
        f.write_str(")")
    }
}

/// Reduces parsed commits to a single semantic-version bump level.
///
/// Severity only ever moves toward `major`:
/// - any breaking change forces **major**
/// - otherwise any `feat`/`feature` commit raises **patch** to **minor**
/// - everything else stays **patch**
///
/// On a pre-major line (`0.x` or untagged) a **minor** result is relaxed to
/// **patch**. **major** is never relaxed. Older tooling capped breaking changes
/// at **minor** before 1.0; callers wanting that can relax a pre-major
/// **major** themselves with [`Level::relaxed`].
#[derive(Debug, Clone, Default)]
pub struct LevelDecider {
    verbose: bool,
}

impl LevelDecider {
    pub fn new() -> Self {
        LevelDecider::default()
    }

    /// Emit a one-line summary whenever a level is decided
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Fold the commits into a [`Decision`] without emitting anything
    pub fn evaluate(&self, commits: &[Commit], pre_major: bool) -> Decision {
        let mut level = Level::Patch;
        let mut breaking_changes = 0;
        let mut features = 0;

        for commit in commits {
            if commit.is_breaking() {
                breaking_changes += 1;
                level = Level::Major;
            } else if commit.is_feature() {
                features += 1;
                if level == Level::Patch {
                    level = Level::Minor;
                }
            }
        }

        if pre_major && level != Level::Major {
            level = level.relaxed();
        }

        Decision {
            level,
            breaking_changes,
            features,
            pre_major,
        }
    }

    /// Evaluate the commits, emitting the summary in verbose mode
    pub fn report(&self, commits: &[Commit], pre_major: bool) -> Decision {
        let decision = self.evaluate(commits, pre_major);
        if self.verbose {
            info!("{}", decision);
            ui::display_decision(&decision);
        }
        decision
    }

    /// Decide the bump level, emitting the summary in verbose mode
    pub fn decide(&self, commits: &[Commit], pre_major: bool) -> Level {
        self.report(commits, pre_major).level
    }
}

/// Decide the bump level for `commits`.
///
/// Shorthand for `LevelDecider::new().verbose(verbose).decide(commits, pre_major)`.
pub fn decide(commits: &[Commit], pre_major: bool, verbose: bool) -> Level {
    LevelDecider::new().verbose(verbose).decide(commits, pre_major)
}
