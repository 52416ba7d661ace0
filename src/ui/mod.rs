//! User interface module - terminal output for the CLI.

pub mod formatter;

pub use formatter::{
    commit_line, display_boundary_warning, display_commit_analysis, display_decision,
    display_error, display_outcome, display_status, display_success,
};
