use thiserror::Error;

/// Unified error type for conventional-bump operations
#[derive(Error, Debug)]
pub enum ConventionalError {
    #[error("Invalid raw commit: {0}")]
    InvalidInput(String),

    #[error("Commit grammar failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Staged changes would be included in the release commit: {0}")]
    StagedChanges(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in conventional-bump
pub type Result<T> = std::result::Result<T, ConventionalError>;

impl ConventionalError {
    /// Create an invalid input error for a malformed raw commit
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ConventionalError::InvalidInput(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ConventionalError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ConventionalError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ConventionalError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ConventionalError::Remote(msg.into())
    }
}
