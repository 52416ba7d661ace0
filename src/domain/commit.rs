/// A reverted commit referenced by a `revert:` / `Revert "..."` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revert {
    /// Header of the commit being reverted, without surrounding quotes
    pub header: String,
    /// Id of the commit being reverted
    pub id: String,
}

/// Structured representation of one conventional commit.
///
/// Built by [`crate::conventional::CommitParser`]. Header-derived fields are
/// `None` when the header does not follow the `type(scope): subject` grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub header: String,
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub footer: Option<String>,
    pub breaking_change: Option<String>,
    pub mentions: Vec<String>,
    pub revert: Option<Revert>,
}

impl Commit {
    /// Create a commit with only the required fields set
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Commit {
            id: id.into(),
            header: header.into(),
            r#type: None,
            scope: None,
            subject: None,
            body: None,
            footer: None,
            breaking_change: None,
            mentions: Vec::new(),
            revert: None,
        }
    }

    /// Whether this commit signals a breaking change
    pub fn is_breaking(&self) -> bool {
        self.breaking_change.is_some()
    }

    /// Whether this commit is typed as a feature (`feat` or `feature`)
    pub fn is_feature(&self) -> bool {
        matches!(self.r#type.as_deref(), Some("feat") | Some("feature"))
    }
}
