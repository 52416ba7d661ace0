//! Conventional Commits message parser.
//!
//! Turns one raw commit record (`<id>\n<header>\n<body and footer lines>`) into a
//! [`Commit`]. Header fields come from the `type(scope)!: subject` grammar, the
//! rest of the message is split into body and footer at the first
//! `BREAKING CHANGE:` note.

use log::trace;
use regex::Regex;

use crate::domain::{Commit, Revert};
use crate::error::{ConventionalError, Result};

const HEADER_PATTERN: &str = r"^(?P<type>\w+)(?:\((?P<scope>.*)\))?!?: (?P<subject>.*)$";
const BREAKING_HEADER_PATTERN: &str = r"^\w+(?:\(.*\))?!: (?P<subject>.*)$";
const BREAKING_NOTE_PATTERN: &str = r"(?i)^[\s|*]*BREAKING[ -]CHANGE:\s*(?P<contents>.*)$";
const REVERT_PATTERN: &str =
    r#"(?im)^(?:Revert|revert:)\s"?(?P<header>[\s\S]+?)"?\s*This reverts commit (?P<id>\w*)\."#;
const MENTION_PATTERN: &str = r"@(?P<handle>[\w-]+)";

/// Compiled Conventional Commits grammar.
///
/// Holds no per-commit state, so one parser can be shared across any number of
/// `parse` calls.
#[derive(Debug, Clone)]
pub struct CommitParser {
    header: Regex,
    breaking_header: Regex,
    breaking_note: Regex,
    revert: Regex,
    mention: Regex,
}

/// Where the line fold currently routes body lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Body,
    BreakingChange,
}

/// Fold state for a single `parse` call
#[derive(Debug)]
struct LineState {
    section: Section,
    body: Option<String>,
    footer: Option<String>,
    breaking_change: Option<String>,
}

impl LineState {
    fn new() -> Self {
        LineState {
            section: Section::Body,
            body: None,
            footer: None,
            breaking_change: None,
        }
    }

    fn push(&mut self, line: &str, breaking_note: &Regex) {
        match self.section {
            Section::Body => match breaking_note.captures(line) {
                Some(captures) => {
                    let contents = captures.name("contents").map_or("", |m| m.as_str());
                    self.breaking_change = Some(contents.to_string());
                    self.section = Section::BreakingChange;
                    append(&mut self.footer, line);
                }
                None => append(&mut self.body, line),
            },
            Section::BreakingChange => {
                append(&mut self.breaking_change, line);
                append(&mut self.footer, line);
            }
        }
    }
}

impl CommitParser {
    /// Compile the commit grammar
    pub fn new() -> Result<Self> {
        Ok(CommitParser {
            header: Regex::new(HEADER_PATTERN)?,
            breaking_header: Regex::new(BREAKING_HEADER_PATTERN)?,
            breaking_note: Regex::new(BREAKING_NOTE_PATTERN)?,
            revert: Regex::new(REVERT_PATTERN)?,
            mention: Regex::new(MENTION_PATTERN)?,
        })
    }

    /// Parse a raw commit record that is not yet known to be UTF-8
    pub fn parse_bytes(&self, raw_commit: &[u8]) -> Result<Commit> {
        let raw = std::str::from_utf8(raw_commit).map_err(|e| {
            ConventionalError::invalid_input(format!("raw commit is not valid UTF-8: {}", e))
        })?;
        self.parse(raw)
    }

    /// Parse a raw commit record.
    ///
    /// # Arguments
    /// * `raw_commit` - `<id>\n<header>[\n<body/footer lines>]`
    ///
    /// # Returns
    /// * `Ok(Commit)` - For any input with an id line and a header line
    /// * `Err(InvalidInput)` - If the input is empty or has fewer than two lines
    ///
    /// # Example
    /// ```
    /// # use conventional_bump::conventional::CommitParser;
    /// let parser = CommitParser::new().unwrap();
    /// let commit = parser.parse("h1\nfeat(api)!: remove field\n").unwrap();
    /// assert_eq!(commit.r#type.as_deref(), Some("feat"));
    /// assert_eq!(commit.breaking_change.as_deref(), Some("remove field"));
    /// ```
    pub fn parse(&self, raw_commit: &str) -> Result<Commit> {
        let mut lines = split_lines(raw_commit).into_iter();

        let id = lines
            .next()
            .map(str::trim)
            .ok_or_else(|| ConventionalError::invalid_input("raw commit is empty"))?;
        let header = lines.next().ok_or_else(|| {
            ConventionalError::invalid_input(format!("commit {} has no header line", id))
        })?;

        let mut state = LineState::new();
        for line in lines {
            state.push(line, &self.breaking_note);
        }

        let mut commit = Commit::new(id, header);

        if let Some(captures) = self.header.captures(header) {
            commit.r#type = captures.name("type").map(|m| m.as_str().to_string());
            commit.scope = captures.name("scope").map(|m| m.as_str().to_string());
            commit.subject = captures.name("subject").map(|m| m.as_str().to_string());
        }

        // An empty note captures no text, so the header marker still applies.
        // Without a `!` header an empty note leaves the commit non-breaking.
        commit.breaking_change = state
            .breaking_change
            .and_then(trim_blank_lines)
            .or_else(|| {
                self.breaking_header
                    .captures(header)
                    .and_then(|captures| captures.name("subject"))
                    .map(|m| m.as_str().to_string())
                    .and_then(trim_blank_lines)
            });
        commit.body = state.body.and_then(trim_blank_lines);
        commit.footer = state.footer.and_then(trim_blank_lines);
        commit.mentions = self.mentions(raw_commit);
        commit.revert = self.revert(raw_commit);

        trace!(
            "parsed commit {}: type={:?} breaking={}",
            commit.id,
            commit.r#type,
            commit.is_breaking()
        );

        Ok(commit)
    }

    fn mentions(&self, raw_commit: &str) -> Vec<String> {
        let mut mentions: Vec<String> = Vec::new();
        for handle in self
            .mention
            .captures_iter(raw_commit)
            .filter_map(|captures| captures.name("handle"))
        {
            if !mentions.iter().any(|m| m == handle.as_str()) {
                mentions.push(handle.as_str().to_string());
            }
        }
        mentions
    }

    fn revert(&self, raw_commit: &str) -> Option<Revert> {
        let captures = self.revert.captures(raw_commit)?;
        Some(Revert {
            header: captures.name("header")?.as_str().to_string(),
            id: captures.name("id")?.as_str().to_string(),
        })
    }
}

/// Split on any newline convention, dropping blank lines
fn split_lines(raw: &str) -> Vec<&str> {
    raw.split(&['\n', '\r'][..])
        .filter(|line| !line.trim().is_empty())
        .collect()
}

fn append(field: &mut Option<String>, line: &str) {
    match field {
        Some(text) => {
            text.push('\n');
            text.push_str(line);
        }
        None => *field = Some(line.to_string()),
    }
}

/// Drop leading and trailing blank lines; all-blank text becomes `None`
fn trim_blank_lines(text: String) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|line| !line.trim().is_empty())?;
    let end = lines.iter().rposition(|line| !line.trim().is_empty())?;
    Some(lines[start..=end].join("\n"))
}
