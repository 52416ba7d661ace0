//! Reading and rewriting the `version = "x.y.z"` line of a manifest.
//!
//! Only the first such line is considered, which for a `Cargo.toml` is the
//! `[package]` version. Formatting of the rest of the file is left untouched.

use regex::Regex;
use semver::Version;

use crate::error::{ConventionalError, Result};

const VERSION_LINE_PATTERN: &str = r#"(?m)^(?P<lead>\s*version\s*=\s*")(?P<version>[^"]+)(?P<tail>")"#;

fn version_line() -> Result<Regex> {
    Ok(Regex::new(VERSION_LINE_PATTERN)?)
}

/// Current version declared in `contents`
pub fn read_version(contents: &str) -> Result<Version> {
    let re = version_line()?;
    let captures = re
        .captures(contents)
        .ok_or_else(|| ConventionalError::version("No `version = \"...\"` line found"))?;
    let raw = captures.name("version").map_or("", |m| m.as_str());

    Version::parse(raw)
        .map_err(|e| ConventionalError::version(format!("Invalid version '{}': {}", raw, e)))
}

/// `contents` with the first version line set to `version`
pub fn replace_version(contents: &str, version: &Version) -> Result<String> {
    let re = version_line()?;
    if !re.is_match(contents) {
        return Err(ConventionalError::version(
            "No `version = \"...\"` line found",
        ));
    }

    let replacement = format!("${{lead}}{}${{tail}}", version);
    Ok(re.replacen(contents, 1, replacement.as_str()).into_owned())
}
