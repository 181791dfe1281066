//! YAML Frontmatter
//!
//! Renders field pages as a `---` fenced YAML block followed by a Markdown
//! body, and parses them back. Parsing handles:
//! - BOM (Byte Order Mark) stripping
//! - Line ending normalization (CRLF → LF)

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parsed document with frontmatter and body separated
#[derive(Debug, Clone)]
pub struct ParsedDocument<T> {
    /// Deserialized frontmatter
    pub frontmatter: T,
    /// Markdown body (after frontmatter)
    pub body: String,
}

/// Render a frontmatter value and body into a page
///
/// The body is omitted entirely when empty, so a record-only page ends with
/// the closing fence and a single newline.
pub fn render_document<T: Serialize>(frontmatter: &T, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(frontmatter).context("Failed to serialize frontmatter")?;

    let mut page = String::with_capacity(yaml.len() + body.len() + 8);
    page.push_str("---\n");
    page.push_str(&yaml);
    if !yaml.ends_with('\n') {
        page.push('\n');
    }
    page.push_str("---\n");

    if !body.trim().is_empty() {
        page.push('\n');
        page.push_str(body.trim_end());
        page.push('\n');
    }

    Ok(page)
}

/// Parse a document with YAML frontmatter
///
/// # Errors
/// * If document doesn't start with `---`
/// * If frontmatter is not properly closed
/// * If YAML parsing fails
pub fn parse_document<T: DeserializeOwned>(content: &str) -> Result<ParsedDocument<T>> {
    let normalized = normalize_content(content);
    let (frontmatter_str, body) = split_frontmatter(&normalized)?;

    let frontmatter: T =
        serde_yaml::from_str(&frontmatter_str).context("Failed to parse YAML frontmatter")?;

    Ok(ParsedDocument { frontmatter, body })
}

/// Normalize content: strip BOM, normalize line endings
pub fn normalize_content(content: &str) -> String {
    let s = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split frontmatter from body
///
/// The opening `---` must be the first line; the closing `---` must start a
/// line and may carry trailing whitespace.
pub fn split_frontmatter(content: &str) -> Result<(String, String)> {
    let Some(content_after_open) = content.strip_prefix("---\n") else {
        bail!("Document must start with YAML frontmatter (---)")
    };

    let re = Regex::new(r"(?:^|\n)---[ \t]*(?:\n|$)")?;

    match re.find(content_after_open) {
        Some(m) => {
            let frontmatter = content_after_open[..m.start()].to_string();
            let body = content_after_open[m.end()..].to_string();
            Ok((frontmatter, body))
        }
        None => bail!("Frontmatter not properly closed (--- must be at line start)"),
    }
}
