//! Output tree for generated field pages
//!
//! Layout under the output root:
//!
//! ```text
//! <output>/<slug>/index.md         record frontmatter
//! <output>/<slug>/vocabulary.txt   one value per line, when a vocabulary exists
//! ```

use crate::models::OutputRecord;
use crate::parser::frontmatter::render_document;
use crate::services::field_classifier::is_directory_name;
use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RECORD_FILE_NAME: &str = "index.md";
pub const VOCABULARY_FILE_NAME: &str = "vocabulary.txt";

/// Create the output root, removing any previous build first when `clean` is set
pub fn prepare_output_directory(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        debug!("Removing {}", output.display());
        std::fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean output directory {}", output.display()))?;
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    Ok(())
}

/// Create (or reuse) the directory of one field
///
/// The slug must be a single path component so the directory stays under
/// `output`.
pub fn create_field_directory(output: &Path, slug: &str) -> Result<PathBuf> {
    if !is_directory_name(slug) {
        anyhow::bail!("Refusing to write field directory '{}' outside {}", slug, output.display());
    }

    let dir = output.join(slug);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create field directory {}", dir.display()))?;
    Ok(dir)
}

/// Write values one per line, each newline-terminated
pub fn write_vocabulary_file(field_dir: &Path, values: &[String]) -> Result<PathBuf> {
    let path = field_dir.join(VOCABULARY_FILE_NAME);
    std::fs::write(&path, render_vocabulary(values))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Delete a vocabulary file left over from an earlier build
pub fn remove_stale_vocabulary_file(field_dir: &Path) -> Result<()> {
    let path = field_dir.join(VOCABULARY_FILE_NAME);
    if path.exists() {
        debug!("Removing stale {}", path.display());
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn render_vocabulary(values: &[String]) -> String {
    values.iter().map(|value| format!("{}\n", value)).collect()
}

/// Write a field's record page, replacing any previous one
pub fn write_record(field_dir: &Path, record: &OutputRecord) -> Result<PathBuf> {
    let path = field_dir.join(RECORD_FILE_NAME);
    let page = render_document(record, "")?;
    std::fs::write(&path, page).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
