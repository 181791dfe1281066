//! Controlled vocabulary parser
//!
//! Vocabulary documents are hierarchical `node` trees; only nodes listed under
//! an `isComposedBy` element carry exportable labels.

use crate::models::{FormError, FormResult};
use roxmltree::Document;
use std::path::{Path, PathBuf};

/// Path of a named vocabulary under the vocabulary directory
pub fn vocabulary_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{}.xml", name))
}

/// Load the labels of a named controlled vocabulary
///
/// A vocabulary file that does not exist is fatal.
pub fn load_vocabulary_labels(directory: &Path, name: &str) -> FormResult<Vec<String>> {
    let path = vocabulary_path(directory, name);
    if !path.is_file() {
        return Err(FormError::MissingVocabularyFile {
            name: name.to_string(),
            path,
        });
    }

    let content = std::fs::read_to_string(&path).map_err(|source| FormError::Read {
        path: path.clone(),
        source,
    })?;
    parse_vocabulary_labels(&content, &path.display().to_string())
}

/// Extract `isComposedBy/node[@label]` labels in document order
pub fn parse_vocabulary_labels(content: &str, origin: &str) -> FormResult<Vec<String>> {
    let doc = Document::parse(content).map_err(|e| FormError::Xml {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    let labels = doc
        .descendants()
        .filter(|n| n.has_tag_name("node"))
        .filter(|n| n.parent_element().is_some_and(|p| p.has_tag_name("isComposedBy")))
        .filter_map(|n| n.attribute("label"))
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect();

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VOCABULARY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<node id="srsc" label="Research Subject Categories">
  <isComposedBy>
    <node id="1" label="HUMANITIES and RELIGION">
      <isComposedBy>
        <node id="1.1" label="History"/>
        <node id="1.2" label="Études"/>
      </isComposedBy>
    </node>
    <node id="2" label="LAW"/>
  </isComposedBy>
</node>
"#;

    #[test]
    fn test_collects_composed_labels_only() {
        let labels = parse_vocabulary_labels(VOCABULARY, "srsc.xml").unwrap();
        assert_eq!(
            labels,
            vec!["HUMANITIES and RELIGION", "History", "Études", "LAW"]
        );
    }

    #[test]
    fn test_load_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("srsc.xml"), VOCABULARY).unwrap();

        let labels = load_vocabulary_labels(temp_dir.path(), "srsc").unwrap();
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn test_missing_vocabulary_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_vocabulary_labels(temp_dir.path(), "nope").unwrap_err();
        match err {
            FormError::MissingVocabularyFile { name, path } => {
                assert_eq!(name, "nope");
                assert_eq!(path, temp_dir.path().join("nope.xml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
