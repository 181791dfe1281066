//! Frontmatter for generated field pages
//!
//! Each documented field gets an `index.md` whose YAML frontmatter is an
//! [`OutputRecord`]. Key order in the rendered block follows field order here.

use crate::models::field::{ClassifiedField, FieldPolicy};
use serde::{Deserialize, Serialize};

/// Frontmatter of a field's `index.md`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Human-readable label from the form
    pub title: String,

    /// Dotted metadata identifier (e.g. "dc.subject.lcsh")
    pub field: String,

    /// Directory name of this field's page
    pub slug: String,

    /// Omitted when identical to the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub required: bool,

    /// Vocabulary file name, relative to the field directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<FieldPolicy>,

    /// Generation timestamp
    pub date: String,
}

impl OutputRecord {
    /// Build the record for a classified field
    ///
    /// `vocabulary_file` is the file name to reference when a vocabulary was
    /// exported for this field.
    pub fn new(
        field: &ClassifiedField,
        description: &str,
        vocabulary_file: Option<&str>,
        date: &str,
    ) -> Self {
        let description = if description == field.title {
            None
        } else {
            Some(description.to_string())
        };

        Self {
            title: field.title.clone(),
            field: field.identifier(),
            slug: field.slug(),
            description,
            required: field.required,
            vocabulary: vocabulary_file.map(String::from),
            policy: field.policy,
            date: date.to_string(),
        }
    }
}
