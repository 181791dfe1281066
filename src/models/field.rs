use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema/element/qualifier identity of a metadata field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldIdentity {
    pub schema: String,
    pub element: String,
    pub qualifier: Option<String>,
}

impl FieldIdentity {
    pub fn new(
        schema: impl Into<String>,
        element: impl Into<String>,
        qualifier: Option<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            element: element.into(),
            qualifier,
        }
    }

    /// Dotted metadata identifier, e.g. `dc.subject.lcsh`
    pub fn identifier(&self) -> String {
        match &self.qualifier {
            Some(qualifier) => format!("{}.{}.{}", self.schema, self.element, qualifier),
            None => format!("{}.{}", self.schema, self.element),
        }
    }

    /// Filesystem-safe slug, e.g. `dc-subject-lcsh`
    pub fn slug(&self) -> String {
        self.identifier().replace('.', "-")
    }
}

impl fmt::Display for FieldIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

/// Input widget declared by `<input-type>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    Onebox,
    Dropdown,
    Twobox,
    Textarea,
    /// Any input type this tool does not classify (date, name, series, ...)
    Other(String),
}

impl InputType {
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "onebox" => InputType::Onebox,
            "dropdown" => InputType::Dropdown,
            "twobox" => InputType::Twobox,
            "textarea" => InputType::Textarea,
            other => InputType::Other(other.to_string()),
        }
    }
}

/// How a field's input is constrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldPolicy {
    FreeText,
    FreeTextWithSuggestions,
    ControlledWithVocabulary,
}

impl FieldPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPolicy::FreeText => "free-text",
            FieldPolicy::FreeTextWithSuggestions => "free-text-with-suggestions",
            FieldPolicy::ControlledWithVocabulary => "controlled-with-vocabulary",
        }
    }
}

impl fmt::Display for FieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field after classification, recomputed for every field of every run
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedField {
    pub identity: FieldIdentity,
    pub title: String,
    pub repeatable: bool,
    pub input_type: InputType,
    pub required: bool,
    /// Name of an external controlled vocabulary
    pub vocabulary: Option<String>,
    /// Name of an in-document value-pairs collection
    pub value_pairs: Option<String>,
    pub policy: Option<FieldPolicy>,
    pub hint: Option<String>,
}

impl ClassifiedField {
    pub fn identifier(&self) -> String {
        self.identity.identifier()
    }

    pub fn slug(&self) -> String {
        self.identity.slug()
    }

    /// Whether any vocabulary source feeds this field
    pub fn has_vocabulary_source(&self) -> bool {
        self.vocabulary.is_some() || self.value_pairs.is_some()
    }
}
