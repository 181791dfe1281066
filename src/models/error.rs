use std::path::PathBuf;

/// Result type for form parsing and field processing
pub type FormResult<T> = Result<T, FormError>;

/// Fatal conditions that abort a documentation build
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Failed to parse XML in {origin}: {message}")]
    Xml { origin: String, message: String },

    #[error("Form '{0}' not found in form definitions")]
    FormNotFound(String),

    #[error("Malformed field #{position} on page {page}: missing <{missing}>")]
    MalformedField {
        page: String,
        position: usize,
        missing: &'static str,
    },

    #[error("Malformed field #{position} on page {page}: '{slug}' is not a directory name")]
    InvalidFieldName {
        page: String,
        position: usize,
        slug: String,
    },

    #[error("Controlled vocabulary '{name}' not found at {}", path.display())]
    MissingVocabularyFile { name: String, path: PathBuf },

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
