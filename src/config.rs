//! Build configuration
//!
//! Everything a build needs is carried in [`BuildConfig`] and handed to each
//! component explicitly.

use chrono::Duration;
use std::path::PathBuf;

pub const DEFAULT_REST_BASE_URL: &str = "https://cgspace.cgiar.org/server/api";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "site/content/terms";
pub const DEFAULT_FORM_NAME: &str = "traditional";
pub const DEFAULT_PAGES: [&str; 3] = ["1", "2", "3"];
pub const DEFAULT_GENERATED_DATE: &str = "2019-05-04T00:00:00+00:00";
pub const CACHE_EXPIRY_DAYS: i64 = 30;
const CACHE_FILE_NAME: &str = "requests-cache.json";

#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Path to `input-forms.xml`
    pub input_forms: PathBuf,
    /// Root under which one directory per field is written
    pub output_directory: PathBuf,
    /// Directory holding `<vocabulary>.xml` files
    pub vocabulary_directory: PathBuf,
    /// Metadata registry REST API base URL
    pub rest_base_url: String,
    /// Response cache file
    pub cache_path: PathBuf,
    pub cache_expiry: Duration,
    /// Form definition to document
    pub form_name: String,
    /// Page numbers to walk, in order
    pub pages: Vec<String>,
    /// Value of the `date` key in every record
    pub generated_date: String,
    /// Remove the output directory before building
    pub clean: bool,
    /// Log this crate at debug level
    pub debug: bool,
}

impl BuildConfig {
    /// Configuration with defaults for everything but the two required paths
    pub fn new(input_forms: impl Into<PathBuf>, vocabulary_directory: impl Into<PathBuf>) -> Self {
        Self {
            input_forms: input_forms.into(),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            vocabulary_directory: vocabulary_directory.into(),
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            cache_path: default_cache_path(),
            cache_expiry: Duration::days(CACHE_EXPIRY_DAYS),
            form_name: DEFAULT_FORM_NAME.to_string(),
            pages: DEFAULT_PAGES.iter().map(|p| p.to_string()).collect(),
            generated_date: DEFAULT_GENERATED_DATE.to_string(),
            clean: false,
            debug: false,
        }
    }
}

/// Cache file in the user cache directory, or the working directory without one
pub fn default_cache_path() -> PathBuf {
    match dirs::cache_dir() {
        Some(dir) => dir.join("submission-docs").join(CACHE_FILE_NAME),
        None => PathBuf::from(CACHE_FILE_NAME),
    }
}
