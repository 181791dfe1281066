// submission-docs - DSpace submission form documentation generator
// Turns input-forms.xml into per-field pages enriched from the metadata registry

pub mod cli;
pub mod config;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use config::BuildConfig;
pub use models::{ClassifiedField, FieldIdentity, FieldPolicy, FormDocument, FormError, OutputRecord};
pub use orchestrator::{BuildSummary, FormWalker};
