//! Form walker
//!
//! Drives a build: every field on the configured pages, in document order, is
//! classified, gets its vocabulary exported, has its description resolved and
//! is written out, before the next field starts.

use crate::config::BuildConfig;
use crate::models::{ClassifiedField, FieldNode, FormDocument, OutputRecord};
use crate::services::description_service::{
    DescriptionResolver, DescriptionSource, RegistryFetch,
};
use crate::services::field_classifier::classify;
use crate::services::output_service::{
    create_field_directory, remove_stale_vocabulary_file, write_record, write_vocabulary_file,
    VOCABULARY_FILE_NAME,
};
use crate::services::vocabulary_service::{controlled_vocabulary_values, value_pairs_values};
use crate::Result;
use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, info};

/// Counts collected over one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub fields: usize,
    pub vocabularies: usize,
    pub registry_descriptions: usize,
    pub hint_descriptions: usize,
    pub empty_descriptions: usize,
}

/// Result of processing one field
#[derive(Debug, Clone)]
pub struct FieldOutcome {
    pub field: ClassifiedField,
    pub record: OutputRecord,
    pub directory: PathBuf,
    pub description_source: DescriptionSource,
}

pub struct FormWalker<'a, F> {
    config: &'a BuildConfig,
    document: &'a FormDocument,
    resolver: DescriptionResolver<F>,
}

impl<'a, F: RegistryFetch> FormWalker<'a, F> {
    pub fn new(
        config: &'a BuildConfig,
        document: &'a FormDocument,
        resolver: DescriptionResolver<F>,
    ) -> Self {
        Self {
            config,
            document,
            resolver,
        }
    }

    /// Process every field on the configured pages
    ///
    /// Stops at the first fatal error; pages already written stay in place.
    pub fn run(&mut self) -> Result<BuildSummary> {
        let mut summary = BuildSummary::default();
        let config = self.config;
        let document = self.document;

        for page in &config.pages {
            let fields: Vec<&FieldNode> = document.fields_on_page(page).collect();
            debug!("Page {}: {} field(s)", page, fields.len());

            for node in fields {
                let outcome = self.process_field(node)?;

                summary.fields += 1;
                if outcome.record.vocabulary.is_some() {
                    summary.vocabularies += 1;
                }
                match outcome.description_source {
                    DescriptionSource::Registry => summary.registry_descriptions += 1,
                    DescriptionSource::Hint => summary.hint_descriptions += 1,
                    DescriptionSource::None => summary.empty_descriptions += 1,
                }
            }
        }

        Ok(summary)
    }

    /// Classify, export, resolve and emit a single field
    pub fn process_field(&mut self, node: &FieldNode) -> Result<FieldOutcome> {
        let field = classify(node)?;
        let slug = field.slug();
        let directory = create_field_directory(&self.config.output_directory, &slug)?;

        let vocabulary_file = self.export_vocabulary(&field, &directory)?;

        let description = self.resolver.resolve(&field);

        let record = OutputRecord::new(
            &field,
            &description.text,
            vocabulary_file,
            &self.config.generated_date,
        );
        write_record(&directory, &record)
            .with_context(|| format!("Failed to write record for {}", field.identifier()))?;

        info!("Documented {}", field.identifier());

        Ok(FieldOutcome {
            field,
            record,
            directory,
            description_source: description.source,
        })
    }

    /// Export whichever vocabulary sources the field has
    ///
    /// Value-pairs are written first; an external vocabulary then overwrites
    /// the same file.
    fn export_vocabulary(
        &self,
        field: &ClassifiedField,
        directory: &std::path::Path,
    ) -> Result<Option<&'static str>> {
        if !field.has_vocabulary_source() {
            remove_stale_vocabulary_file(directory)?;
            return Ok(None);
        }

        if let Some(name) = &field.value_pairs {
            let values = value_pairs_values(self.document, name);
            write_vocabulary_file(directory, &values)?;
        }

        if let Some(name) = &field.vocabulary {
            let values = controlled_vocabulary_values(&self.config.vocabulary_directory, name)?;
            write_vocabulary_file(directory, &values)?;
        }

        Ok(Some(VOCABULARY_FILE_NAME))
    }
}
