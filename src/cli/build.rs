//! Build CLI Command
//!
//! Generates one documentation directory per submission form field.

use crate::config::{
    default_cache_path, BuildConfig, DEFAULT_FORM_NAME, DEFAULT_OUTPUT_DIRECTORY,
    DEFAULT_REST_BASE_URL,
};
use crate::orchestrator::{BuildSummary, FormWalker};
use crate::parser::input_forms::load_input_forms;
use crate::services::description_service::{DescriptionResolver, HttpRegistryFetch};
use crate::services::output_service::prepare_output_directory;
use crate::services::response_cache::ResponseCache;
use crate::Result;
use anyhow::Context;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Path to DSpace submission form (input-forms.xml)
    #[arg(short, long)]
    pub input_forms: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIRECTORY)]
    pub output_directory: PathBuf,

    /// Directory containing controlled vocabulary XML files
    #[arg(short = 'v', long)]
    pub vocabulary_directory: PathBuf,

    /// DSpace REST API base URL
    #[arg(short, long, default_value = DEFAULT_REST_BASE_URL)]
    pub rest_base_url: String,

    /// Response cache file (default: user cache directory)
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Form definition to document
    #[arg(long, default_value = DEFAULT_FORM_NAME)]
    pub form_name: String,

    /// Remove the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Print debug messages to standard error
    #[arg(short, long)]
    pub debug: bool,
}

impl BuildArgs {
    pub fn into_config(self) -> BuildConfig {
        let mut config = BuildConfig::new(self.input_forms, self.vocabulary_directory);
        config.output_directory = self.output_directory;
        config.rest_base_url = self.rest_base_url;
        config.cache_path = self.cache_file.unwrap_or_else(default_cache_path);
        config.form_name = self.form_name;
        config.clean = self.clean;
        config.debug = self.debug;
        config
    }
}

/// Run the build command
pub fn run(args: BuildArgs) -> Result<()> {
    let config = args.into_config();
    super::init_tracing(config.debug);

    println!(
        "{}",
        format!("📄 Documenting {}", config.input_forms.display()).cyan()
    );

    let summary = build(&config)?;

    println!();
    print_summary(&config, &summary);
    Ok(())
}

/// Build documentation for every field of the configured form
pub fn build(config: &BuildConfig) -> Result<BuildSummary> {
    let document = load_input_forms(&config.input_forms, &config.form_name)?;

    prepare_output_directory(&config.output_directory, config.clean)?;

    let cache = ResponseCache::open(&config.cache_path, config.cache_expiry)
        .with_context(|| format!("Failed to open cache {}", config.cache_path.display()))?;
    debug!("Using response cache {}", config.cache_path.display());

    let fetch = HttpRegistryFetch::new()?;
    let resolver = DescriptionResolver::new(config.rest_base_url.clone(), fetch, cache);

    FormWalker::new(config, &document, resolver).run()
}

fn print_summary(config: &BuildConfig, summary: &BuildSummary) {
    println!(
        "{}",
        format!("✅ Documented {} field(s)", summary.fields).green().bold()
    );
    println!(
        "   Vocabularies:  {}",
        summary.vocabularies.to_string().yellow()
    );
    println!(
        "   Descriptions:  {} registry, {} hint, {} empty",
        summary.registry_descriptions.to_string().green(),
        summary.hint_descriptions.to_string().yellow(),
        summary.empty_descriptions.to_string().bright_black()
    );
    println!(
        "{}",
        format!("   Output: {}", config.output_directory.display()).bright_black()
    );
}
