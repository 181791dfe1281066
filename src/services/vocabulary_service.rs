//! Vocabulary export
//!
//! Both vocabulary sources end up as a deduplicated, sorted list of values.
//! In-document value-pairs sort by code point; external controlled
//! vocabularies sort with the Unicode Collation Algorithm so accented labels
//! land next to their base letter.

use crate::models::{FormDocument, FormResult};
use crate::parser::vocabulary::load_vocabulary_labels;
use feruca::Collator;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Sorted unique `stored-value`s of a value-pairs collection
///
/// An unknown collection name yields an empty list.
pub fn value_pairs_values(document: &FormDocument, name: &str) -> Vec<String> {
    debug!("Exporting value-pairs for {}", name);

    let Some(collection) = document.value_pairs(name) else {
        warn!("Value-pairs '{}' not found in form document", name);
        return Vec::new();
    };

    let mut values = dedup_preserving_order(collection.stored_values.iter().flatten().cloned());
    values.sort();
    values
}

/// Sorted unique labels of an external controlled vocabulary
pub fn controlled_vocabulary_values(directory: &Path, name: &str) -> FormResult<Vec<String>> {
    debug!("Exporting controlled vocabulary {}", name);

    let labels = load_vocabulary_labels(directory, name)?;
    let mut values = dedup_preserving_order(labels);
    sort_collated(&mut values);
    Ok(values)
}

/// Drop repeated values, keeping the first occurrence of each
pub fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| !value.is_empty() && seen.insert(value.clone()))
        .collect()
}

/// Sort in human alphabetical order (CLDR root collation)
pub fn sort_collated(values: &mut [String]) {
    let mut collator = Collator::default();
    values.sort_by(|a, b| collator.collate(a.as_str(), b.as_str()));
}
