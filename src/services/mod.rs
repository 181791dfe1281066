//! Service layer
//!
//! One module per pipeline stage. The form walker in `orchestrator` drives
//! them field by field.

pub mod description_service;
pub mod field_classifier;
pub mod output_service;
pub mod response_cache;
pub mod vocabulary_service;

pub use description_service::{
    DescriptionResolver, DescriptionSource, FetchedResponse, HttpRegistryFetch, RegistryFetch,
    ResolvedDescription,
};
pub use field_classifier::{classify, classify_policy};
pub use response_cache::{CachedResponse, ResponseCache};
pub use vocabulary_service::{controlled_vocabulary_values, value_pairs_values};
