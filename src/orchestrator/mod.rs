pub mod form_walker;

pub use form_walker::{BuildSummary, FieldOutcome, FormWalker};
