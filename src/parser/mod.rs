pub mod frontmatter;
pub mod input_forms;
pub mod vocabulary;

pub use frontmatter::{
    normalize_content, parse_document, render_document, split_frontmatter, ParsedDocument,
};
pub use input_forms::{load_input_forms, parse_input_forms};
pub use vocabulary::{load_vocabulary_labels, parse_vocabulary_labels, vocabulary_path};
