pub mod error;
pub mod field;
pub mod form;
pub mod record;

pub use error::{FormError, FormResult};
pub use field::{ClassifiedField, FieldIdentity, FieldPolicy, InputType};
pub use form::{FieldNode, FormDocument, InputTypeNode, Page, ValuePairsCollection};
pub use record::OutputRecord;
