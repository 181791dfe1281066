//! Submission form document model
//!
//! Owned representation of an `input-forms.xml` document: the pages of one
//! form definition plus the document-wide value-pairs collections. Child
//! elements of a field are kept as `Option`s so that absence can be judged
//! by the classifier rather than the parser.

use std::collections::HashMap;

/// A parsed submission form, immutable for the duration of a build
#[derive(Debug, Clone, Default)]
pub struct FormDocument {
    /// Name of the selected form definition (e.g. "traditional")
    pub form_name: String,
    /// Pages in document order
    pub pages: Vec<Page>,
    /// Value-pairs collections keyed by `value-pairs-name`
    pub value_pairs: HashMap<String, ValuePairsCollection>,
}

impl FormDocument {
    /// Fields on every page carrying this number, in document order
    ///
    /// Yields nothing when the page does not exist or has no fields.
    pub fn fields_on_page<'a>(&'a self, number: &'a str) -> impl Iterator<Item = &'a FieldNode> {
        self.pages
            .iter()
            .filter(move |page| page.number == number)
            .flat_map(|page| page.fields.iter())
    }

    /// Look up a value-pairs collection by name
    pub fn value_pairs(&self, name: &str) -> Option<&ValuePairsCollection> {
        self.value_pairs.get(name)
    }
}

/// One `<page>` of a form
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub number: String,
    pub fields: Vec<FieldNode>,
}

/// A `<field>` exactly as found in the document
///
/// `Some("")` means the child element is present but has no text,
/// `None` means the element is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldNode {
    /// Page number this field was found on
    pub page: String,
    /// 1-based position of the field within its page
    pub position: usize,
    pub dc_schema: Option<String>,
    pub dc_element: Option<String>,
    pub dc_qualifier: Option<String>,
    pub repeatable: Option<String>,
    pub label: Option<String>,
    pub input_type: Option<InputTypeNode>,
    pub vocabulary: Option<String>,
    /// Raw text of `<required>`, untrimmed
    pub required: Option<String>,
    pub hint: Option<String>,
}

/// The `<input-type>` element of a field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTypeNode {
    pub kind: String,
    pub value_pairs_name: Option<String>,
}

/// A named, in-document list of selectable values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuePairsCollection {
    pub name: String,
    /// `stored-value` entries in document order; `None` for empty elements
    pub stored_values: Vec<Option<String>>,
}
