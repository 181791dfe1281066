//! Submission form parser
//!
//! Reads `input-forms.xml` with the shape
//! `input-forms/form-definitions/form[@name]/page[@number]/field` plus
//! `value-pairs[@value-pairs-name]/pair/stored-value` collections.

use crate::models::{
    FieldNode, FormDocument, FormError, FormResult, InputTypeNode, Page, ValuePairsCollection,
};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::path::Path;

/// Read and parse an input forms file, selecting one form definition
pub fn load_input_forms(path: &Path, form_name: &str) -> FormResult<FormDocument> {
    let content = std::fs::read_to_string(path).map_err(|source| FormError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_input_forms(&content, form_name, &path.display().to_string())
}

/// Parse input forms XML, selecting the form definition named `form_name`
///
/// `origin` names the document in error messages.
pub fn parse_input_forms(content: &str, form_name: &str, origin: &str) -> FormResult<FormDocument> {
    let doc = Document::parse(content).map_err(|e| FormError::Xml {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    let root = doc.root_element();

    let form = root
        .children()
        .filter(|n| n.has_tag_name("form-definitions"))
        .flat_map(|defs| defs.children())
        .find(|n| n.has_tag_name("form") && n.attribute("name") == Some(form_name))
        .ok_or_else(|| FormError::FormNotFound(form_name.to_string()))?;

    let pages = form
        .children()
        .filter(|n| n.has_tag_name("page"))
        .map(parse_page)
        .collect();

    Ok(FormDocument {
        form_name: form_name.to_string(),
        pages,
        value_pairs: parse_value_pairs(root),
    })
}

fn parse_page(page: Node) -> Page {
    let number = page.attribute("number").unwrap_or_default().to_string();

    let fields = page
        .children()
        .filter(|n| n.has_tag_name("field"))
        .enumerate()
        .map(|(i, field)| parse_field(field, &number, i + 1))
        .collect();

    Page { number, fields }
}

fn parse_field(field: Node, page: &str, position: usize) -> FieldNode {
    let input_type = child(field, "input-type").map(|node| InputTypeNode {
        kind: node_text(node).trim().to_string(),
        value_pairs_name: node
            .attribute("value-pairs-name")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from),
    });

    FieldNode {
        page: page.to_string(),
        position,
        dc_schema: child_text(field, "dc-schema"),
        dc_element: child_text(field, "dc-element"),
        dc_qualifier: non_empty(child_text(field, "dc-qualifier")),
        repeatable: child_text(field, "repeatable"),
        label: child_text(field, "label"),
        input_type,
        vocabulary: non_empty(child_text(field, "vocabulary")),
        required: child(field, "required").map(|node| node_text(node).to_string()),
        hint: non_empty(child_text(field, "hint")),
    }
}

/// Collect every `value-pairs` collection in the document
fn parse_value_pairs(root: Node) -> HashMap<String, ValuePairsCollection> {
    let mut collections: HashMap<String, ValuePairsCollection> = HashMap::new();

    for node in root.descendants().filter(|n| n.has_tag_name("value-pairs")) {
        let Some(name) = node.attribute("value-pairs-name") else {
            continue;
        };

        let stored_values = node
            .children()
            .filter(|n| n.has_tag_name("pair"))
            .flat_map(|pair| pair.children())
            .filter(|n| n.has_tag_name("stored-value"))
            .map(|value| Some(node_text(value).trim().to_string()).filter(|v| !v.is_empty()))
            .collect::<Vec<_>>();

        collections
            .entry(name.to_string())
            .or_insert_with(|| ValuePairsCollection {
                name: name.to_string(),
                stored_values: Vec::new(),
            })
            .stored_values
            .extend(stored_values);
    }

    collections
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Trimmed text of a child element; `Some("")` when present but empty
fn child_text(node: Node, tag: &str) -> Option<String> {
    child(node, tag).map(|c| node_text(c).trim().to_string())
}

fn node_text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
