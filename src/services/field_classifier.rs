//! Field classification
//!
//! Turns a raw [`FieldNode`] into a [`ClassifiedField`]. Missing identity or
//! always-present children are fatal; a missing qualifier or vocabulary is a
//! normal case.

use crate::models::{
    ClassifiedField, FieldIdentity, FieldNode, FieldPolicy, FormError, FormResult, InputType,
};
use std::path::{Component, Path};

/// Classify one field node
pub fn classify(node: &FieldNode) -> FormResult<ClassifiedField> {
    let malformed = |missing: &'static str| FormError::MalformedField {
        page: node.page.clone(),
        position: node.position,
        missing,
    };

    let schema = node
        .dc_schema
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("dc-schema"))?;
    let element = node
        .dc_element
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("dc-element"))?;
    let repeatable = node.repeatable.as_deref().ok_or_else(|| malformed("repeatable"))?;
    let title = node.label.as_deref().ok_or_else(|| malformed("label"))?;
    let input = node.input_type.as_ref().ok_or_else(|| malformed("input-type"))?;
    let required = node.required.as_deref().ok_or_else(|| malformed("required"))?;

    let input_type = InputType::from_name(&input.kind);
    let vocabulary = node.vocabulary.clone();
    let value_pairs = input.value_pairs_name.clone();
    let policy = classify_policy(&input_type, vocabulary.is_some(), value_pairs.is_some());

    let identity = FieldIdentity::new(schema, element, node.dc_qualifier.clone());
    let slug = identity.slug();
    if !is_directory_name(&slug) {
        return Err(FormError::InvalidFieldName {
            page: node.page.clone(),
            position: node.position,
            slug,
        });
    }

    Ok(ClassifiedField {
        identity,
        title: title.to_string(),
        repeatable: repeatable.eq_ignore_ascii_case("true"),
        input_type,
        // Any text at all marks the field as required
        required: !required.is_empty(),
        vocabulary,
        value_pairs,
        policy,
        hint: node.hint.clone(),
    })
}

/// True when `name` is one plain path component under the output root
pub fn is_directory_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

/// Derive the input policy from input type and vocabulary sources
///
/// Combinations not listed here (two-box fields, dropdowns without
/// value-pairs, unknown input types) have no policy.
pub fn classify_policy(
    input_type: &InputType,
    has_vocabulary: bool,
    has_value_pairs: bool,
) -> Option<FieldPolicy> {
    match input_type {
        InputType::Onebox if has_vocabulary => Some(FieldPolicy::FreeTextWithSuggestions),
        InputType::Onebox | InputType::Textarea => Some(FieldPolicy::FreeText),
        InputType::Dropdown if has_value_pairs => Some(FieldPolicy::ControlledWithVocabulary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InputTypeNode;

    fn node(kind: &str) -> FieldNode {
        FieldNode {
            page: "1".to_string(),
            position: 1,
            dc_schema: Some("dc".to_string()),
            dc_element: Some("title".to_string()),
            dc_qualifier: None,
            repeatable: Some("false".to_string()),
            label: Some("Title".to_string()),
            input_type: Some(InputTypeNode {
                kind: kind.to_string(),
                value_pairs_name: None,
            }),
            vocabulary: None,
            required: Some(String::new()),
            hint: None,
        }
    }

    #[test]
    fn test_classify_plain_onebox() {
        let field = classify(&node("onebox")).unwrap();
        assert_eq!(field.identifier(), "dc.title");
        assert_eq!(field.slug(), "dc-title");
        assert_eq!(field.policy, Some(FieldPolicy::FreeText));
        assert!(!field.required);
        assert!(!field.repeatable);
        assert!(!field.has_vocabulary_source());
    }

    #[test]
    fn test_required_any_text() {
        let mut n = node("onebox");
        n.required = Some("You must enter a title.".to_string());
        assert!(classify(&n).unwrap().required);

        n.required = Some("false".to_string());
        assert!(classify(&n).unwrap().required);
    }

    #[test]
    fn test_onebox_with_vocabulary_suggests() {
        let mut n = node("onebox");
        n.vocabulary = Some("srsc".to_string());
        let field = classify(&n).unwrap();
        assert_eq!(field.policy, Some(FieldPolicy::FreeTextWithSuggestions));
        assert!(field.has_vocabulary_source());
    }

    #[test]
    fn test_dropdown_with_value_pairs_is_controlled() {
        let mut n = node("dropdown");
        n.dc_qualifier = Some("lcsh".to_string());
        n.input_type.as_mut().unwrap().value_pairs_name = Some("subjects".to_string());
        let field = classify(&n).unwrap();
        assert_eq!(field.slug(), "dc-title-lcsh");
        assert_eq!(field.value_pairs.as_deref(), Some("subjects"));
        assert_eq!(field.policy, Some(FieldPolicy::ControlledWithVocabulary));
    }

    #[test]
    fn test_unclassified_combinations() {
        assert_eq!(classify_policy(&InputType::Dropdown, false, false), None);
        assert_eq!(classify_policy(&InputType::Twobox, true, true), None);
        assert_eq!(
            classify_policy(&InputType::Other("date".to_string()), false, false),
            None
        );
        assert_eq!(
            classify_policy(&InputType::Textarea, true, false),
            Some(FieldPolicy::FreeText)
        );
    }

    #[test]
    fn test_missing_element_is_fatal() {
        let mut n = node("onebox");
        n.position = 4;
        n.dc_element = None;
        let err = classify(&n).unwrap_err();
        assert!(matches!(
            err,
            FormError::MalformedField { ref page, position: 4, missing: "dc-element" } if page == "1"
        ));
    }

    #[test]
    fn test_missing_always_present_children_are_fatal() {
        let cases: Vec<(&str, fn(&mut FieldNode))> = vec![
            ("dc-schema", |n| n.dc_schema = None),
            ("dc-schema", |n| n.dc_schema = Some(String::new())),
            ("dc-element", |n| n.dc_element = Some(String::new())),
            ("repeatable", |n| n.repeatable = None),
            ("label", |n| n.label = None),
            ("input-type", |n| n.input_type = None),
            ("required", |n| n.required = None),
        ];

        for (expected, strip) in cases {
            let mut n = node("onebox");
            strip(&mut n);
            match classify(&n) {
                Err(FormError::MalformedField { missing, .. }) => assert_eq!(missing, expected),
                other => panic!("expected missing <{}>, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_missing_optional_children_are_not_errors() {
        let mut n = node("onebox");
        n.dc_qualifier = None;
        n.vocabulary = None;
        n.hint = None;
        n.label = Some(String::new());

        let field = classify(&n).unwrap();
        assert_eq!(field.identifier(), "dc.title");
        assert_eq!(field.title, "");
        assert_eq!(field.vocabulary, None);
    }

    #[test]
    fn test_path_like_identity_is_rejected() {
        for (schema, qualifier) in [("/tmp/x", None), ("dc", Some("a/b")), ("..\\x", None)] {
            let mut n = node("onebox");
            n.position = 2;
            n.dc_schema = Some(schema.to_string());
            n.dc_qualifier = qualifier.map(String::from);
            assert!(matches!(
                classify(&n).unwrap_err(),
                FormError::InvalidFieldName { position: 2, .. }
            ));
        }
    }

    #[test]
    fn test_is_directory_name() {
        assert!(is_directory_name("dc-title"));
        assert!(is_directory_name("dc-subject-lcsh"));
        assert!(!is_directory_name(""));
        assert!(!is_directory_name(".."));
        assert!(!is_directory_name("/tmp/x-title"));
        assert!(!is_directory_name("dc-a/b"));
        assert!(!is_directory_name("dc-a\\b"));
    }

    #[test]
    fn test_missing_required_node_is_fatal() {
        let mut n = node("onebox");
        n.required = None;
        assert!(matches!(
            classify(&n).unwrap_err(),
            FormError::MalformedField { missing: "required", .. }
        ));
    }
}
