//! Registry contract tests against a local mock server
//!
//! Covers the HTTP transport, the request shape, the 200-only caching rule and
//! a full `build` run pointed at the mock registry.

use chrono::Duration;
use mockito::{Matcher, Server};
use std::fs;
use submission_docs::cli::build::build;
use submission_docs::services::{
    DescriptionResolver, HttpRegistryFetch, ResponseCache,
};
use submission_docs::{BuildConfig, FieldIdentity, FormError};
use tempfile::TempDir;

const SEARCH_PATH: &str = "/server/api/core/metadatafields/search/byFieldName";

fn field_body(scope_note: &str) -> String {
    serde_json::json!({
        "_embedded": { "metadatafields": [ { "element": "title", "scopeNote": scope_note } ] },
        "page": { "totalElements": 1 }
    })
    .to_string()
}

fn resolver_for(server: &Server, cache: ResponseCache) -> DescriptionResolver<HttpRegistryFetch> {
    DescriptionResolver::new(
        format!("{}/server/api", server.url()),
        HttpRegistryFetch::new().unwrap(),
        cache,
    )
}

#[test]
fn test_lookup_by_exact_name_is_cached() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::UrlEncoded("exactName".into(), "dc.title".into()))
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(field_body("Main title of the item."))
        .expect(1)
        .create();

    let mut resolver = resolver_for(&server, ResponseCache::in_memory(Duration::days(30)));
    let identity = FieldIdentity::new("dc", "title", None);

    assert_eq!(
        resolver.lookup(&identity).as_deref(),
        Some("Main title of the item.")
    );
    assert_eq!(
        resolver.lookup(&identity).as_deref(),
        Some("Main title of the item.")
    );

    mock.assert();
}

#[test]
fn test_non_success_is_not_found_and_not_cached() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(2)
        .create();

    let mut resolver = resolver_for(&server, ResponseCache::in_memory(Duration::days(30)));
    let identity = FieldIdentity::new("dc", "subject", Some("lcsh".to_string()));

    assert_eq!(resolver.lookup(&identity), None);
    assert_eq!(resolver.lookup(&identity), None);
    assert!(resolver.into_cache().is_empty());

    mock.assert();
}

#[test]
fn test_unreachable_registry_is_not_fatal() {
    let mut resolver = DescriptionResolver::new(
        "http://127.0.0.1:9/server/api",
        HttpRegistryFetch::new().unwrap(),
        ResponseCache::in_memory(Duration::days(30)),
    );
    assert_eq!(resolver.lookup(&FieldIdentity::new("dc", "title", None)), None);
}

const FORMS: &str = r#"<input-forms>
  <form-definitions>
    <form name="traditional">
      <page number="1">
        <field>
          <dc-schema>dc</dc-schema>
          <dc-element>title</dc-element>
          <repeatable>false</repeatable>
          <label>Title</label>
          <input-type>onebox</input-type>
          <required>Required.</required>
        </field>
        <field>
          <dc-schema>dc</dc-schema>
          <dc-element>subject</dc-element>
          <repeatable>true</repeatable>
          <label>Subject</label>
          <input-type>onebox</input-type>
          <vocabulary>subjects</vocabulary>
          <required/>
        </field>
      </page>
    </form>
  </form-definitions>
</input-forms>"#;

fn workspace(temp_dir: &TempDir, server: &Server) -> BuildConfig {
    let root = temp_dir.path();
    fs::write(root.join("input-forms.xml"), FORMS).unwrap();
    fs::create_dir_all(root.join("vocabularies")).unwrap();

    let mut config = BuildConfig::new(root.join("input-forms.xml"), root.join("vocabularies"));
    config.output_directory = root.join("site/content/terms");
    config.cache_path = root.join("cache/requests-cache.json");
    config.rest_base_url = format!("{}/server/api", server.url());
    config
}

#[test]
fn test_build_against_mock_registry() {
    let mut server = Server::new();
    let title = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::UrlEncoded("exactName".into(), "dc.title".into()))
        .with_status(200)
        .with_body(field_body("Main title. See title.md"))
        .expect(1)
        .create();
    let subject = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::UrlEncoded("exactName".into(), "dc.subject".into()))
        .with_status(200)
        .with_body(field_body("Subject keywords."))
        .expect(1)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let mut config = workspace(&temp_dir, &server);
    fs::write(
        config.vocabulary_directory.join("subjects.xml"),
        r#"<node id="s" label="Subjects"><isComposedBy>
             <node id="1" label="Économie"/>
             <node id="2" label="Zoology"/>
             <node id="3" label="agronomy"/>
           </isComposedBy></node>"#,
    )
    .unwrap();

    // A leftover from an earlier build disappears with --clean
    fs::create_dir_all(config.output_directory.join("dc-removed")).unwrap();
    config.clean = true;

    let summary = build(&config).unwrap();
    assert_eq!(summary.fields, 2);
    assert_eq!(summary.registry_descriptions, 2);
    assert!(!config.output_directory.join("dc-removed").exists());

    let record = fs::read_to_string(config.output_directory.join("dc-title/index.md")).unwrap();
    assert!(record.contains("description: Main title."));
    assert!(!record.contains("See title.md"));

    assert_eq!(
        fs::read_to_string(config.output_directory.join("dc-subject/vocabulary.txt")).unwrap(),
        "agronomy\nÉconomie\nZoology\n"
    );

    // Second run is served from the on-disk cache
    let summary = build(&config).unwrap();
    assert_eq!(summary.registry_descriptions, 2);

    title.assert();
    subject.assert();
}

#[test]
fn test_build_fails_on_missing_vocabulary() {
    let server = Server::new();
    let temp_dir = TempDir::new().unwrap();
    let config = workspace(&temp_dir, &server);

    let err = build(&config).unwrap_err();
    match err.downcast_ref::<FormError>() {
        Some(FormError::MissingVocabularyFile { name, .. }) => assert_eq!(name, "subjects"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(config.output_directory.join("dc-title/index.md").exists());
}
