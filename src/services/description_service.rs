//! Field description resolution
//!
//! Looks a field up in the remote metadata-field registry by its exact dotted
//! name, falling back to the form's `<hint>` and finally to an empty string.
//! Registry failures never reach the caller.

use crate::models::{ClassifiedField, FieldIdentity};
use crate::services::response_cache::{CachedResponse, ResponseCache};
use anyhow::{Context, Result};
use chrono::Utc;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

const HTTP_OK: u16 = 200;
const USER_AGENT: &str = "curl";
const SEARCH_PATH: &str = "core/metadatafields/search/byFieldName";

/// Raw response of a registry request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedResponse {
    pub status: u16,
    pub body: String,
}

/// Transport used to reach the registry
pub trait RegistryFetch {
    /// Issue a GET for a fully built request URL
    fn fetch(&self, url: &Url) -> Result<FetchedResponse>;
}

impl<F: RegistryFetch + ?Sized> RegistryFetch for &F {
    fn fetch(&self, url: &Url) -> Result<FetchedResponse> {
        (**self).fetch(url)
    }
}

/// Registry transport over HTTP
pub struct HttpRegistryFetch {
    client: Client,
}

impl HttpRegistryFetch {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl RegistryFetch for HttpRegistryFetch {
    fn fetch(&self, url: &Url) -> Result<FetchedResponse> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))?;

        Ok(FetchedResponse { status, body })
    }
}

/// Where a resolved description came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSource {
    Registry,
    Hint,
    None,
}

/// Description chosen for a field
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDescription {
    pub text: String,
    pub source: DescriptionSource,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
struct Embedded {
    #[serde(default)]
    metadatafields: Vec<MetadataField>,
}

#[derive(Debug, Deserialize)]
struct MetadataField {
    #[serde(rename = "scopeNote", alias = "description", default)]
    scope_note: Option<String>,
}

/// Resolves field descriptions through a cached registry lookup
pub struct DescriptionResolver<F> {
    base_url: String,
    fetch: F,
    cache: ResponseCache,
}

impl<F: RegistryFetch> DescriptionResolver<F> {
    pub fn new(base_url: impl Into<String>, fetch: F, cache: ResponseCache) -> Self {
        Self {
            base_url: base_url.into(),
            fetch,
            cache,
        }
    }

    /// Resolve the description for a classified field
    ///
    /// Registry text (cleaned) wins; an empty or missing registry description
    /// falls back to the hint, then to an empty string.
    pub fn resolve(&mut self, field: &ClassifiedField) -> ResolvedDescription {
        if let Some(text) = self.lookup(&field.identity).filter(|t| !t.is_empty()) {
            return ResolvedDescription {
                text,
                source: DescriptionSource::Registry,
            };
        }

        match &field.hint {
            Some(hint) => ResolvedDescription {
                text: hint.clone(),
                source: DescriptionSource::Hint,
            },
            None => ResolvedDescription {
                text: String::new(),
                source: DescriptionSource::None,
            },
        }
    }

    /// Registry description for a field, with any trailing "See" reference removed
    pub fn lookup(&mut self, identity: &FieldIdentity) -> Option<String> {
        let name = identity.identifier();
        debug!("Looking up description for {}", name);

        let url = match self.request_url(&name) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot build registry request for {}: {:#}", name, e);
                return None;
            }
        };

        let response = self.get(&url)?;
        if response.status != HTTP_OK {
            info!("Registry returned {} for {}", response.status, name);
            return None;
        }

        let description = match parse_description(&response.body) {
            Ok(Some(description)) => description,
            Ok(None) => {
                debug!("No registry entry for {}", name);
                return None;
            }
            Err(e) => {
                warn!("Unreadable registry response for {}: {:#}", name, e);
                return None;
            }
        };

        match strip_see_annotation(&description) {
            Ok(cleaned) => Some(cleaned),
            Err(e) => {
                warn!("Failed to clean description for {}: {:#}", name, e);
                Some(description)
            }
        }
    }

    /// Give back the cache, e.g. to inspect it after a run
    pub fn into_cache(self) -> ResponseCache {
        self.cache
    }

    fn request_url(&self, name: &str) -> Result<Url> {
        let endpoint = format!("{}/{}", self.base_url.trim_end_matches('/'), SEARCH_PATH);
        Url::parse_with_params(&endpoint, &[("exactName", name)])
            .with_context(|| format!("Invalid registry URL: {}", endpoint))
    }

    /// Cached GET; only successful responses are stored
    fn get(&mut self, url: &Url) -> Option<FetchedResponse> {
        let now = Utc::now();
        if let Some(cached) = self.cache.get(url.as_str(), now) {
            debug!("Request in cache: {}", url);
            return Some(FetchedResponse {
                status: cached.status,
                body: cached.body.clone(),
            });
        }

        let response = match self.fetch.fetch(url) {
            Ok(response) => response,
            Err(e) => {
                warn!("Registry lookup failed: {:#}", e);
                return None;
            }
        };

        if response.status == HTTP_OK {
            let entry = CachedResponse {
                status: response.status,
                body: response.body.clone(),
                fetched_at: now,
            };
            if let Err(e) = self.cache.insert(url.as_str(), entry) {
                warn!("Failed to store response in cache: {:#}", e);
            }
        }

        Some(response)
    }
}

/// Description of the first matching registry record, if any
fn parse_description(body: &str) -> Result<Option<String>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("Failed to parse registry response")?;

    Ok(response
        .embedded
        .and_then(|embedded| embedded.metadatafields.into_iter().next())
        .and_then(|field| field.scope_note)
        .map(|note| note.trim().to_string()))
}

/// Remove a trailing "See <file>" reference from registry text
///
/// Only the last "See" is considered, and only when it starts a single
/// sentence that ends the text with a document file name. The reference is
/// removed together with the whitespace before it.
pub fn strip_see_annotation(text: &str) -> Result<String> {
    let see = Regex::new(r"\bSee\b").context("Failed to compile annotation regex")?;
    // A dot followed by whitespace ends the sentence; dots inside file names do not
    let reference = Regex::new(
        r"^See\b(?:[^.\n]|\.[^\s.])*?\S\.(?:md|txt|xml|html?|pdf|csv|json)\.?\s*$",
    )
    .context("Failed to compile annotation regex")?;

    let Some(last) = see.find_iter(text).last() else {
        return Ok(text.to_string());
    };

    let (before, annotation) = text.split_at(last.start());
    let starts_word = before.is_empty() || before.ends_with(char::is_whitespace);
    if !starts_word || !reference.is_match(annotation) {
        return Ok(text.to_string());
    }

    Ok(before.trim_end().to_string())
}
