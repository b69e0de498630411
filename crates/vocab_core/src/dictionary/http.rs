//! Blocking HTTP client for an Oxford-style entries API.

use super::{DictionaryClient, DictionaryError, WordEntry};
use crate::config::DictionaryConfig;
use crate::model::word::lookup_key;
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::{Duration, Instant};

pub struct HttpDictionaryClient {
    client: Client,
    base_url: Url,
    language: String,
    app_id: Option<String>,
    api_key: String,
}

impl HttpDictionaryClient {
    /// Builds a client from dictionary settings.
    ///
    /// # Errors
    /// - `MissingCredentials` when no API key is configured.
    /// - `InvalidUrl` when `base_url` cannot be parsed as a base URL.
    pub fn from_config(config: &DictionaryConfig) -> Result<Self, DictionaryError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(DictionaryError::MissingCredentials)?;
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| DictionaryError::InvalidUrl(config.base_url.clone()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            language: config.language.clone(),
            app_id: config.app_id.clone(),
            api_key,
        })
    }

    fn entry_url(&self, key: &str) -> Result<Url, DictionaryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DictionaryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["entries", self.language.as_str(), key]);
        Ok(url)
    }
}

impl DictionaryClient for HttpDictionaryClient {
    fn lookup(&self, title: &str) -> Result<Option<WordEntry>, DictionaryError> {
        let started_at = Instant::now();
        let key = lookup_key(title).to_lowercase();
        let url = self.entry_url(&key)?;

        let mut request = self.client.get(url).header("app_key", &self.api_key);
        if let Some(app_id) = self.app_id.as_deref() {
            request = request.header("app_id", app_id);
        }

        let response = request.send()?;
        let status = response.status();
        let result = match status {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => parse_entry(&response.text()?),
            status => Err(DictionaryError::Status(status.as_u16())),
        };

        match &result {
            Ok(entry) => info!(
                "event=dictionary_lookup module=dictionary status=ok found={} http_status={} duration_ms={}",
                entry.is_some(),
                status.as_u16(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=dictionary_lookup module=dictionary status=error http_status={} duration_ms={} error={}",
                status.as_u16(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EntriesResponse {
    results: Vec<HeadwordEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HeadwordEntry {
    lexical_entries: Vec<LexicalEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LexicalEntry {
    entries: Vec<Entry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Entry {
    senses: Vec<Sense>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Sense {
    definitions: Vec<String>,
    synonyms: Vec<Synonym>,
    subsenses: Vec<Sense>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Synonym {
    text: String,
}

/// Extracts a `WordEntry` from an entries response body.
///
/// Definition is the first non-blank definition in document order. Synonyms
/// are collected across all senses and subsenses, trimmed and de-duplicated
/// in first-seen order. A body without results yields `Ok(None)`.
pub fn parse_entry(body: &str) -> Result<Option<WordEntry>, DictionaryError> {
    let response: EntriesResponse = serde_json::from_str(body)?;
    if response.results.is_empty() {
        return Ok(None);
    }

    let mut entry = WordEntry::default();
    let senses = response
        .results
        .iter()
        .flat_map(|result| &result.lexical_entries)
        .flat_map(|lexical| &lexical.entries)
        .flat_map(|item| &item.senses);
    for sense in senses {
        collect_sense(sense, &mut entry);
    }
    Ok(Some(entry))
}

fn collect_sense(sense: &Sense, entry: &mut WordEntry) {
    if entry.definition.is_none() {
        entry.definition = sense
            .definitions
            .iter()
            .map(|text| text.trim())
            .find(|text| !text.is_empty())
            .map(str::to_string);
    }
    for synonym in &sense.synonyms {
        let text = synonym.text.trim();
        if !text.is_empty() && !entry.synonyms.iter().any(|known| known == text) {
            entry.synonyms.push(text.to_string());
        }
    }
    for subsense in &sense.subsenses {
        collect_sense(subsense, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_entry, HttpDictionaryClient};
    use crate::config::DictionaryConfig;
    use crate::dictionary::DictionaryError;

    const RUN_RESPONSE: &str = r#"{
        "id": "run",
        "results": [{
            "id": "run",
            "lexicalEntries": [{
                "entries": [{
                    "senses": [
                        {
                            "definitions": ["move at a speed faster than a walk"],
                            "synonyms": [{"text": "sprint"}, {"text": "race"}],
                            "subsenses": [
                                {"definitions": ["run as a sport"], "synonyms": [{"text": "jog"}, {"text": "race"}]}
                            ]
                        },
                        {"definitions": ["pass or cause to pass quickly"], "synonyms": [{"text": " dash "}]}
                    ]
                }]
            }]
        }]
    }"#;

    #[test]
    fn parse_entry_takes_first_definition_and_unique_synonyms() {
        let entry = parse_entry(RUN_RESPONSE).unwrap().unwrap();
        assert_eq!(
            entry.definition.as_deref(),
            Some("move at a speed faster than a walk")
        );
        assert_eq!(entry.synonyms, vec!["sprint", "race", "jog", "dash"]);
    }

    #[test]
    fn parse_entry_without_results_is_unknown_word() {
        assert_eq!(parse_entry(r#"{"results": []}"#).unwrap(), None);
        assert_eq!(parse_entry("{}").unwrap(), None);
    }

    #[test]
    fn parse_entry_rejects_malformed_body() {
        assert!(matches!(
            parse_entry("<html>oops</html>"),
            Err(DictionaryError::Decode(_))
        ));
    }

    #[test]
    fn client_requires_api_key() {
        let config = DictionaryConfig::default();
        assert!(matches!(
            HttpDictionaryClient::from_config(&config),
            Err(DictionaryError::MissingCredentials)
        ));
    }

    #[test]
    fn entry_url_appends_language_and_escaped_key() {
        let config = DictionaryConfig {
            base_url: "https://od-api.example.com/api/v2/".to_string(),
            api_key: Some("secret".to_string()),
            ..DictionaryConfig::default()
        };
        let client = HttpDictionaryClient::from_config(&config).unwrap();
        let url = client.entry_url("ice cream").unwrap();
        assert_eq!(
            url.as_str(),
            "https://od-api.example.com/api/v2/entries/en-gb/ice%20cream"
        );
    }
}
