//! External dictionary lookup used to enrich new words.
//!
//! # Responsibility
//! - Define the lookup seam consumed by word use cases.
//! - Provide the HTTP client and an offline stand-in.
//!
//! # Invariants
//! - A lookup never touches storage; callers run it before opening the
//!   write transaction.
//! - `Ok(None)` means the dictionary does not know the word. Transport and
//!   decoding failures are reported as `Err`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod http;

pub use http::{parse_entry, HttpDictionaryClient};

/// Definition and synonyms returned for one word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordEntry {
    pub definition: Option<String>,
    pub synonyms: Vec<String>,
}

#[derive(Debug)]
pub enum DictionaryError {
    /// Request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// Dictionary answered with a non-success status other than 404.
    Status(u16),
    /// Response body is not the expected JSON shape.
    Decode(serde_json::Error),
    /// Configured base URL cannot carry path segments.
    InvalidUrl(String),
    /// No API key is configured for the HTTP client.
    MissingCredentials,
}

impl Display for DictionaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "dictionary request failed: {err}"),
            Self::Status(code) => write!(f, "dictionary responded with status {code}"),
            Self::Decode(err) => write!(f, "invalid dictionary response: {err}"),
            Self::InvalidUrl(url) => write!(f, "invalid dictionary base url `{url}`"),
            Self::MissingCredentials => write!(f, "dictionary api key is not configured"),
        }
    }
}

impl Error for DictionaryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Status(_) | Self::InvalidUrl(_) | Self::MissingCredentials => None,
        }
    }
}

impl From<reqwest::Error> for DictionaryError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for DictionaryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Looks up dictionary metadata for a word title.
pub trait DictionaryClient {
    fn lookup(&self, title: &str) -> Result<Option<WordEntry>, DictionaryError>;
}

impl<T: DictionaryClient + ?Sized> DictionaryClient for &T {
    fn lookup(&self, title: &str) -> Result<Option<WordEntry>, DictionaryError> {
        (**self).lookup(title)
    }
}

impl<T: DictionaryClient + ?Sized> DictionaryClient for Box<T> {
    fn lookup(&self, title: &str) -> Result<Option<WordEntry>, DictionaryError> {
        (**self).lookup(title)
    }
}

/// Accepts every word without a definition or synonyms.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineDictionary;

impl DictionaryClient for OfflineDictionary {
    fn lookup(&self, _title: &str) -> Result<Option<WordEntry>, DictionaryError> {
        Ok(Some(WordEntry::default()))
    }
}
