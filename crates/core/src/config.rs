//! Remote store configuration

use crate::{Error, Result};

/// Environment variable holding the document store base URL
pub const STORE_URL_ENV: &str = "TODO_STORE_URL";

/// Configuration for the remote document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    base_url: String,
}

impl StoreConfig {
    /// Build a configuration from an explicit base URL
    ///
    /// The URL must use http or https. A trailing `/` is dropped so that
    /// `https://db.example.com/` and `https://db.example.com` address the
    /// same collections.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref().trim();
        if raw.is_empty() {
            return Err(Error::Config("store base URL is empty".into()));
        }
        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Err(Error::Config(format!(
                "store base URL must start with http:// or https://, got '{}'",
                raw
            )));
        }

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }

    /// Read the base URL from `TODO_STORE_URL`
    pub fn from_env() -> Result<Self> {
        match std::env::var(STORE_URL_ENV) {
            Ok(raw) => Self::new(raw),
            Err(_) => Err(Error::Config(format!("{} is not set", STORE_URL_ENV))),
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
