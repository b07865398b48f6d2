//! HTTP document store client
//!
//! Speaks the Firebase Realtime Database REST dialect: every path ends in
//! `.json`, POST answers `{"name": "<id>"}`, GET of an empty path answers
//! `null`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::remote::{RecordMap, RemoteStore};
use crate::config::StoreConfig;
use crate::session::UserId;
use crate::todo::{TodoId, TodoRecord};
use crate::{Error, Result};

const COLLECTION: &str = "todos";

#[derive(Deserialize)]
struct CreatedName {
    name: String,
}

/// Remote store reached over HTTP
pub struct HttpRemoteStore {
    client: Client,
    config: StoreConfig,
}

impl HttpRemoteStore {
    /// Create a client for the configured base URL.
    ///
    /// No request timeout is set: a request that never resolves stays pending.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::builder()
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    /// Use a preconfigured HTTP client, e.g. one built with `no_proxy()`
    pub fn with_client(config: StoreConfig, client: Client) -> Self {
        Self { client, config }
    }

    /// Create a client from `TODO_STORE_URL`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    /// `<base>/todos/<user>.json`
    pub fn collection_url(&self, user: &str) -> String {
        format!(
            "{}/{}/{}.json",
            self.config.base_url(),
            COLLECTION,
            urlencoding::encode(user)
        )
    }

    /// `<base>/todos/<user>/<id>.json`
    pub fn record_url(&self, user: &str, id: &str) -> String {
        format!(
            "{}/{}/{}/{}.json",
            self.config.base_url(),
            COLLECTION,
            urlencoding::encode(user),
            urlencoding::encode(id)
        )
    }

    async fn check_status(resp: Response, action: &str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        Err(Error::rejected(
            status.as_u16(),
            format!("Failed to {}: {}", action, text),
        ))
    }

    /// A blank partition key would address the whole `todos` tree
    fn check_partition(user: &str) -> Result<()> {
        if user.trim().is_empty() {
            return Err(Error::NotAuthenticated);
        }
        Ok(())
    }

    fn unavailable(action: &str, err: reqwest::Error) -> Error {
        Error::StoreUnavailable(format!("Failed to {}: {}", action, err))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn create_record(&self, user: &UserId, record: &TodoRecord) -> Result<TodoId> {
        Self::check_partition(user)?;
        let url = self.collection_url(user);
        debug!("POST {}", url);

        let resp = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| Self::unavailable("create todo", e))?;
        let resp = Self::check_status(resp, "create todo").await?;

        let body = resp
            .text()
            .await
            .map_err(|e| Self::unavailable("read create response", e))?;
        let created: CreatedName = serde_json::from_str(&body)?;

        info!("Created todo {} for {}", created.name, user);
        Ok(created.name)
    }

    async fn read_all(&self, user: &UserId) -> Result<RecordMap> {
        Self::check_partition(user)?;
        let url = self.collection_url(user);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::unavailable("read todos", e))?;
        let resp = Self::check_status(resp, "read todos").await?;
        let status = resp.status();

        let body = resp
            .text()
            .await
            .map_err(|e| Self::unavailable("read todos", e))?;
        if body.trim().is_empty() {
            return Ok(RecordMap::new());
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Null => Ok(RecordMap::new()),
            Value::Object(documents) => Ok(documents),
            other => Err(Error::rejected(
                status.as_u16(),
                format!("Expected a JSON object of todos, got: {}", other),
            )),
        }
    }

    async fn replace_record(&self, user: &UserId, id: &str, record: &TodoRecord) -> Result<()> {
        Self::check_partition(user)?;
        let url = self.record_url(user, id);
        debug!("PUT {}", url);

        let resp = self
            .client
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| Self::unavailable("update todo", e))?;
        Self::check_status(resp, "update todo").await?;
        Ok(())
    }

    async fn delete_record(&self, user: &UserId, id: &str) -> Result<()> {
        Self::check_partition(user)?;
        let url = self.record_url(user, id);
        debug!("DELETE {}", url);

        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::unavailable("delete todo", e))?;

        if resp.status() == StatusCode::NOT_FOUND {
            debug!("Todo {} already absent", id);
            return Ok(());
        }
        Self::check_status(resp, "delete todo").await?;
        Ok(())
    }
}
