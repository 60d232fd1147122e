use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{TicketApi, UploadError};
use crate::config::ApiConfig;
use crate::model::reference::{NamedEntity, User};

pub struct CodebaseClient {
    project_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl CodebaseClient {
    pub fn new(config: &ApiConfig, project: &str) -> Self {
        let creds = format!("{}:{}", config.api_user, config.api_token);
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        Self {
            project_url: format!("{}/{}", config.base_url, urlencoding::encode(project)),
            auth_header: format!("Basic {encoded}"),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.project_url)
    }

    async fn fetch_collection<T: DeserializeOwned>(&self, path: &str, key: &str) -> Result<Vec<T>> {
        let url = self.url(path);
        debug!(%url, "GET");

        let body: Value = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} returned an error status"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))?;

        decode_collection(body, key)
    }
}

/// Unwrap a collection shaped like `[{"<key>": {...}}, ...]`.
pub fn decode_collection<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>> {
    let Value::Array(entries) = body else {
        bail!("Expected a JSON array of {key} entries");
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let inner = match entry {
                Value::Object(mut map) => map.remove(key),
                _ => None,
            }
            .with_context(|| format!("Entry {i} is not a {key} object"))?;
            serde_json::from_value(inner).with_context(|| format!("Malformed {key} entry {i}"))
        })
        .collect()
}

#[async_trait]
impl TicketApi for CodebaseClient {
    async fn statuses(&self) -> Result<Vec<NamedEntity>> {
        self.fetch_collection("tickets/statuses", "ticketing_status")
            .await
    }

    async fn priorities(&self) -> Result<Vec<NamedEntity>> {
        self.fetch_collection("tickets/priorities", "ticketing_priority")
            .await
    }

    async fn categories(&self) -> Result<Vec<NamedEntity>> {
        self.fetch_collection("tickets/categories", "ticketing_category")
            .await
    }

    async fn users(&self) -> Result<Vec<User>> {
        self.fetch_collection("assignments", "user").await
    }

    async fn milestones(&self) -> Result<Vec<NamedEntity>> {
        self.fetch_collection("milestones", "ticketing_milestone")
            .await
    }

    async fn create_ticket(&self, payload: &str) -> std::result::Result<(), UploadError> {
        let url = self.url("tickets");
        debug!(%url, "POST");

        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
