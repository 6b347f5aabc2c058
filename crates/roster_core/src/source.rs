//! Data-loading collaborator: one-shot fetch of the remote user directory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::UserRecord, protocol::UsersResponse};
use tracing::debug;

pub const DEFAULT_SOURCE_URL: &str = "https://dummyjson.com/users?limit=100";

#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>>;
}

pub struct HttpUserSource {
    http: Client,
    url: String,
}

impl HttpUserSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpUserSource {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL)
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>> {
        debug!(url = %self.url, "fetching users");
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("failed to connect to {}", self.url))?
            .error_for_status()?;
        let body: UsersResponse = res
            .json()
            .await
            .context("malformed user directory response")?;
        Ok(body.into_records())
    }
}

/// Fixed records, for fixtures and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticUserSource {
    records: Vec<UserRecord>,
}

impl StaticUserSource {
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl UserSource for StaticUserSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.records.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<UserRecord>),
    Failed(String),
}

impl LoadOutcome {
    pub fn from_result(result: Result<Vec<UserRecord>>) -> Self {
        match result {
            Ok(records) => Self::Loaded(records),
            Err(err) => Self::Failed(format!("{err:#}")),
        }
    }
}

/// Loading/error flags surfaced to the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadState {
    pub is_loading: bool,
    pub has_error: bool,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            is_loading: true,
            has_error: false,
        }
    }
}

impl LoadState {
    pub fn begin(&mut self) {
        self.is_loading = true;
    }

    pub fn succeed(&mut self) {
        self.is_loading = false;
        self.has_error = false;
    }

    pub fn fail(&mut self) {
        self.is_loading = false;
        self.has_error = true;
    }

    pub fn observe(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(_) => self.succeed(),
            LoadOutcome::Failed(_) => self.fail(),
        }
    }
}

/// Runs one fetch and folds the result into a `LoadOutcome`.
pub async fn load_once(source: &dyn UserSource) -> LoadOutcome {
    LoadOutcome::from_result(source.fetch_users().await)
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
