//! REST client for the public user-activity API
//!
//! Every list endpoint is `GET /users/{username}/{collection}?page=N&per_page=M`
//! and returns a JSON array; an empty array means there are no more pages.

use std::time::Duration;

use async_trait::async_trait;
use ghdash_core::config::{ApiConfig, MAX_PER_PAGE};
use ghdash_core::model::{Event, Gist, Item, Repo, User};
use ghdash_core::{CollectionSource, EntityKind, FetchError, FetchResult, ProfileSource};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::status::classify_failure;

/// Client for one API root
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    per_page: u32,
}

impl GitHubClient {
    /// Build a client from the `[api]` config section
    pub fn new(config: &ApiConfig) -> FetchResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| FetchError::transport(format!("invalid API URL '{}': {}", config.base_url, err)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::transport(format!(
                "API URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| FetchError::transport(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self {
            client,
            base_url,
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
        })
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// `{base}/users/{username}[/{tail}]`, username percent-encoded
    fn user_url(&self, username: &str, tail: Option<&str>) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::transport("API URL cannot be used as a base"))?;
            segments.pop_if_empty().push("users").push(username);
            if let Some(tail) = tail {
                segments.extend(tail.split('/'));
            }
        }
        Ok(url)
    }

    fn page_url(&self, username: &str, kind: EntityKind, page: u32) -> FetchResult<Url> {
        let mut url = self.user_url(username, Some(kind.endpoint()))?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string())
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, subject: &str) -> FetchResult<T> {
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|err| {
                warn!(url = %url, error = %err, "Request failed");
                FetchError::transport(describe_reqwest_error(&err))
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|err| FetchError::transport(describe_reqwest_error(&err)))?;

        if !status.is_success() {
            let err = classify_failure(status, &headers, subject, &body);
            warn!(url = %url, status = status.as_u16(), error = %err, "API returned an error");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|err| FetchError::decode(format!("{} ({})", err, url.path())))
    }

    /// Profile lookup; 404 becomes `FetchError::NotFound`
    #[instrument(skip(self))]
    pub async fn user(&self, username: &str) -> FetchResult<User> {
        let url = self.user_url(username, None)?;
        self.get_json(url, username).await
    }

    #[instrument(skip(self))]
    pub async fn events(&self, username: &str, page: u32) -> FetchResult<Vec<Event>> {
        let url = self.page_url(username, EntityKind::Activity, page)?;
        self.get_json(url, username).await
    }

    #[instrument(skip(self))]
    pub async fn received_events(&self, username: &str, page: u32) -> FetchResult<Vec<Event>> {
        let url = self.page_url(username, EntityKind::ReceivedActivity, page)?;
        self.get_json(url, username).await
    }

    #[instrument(skip(self))]
    pub async fn subscriptions(&self, username: &str, page: u32) -> FetchResult<Vec<Repo>> {
        let url = self.page_url(username, EntityKind::Subscription, page)?;
        self.get_json(url, username).await
    }

    #[instrument(skip(self))]
    pub async fn gists(&self, username: &str, page: u32) -> FetchResult<Vec<Gist>> {
        let url = self.page_url(username, EntityKind::Snippet, page)?;
        self.get_json(url, username).await
    }
}

fn into_items<T: Into<Item>>(records: Vec<T>) -> Vec<Item> {
    records.into_iter().map(Into::into).collect()
}

fn describe_reqwest_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}

#[async_trait]
impl CollectionSource for GitHubClient {
    async fn fetch_page(&self, kind: EntityKind, subject: &str, page: u32) -> FetchResult<Vec<Item>> {
        let items = match kind {
            EntityKind::Activity => into_items(self.events(subject, page).await?),
            EntityKind::ReceivedActivity => into_items(self.received_events(subject, page).await?),
            EntityKind::Subscription => into_items(self.subscriptions(subject, page).await?),
            EntityKind::Snippet => into_items(self.gists(subject, page).await?),
        };
        debug!(%kind, subject, page, count = items.len(), "Fetched page");
        Ok(items)
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_user(&self, username: &str) -> FetchResult<User> {
        self.user(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str, per_page: u32) -> GitHubClient {
        GitHubClient::new(&ApiConfig {
            base_url: base.to_string(),
            per_page,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn builds_paged_urls() {
        let gh = client("https://api.github.com", 30);
        let url = gh.page_url("octocat", EntityKind::Activity, 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/users/octocat/events/public?page=2&per_page=30"
        );

        let url = gh.page_url("octocat", EntityKind::Snippet, 0).unwrap();
        assert!(url.as_str().ends_with("/users/octocat/gists?page=1&per_page=30"));
    }

    #[test]
    fn keeps_base_path_and_encodes_username() {
        let gh = client("https://ghe.example.com/api/v3", 500);
        assert_eq!(gh.per_page(), 100);
        let url = gh.user_url("we ird/name", None).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/users/we%20ird%2Fname");
    }

    #[test]
    fn rejects_unusable_base() {
        let err = GitHubClient::new(&ApiConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..ApiConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
