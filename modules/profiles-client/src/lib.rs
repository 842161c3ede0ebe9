pub mod error;
pub mod types;

pub use error::{ProfilesError, Result};
pub use types::ProfilesResponse;

use std::time::Duration;

use reqwest::Url;
use socialsearch_common::{SearchQuery, SearchResultRow};

const PROFILES_PATH: &str = "/api/v1/profiles";

/// Client for the external profiles search API.
#[derive(Clone)]
pub struct ProfilesClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProfilesClient {
    /// `timeout` bounds the whole request, connect through body.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a query:
    /// `{base}/api/v1/profiles?social=..&search=..&is_premium=..`
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let endpoint = format!("{}{}", self.base_url, PROFILES_PATH);
        let is_premium = if query.is_premium { "true" } else { "false" };
        Url::parse_with_params(
            &endpoint,
            &[
                ("social", query.network.as_str()),
                ("search", query.text.as_str()),
                ("is_premium", is_premium),
            ],
        )
        .map_err(|e| ProfilesError::InvalidUrl(format!("{endpoint}: {e}")))
    }

    /// Run one profile search. Issues exactly one GET, no retries.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultRow>> {
        let url = self.search_url(query)?;
        tracing::debug!(network = %query.network, premium = query.is_premium, "Searching profiles");

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ProfilesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.bytes().await?;
        let parsed: ProfilesResponse = serde_json::from_slice(&body)?;
        let rows = parsed.into_rows();
        tracing::info!(network = %query.network, count = rows.len(), "Fetched profiles");

        Ok(rows)
    }
}
