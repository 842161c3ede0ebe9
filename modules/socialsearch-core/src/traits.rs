// Trait boundary for the outbound profile search.
//
// The panel only needs "query in, rows out". ProfilesClient is the production
// implementation; tests swap in testing::FakeProfiles.

use async_trait::async_trait;

use profiles_client::{ProfilesClient, Result};
use socialsearch_common::{SearchQuery, SearchResultRow};

#[async_trait]
pub trait ProfileSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultRow>>;
}

#[async_trait]
impl ProfileSearch for ProfilesClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultRow>> {
        ProfilesClient::search(self, query).await
    }
}
