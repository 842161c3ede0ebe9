use async_trait::async_trait;

use socialsearch_common::{FavoriteRecord, RankingPayload, SearchRecord};

use crate::error::Result;

/// Remote store for search analytics.
///
/// Writes are fire-and-record: callers log failures and carry on, and reads may
/// lag behind writes.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Record one successful search for the leaderboard.
    async fn record_search(&self, record: &SearchRecord) -> Result<()>;

    /// Mark a query as favorite. Repeating the same (query, network) is a no-op.
    async fn record_favorite(&self, record: &FavoriteRecord) -> Result<()>;

    /// Keyword leaderboard plus per-network totals.
    async fn fetch_ranking(&self) -> Result<RankingPayload>;
}
