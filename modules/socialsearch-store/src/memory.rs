use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use socialsearch_common::{
    normalize_query, FavoriteRecord, Network, RankingPayload, SearchRecord,
};

use crate::error::{Result, StoreError};
use crate::ranking::build_ranking;
use crate::traits::SearchStore;

/// Process-local store. Used when no database is configured, and in tests.
pub struct MemoryStore {
    searches: RwLock<Vec<SearchRecord>>,
    favorites: RwLock<HashSet<(String, Network)>>,
    ranking_limit: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new(ranking_limit: usize) -> Self {
        Self {
            searches: RwLock::new(Vec::new()),
            favorites: RwLock::new(HashSet::new()),
            ranking_limit,
            fail_writes: false,
        }
    }

    /// A store whose writes always fail. Reads still succeed.
    pub fn failing_writes(ranking_limit: usize) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(ranking_limit)
        }
    }

    pub async fn searches(&self) -> Vec<SearchRecord> {
        self.searches.read().await.clone()
    }

    pub async fn favorites(&self) -> Vec<FavoriteRecord> {
        let mut out: Vec<FavoriteRecord> = self
            .favorites
            .read()
            .await
            .iter()
            .map(|(q, n)| FavoriteRecord::new(q.clone(), *n))
            .collect();
        out.sort_by(|a, b| a.query.cmp(&b.query).then(a.social.cmp(&b.social)));
        out
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(socialsearch_common::config::DEFAULT_RANKING_LIMIT)
    }
}

#[async_trait]
impl SearchStore for MemoryStore {
    async fn record_search(&self, record: &SearchRecord) -> Result<()> {
        self.check_writable()?;
        self.searches.write().await.push(record.clone());
        Ok(())
    }

    async fn record_favorite(&self, record: &FavoriteRecord) -> Result<()> {
        self.check_writable()?;
        self.favorites
            .write()
            .await
            .insert((normalize_query(&record.query), record.social));
        Ok(())
    }

    async fn fetch_ranking(&self) -> Result<RankingPayload> {
        let searches = self.searches.read().await;
        Ok(build_ranking(&searches, self.ranking_limit))
    }
}
