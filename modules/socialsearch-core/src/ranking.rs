//! Ranking dashboard: fetches the ranking payload once per dashboard instance.
//!
//! "Not fetched yet" and "fetched, nothing recorded" are separate states. A
//! loaded payload is kept for the life of the dashboard even when empty; only a
//! failed fetch is retried, on the next mount.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use socialsearch_common::RankingPayload;
use socialsearch_store::SearchStore;

#[derive(Debug, Clone, PartialEq)]
pub enum RankingState {
    NotFetched,
    Loading,
    Loaded(RankingPayload),
    Failed(String),
}

impl RankingState {
    pub fn payload(&self) -> Option<&RankingPayload> {
        match self {
            RankingState::Loaded(payload) => Some(payload),
            _ => None,
        }
    }
}

pub struct RankingDashboard {
    state: Mutex<RankingState>,
    store: Arc<dyn SearchStore>,
}

impl RankingDashboard {
    pub fn new(store: Arc<dyn SearchStore>) -> Self {
        Self {
            state: Mutex::new(RankingState::NotFetched),
            store,
        }
    }

    fn lock(&self) -> MutexGuard<'_, RankingState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> RankingState {
        self.lock().clone()
    }

    /// Called on every render. Fetches only when nothing is held yet (or the
    /// previous fetch failed); otherwise returns the current state untouched.
    pub async fn mount(&self) -> RankingState {
        {
            let mut state = self.lock();
            match *state {
                RankingState::NotFetched | RankingState::Failed(_) => {
                    *state = RankingState::Loading;
                }
                RankingState::Loading | RankingState::Loaded(_) => return state.clone(),
            }
        }

        let result = self.store.fetch_ranking().await;

        let mut state = self.lock();
        *state = match result {
            Ok(payload) => {
                info!(
                    entries = payload.list.len(),
                    total = payload.statistics.total(),
                    "Ranking loaded"
                );
                RankingState::Loaded(payload)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch ranking");
                RankingState::Failed(e.to_string())
            }
        };
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingStore;
    use socialsearch_common::{Network, SearchRecord};

    #[tokio::test]
    async fn fetches_once_across_rerenders() {
        let store = RecordingStore::arc();
        store
            .record_search(&SearchRecord::new("sunset", Network::TikTok))
            .await
            .unwrap();
        let dashboard = RankingDashboard::new(store.clone());

        for _ in 0..5 {
            let state = dashboard.mount().await;
            assert_eq!(state.payload().unwrap().list.len(), 1);
        }
        assert_eq!(store.ranking_fetch_count(), 1);
    }

    #[tokio::test]
    async fn empty_payload_is_loaded_not_refetched() {
        let store = RecordingStore::arc();
        let dashboard = RankingDashboard::new(store.clone());
        assert_eq!(dashboard.state(), RankingState::NotFetched);

        let state = dashboard.mount().await;
        assert!(state.payload().unwrap().is_empty());
        dashboard.mount().await;
        assert_eq!(store.ranking_fetch_count(), 1);
    }

    #[tokio::test]
    async fn failure_is_retried_on_next_mount() {
        let store = RecordingStore::failing_ranking();
        let dashboard = RankingDashboard::new(store.clone());

        assert!(matches!(dashboard.mount().await, RankingState::Failed(_)));
        assert!(matches!(dashboard.mount().await, RankingState::Failed(_)));
        assert_eq!(store.ranking_fetch_count(), 2);
    }
}
