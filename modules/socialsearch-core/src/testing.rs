// Test doubles for the two collaborator traits.
//
// - FakeProfiles (ProfileSearch): canned response, call log, optional gate
// - RecordingStore (SearchStore): MemoryStore plus call counters, ranking failure modes
//
// No network, no database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Semaphore;

use profiles_client::{ProfilesError, Result as ProfilesResult};
use socialsearch_common::{
    FavoriteRecord, RankingPayload, SearchQuery, SearchRecord, SearchResultRow,
};
use socialsearch_store::{MemoryStore, Result as StoreResult, SearchStore, StoreError};

use crate::traits::ProfileSearch;

/// Rows with a `username` field each, enough for rendering and favorites.
pub fn rows(usernames: &[&str]) -> Vec<SearchResultRow> {
    usernames
        .iter()
        .map(|u| SearchResultRow::new(json!({ "username": u })))
        .collect()
}

// ---------------------------------------------------------------------------
// FakeProfiles
// ---------------------------------------------------------------------------

/// Returns the configured response for every query and logs each call.
///
/// With [`FakeProfiles::gated`], every call first waits for a permit from
/// [`FakeProfiles::release`], in call order.
pub struct FakeProfiles {
    response: Mutex<std::result::Result<Vec<SearchResultRow>, String>>,
    calls: Mutex<Vec<SearchQuery>>,
    gate: Option<Semaphore>,
}

impl FakeProfiles {
    pub fn new() -> Self {
        Self {
            response: Mutex::new(Ok(Vec::new())),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        })
    }

    pub fn respond_with(&self, rows: Vec<SearchResultRow>) {
        *self.response.lock().unwrap() = Ok(rows);
    }

    pub fn fail_with(&self, message: &str) {
        *self.response.lock().unwrap() = Err(message.to_string());
    }

    /// Let `n` waiting calls through.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for FakeProfiles {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileSearch for FakeProfiles {
    async fn search(&self, query: &SearchQuery) -> ProfilesResult<Vec<SearchResultRow>> {
        self.calls.lock().unwrap().push(query.clone());
        let response = self.response.lock().unwrap().clone();

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| ProfilesError::Network(e.to_string()))?;
            permit.forget();
        }

        response.map_err(ProfilesError::Network)
    }
}

// ---------------------------------------------------------------------------
// RecordingStore
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum RankingMode {
    Normal,
    Fail,
    Hang,
}

/// MemoryStore that counts calls, including failed ones.
pub struct RecordingStore {
    inner: MemoryStore,
    search_attempts: AtomicUsize,
    favorite_attempts: AtomicUsize,
    ranking_fetches: AtomicUsize,
    ranking_mode: RankingMode,
}

impl RecordingStore {
    fn with(inner: MemoryStore, ranking_mode: RankingMode) -> Self {
        Self {
            inner,
            search_attempts: AtomicUsize::new(0),
            favorite_attempts: AtomicUsize::new(0),
            ranking_fetches: AtomicUsize::new(0),
            ranking_mode,
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::with(MemoryStore::new(10), RankingMode::Normal))
    }

    pub fn failing_writes() -> Arc<Self> {
        Arc::new(Self::with(MemoryStore::failing_writes(10), RankingMode::Normal))
    }

    pub fn failing_ranking() -> Arc<Self> {
        Arc::new(Self::with(MemoryStore::new(10), RankingMode::Fail))
    }

    /// `fetch_ranking` never resolves; writes still work.
    pub fn hanging_ranking() -> Arc<Self> {
        Arc::new(Self::with(MemoryStore::new(10), RankingMode::Hang))
    }

    pub async fn search_calls(&self) -> Vec<SearchRecord> {
        self.inner.searches().await
    }

    pub async fn favorite_calls(&self) -> Vec<FavoriteRecord> {
        self.inner.favorites().await
    }

    pub fn search_attempt_count(&self) -> usize {
        self.search_attempts.load(Ordering::SeqCst)
    }

    pub fn favorite_call_count(&self) -> usize {
        self.favorite_attempts.load(Ordering::SeqCst)
    }

    pub fn ranking_fetch_count(&self) -> usize {
        self.ranking_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchStore for RecordingStore {
    async fn record_search(&self, record: &SearchRecord) -> StoreResult<()> {
        self.search_attempts.fetch_add(1, Ordering::SeqCst);
        self.inner.record_search(record).await
    }

    async fn record_favorite(&self, record: &FavoriteRecord) -> StoreResult<()> {
        self.favorite_attempts.fetch_add(1, Ordering::SeqCst);
        self.inner.record_favorite(record).await
    }

    async fn fetch_ranking(&self) -> StoreResult<RankingPayload> {
        self.ranking_fetches.fetch_add(1, Ordering::SeqCst);
        match self.ranking_mode {
            RankingMode::Normal => self.inner.fetch_ranking().await,
            RankingMode::Fail => Err(StoreError::Unavailable("ranking offline".to_string())),
            RankingMode::Hang => std::future::pending().await,
        }
    }
}
