//! Search panel state machine.
//!
//! `Idle -> Loading -> {HasResults | Empty | Failed}`, re-entering `Loading` on
//! every submit. Each submit takes a sequence number; a response is applied only
//! if its sequence is still the one in flight. Picking a different network
//! bumps the sequence as well, so a response for the old network is dropped.
//!
//! Submission is two-phase (`begin_submit` / `complete_submit`) so callers that
//! drive the request themselves get the same guarantees as [`SearchPanel::submit`].

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use socialsearch_common::{
    FavoriteRecord, Network, SearchQuery, SearchRecord, SearchResultRow, Tier,
};
use socialsearch_store::SearchStore;

use crate::error::{PanelError, Result};
use crate::traits::ProfileSearch;

/// What the results area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Never searched, or the network changed since the last search.
    Idle,
    Loading,
    HasResults(Vec<SearchResultRow>),
    /// The search completed with zero rows.
    Empty,
    /// The search request failed. Carries the error message for logs and UI.
    Failed(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn rows(&self) -> &[SearchResultRow] {
        match self {
            ViewState::HasResults(rows) => rows,
            _ => &[],
        }
    }
}

/// Handle for one issued search. Pass it back to [`SearchPanel::complete_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response updated the panel.
    Applied,
    /// A newer search or a network change happened first; the response was dropped.
    Superseded,
}

/// Read-only copy of the panel for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSnapshot {
    pub network: Option<Network>,
    pub text: String,
    pub tier: Tier,
    pub view: ViewState,
    pub favorited: bool,
    pub can_submit: bool,
    /// Whether the favorite button exists at all (pro only).
    pub show_favorite: bool,
    pub can_favorite: bool,
    /// Query behind the rows currently shown.
    pub shown_query: Option<SearchQuery>,
}

#[derive(Debug)]
struct PanelState {
    network: Option<Network>,
    text: String,
    tier: Tier,
    view: ViewState,
    favorited: bool,
    favoriting: bool,
    /// Last sequence number handed out.
    seq: u64,
    /// Sequence of the search whose response is still awaited.
    in_flight: Option<u64>,
    shown_query: Option<SearchQuery>,
}

impl PanelState {
    fn new(tier: Tier) -> Self {
        Self {
            network: None,
            text: String::new(),
            tier,
            view: ViewState::Idle,
            favorited: false,
            favoriting: false,
            seq: 0,
            in_flight: None,
            shown_query: None,
        }
    }

    fn loading(&self) -> bool {
        self.in_flight.is_some()
    }

    fn can_submit(&self) -> bool {
        self.network.is_some() && !self.text.trim().is_empty() && !self.loading()
    }

    fn can_favorite(&self) -> bool {
        self.tier.is_premium()
            && self.network.is_some()
            && !self.text.trim().is_empty()
            && self.shown_query.is_some()
            && !self.view.rows().is_empty()
            && !self.favorited
            && !self.favoriting
            && !self.loading()
    }
}

/// One visitor's search panel.
pub struct SearchPanel {
    state: Mutex<PanelState>,
    profiles: Arc<dyn ProfileSearch>,
    store: Arc<dyn SearchStore>,
}

impl SearchPanel {
    pub fn new(tier: Tier, profiles: Arc<dyn ProfileSearch>, store: Arc<dyn SearchStore>) -> Self {
        Self {
            state: Mutex::new(PanelState::new(tier)),
            profiles,
            store,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // --- Inputs ---

    pub fn set_text(&self, text: &str) {
        self.lock().text = text.to_string();
    }

    /// Select the target network. Choosing a different one clears the shown
    /// result and drops any in-flight response.
    pub fn select_network(&self, network: Network) {
        let mut state = self.lock();
        if state.network == Some(network) {
            return;
        }
        state.network = Some(network);
        state.seq += 1;
        if state.in_flight.take().is_some() {
            debug!(network = %network, "Network changed, dropping in-flight search");
        }
        state.view = ViewState::Idle;
        state.shown_query = None;
        state.favorited = false;
    }

    pub fn set_tier(&self, tier: Tier) {
        self.lock().tier = tier;
    }

    // --- Predicates ---

    pub fn can_submit(&self) -> bool {
        self.lock().can_submit()
    }

    pub fn can_favorite(&self) -> bool {
        self.lock().can_favorite()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading()
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        let state = self.lock();
        PanelSnapshot {
            network: state.network,
            text: state.text.clone(),
            tier: state.tier,
            view: state.view.clone(),
            favorited: state.favorited,
            can_submit: state.can_submit(),
            show_favorite: state.tier.is_premium(),
            can_favorite: state.can_favorite(),
            shown_query: state.shown_query.clone(),
        }
    }

    // --- Search ---

    /// Start a search: enter `Loading`, clear the favorite flag and hand out a
    /// ticket for the query to run.
    pub fn begin_submit(&self) -> Result<SearchTicket> {
        let mut state = self.lock();
        if !state.can_submit() {
            return Err(PanelError::SubmitDisabled);
        }
        let network = state.network.ok_or(PanelError::SubmitDisabled)?;
        let query = SearchQuery::new(network, state.text.trim(), state.tier);

        state.seq += 1;
        state.in_flight = Some(state.seq);
        state.view = ViewState::Loading;
        state.favorited = false;

        Ok(SearchTicket {
            seq: state.seq,
            query,
        })
    }

    /// Apply a search response if its ticket is still current.
    pub fn complete_submit(
        &self,
        ticket: SearchTicket,
        outcome: std::result::Result<Vec<SearchResultRow>, String>,
    ) -> SubmitOutcome {
        let mut state = self.lock();
        if state.in_flight != Some(ticket.seq) {
            debug!(seq = ticket.seq, latest = state.seq, "Dropping stale search response");
            return SubmitOutcome::Superseded;
        }
        state.in_flight = None;

        match outcome {
            Ok(rows) if rows.is_empty() => {
                state.view = ViewState::Empty;
                state.shown_query = Some(ticket.query);
            }
            Ok(rows) => {
                state.view = ViewState::HasResults(rows);
                state.shown_query = Some(ticket.query);
            }
            Err(message) => {
                state.view = ViewState::Failed(message);
                state.shown_query = None;
            }
        }
        SubmitOutcome::Applied
    }

    /// Run a full search: one outbound query, then record it in the store.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let ticket = self.begin_submit()?;
        Ok(self.run(ticket).await)
    }

    /// Perform the query for a ticket from `begin_submit` and apply the
    /// response. A failed store write is logged and does not hide the results.
    pub async fn run(&self, ticket: SearchTicket) -> SubmitOutcome {
        let query = ticket.query().clone();

        let outcome = match self.profiles.search(&query).await {
            Ok(rows) => {
                info!(network = %query.network, count = rows.len(), "Search completed");
                if let Err(e) = self.store.record_search(&SearchRecord::from(&query)).await {
                    warn!(error = %e, network = %query.network, "Failed to record search");
                }
                Ok(rows)
            }
            Err(e) => {
                warn!(error = %e, network = %query.network, "Profile search failed");
                Err(e.to_string())
            }
        };

        self.complete_submit(ticket, outcome)
    }

    // --- Favorite ---

    /// Mark the query behind the shown results as favorite (pro only).
    pub async fn favorite(&self) -> Result<()> {
        let (seq, record) = {
            let mut state = self.lock();
            if !state.can_favorite() {
                return Err(PanelError::FavoriteDisabled);
            }
            let query = state
                .shown_query
                .as_ref()
                .ok_or(PanelError::FavoriteDisabled)?;
            let record = FavoriteRecord::from(query);
            state.favoriting = true;
            (state.seq, record)
        };

        let result = self.store.record_favorite(&record).await;

        let mut state = self.lock();
        state.favoriting = false;
        match result {
            Ok(()) => {
                // A newer search or network change resets the flag; don't resurrect it.
                if state.seq == seq {
                    state.favorited = true;
                }
                info!(network = %record.social, "Search marked as favorite");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, network = %record.social, "Failed to save favorite");
                Err(PanelError::Store(e))
            }
        }
    }
}
