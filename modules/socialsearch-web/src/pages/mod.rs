use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use socialsearch_common::{Network, Tier};
use socialsearch_core::RankingState;

use crate::components::{ranking_to_view, render_home, render_ranking_page, search_to_view, HomeView};
use crate::session::Session;
use crate::AppState;

/// How long a page view waits for the ranking before rendering without it.
pub const RANKING_WAIT: Duration = Duration::from_millis(1500);

#[derive(Deserialize)]
pub struct PlanQuery {
    plan: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    social: String,
    #[serde(default)]
    search: String,
}

// --- Helpers ---

async fn session_for(state: &AppState, headers: &HeaderMap) -> (Arc<Session>, Option<String>) {
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    state.sessions.resolve(cookie).await
}

/// Ranking for this render. The fetch runs in its own task so a slow or
/// stuck store only leaves the dashboard loading; the rest of the page renders.
async fn ranking_state(session: &Arc<Session>, wait: Duration) -> RankingState {
    let fetch = {
        let session = session.clone();
        tokio::spawn(async move { session.ranking.mount().await })
    };
    match tokio::time::timeout(wait, fetch).await {
        Ok(Ok(state)) => state,
        Ok(Err(e)) => {
            warn!(error = %e, "Ranking task failed");
            session.ranking.state()
        }
        Err(_) => {
            debug!("Ranking not ready, rendering without it");
            session.ranking.state()
        }
    }
}

fn with_cookie(response: impl IntoResponse, cookie: Option<String>) -> Response {
    let mut response = response.into_response();
    if let Some(value) = cookie.and_then(|c| HeaderValue::from_str(&c).ok()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

// --- Pages ---

pub async fn home_page(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PlanQuery>,
    headers: HeaderMap,
) -> Response {
    let (session, cookie) = session_for(&state, &headers).await;

    if let Some(plan) = q.plan {
        match plan.parse::<Tier>() {
            Ok(tier) => session.panel.set_tier(tier),
            Err(e) => debug!(error = %e, "Ignoring plan parameter"),
        }
    }

    let ranking = ranking_state(&session, state.ranking_wait).await;
    let view = HomeView {
        search: search_to_view(&session.panel.snapshot()),
        ranking: ranking_to_view(&ranking),
    };
    with_cookie(Html(render_home(view)), cookie)
}

pub async fn ranking_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (session, cookie) = session_for(&state, &headers).await;
    let ranking = ranking_state(&session, state.ranking_wait).await;
    with_cookie(Html(render_ranking_page(ranking_to_view(&ranking))), cookie)
}

// --- Form posts ---

/// Applies the form to the session's panel and starts the search in the
/// background; the redirected page shows "Searching" until it lands.
pub async fn search_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<SearchForm>,
) -> Response {
    let (session, cookie) = session_for(&state, &headers).await;

    session.panel.set_text(&form.search);

    let network = match form.social.parse::<Network>() {
        Ok(network) => network,
        Err(e) => {
            info!(error = %e, "Search posted without a valid network, not started");
            return with_cookie(Redirect::to("/"), cookie);
        }
    };
    session.panel.select_network(network);

    match session.panel.begin_submit() {
        Ok(ticket) => {
            let session = session.clone();
            tokio::spawn(async move {
                let outcome = session.panel.run(ticket).await;
                debug!(?outcome, "Background search finished");
            });
        }
        Err(e) => info!(error = %e, "Search not started"),
    }

    with_cookie(Redirect::to("/"), cookie)
}

pub async fn favorite_submit(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (session, cookie) = session_for(&state, &headers).await;

    if let Err(e) = session.panel.favorite().await {
        warn!(error = %e, "Favorite not saved");
    }

    with_cookie(Redirect::to("/"), cookie)
}
