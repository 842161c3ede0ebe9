use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use profiles_client::ProfilesClient;
use socialsearch_common::Config;
use socialsearch_store::{MemoryStore, PgSearchStore, SearchStore};

mod components;
mod pages;
mod rest;
mod session;
mod templates;

use session::Sessions;

pub struct AppState {
    pub sessions: Sessions,
    pub store: Arc<dyn SearchStore>,
    pub ranking_wait: Duration,
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(rest::health))
        // Pages (Dioxus SSR)
        .route("/", get(pages::home_page))
        .route("/ranking", get(pages::ranking_page))
        .route("/search", post(pages::search_submit))
        .route("/favorite", post(pages::favorite_submit))
        // REST API
        .route("/api/ranking", get(rest::api_ranking))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(CompressionLayer::new())
        // Pages carry per-visitor state
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Method + path only: the query string may carry search text
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("socialsearch=info".parse()?)
        .add_directive("profiles_client=info".parse()?);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let config = Config::from_env();

    let profiles = Arc::new(ProfilesClient::new(&config.profiles_api_url, config.search_timeout));

    let store: Arc<dyn SearchStore> = match &config.database_url {
        Some(url) => {
            let pg = PgSearchStore::connect(url, config.ranking_limit).await?;
            pg.migrate().await?;
            info!("Using Postgres search store");
            Arc::new(pg)
        }
        None => {
            warn!("DATABASE_URL not set, searches are kept in memory and lost on restart");
            Arc::new(MemoryStore::new(config.ranking_limit))
        }
    };

    let state = Arc::new(AppState {
        sessions: Sessions::new(profiles, store.clone(), config.default_plan),
        store,
        ranking_wait: pages::RANKING_WAIT,
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(
        profiles_api = %config.profiles_api_url,
        plan = %config.default_plan.as_str(),
        "Social search starting on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
