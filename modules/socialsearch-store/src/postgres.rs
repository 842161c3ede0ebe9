//! Postgres-backed store.
//!
//! Raw searches are kept as rows; the leaderboard is aggregated in SQL on read
//! with the same grouping and ordering as [`crate::ranking::build_ranking`].

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};

use socialsearch_common::{
    normalize_query, FavoriteRecord, Network, RankingEntry, RankingPayload, SearchRecord,
    SocialCounts,
};

use crate::error::Result;
use crate::traits::SearchStore;

#[derive(Clone)]
pub struct PgSearchStore {
    pool: PgPool,
    ranking_limit: usize,
}

impl PgSearchStore {
    pub fn new(pool: PgPool, ranking_limit: usize) -> Self {
        Self {
            pool,
            ranking_limit,
        }
    }

    pub async fn connect(database_url: &str, ranking_limit: usize) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool, ranking_limit))
    }

    /// Create tables if they don't exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS searches (
                id         BIGSERIAL    PRIMARY KEY,
                query      TEXT         NOT NULL,
                social     TEXT         NOT NULL,
                created_at TIMESTAMPTZ  NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS favorite_searches (
                query      TEXT         NOT NULL,
                social     TEXT         NOT NULL,
                created_at TIMESTAMPTZ  NOT NULL DEFAULT now(),
                PRIMARY KEY (query, social)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Search store schema ready");
        Ok(())
    }

    /// Favorites in insertion order.
    pub async fn favorites(&self) -> Result<Vec<FavoriteRecord>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT query, social FROM favorite_searches ORDER BY created_at ASC, query ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(query, social)| match social.parse::<Network>() {
                Ok(network) => Some(FavoriteRecord::new(query, network)),
                Err(e) => {
                    warn!(error = %e, "Skipping favorite with unknown network");
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl SearchStore for PgSearchStore {
    async fn record_search(&self, record: &SearchRecord) -> Result<()> {
        sqlx::query("INSERT INTO searches (query, social) VALUES ($1, $2)")
            .bind(&record.query)
            .bind(record.social.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn record_favorite(&self, record: &FavoriteRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO favorite_searches (query, social)
            VALUES ($1, $2)
            ON CONFLICT (query, social) DO NOTHING
            "#,
        )
        .bind(normalize_query(&record.query))
        .bind(record.social.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch_ranking(&self) -> Result<RankingPayload> {
        let rows = sqlx::query_as::<_, (String, String, i64)>(
            r#"
            SELECT lower(btrim(query)) AS q, social, COUNT(*) AS amount
            FROM searches
            WHERE btrim(query) <> ''
            GROUP BY q, social
            ORDER BY amount DESC, q ASC, social ASC
            LIMIT $1
            "#,
        )
        .bind(self.ranking_limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let list = rows
            .into_iter()
            .map(|(query, network, amount)| RankingEntry {
                query,
                network,
                amount,
            })
            .collect();

        let totals = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT social, COUNT(*)
            FROM searches
            WHERE btrim(query) <> ''
            GROUP BY social
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut statistics = SocialCounts::default();
        for (social, count) in totals {
            match social.parse::<Network>() {
                Ok(network) => statistics.set(network, count.max(0) as u64),
                Err(e) => warn!(error = %e, "Skipping searches with unknown network"),
            }
        }

        Ok(RankingPayload { list, statistics })
    }
}
