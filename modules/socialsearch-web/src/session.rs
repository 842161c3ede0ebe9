//! Per-visitor state keyed by the `ss_session` cookie.
//!
//! Each session owns its own search panel and ranking dashboard, so the
//! ranking is fetched once per visitor and a running search survives page
//! reloads. The map is capped: when full, idle sessions are pruned and then
//! the least recently seen one is evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use socialsearch_common::Tier;
use socialsearch_core::{ProfileSearch, RankingDashboard, SearchPanel};
use socialsearch_store::SearchStore;

pub const COOKIE_NAME: &str = "ss_session";
pub const SESSION_IDLE_SECS: u64 = 24 * 3600;
pub const MAX_SESSIONS: usize = 10_000;

pub struct Session {
    pub id: Uuid,
    pub panel: SearchPanel,
    pub ranking: RankingDashboard,
    last_seen: StdMutex<Instant>,
}

impl Session {
    fn touch(&self, now: Instant) {
        *self.last_seen.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    fn last_seen(&self) -> Instant {
        *self.last_seen.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen())
    }
}

pub struct Sessions {
    inner: Mutex<HashMap<Uuid, Arc<Session>>>,
    profiles: Arc<dyn ProfileSearch>,
    store: Arc<dyn SearchStore>,
    default_tier: Tier,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Sessions {
    pub fn new(profiles: Arc<dyn ProfileSearch>, store: Arc<dyn SearchStore>, default_tier: Tier) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            profiles,
            store,
            default_tier,
            idle_timeout: Duration::from_secs(SESSION_IDLE_SECS),
            max_sessions: MAX_SESSIONS,
        }
    }

    #[cfg(test)]
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    #[cfg(test)]
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Find the session named by the request's Cookie header, or start a new
    /// one. Returns the Set-Cookie value when a new session was created.
    pub async fn resolve(&self, cookie_header: Option<&str>) -> (Arc<Session>, Option<String>) {
        let now = Instant::now();
        let id = cookie_header
            .and_then(|h| parse_cookie(h, COOKIE_NAME))
            .and_then(|v| Uuid::parse_str(v).ok());

        let mut sessions = self.inner.lock().await;
        if let Some(id) = id {
            match sessions.get(&id) {
                Some(session) if session.idle_for(now) < self.idle_timeout => {
                    session.touch(now);
                    return (session.clone(), None);
                }
                Some(_) => {
                    sessions.remove(&id);
                }
                None => {}
            }
        }

        if sessions.len() >= self.max_sessions {
            self.make_room(&mut sessions, now);
        }

        let session = Arc::new(Session {
            id: Uuid::new_v4(),
            panel: SearchPanel::new(self.default_tier, self.profiles.clone(), self.store.clone()),
            ranking: RankingDashboard::new(self.store.clone()),
            last_seen: StdMutex::new(now),
        });
        sessions.insert(session.id, session.clone());
        let cookie = session_cookie(session.id);
        (session, Some(cookie))
    }

    fn make_room(&self, sessions: &mut HashMap<Uuid, Arc<Session>>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, s| s.idle_for(now) < self.idle_timeout);
        if sessions.len() < before {
            debug!(pruned = before - sessions.len(), "Pruned idle sessions");
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_seen())
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    debug!(session = %id, "Evicted least recently seen session");
                }
                None => break,
            }
        }
    }

    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.inner.lock().await.len()
    }
}

pub fn session_cookie(id: Uuid) -> String {
    format!("{COOKIE_NAME}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_IDLE_SECS}")
}

fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}
