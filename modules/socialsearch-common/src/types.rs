use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

// --- Networks and plans ---

/// A social platform a search can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Instagram,
    TikTok,
    Twitter,
    YouTube,
}

impl Network {
    /// Fixed display order, shared by the dropdown and the per-network chart.
    pub const ALL: [Network; 4] = [
        Network::Instagram,
        Network::TikTok,
        Network::Twitter,
        Network::YouTube,
    ];

    /// Value sent to the profiles API and written to the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Instagram => "instagram",
            Network::TikTok => "tiktok",
            Network::Twitter => "twitter",
            Network::YouTube => "youtube",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Network::Instagram => "Instagram",
            Network::TikTok => "TikTok",
            Network::Twitter => "Twitter",
            Network::YouTube => "Youtube",
        }
    }

    /// Position in [`Network::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Network::Instagram => 0,
            Network::TikTok => 1,
            Network::Twitter => 2,
            Network::YouTube => 3,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" => Ok(Network::Instagram),
            "tiktok" => Ok(Network::TikTok),
            "twitter" => Ok(Network::Twitter),
            "youtube" => Ok(Network::YouTube),
            other => Err(ParseError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Subscription level. Pro unlocks favorites and premium search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

impl Tier {
    pub fn is_premium(&self) -> bool {
        matches!(self, Tier::Pro)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Pro => "pro",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "pro" => Ok(Tier::Pro),
            other => Err(ParseError::UnknownTier(other.to_string())),
        }
    }
}

// --- Search ---

/// One outbound profile search. Built per submit and dropped once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub network: Network,
    pub text: String,
    pub is_premium: bool,
}

impl SearchQuery {
    pub fn new(network: Network, text: impl Into<String>, tier: Tier) -> Self {
        Self {
            network,
            text: text.into(),
            is_premium: tier.is_premium(),
        }
    }
}

/// A row returned by the profiles API. The shape belongs to the API, so it is
/// kept as raw JSON and only inspected for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResultRow(pub serde_json::Value);

impl SearchResultRow {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Top-level scalar fields as display pairs, sorted by key.
    /// Nested objects and arrays are skipped. A scalar row becomes a single
    /// `value` field.
    pub fn fields(&self) -> Vec<(String, String)> {
        match &self.0 {
            serde_json::Value::Object(map) => map
                .iter()
                .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
                .collect(),
            other => scalar_to_string(other)
                .map(|s| vec![("value".to_string(), s)])
                .unwrap_or_default(),
        }
    }

    /// First string field that looks like a profile handle or name.
    pub fn title(&self) -> Option<String> {
        const KEYS: [&str; 5] = ["username", "name", "full_name", "title", "handle"];
        let map = self.0.as_object()?;
        KEYS.iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
            .map(str::to_string)
    }
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// --- Store records ---

/// Analytics entry written after every successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub query: String,
    pub social: Network,
}

impl SearchRecord {
    pub fn new(query: impl Into<String>, social: Network) -> Self {
        Self {
            query: query.into(),
            social,
        }
    }
}

impl From<&SearchQuery> for SearchRecord {
    fn from(q: &SearchQuery) -> Self {
        Self::new(q.text.clone(), q.network)
    }
}

/// A query the user marked as favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub query: String,
    pub social: Network,
}

impl FavoriteRecord {
    pub fn new(query: impl Into<String>, social: Network) -> Self {
        Self {
            query: query.into(),
            social,
        }
    }
}

impl From<&SearchQuery> for FavoriteRecord {
    fn from(q: &SearchQuery) -> Self {
        Self::new(q.text.clone(), q.network)
    }
}

/// Grouping key for the keyword leaderboard.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

// --- Ranking ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub query: String,
    pub network: String,
    pub amount: i64,
}

/// Search counts per network, positionally aligned to [`Network::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialCounts(pub [u64; 4]);

impl SocialCounts {
    pub fn get(&self, network: Network) -> u64 {
        self.0[network.index()]
    }

    pub fn set(&mut self, network: Network, count: u64) {
        self.0[network.index()] = count;
    }

    pub fn increment(&mut self, network: Network) {
        self.0[network.index()] += 1;
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}

/// Aggregates shown on the ranking dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPayload {
    pub list: Vec<RankingEntry>,
    pub statistics: SocialCounts,
}

impl RankingPayload {
    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty() && self.statistics.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn network_parses_loosely() {
        assert_eq!("TikTok".parse::<Network>().unwrap(), Network::TikTok);
        assert_eq!(" youtube ".parse::<Network>().unwrap(), Network::YouTube);
        assert!(matches!(
            "facebook".parse::<Network>(),
            Err(ParseError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn network_serializes_as_wire_value() {
        assert_eq!(serde_json::to_string(&Network::TikTok).unwrap(), "\"tiktok\"");
        assert_eq!(serde_json::to_string(&Network::YouTube).unwrap(), "\"youtube\"");
        let parsed: Network = serde_json::from_str("\"instagram\"").unwrap();
        assert_eq!(parsed, Network::Instagram);
    }

    #[test]
    fn network_index_matches_all_order() {
        for (i, network) in Network::ALL.iter().enumerate() {
            assert_eq!(network.index(), i);
        }
    }

    #[test]
    fn tier_controls_premium_flag() {
        assert!(SearchQuery::new(Network::Twitter, "rust", Tier::Pro).is_premium);
        assert!(!SearchQuery::new(Network::Twitter, "rust", Tier::Free).is_premium);
        assert_eq!("PRO".parse::<Tier>().unwrap(), Tier::Pro);
        assert!("gold".parse::<Tier>().is_err());
    }

    #[test]
    fn row_fields_skip_nested_values() {
        let row = SearchResultRow::new(json!({
            "username": "sunset_lover",
            "followers": 1200,
            "verified": false,
            "posts": [1, 2, 3],
            "meta": {"a": 1}
        }));
        let fields = row.fields();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&("followers".to_string(), "1200".to_string())));
        assert_eq!(row.title().as_deref(), Some("sunset_lover"));
    }

    #[test]
    fn scalar_row_is_single_field() {
        let row = SearchResultRow::new(json!("just text"));
        assert_eq!(row.fields(), vec![("value".to_string(), "just text".to_string())]);
        assert_eq!(row.title(), None);
    }

    #[test]
    fn social_counts_align_to_networks() {
        let mut counts = SocialCounts::default();
        counts.increment(Network::Twitter);
        counts.increment(Network::Twitter);
        counts.set(Network::Instagram, 5);
        assert_eq!(counts.as_slice(), &[5, 0, 2, 0]);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn empty_payload_detects_no_data() {
        assert!(RankingPayload::default().is_empty());
        let payload = RankingPayload {
            list: vec![],
            statistics: SocialCounts([0, 1, 0, 0]),
        };
        assert!(!payload.is_empty());
    }

    #[test]
    fn normalize_query_trims_and_lowercases() {
        assert_eq!(normalize_query("  Sunset Beach "), "sunset beach");
    }
}
