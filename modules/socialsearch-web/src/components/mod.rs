use socialsearch_common::{Network, RankingPayload, SearchResultRow};
use socialsearch_core::{PanelSnapshot, RankingState, ViewState};

pub mod home;
pub mod layout;
pub mod ranking;
pub mod search;

pub use home::render_home;
pub use ranking::{build_social_pie_chart, render_ranking_page};

// --- View Models ---

#[derive(Clone, PartialEq)]
pub struct NetworkOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Clone, PartialEq)]
pub struct RowView {
    pub title: Option<String>,
    pub fields: Vec<(String, String)>,
}

#[derive(Clone, PartialEq)]
pub enum ResultsView {
    /// Never searched: nothing is shown, not even the "no results" message.
    Hidden,
    Loading,
    Rows {
        network_label: String,
        rows: Vec<RowView>,
    },
    Empty,
    Failed,
}

#[derive(Clone, PartialEq)]
pub struct SearchView {
    pub text: String,
    pub networks: Vec<NetworkOption>,
    pub plan: String,
    pub can_submit: bool,
    pub loading: bool,
    pub show_favorite: bool,
    pub can_favorite: bool,
    pub favorited: bool,
    pub results: ResultsView,
}

#[derive(Clone, PartialEq)]
pub struct RankingRow {
    pub position: usize,
    pub query: String,
    pub network: String,
    pub amount: i64,
}

#[derive(Clone, PartialEq)]
pub enum RankingView {
    Loading,
    /// Fetched, but no search has been recorded yet.
    Empty,
    Loaded {
        rows: Vec<RankingRow>,
        chart_js: String,
    },
    Failed,
}

#[derive(Clone, PartialEq)]
pub struct HomeView {
    pub search: SearchView,
    pub ranking: RankingView,
}

// --- Conversions ---

pub fn network_options(selected: Option<Network>) -> Vec<NetworkOption> {
    Network::ALL
        .iter()
        .map(|n| NetworkOption {
            value: n.as_str(),
            label: n.label(),
            selected: selected == Some(*n),
        })
        .collect()
}

pub fn row_to_view(row: &SearchResultRow) -> RowView {
    RowView {
        title: row.title(),
        fields: row.fields(),
    }
}

pub fn search_to_view(snapshot: &PanelSnapshot) -> SearchView {
    let results = match &snapshot.view {
        ViewState::Idle => ResultsView::Hidden,
        ViewState::Loading => ResultsView::Loading,
        ViewState::HasResults(rows) => ResultsView::Rows {
            network_label: snapshot
                .shown_query
                .as_ref()
                .map(|q| q.network.label().to_string())
                .unwrap_or_default(),
            rows: rows.iter().map(row_to_view).collect(),
        },
        ViewState::Empty => ResultsView::Empty,
        ViewState::Failed(_) => ResultsView::Failed,
    };

    SearchView {
        text: snapshot.text.clone(),
        networks: network_options(snapshot.network),
        plan: snapshot.tier.as_str().to_string(),
        can_submit: snapshot.can_submit,
        loading: snapshot.view.is_loading(),
        show_favorite: snapshot.show_favorite,
        can_favorite: snapshot.can_favorite,
        favorited: snapshot.favorited,
        results,
    }
}

pub fn ranking_to_view(state: &RankingState) -> RankingView {
    match state {
        RankingState::NotFetched | RankingState::Loading => RankingView::Loading,
        RankingState::Failed(_) => RankingView::Failed,
        RankingState::Loaded(payload) if payload.is_empty() => RankingView::Empty,
        RankingState::Loaded(payload) => payload_to_view(payload),
    }
}

fn payload_to_view(payload: &RankingPayload) -> RankingView {
    let rows = payload
        .list
        .iter()
        .enumerate()
        .map(|(i, entry)| RankingRow {
            position: i + 1,
            query: entry.query.clone(),
            network: entry
                .network
                .parse::<Network>()
                .map(|n| n.label().to_string())
                .unwrap_or_else(|_| entry.network.clone()),
            amount: entry.amount,
        })
        .collect();

    RankingView::Loaded {
        rows,
        chart_js: build_social_pie_chart(&payload.statistics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialsearch_common::{RankingEntry, SearchQuery, SocialCounts, Tier};

    fn snapshot(view: ViewState) -> PanelSnapshot {
        PanelSnapshot {
            network: Some(Network::TikTok),
            text: "sunset".to_string(),
            tier: Tier::Free,
            view,
            favorited: false,
            can_submit: true,
            show_favorite: false,
            can_favorite: false,
            shown_query: Some(SearchQuery::new(Network::TikTok, "sunset", Tier::Free)),
        }
    }

    #[test]
    fn idle_hides_results() {
        let view = search_to_view(&snapshot(ViewState::Idle));
        assert!(view.results == ResultsView::Hidden);
    }

    #[test]
    fn empty_and_failed_are_distinct() {
        assert!(search_to_view(&snapshot(ViewState::Empty)).results == ResultsView::Empty);
        assert!(
            search_to_view(&snapshot(ViewState::Failed("boom".into()))).results
                == ResultsView::Failed
        );
    }

    #[test]
    fn selected_network_is_marked() {
        let view = search_to_view(&snapshot(ViewState::Idle));
        let selected: Vec<&str> = view
            .networks
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["tiktok"]);
        assert_eq!(view.networks.len(), 4);
    }

    #[test]
    fn ranking_positions_start_at_one() {
        let payload = RankingPayload {
            list: vec![
                RankingEntry {
                    query: "cats".into(),
                    network: "youtube".into(),
                    amount: 3,
                },
                RankingEntry {
                    query: "sunset".into(),
                    network: "tiktok".into(),
                    amount: 2,
                },
            ],
            statistics: SocialCounts([0, 2, 0, 3]),
        };
        match ranking_to_view(&RankingState::Loaded(payload)) {
            RankingView::Loaded { rows, chart_js } => {
                assert_eq!(rows[0].position, 1);
                assert_eq!(rows[0].network, "Youtube");
                assert_eq!(rows[1].position, 2);
                assert!(chart_js.contains("[0,2,0,3]"));
            }
            _ => panic!("expected loaded view"),
        }
    }

    #[test]
    fn empty_ranking_differs_from_not_fetched() {
        assert!(ranking_to_view(&RankingState::NotFetched) == RankingView::Loading);
        assert!(
            ranking_to_view(&RankingState::Loaded(RankingPayload::default()))
                == RankingView::Empty
        );
    }
}
