use dioxus::prelude::*;

use socialsearch_common::{Network, SocialCounts};

use super::layout::Layout;
use super::{RankingRow, RankingView};
use crate::templates::render_document;

const NETWORK_COLORS: [&str; 4] = ["#0CA4E8", "#0CE8F2", "#00DCA9", "#0CE838"];

/// Keyword leaderboard table beside the per-network pie chart.
pub fn ranking_section(data: &RankingView) -> Element {
    rsx! {
        div { class: "grid grid-cols-1 lg:grid-cols-3 gap-4",
            div { class: "lg:col-span-2 bg-white border border-gray-200 rounded-lg p-5 shadow-sm",
                h3 { class: "font-semibold text-center mb-6", "Most searched keywords" }
                { leaderboard(data) }
            }
            div { class: "bg-white border border-gray-200 rounded-lg p-5 shadow-sm",
                h3 { class: "font-semibold text-center mb-6", "Searches by network" }
                { social_chart(data) }
            }
        }
    }
}

fn social_chart(data: &RankingView) -> Element {
    match data {
        RankingView::Loaded { chart_js, .. } => rsx! {
            div { class: "relative h-64",
                canvas { id: "chart-social" }
            }
            script { dangerous_inner_html: "{chart_js}" }
        },
        _ => rsx! {},
    }
}

fn leaderboard(data: &RankingView) -> Element {
    match data {
        RankingView::Loading => rsx! {
            div { class: "text-sm text-gray-400 text-center", "Loading ranking" }
        },
        RankingView::Empty => rsx! {
            div { class: "text-sm text-gray-400 text-center", "No searches recorded yet." }
        },
        RankingView::Failed => rsx! {
            div { class: "text-sm text-red-600 text-center", "Ranking is unavailable right now." }
        },
        RankingView::Loaded { rows, .. } => rsx! {
            table { id: "ranking-table", class: "w-11/12 mx-auto text-sm border border-gray-200",
                thead {
                    tr {
                        th { class: "p-2 text-center border-b", "#" }
                        th { class: "p-2 text-center border-b", "Search" }
                        th { class: "p-2 text-center border-b", "Network" }
                        th { class: "p-2 text-center border-b", "Amount" }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        { ranking_row(row) }
                    }
                }
            }
        },
    }
}

fn ranking_row(row: &RankingRow) -> Element {
    rsx! {
        tr {
            td { class: "p-2 text-center font-semibold", "{row.position}" }
            td { class: "p-2 text-center", "{row.query}" }
            td { class: "p-2 text-center", "{row.network}" }
            td { class: "p-2 text-center", "{row.amount}" }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn RankingPage(data: RankingView) -> Element {
    rsx! {
        Layout { title: "Ranking".to_string(), active_page: "ranking".to_string(), auto_refresh: false,
            { ranking_section(&data) }
        }
    }
}

pub fn render_ranking_page(data: RankingView) -> String {
    render_document(VirtualDom::new_with_props(RankingPage, RankingPageProps { data }))
}

// --- Chart.js JSON builders ---

pub fn build_social_pie_chart(counts: &SocialCounts) -> String {
    let labels: Vec<&str> = Network::ALL.iter().map(|n| n.label()).collect();
    format!(
        r#"new Chart(document.getElementById('chart-social'),{{type:'pie',data:{{labels:{labels},datasets:[{{data:{values},backgroundColor:{colors},hoverBackgroundColor:{colors}}}]}},options:{{maintainAspectRatio:false,responsive:true,plugins:{{legend:{{position:'right'}}}}}}}});"#,
        labels = serde_json::to_string(&labels).unwrap_or_default(),
        values = serde_json::to_string(counts.as_slice()).unwrap_or_default(),
        colors = serde_json::to_string(&NETWORK_COLORS).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_chart_uses_fixed_legend_order() {
        let js = build_social_pie_chart(&SocialCounts([4, 3, 2, 1]));
        assert!(js.contains(r#"labels:["Instagram","TikTok","Twitter","Youtube"]"#));
        assert!(js.contains("data:[4,3,2,1]"));
        assert!(js.contains("type:'pie'"));
        assert!(js.contains("position:'right'"));
    }

    #[test]
    fn loaded_page_renders_rows_and_chart() {
        let html = render_ranking_page(RankingView::Loaded {
            rows: vec![RankingRow {
                position: 1,
                query: "sunset".into(),
                network: "TikTok".into(),
                amount: 7,
            }],
            chart_js: build_social_pie_chart(&SocialCounts([0, 7, 0, 0])),
        });
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("ranking-table"));
        assert!(html.contains("sunset"));
        assert!(html.contains("chart-social"));
    }

    #[test]
    fn empty_page_has_no_table_or_chart() {
        let html = render_ranking_page(RankingView::Empty);
        assert!(html.contains("No searches recorded yet."));
        assert!(!html.contains("ranking-table"));
        assert!(!html.contains("chart-social"));
    }

    #[test]
    fn loading_page_says_so() {
        let html = render_ranking_page(RankingView::Loading);
        assert!(html.contains("Loading ranking"));
        assert!(!html.contains("No searches recorded yet."));
    }
}
