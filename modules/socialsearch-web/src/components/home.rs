use dioxus::prelude::*;

use super::layout::Layout;
use super::ranking::ranking_section;
use super::search::search_panel;
use super::HomeView;
use crate::templates::render_document;

#[allow(non_snake_case)]
#[component]
fn HomePage(data: HomeView) -> Element {
    let plan_label = if data.search.plan == "pro" { "Pro plan" } else { "Free plan" };
    rsx! {
        Layout { title: "Search".to_string(), active_page: "search".to_string(), auto_refresh: data.search.loading,
            div { class: "flex items-center justify-between mb-4",
                h2 { class: "text-2xl font-bold", "Find profiles" }
                span { class: "text-xs px-2 py-1 rounded-full bg-gray-100 text-gray-600", "{plan_label}" }
            }
            { search_panel(&data.search) }
            div { class: "mt-8",
                { ranking_section(&data.ranking) }
            }
        }
    }
}

pub fn render_home(data: HomeView) -> String {
    render_document(VirtualDom::new_with_props(HomePage, HomePageProps { data }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{network_options, RankingView, ResultsView, RowView, SearchView};
    use socialsearch_common::Network;

    fn search_view(results: ResultsView) -> SearchView {
        SearchView {
            text: "sunset".to_string(),
            networks: network_options(Some(Network::TikTok)),
            plan: "free".to_string(),
            can_submit: true,
            loading: false,
            show_favorite: false,
            can_favorite: false,
            favorited: false,
            results,
        }
    }

    fn home(search: SearchView) -> String {
        render_home(HomeView {
            search,
            ranking: RankingView::Empty,
        })
    }

    #[test]
    fn free_plan_has_no_favorite_form() {
        let html = home(search_view(ResultsView::Empty));
        assert!(html.contains("action=\"/search\""));
        assert!(!html.contains("action=\"/favorite\""));
    }

    #[test]
    fn pro_plan_shows_favorite_button() {
        let mut view = search_view(ResultsView::Rows {
            network_label: "TikTok".to_string(),
            rows: vec![RowView {
                title: Some("sunset.daily".to_string()),
                fields: vec![("username".to_string(), "sunset.daily".to_string())],
            }],
        });
        view.plan = "pro".to_string();
        view.show_favorite = true;
        view.can_favorite = true;

        let html = home(view);
        assert!(html.contains("action=\"/favorite\""));
        assert!(html.contains("Favorite"));
        assert!(html.contains("sunset.daily"));
        assert!(html.contains("Pro plan"));
    }

    #[test]
    fn empty_result_shows_no_results_message() {
        let html = home(search_view(ResultsView::Empty));
        assert!(html.contains("No results for your search"));
        assert!(!html.contains("search-results"));
    }

    #[test]
    fn never_searched_shows_no_message() {
        let html = home(search_view(ResultsView::Hidden));
        assert!(!html.contains("search-status"));
        assert!(!html.contains("No results for your search"));
    }

    #[test]
    fn failure_is_not_reported_as_empty() {
        let html = home(search_view(ResultsView::Failed));
        assert!(html.contains("could not be completed"));
        assert!(!html.contains("No results for your search"));
    }

    #[test]
    fn loading_page_refreshes_itself() {
        let mut view = search_view(ResultsView::Loading);
        view.loading = true;
        view.can_submit = false;

        let html = home(view);
        assert!(html.contains("Searching"));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("addEventListener"));
    }

    #[test]
    fn idle_page_does_not_refresh() {
        let html = home(search_view(ResultsView::Hidden));
        assert!(!html.contains("http-equiv"));
    }
}
