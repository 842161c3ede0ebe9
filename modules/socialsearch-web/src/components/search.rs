use dioxus::prelude::*;

use super::{ResultsView, RowView, SearchView};

/// Keeps the submit button in step with the form fields between page loads.
const FORM_GUARD_JS: &str = "(function(){var f=document.getElementById('search-form');if(!f)return;var b=f.querySelector('button[type=submit]');function u(){b.disabled=!(f.social.value&&f.search.value.trim());}f.addEventListener('input',u);f.addEventListener('change',u);u();})();";

pub fn search_panel(data: &SearchView) -> Element {
    let no_network = !data.networks.iter().any(|o| o.selected);
    let favorite_label = if data.favorited { "\u{2665} Favorited" } else { "\u{2665} Favorite" };

    rsx! {
        div { class: "bg-white border border-gray-200 rounded-lg p-5 mb-6 shadow-sm",
            h3 { class: "font-semibold mb-3", "Search" }
            div { class: "flex flex-wrap items-center gap-4",
                form { id: "search-form", method: "post", action: "/search",
                    class: "flex flex-wrap items-center gap-4",
                    input {
                        r#type: "text",
                        name: "search",
                        placeholder: "Keywords",
                        value: "{data.text}",
                        class: "w-96 border border-gray-300 rounded px-3 py-2 text-sm",
                    }
                    select { name: "social", class: "border border-gray-300 rounded px-3 py-2 text-sm",
                        option { value: "", disabled: true, selected: no_network, "Choose a network" }
                        for opt in data.networks.iter() {
                            option { value: "{opt.value}", selected: opt.selected, "{opt.label}" }
                        }
                    }
                    button {
                        r#type: "submit",
                        disabled: !data.can_submit,
                        class: "px-4 py-2 bg-blue-600 text-white rounded text-sm disabled:opacity-50",
                        "Search"
                    }
                }
                if data.show_favorite {
                    form { method: "post", action: "/favorite",
                        button {
                            r#type: "submit",
                            disabled: !data.can_favorite,
                            class: "px-4 py-2 bg-red-600 text-white rounded text-sm disabled:opacity-50",
                            "{favorite_label}"
                        }
                    }
                }
            }
            if !data.loading {
                script { dangerous_inner_html: "{FORM_GUARD_JS}" }
            }
        }
        { results(&data.results) }
    }
}

fn results(view: &ResultsView) -> Element {
    match view {
        ResultsView::Hidden => rsx! {},
        ResultsView::Loading => rsx! {
            div { id: "search-status", class: "bg-white border border-gray-200 rounded-lg p-6 text-center",
                div { class: "text-lg font-semibold", "Searching" }
                div { class: "text-sm text-gray-400 mt-1", "This can take a little while." }
            }
        },
        ResultsView::Empty => rsx! {
            div { id: "search-status", class: "bg-blue-50 border border-blue-200 rounded-lg p-5",
                div { class: "font-semibold", "No results for your search" }
                p { class: "text-sm text-gray-600 mt-1", "Try again later or try other keywords!" }
            }
        },
        ResultsView::Failed => rsx! {
            div { id: "search-status", class: "bg-red-50 border border-red-200 rounded-lg p-5",
                div { class: "font-semibold", "The search could not be completed" }
                p { class: "text-sm text-gray-600 mt-1", "The profiles service did not answer. Try again in a moment." }
            }
        },
        ResultsView::Rows { network_label, rows } => {
            let count = rows.len();
            rsx! {
                div { id: "search-results",
                    div { class: "text-xs text-gray-400 mb-2", "{count} profiles on {network_label}" }
                    div { class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-3",
                        for row in rows.iter() {
                            { result_card(row) }
                        }
                    }
                }
            }
        }
    }
}

fn result_card(row: &RowView) -> Element {
    rsx! {
        div { class: "result-card bg-white border border-gray-200 rounded-lg p-4",
            for title in row.title.iter() {
                div { class: "font-semibold mb-2", "{title}" }
            }
            dl { class: "text-xs",
                for (key, value) in row.fields.iter() {
                    div { class: "flex justify-between gap-2 py-0.5",
                        dt { class: "text-gray-400", "{key}" }
                        dd { class: "text-gray-800 truncate", "{value}" }
                    }
                }
            }
        }
    }
}
