use dioxus::prelude::*;

struct NavItem {
    key: &'static str,
    label: &'static str,
    href: &'static str,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { key: "search", label: "Search", href: "/" },
    NavItem { key: "ranking", label: "Ranking", href: "/ranking" },
];

/// Static page header: brand on the left, account buttons on the right.
fn header(active_page: &str) -> Element {
    rsx! {
        div { class: "flex items-center justify-between px-6 py-3 bg-white border-b border-gray-200",
            a { href: "/", class: "text-xl no-underline text-gray-900 tracking-wide",
                span { class: "font-black", "SOCIAL" }
                span { class: "font-thin underline decoration-1", "SEARCH" }
                span { class: "font-black", "ENGINE" }
            }
            nav { class: "flex items-center gap-4",
                for item in NAV_ITEMS.iter() {
                    {
                        let class = if item.key == active_page {
                            "text-sm text-blue-700 font-semibold no-underline"
                        } else {
                            "text-sm text-gray-500 hover:text-gray-900 no-underline"
                        };
                        let href = item.href;
                        let label = item.label;
                        rsx! { a { href: href, class: class, "{label}" } }
                    }
                }
                button { class: "text-sm px-3 py-1.5 border border-gray-300 rounded", "Sign in" }
                button { class: "text-sm px-3 py-1.5 bg-blue-600 text-white rounded", "Sign up" }
            }
        }
    }
}

/// Page shell. `auto_refresh` re-requests the page every two seconds, used
/// while a search is still running.
#[allow(non_snake_case)]
#[component]
pub fn Layout(title: String, active_page: String, auto_refresh: bool, children: Element) -> Element {
    let full_title = format!("{title} | Social Search");
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            if auto_refresh {
                meta { http_equiv: "refresh", content: "2" }
            }
            title { "{full_title}" }
            script { src: "https://cdn.tailwindcss.com" }
            script { src: "https://cdn.jsdelivr.net/npm/chart.js" }
        }
        body { class: "min-h-screen bg-gray-50 font-sans text-gray-900",
            { header(&active_page) }
            div { class: "max-w-6xl mx-auto p-6",
                {children}
            }
        }
    }
}
