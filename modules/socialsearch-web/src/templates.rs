use dioxus::prelude::VirtualDom;

/// Build a page's component tree and render it as a complete HTML document.
pub fn render_document(mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    format!(
        "<!DOCTYPE html><html lang=\"en\">{}</html>",
        dioxus::ssr::render(&dom)
    )
}
