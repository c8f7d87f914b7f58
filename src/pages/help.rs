//! Help Page
//!
//! Bundled report documentation, one collapsible section per document.

use leptos::prelude::*;

use crate::markdown::parse_markdown;

const SECTIONS: [(&str, &str); 7] = [
    ("Reports Overview", include_str!("../help/overview.md")),
    ("Sales Pipeline", include_str!("../help/pipeline.md")),
    ("Lead Sources", include_str!("../help/sources.md")),
    ("Conversion Rate", include_str!("../help/conversion.md")),
    ("Revenue", include_str!("../help/revenue.md")),
    ("Activity", include_str!("../help/activity.md")),
    ("General Tips", include_str!("../help/tips.md")),
];

#[component]
pub fn HelpPage() -> impl IntoView {
    // Index of the open section; one at a time
    let open = RwSignal::new(Some(0usize));

    view! {
        <div class="help-page">
            <header class="page-header">
                <h1>"Help"</h1>
            </header>
            {SECTIONS.iter().enumerate().map(|(index, (title, source))| {
                let html = parse_markdown(source);
                let is_open = move || open.get() == Some(index);
                view! {
                    <section class="help-section">
                        <button
                            class="help-toggle"
                            aria-expanded=move || is_open().to_string()
                            on:click=move |_| open.update(|o| {
                                *o = if *o == Some(index) { None } else { Some(index) };
                            })
                        >
                            <span class="help-caret">{move || if is_open() { "▾" } else { "▸" }}</span>
                            {*title}
                        </button>
                        <Show when=is_open>
                            <div class="help-content markdown" inner_html=html.clone()></div>
                        </Show>
                    </section>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_render() {
        for (title, source) in SECTIONS {
            assert!(parse_markdown(source).contains("<h1>"), "{} has no heading", title);
        }
    }
}
