//! Pagination Controls
//!
//! Page size picker and previous/next buttons under a paged list.

use crm_core::prefs::PER_PAGE_CHOICES;
use leptos::prelude::*;

/// "Showing 11-20 of 42"
pub fn range_text(page: u32, per_page: u32, total: u32) -> String {
    if total == 0 {
        return "No results".to_string();
    }
    let first = (page.max(1) - 1) * per_page + 1;
    let last = (page.max(1) * per_page).min(total);
    format!("Showing {}-{} of {}", first.min(total), last, total)
}

#[component]
pub fn PaginationControls(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] per_page: Signal<u32>,
    #[prop(into)] total: Signal<u32>,
    on_page: Callback<u32>,
    on_per_page: Callback<u32>,
) -> impl IntoView {
    let total_pages = move || total.get().div_ceil(per_page.get().max(1)).max(1);
    let has_prev = move || page.get() > 1;
    let has_next = move || page.get() < total_pages();

    view! {
        <div class="pagination">
            <span class="pagination-info">{move || range_text(page.get(), per_page.get(), total.get())}</span>
            <label class="pagination-size">
                "Per page "
                <select
                    prop:value=move || per_page.get().to_string()
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                            on_per_page.run(size);
                        }
                    }
                >
                    {PER_PAGE_CHOICES
                        .iter()
                        .map(|size| view! { <option value=size.to_string()>{size.to_string()}</option> })
                        .collect_view()}
                </select>
            </label>
            <div class="pagination-buttons">
                <button disabled=move || !has_prev() on:click=move |_| on_page.run(page.get_untracked() - 1)>
                    "‹ Prev"
                </button>
                <span class="pagination-page">{move || format!("Page {} of {}", page.get(), total_pages())}</span>
                <button disabled=move || !has_next() on:click=move |_| on_page.run(page.get_untracked() + 1)>
                    "Next ›"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_text() {
        assert_eq!(range_text(1, 10, 42), "Showing 1-10 of 42");
        assert_eq!(range_text(5, 10, 42), "Showing 41-42 of 42");
        assert_eq!(range_text(1, 10, 0), "No results");
    }
}
