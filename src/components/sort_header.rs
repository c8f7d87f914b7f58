//! Sortable table header cell

use crm_core::sorting::SortState;
use leptos::prelude::*;

#[component]
pub fn SortHeader(
    field: &'static str,
    label: &'static str,
    #[prop(into)] sort: Signal<SortState>,
    on_sort: Callback<String>,
) -> impl IntoView {
    view! {
        <th class="sortable" on:click=move |_| on_sort.run(field.to_string())>
            {label}
            <span class="sort-icon">{move || sort.with(|s| s.sort_icon(field))}</span>
        </th>
    }
}
