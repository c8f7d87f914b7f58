//! Status filter tabs with per-status counts

use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct StatusTab {
    pub value: String,
    pub label: String,
    pub count: u32,
}

#[component]
pub fn StatusTabs(
    #[prop(into)] tabs: Signal<Vec<StatusTab>>,
    #[prop(into)] active: Signal<String>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="status-tabs" role="tablist">
            {move || tabs.get().into_iter().map(|tab| {
                let value = tab.value.clone();
                let is_active = {
                    let value = value.clone();
                    move || active.get() == value
                };
                view! {
                    <button
                        role="tab"
                        class=move || if is_active() { "status-tab active" } else { "status-tab" }
                        on:click=move |_| on_select.run(value.clone())
                    >
                        {tab.label}
                        <span class="status-count">{tab.count}</span>
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
