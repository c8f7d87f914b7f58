//! Toast stack, top-centre

use leptos::prelude::*;

use crate::store::{dismiss_toast, use_app_store, AppStateStoreFields, ToastKind};

#[component]
pub fn Toasts() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    view! {
                        <div class=class on:click=move |_| dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
