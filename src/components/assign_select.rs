//! Reassign a record to another user (admins only)

use crm_core::domain::{EntityKind, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use crate::context::use_session;
use crate::store::{toast_success, use_app_store};

/// Active users, in the order the server lists them
pub fn assignable(users: &[User]) -> Vec<User> {
    users.iter().filter(|u| u.is_active).cloned().collect()
}

#[component]
pub fn AssignSelect(
    kind: EntityKind,
    id: u32,
    current: Option<u32>,
    #[prop(into)] users: Signal<Vec<User>>,
    on_assigned: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let busy = RwSignal::new(false);

    let on_change = move |ev: web_sys::Event| {
        let Ok(user_id) = event_target_value(&ev).parse::<u32>() else {
            return;
        };
        if Some(user_id) == current {
            return;
        }
        let api = session.api();
        busy.set(true);
        spawn_local(async move {
            let result = api.assign_entity(kind, id, user_id).await;
            busy.set(false);
            if result.is_ok() {
                info!("[Assign] {} {} -> user {}", kind.as_str(), id, user_id);
                toast_success(&store, "Assignment updated");
                on_assigned.run(());
            }
        });
    };

    view! {
        <select
            class="assign-select"
            aria-label="Assigned to"
            disabled=move || busy.get()
            on:click=|ev| ev.stop_propagation()
            on:change=on_change
        >
            <option value="" selected=current.is_none()>"Unassigned"</option>
            {move || assignable(&users.get()).into_iter().map(|user| {
                let selected = Some(user.id) == current;
                view! { <option value=user.id.to_string() selected=selected>{user.email}</option> }
            }).collect_view()}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_users_hidden() {
        let users: Vec<User> = serde_json::from_value(serde_json::json!([
            {"id": 1, "email": "a@x.test"},
            {"id": 2, "email": "b@x.test", "is_active": false}
        ]))
        .unwrap();
        let ids: Vec<u32> = assignable(&users).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
