//! Backup Console (admin)
//!
//! Lists backups and the restore history, starts and deletes backups and restores one
//! through a two-step confirmation. While any job runs on the server the lists are
//! refreshed every few seconds; polling stops when the jobs finish or the page unmounts.

use crm_core::backups::{format_bytes, BackupMonitor, RestoreGate, RESTORE_CONFIRMATION};
use crm_core::domain::{Backup, BackupRestore};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, info, warn};

use super::records::short_date;
use crate::components::ConfirmButton;
use crate::context::{use_session, SessionContext};
use crate::store::{push_toast, toast_success, use_app_store, ToastKind};

/// Page state shared by the refresh and poll tasks
#[derive(Clone, Copy)]
struct Console {
    session: SessionContext,
    backups: RwSignal<Vec<Backup>>,
    restores: RwSignal<Vec<BackupRestore>>,
    loading: RwSignal<bool>,
    monitor: StoredValue<BackupMonitor>,
}

impl Console {
    fn new(session: SessionContext) -> Self {
        Self {
            session,
            backups: RwSignal::new(Vec::new()),
            restores: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
            monitor: StoredValue::new(BackupMonitor::new()),
        }
    }

    /// Unmounted pages stop their background tasks
    fn is_gone(&self) -> bool {
        self.backups.is_disposed()
    }

    async fn refresh(self) {
        let api = self.session.api();
        let backups = api.list_backups().await;
        let restores = api.list_restores().await;
        if self.is_gone() {
            return;
        }
        if let Ok(list) = backups {
            self.backups.set(list);
        }
        if let Ok(list) = restores {
            self.restores.set(list);
        }
        self.loading.set(false);

        self.backups.with_untracked(|b| {
            self.restores
                .with_untracked(|r| self.monitor.try_update_value(|m| m.observe(b, r)))
        });
        self.ensure_polling();
    }

    fn ensure_polling(self) {
        if self.monitor.try_update_value(BackupMonitor::claim_loop) == Some(true) {
            spawn_local(self.poll());
        }
    }

    async fn poll(self) {
        let interval = self.session.config().poll_interval_ms;
        info!("[Backups] Polling every {} ms", interval);
        loop {
            TimeoutFuture::new(interval).await;
            let polling = !self.is_gone() && self.monitor.try_with_value(BackupMonitor::is_polling).unwrap_or(false);
            if !polling {
                debug!("[Backups] Polling stopped");
                self.monitor.try_update_value(BackupMonitor::release_loop);
                break;
            }
            let api = self.session.api();
            let backups = api.list_backups().await;
            let restores = api.list_restores().await;
            if self.is_gone() {
                break;
            }
            if let Ok(list) = backups {
                self.backups.set(list);
            }
            if let Ok(list) = restores {
                self.restores.set(list);
            }
            self.backups.with_untracked(|b| {
                self.restores
                    .with_untracked(|r| self.monitor.try_update_value(|m| m.observe(b, r)))
            });
        }
    }

    /// A job was just started. Polling begins at once, but the refresh that follows may
    /// still see every job idle and stop it again.
    fn expect_job(self) {
        self.monitor.try_update_value(BackupMonitor::force_start);
        self.ensure_polling();
        spawn_local(self.refresh());
    }
}

#[component]
fn RestoreDialog(gate: RwSignal<RestoreGate>, on_confirm: Callback<()>) -> impl IntoView {
    let confirming = move || matches!(gate.get(), RestoreGate::Confirming { .. });
    view! {
        <div class="modal-backdrop">
            <div class="modal restore-dialog" role="dialog" aria-modal="true">
                <h2>"Restore Backup"</h2>
                <p class="warning">
                    "Restoring replaces all current data with the contents of this backup. "
                    "A safety backup of the current data is taken first."
                </p>
                <Show
                    when=confirming
                    fallback=move || view! {
                        <div class="form-actions">
                            <button class="cancel-btn" on:click=move |_| gate.update(RestoreGate::close)>"Cancel"</button>
                            <button class="danger-btn" on:click=move |_| gate.update(RestoreGate::acknowledge)>
                                "I understand, continue"
                            </button>
                        </div>
                    }
                >
                    <label>
                        {format!("Type {} to confirm", RESTORE_CONFIRMATION)}
                        <input
                            type="text"
                            autocomplete="off"
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                gate.update(|g| g.set_input(&text));
                            }
                        />
                    </label>
                    <div class="form-actions">
                        <button class="cancel-btn" on:click=move |_| gate.update(RestoreGate::close)>"Cancel"</button>
                        <button
                            class="danger-btn"
                            disabled=move || !gate.with(RestoreGate::can_confirm)
                            on:click=move |_| on_confirm.run(())
                        >
                            "Restore"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn AdminBackupsPage() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let console = Console::new(session);
    let gate = RwSignal::new(RestoreGate::default());
    let creating = RwSignal::new(false);

    spawn_local(console.refresh());

    let create = move |_| {
        let api = session.api();
        creating.set(true);
        spawn_local(async move {
            let result = api.create_backup().await;
            creating.set(false);
            if result.is_ok() {
                info!("[Backups] Backup requested");
                toast_success(&store, "Backup started");
                console.expect_job();
            }
        });
    };

    let delete = move |id: u32| {
        let api = session.api();
        spawn_local(async move {
            if api.delete_backup(id).await.is_ok() {
                toast_success(&store, "Backup deleted");
                console.refresh().await;
            }
        });
    };

    let open_restore = move |backup: Backup| match RestoreGate::open(&backup) {
        Ok(opened) => gate.set(opened),
        Err(e) => push_toast(&store, ToastKind::Error, &e.to_string()),
    };

    let confirm_restore = Callback::new(move |_| {
        let confirmed = match gate.with_untracked(RestoreGate::confirm) {
            Ok(confirmed) => confirmed,
            Err(e) => {
                warn!("[Backups] Restore not confirmed: {}", e);
                return;
            }
        };
        gate.update(RestoreGate::close);
        let api = session.api();
        spawn_local(async move {
            if api.restore_backup(confirmed).await.is_ok() {
                info!("[Backups] Restore of backup {} requested", confirmed.backup_id());
                toast_success(&store, "Restore started");
                console.expect_job();
            }
        });
    });

    view! {
        <div class="backups-page">
            <header class="page-header">
                <h1>"Backups"</h1>
                <button class="primary-btn" disabled=move || creating.get() on:click=create>
                    {move || if creating.get() { "Starting..." } else { "Create Backup" }}
                </button>
            </header>
            <Show when=move || console.loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            <section>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"File"</th>
                            <th>"Type"</th>
                            <th>"Status"</th>
                            <th>"Size"</th>
                            <th>"Created"</th>
                            <th>"Created By"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || console.backups.get()
                            key=|backup| (backup.id, backup.status.label())
                            children=move |backup| {
                                let id = backup.id;
                                let restorable = backup.can_restore();
                                let deletable = backup.can_delete();
                                let for_restore = backup.clone();
                                view! {
                                    <tr>
                                        <td>{backup.filename.clone()}</td>
                                        <td>{backup.backup_type.label()}</td>
                                        <td title=backup.error.clone().unwrap_or_default()>
                                            {backup.status.label()}
                                        </td>
                                        <td>{format_bytes(backup.size)}</td>
                                        <td>{short_date(Some(&backup.created_at))}</td>
                                        <td>{backup.created_by.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td class="row-actions">
                                            {restorable.then(|| view! {
                                                <button class="restore-btn" on:click=move |_| open_restore(for_restore.clone())>
                                                    "Restore"
                                                </button>
                                            })}
                                            {deletable.then(|| view! {
                                                <ConfirmButton on_confirm=Callback::new(move |_| delete(id)) />
                                            })}
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || !console.loading.get() && console.backups.with(Vec::is_empty)>
                    <p class="empty-state">"No backups yet"</p>
                </Show>
            </section>
            <section>
                <h2>"Restore History"</h2>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"User"</th>
                            <th>"Backup"</th>
                            <th>"Size"</th>
                            <th>"Safety Backup"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || console.restores.get()
                            key=|restore| (restore.restore_id, restore.status.clone())
                            children=move |restore| view! {
                                <tr>
                                    <td>{short_date(Some(&restore.restore_date))}</td>
                                    <td>{restore.user_email.clone()}</td>
                                    <td>{restore.backup_restored.clone()}</td>
                                    <td>{format_bytes(restore.backup_size_bytes)}</td>
                                    <td>{restore.safety_backup_created.clone().unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{restore.status.clone().unwrap_or_else(|| "completed".to_string())}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </section>
            <Show when=move || gate.with(RestoreGate::is_open)>
                <RestoreDialog gate=gate on_confirm=confirm_restore />
            </Show>
        </div>
    }
}
