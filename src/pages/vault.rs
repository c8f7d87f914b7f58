//! Vault Page
//!
//! Shared files of the tenant. Everyone can download; upload and delete need the
//! `file_uploads` role.

use crm_core::api::UploadFile;
use crm_core::backups::format_bytes;
use crm_core::domain::FileInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{error, info};

use super::records::short_date;
use crate::browser::save_download;
use crate::components::{ConfirmButton, DropZone};
use crate::context::use_session;
use crate::store::{push_toast, toast_success, use_app_store, ToastKind};

#[component]
pub fn VaultPage() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let files = RwSignal::new(Vec::<FileInfo>::new());
    let loading = RwSignal::new(true);
    let uploading = RwSignal::new(false);
    let (reload, set_reload) = signal(0u32);
    let can_manage = move || session.can_manage_files();

    Effect::new(move |_| {
        reload.track();
        let api = session.api();
        loading.set(true);
        spawn_local(async move {
            if let Ok(list) = api.list_files().await {
                files.set(list);
            }
            loading.set(false);
        });
    });

    let upload = Callback::new(move |picked: Vec<UploadFile>| {
        if picked.is_empty() {
            return;
        }
        let count = picked.len();
        let api = session.api();
        uploading.set(true);
        spawn_local(async move {
            if api.upload_files(picked).await.is_ok() {
                info!("[Vault] Uploaded {} file(s)", count);
                toast_success(&store, &format!("Uploaded {} file(s)", count));
                set_reload.update(|n| *n += 1);
            }
            uploading.set(false);
        });
    });

    let download = move |file: FileInfo| {
        let api = session.api();
        spawn_local(async move {
            let Ok(response) = api.download_file(file.id).await else {
                return;
            };
            let content_type = response.content_type.clone().or(file.mimetype.clone());
            if let Err(e) = save_download(&response.body, content_type.as_deref(), &file.name) {
                error!("[Vault] Download of {} failed: {:?}", file.name, e);
                push_toast(&store, ToastKind::Error, "Download failed");
            }
        });
    };

    let delete = move |id: u32| {
        let api = session.api();
        spawn_local(async move {
            if api.delete_file(id).await.is_ok() {
                toast_success(&store, "File deleted");
                set_reload.update(|n| *n += 1);
            }
        });
    };

    view! {
        <div class="vault-page">
            <header class="page-header">
                <h1>"Vault"</h1>
            </header>
            <Show when=can_manage>
                <DropZone on_files=upload />
                <Show when=move || uploading.get()>
                    <p class="loading">"Uploading..."</p>
                </Show>
            </Show>
            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            <Show
                when=move || !loading.get() && files.with(Vec::is_empty)
                fallback=move || view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Size"</th>
                                <th>"Uploaded By"</th>
                                <th>"Date"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || files.get()
                                key=|file| file.id
                                children=move |file| {
                                    let id = file.id;
                                    let for_download = file.clone();
                                    view! {
                                        <tr>
                                            <td>{file.name.clone()}</td>
                                            <td>{format_bytes(file.size)}</td>
                                            <td>{file.uploaded_by.clone()}</td>
                                            <td>{short_date(Some(&file.date))}</td>
                                            <td class="row-actions">
                                                <button class="download-btn" on:click=move |_| download(for_download.clone())>
                                                    "Download"
                                                </button>
                                                <Show when=can_manage>
                                                    <ConfirmButton on_confirm=Callback::new(move |_| delete(id)) />
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                }
            >
                <p class="empty-state">"No files uploaded yet"</p>
            </Show>
        </div>
    }
}
