//! Lead Import Page (admin)
//!
//! Pick a CSV/Excel file, let the server preview it, adjust the suggested column mapping,
//! choose the owner of the new leads and submit.

use crm_core::api::UploadFile;
use crm_core::domain::User;
use crm_core::importer::{ImportResult, ImportSession, LEAD_IMPORT_FIELDS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{error, info, warn};

use crate::browser::save_download;
use crate::components::{assignable, DropZone};
use crate::context::use_session;
use crate::store::{push_toast, toast_success, use_app_store, ToastKind};

const SAMPLE_ROWS: usize = 3;
const TEMPLATE_NAME: &str = "lead_import_template.csv";

#[component]
fn ImportSummary(result: ImportResult) -> impl IntoView {
    view! {
        <section class="import-result">
            <h2>"Import Finished"</h2>
            <p>{result.message.clone()}</p>
            <p>
                {format!("{} imported, {} failed", result.successful_imports, result.failed_imports)}
            </p>
            {(!result.warnings.is_empty()).then(|| view! {
                <ul class="import-warnings">
                    {result.warnings.iter().map(|w| view! { <li>{w.clone()}</li> }).collect_view()}
                </ul>
            })}
            {(!result.failures.is_empty()).then(|| view! {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Row"</th>
                            <th>"Error"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {result.failures.iter().map(|f| view! {
                            <tr>
                                <td>{f.row}</td>
                                <td>{f.error.clone()}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            })}
        </section>
    }
}

#[component]
pub fn AdminImportPage() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let import = RwSignal::new(ImportSession::new());
    let users = RwSignal::new(Vec::<User>::new());
    let result = RwSignal::new(None::<ImportResult>);
    let busy = RwSignal::new(false);
    let problem = RwSignal::new(None::<String>);

    {
        let api = session.api();
        spawn_local(async move {
            if let Ok(list) = api.list_users().await {
                users.set(assignable(&list));
            }
        });
    }

    let on_files = Callback::new(move |mut picked: Vec<UploadFile>| {
        let Some(file) = picked.pop() else {
            return;
        };
        result.set(None);
        let mut accepted = Ok(());
        import.update(|s| accepted = s.accept_file(file.clone()));
        if let Err(message) = accepted {
            problem.set(Some(message.to_string()));
            return;
        }
        problem.set(None);
        let api = session.api();
        busy.set(true);
        spawn_local(async move {
            match api.preview_import(file).await {
                Ok(preview) => {
                    info!("[Import] Preview with {} column(s)", preview.headers.len());
                    import.update(|s| s.apply_preview(preview));
                }
                Err(e) => warn!("[Import] Preview failed: {}", e),
            }
            busy.set(false);
        });
    });

    let submit = move |_| {
        let submission = match import.with_untracked(ImportSession::submission) {
            Ok(submission) => submission,
            Err(message) => {
                problem.set(Some(message.to_string()));
                return;
            }
        };
        problem.set(None);
        let api = session.api();
        busy.set(true);
        spawn_local(async move {
            match api.submit_import(submission).await {
                Ok(outcome) => {
                    info!(
                        "[Import] {} imported, {} failed",
                        outcome.successful_imports, outcome.failed_imports
                    );
                    toast_success(&store, &format!("Imported {} lead(s)", outcome.successful_imports));
                    import.update(ImportSession::reset);
                    result.set(Some(outcome));
                }
                Err(e) => warn!("[Import] Submit failed: {}", e),
            }
            busy.set(false);
        });
    };

    let download_template = move |_| {
        let api = session.api();
        spawn_local(async move {
            let Ok(response) = api.download_import_template().await else {
                return;
            };
            if let Err(e) = save_download(&response.body, response.content_type.as_deref(), TEMPLATE_NAME) {
                error!("[Import] Template download failed: {:?}", e);
                push_toast(&store, ToastKind::Error, "Download failed");
            }
        });
    };

    let file_name = move || import.with(|s| s.file.as_ref().map(|f| f.name.clone()));
    let has_preview = move || import.with(|s| s.preview.is_some());
    let missing_name = move || has_preview() && !import.with(ImportSession::has_name_mapping);

    view! {
        <div class="import-page">
            <header class="page-header">
                <h1>"Import Leads"</h1>
                <button class="secondary-btn" on:click=download_template>"Download Template"</button>
            </header>
            <DropZone
                on_files=on_files
                multiple=false
                accept=".csv,.xlsx"
                hint="Drop a CSV or Excel file here, or browse"
            />
            {move || file_name().map(|name| view! { <p class="import-file">"Selected: " {name}</p> })}
            {move || problem.get().map(|message| view! { <div class="form-error" role="alert">{message}</div> })}
            <Show when=move || busy.get()>
                <p class="loading">"Working..."</p>
            </Show>
            <Show when=has_preview>
                <section class="import-mapping">
                    <h2>"Column Mapping"</h2>
                    {move || import.with(|s| s.preview.as_ref().map(|p| p.total_rows)).map(|total| view! {
                        <p>{format!("{} row(s) found", total)}</p>
                    })}
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Column"</th>
                                <th>"Sample"</th>
                                <th>"Lead Field"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || import.with(|s| {
                                s.mappings.iter().enumerate().map(|(index, mapping)| {
                                    let samples = s.sample(index, SAMPLE_ROWS).join(", ");
                                    let current = mapping.lead_field.clone();
                                    view! {
                                        <tr>
                                            <td>{mapping.csv_column.clone()}</td>
                                            <td class="import-sample">{samples}</td>
                                            <td>
                                                <select on:change=move |ev| {
                                                    let field = event_target_value(&ev);
                                                    import.update(|s| s.set_mapping(index, &field));
                                                }>
                                                    <option value="" selected=current.is_empty()>"Skip"</option>
                                                    {LEAD_IMPORT_FIELDS.iter().map(|field| view! {
                                                        <option value=*field selected=current == *field>{*field}</option>
                                                    }).collect_view()}
                                                </select>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()
                            })}
                        </tbody>
                    </table>
                    <Show when=missing_name>
                        <p class="form-error">"Map a column to 'name' before importing"</p>
                    </Show>
                </section>
                <section class="import-owner">
                    <label>
                        "Assign imported leads to "
                        <select
                            prop:value=move || import.with(|s| s.assigned_user_email.clone())
                            on:change=move |ev| {
                                let email = event_target_value(&ev);
                                import.update(|s| s.assigned_user_email = email);
                            }
                        >
                            <option value="">"Select user"</option>
                            {move || users.get().into_iter().map(|user| view! {
                                <option value=user.email.clone()>{user.email.clone()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                </section>
                <div class="form-actions">
                    <button class="cancel-btn" on:click=move |_| import.update(ImportSession::reset)>
                        "Reset"
                    </button>
                    <button class="primary-btn" disabled=move || busy.get() on:click=submit>
                        "Import"
                    </button>
                </div>
            </Show>
            {move || result.get().map(|outcome| view! { <ImportSummary result=outcome /> })}
        </div>
    }
}
