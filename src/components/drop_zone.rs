//! Drop Zone Component
//!
//! Drag-and-drop target that doubles as a file picker. Dropped or picked files are read into
//! memory before being handed to the callback.

use crm_core::api::UploadFile;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{error, info};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, FileList, HtmlInputElement};

use crate::browser::read_file_list;

fn deliver(list: FileList, on_files: Callback<Vec<UploadFile>>) {
    if list.length() == 0 {
        return;
    }
    spawn_local(async move {
        match read_file_list(&list).await {
            Ok(files) => {
                info!("[DropZone] Read {} file(s)", files.len());
                on_files.run(files);
            }
            Err(e) => error!("[DropZone] Failed to read files: {:?}", e),
        }
    });
}

/// File drop area with a hidden `<input type="file">` behind it
#[component]
pub fn DropZone(
    /// Called with the files once they are read
    on_files: Callback<Vec<UploadFile>>,
    /// Allow selecting several files at once
    #[prop(default = true)]
    multiple: bool,
    /// `accept` attribute of the picker, e.g. ".csv,.xlsx"
    #[prop(into, optional)]
    accept: Option<String>,
    /// Text shown while idle
    #[prop(into, default = "Drag & drop files here, or browse".to_string())]
    hint: String,
) -> impl IntoView {
    let (is_over, set_is_over) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_over.set(true);
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        // Leaving a child element still fires on the zone
        if ev.current_target() == ev.target() {
            set_is_over.set(false);
        }
    };

    let on_drop_handler = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_over.set(false);

        if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
            deliver(list, on_files);
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        if let Some(list) = input.files() {
            deliver(list, on_files);
        }
        // Reset so picking the same file again still fires
        input.set_value("");
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div
            class=move || if is_over.get() { "drop-zone active" } else { "drop-zone" }
            role="button"
            tabindex="0"
            aria-label="Upload files"
            on:click=open_picker
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Enter" || ev.key() == " " {
                    if let Some(input) = input_ref.get() {
                        input.click();
                    }
                }
            }
            on:dragover=on_dragover
            on:dragenter=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop_handler
        >
            <div class="drop-zone-text">
                {move || if is_over.get() { "Drop files to upload".to_string() } else { hint.clone() }}
            </div>
            <input
                node_ref=input_ref
                type="file"
                class="hidden"
                multiple=multiple
                accept=accept
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
        </div>
    }
}
