//! Upload area with drag-and-drop and a hidden file picker.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::browser::PageController;

const FILE_INPUT_ID: &str = "fileInput";

#[component]
pub fn UploadArea(controller: StoredValue<PageController, LocalStorage>) -> impl IntoView {
    let (is_over, set_is_over) = signal(false);

    let ingest = move |file: web_sys::File| {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.ingest_file(file).await;
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);

        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            ingest(file);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            ingest(file);
        }
        // Let the same file be picked again.
        input.set_value("");
    };

    view! {
        <div
            id="uploadArea"
            class="upload-area"
            class:upload-area-active=move || is_over.get()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                set_is_over.set(true);
            }
            on:dragleave=move |_| set_is_over.set(false)
            on:drop=on_drop
        >
            <div class="upload-content">
                <p class="upload-main">"Drop a photo of your waste item here"</p>
                <p class="upload-hint">"or"</p>
                <label for=FILE_INPUT_ID class="btn btn-secondary">
                    "Browse Files"
                </label>
                <input
                    type="file"
                    id=FILE_INPUT_ID
                    accept="image/jpeg,image/png,image/gif"
                    style="display: none"
                    on:change=on_input_change
                />
                <p class="upload-formats">"JPEG, PNG or GIF, up to 16MB"</p>
            </div>
        </div>
    }
}
