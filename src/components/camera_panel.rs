use leptos::html::{Canvas, Video};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::browser::renderer::PageState;
use crate::browser::PageController;

/// Camera button, live preview and capture button.
#[component]
pub fn CameraPanel(
    controller: StoredValue<PageController, LocalStorage>,
    state: PageState,
    video_ref: NodeRef<Video>,
    canvas_ref: NodeRef<Canvas>,
) -> impl IntoView {
    let on_start = move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.start_camera().await;
        });
    };

    let on_capture = move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.capture_frame().await;
        });
    };

    view! {
        <div class="camera-section">
            <button id="cameraBtn" class="btn btn-secondary" on:click=on_start>
                "Use Camera"
            </button>

            <div
                id="cameraPreview"
                class="camera-preview"
                class:hidden=move || !state.preview_visible.get()
            >
                <video node_ref=video_ref id="video" autoplay=true muted=true></video>
                <button id="captureBtn" class="btn btn-primary" on:click=on_capture>
                    "Capture"
                </button>
            </div>

            <canvas node_ref=canvas_ref id="canvas" class="hidden"></canvas>
        </div>
    }
}
