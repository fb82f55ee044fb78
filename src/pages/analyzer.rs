//! Waste analyzer page: upload or capture a photo, see the result and the
//! analysis history.

use leptos::html::{Canvas, Video};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpAnalysisApi;
use crate::browser::camera::BrowserCamera;
use crate::browser::client_config;
use crate::browser::renderer::PageState;
use crate::components::camera_panel::CameraPanel;
use crate::components::history_list::HistoryList;
use crate::components::result_card::ResultSection;
use crate::components::upload_area::UploadArea;
use crate::controller::Controller;

#[component]
pub fn AnalyzerPage() -> impl IntoView {
    let state = PageState::new();
    let video_ref = NodeRef::<Video>::new();
    let canvas_ref = NodeRef::<Canvas>::new();

    let controller = StoredValue::new_local(Controller::new(
        HttpAnalysisApi::new(client_config()),
        BrowserCamera::new(video_ref, canvas_ref),
        state,
    ));

    // Load history on mount
    Effect::new(move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.load_history().await;
        });
    });

    view! {
        <div class="page analyzer-page">
            <h2>"Waste Analyzer"</h2>
            <p class="page-description">
                "Upload or capture a photo to identify the waste type and how to dispose of it."
            </p>

            <div class="input-section">
                <UploadArea controller=controller />
                <CameraPanel
                    controller=controller
                    state=state
                    video_ref=video_ref
                    canvas_ref=canvas_ref
                />
            </div>

            <div id="loading" class="loading-indicator" class:hidden=move || !state.loading.get()>
                <div class="spinner"></div>
                <p>"Analyzing image..."</p>
            </div>

            <ResultSection state=state />
            <HistoryList state=state />
        </div>
    }
}
