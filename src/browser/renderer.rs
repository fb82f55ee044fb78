use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::controller::Renderer;
use crate::view::{HistoryView, ResultView};

/// Element id of the result section, scrolled into view after each analysis.
pub const RESULT_SECTION_ID: &str = "resultSection";

/// Reactive page state. Components read it; the controller writes it.
#[derive(Clone, Copy)]
pub struct PageState {
    pub loading: RwSignal<bool>,
    pub preview_visible: RwSignal<bool>,
    pub result: RwSignal<Option<ResultView>>,
    pub history: RwSignal<HistoryView>,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            preview_visible: RwSignal::new(false),
            result: RwSignal::new(None),
            history: RwSignal::new(HistoryView::default()),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PageState {
    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    fn show_preview(&self, visible: bool) {
        self.preview_visible.set(visible);
    }

    fn show_result(&self, result: ResultView) {
        self.result.set(Some(result));
        // Wait for the section to be rendered before scrolling to it.
        request_animation_frame(|| {
            if let Some(section) = document().get_element_by_id(RESULT_SECTION_ID) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                section.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
    }

    fn show_history(&self, history: HistoryView) {
        self.history.set(history);
    }

    fn alert(&self, message: &str) {
        let _ = window().alert_with_message(message);
    }
}
