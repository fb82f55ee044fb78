use leptos::prelude::*;

use crate::browser::renderer::PageState;

/// Past analyses, newest first as returned by the service.
#[component]
pub fn HistoryList(state: PageState) -> impl IntoView {
    view! {
        <section class="history-section">
            <h3 class="history-title">"Recent Analyses"</h3>
            {move || {
                let history = state.history.get();
                if history.is_empty() {
                    view! { <p class="history-empty">"No analyses yet."</p> }.into_any()
                } else {
                    view! {
                        <ol id="historyList" class="history-list">
                            {history.rows.into_iter().map(|row| view! {
                                <li class="history-item">
                                    <div>
                                        <div class="history-type">{row.label}</div>
                                        <small>{row.timestamp}</small>
                                    </div>
                                    <div class="history-confidence">
                                        {format!("{}%", row.confidence_percent)}
                                    </div>
                                </li>
                            }).collect::<Vec<_>>()}
                        </ol>
                    }.into_any()
                }
            }}
        </section>
    }
}
