//! Analysis result display.
//!
//! Shows the predicted waste type, confidence, category badge, disposal
//! guidance, the safety notice for medical/hazardous items, and the ranked
//! prediction bars.

use leptos::prelude::*;

use crate::browser::renderer::{PageState, RESULT_SECTION_ID};
use crate::view::{PredictionBar, ResultView};

#[component]
pub fn ResultSection(state: PageState) -> impl IntoView {
    view! {
        <section
            id=RESULT_SECTION_ID
            class="result-section"
            class:hidden=move || state.result.with(|r| r.is_none())
        >
            {move || state.result.get().map(|result| view! { <ResultCard result=result /> })}
        </section>
    }
}

#[component]
fn ResultCard(result: ResultView) -> impl IntoView {
    let ResultView {
        label,
        confidence_percent,
        category,
        style,
        disposal_guide,
        show_safety_notice,
        bars,
    } = result;

    let card_class = match style.css_class() {
        Some(extra) => format!("result-card {}", extra),
        None => "result-card".to_string(),
    };
    let hide_safety = !show_safety_notice;

    view! {
        <div class=card_class>
            <div class="result-header">
                <h2 id="wasteType" class="waste-type">{label}</h2>
                <span id="confidence" class="confidence">{format!("{}%", confidence_percent)}</span>
            </div>
            <span id="categoryBadge" class="category-badge">{category}</span>

            <div class="disposal-section">
                <h3>"How to dispose"</h3>
                <p id="disposalGuide" class="disposal-guide">{disposal_guide}</p>
            </div>

            <div id="safetyInfo" class="safety-info" class:hidden=hide_safety>
                <h3>"Safety Notice"</h3>
                <p>
                    "This item needs special handling. Do not place it in household bins; "
                    "use gloves and take it to an approved collection point."
                </p>
            </div>

            <div id="predictionBars" class="prediction-bars">
                <h3>"All Predictions"</h3>
                {bars.into_iter().map(|bar| view! { <PredictionBarRow bar=bar /> }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}

#[component]
fn PredictionBarRow(bar: PredictionBar) -> impl IntoView {
    let fill_style = format!("width: {:.1}%", bar.width);

    view! {
        <div class="prediction-bar">
            <div class="bar-label">
                <span>{bar.label}</span>
                <span>{format!("{}%", bar.percent)}</span>
            </div>
            <div class="bar-container">
                <div class="bar-fill" style=fill_style></div>
            </div>
        </div>
    }
}
