//! Render data built from service responses.
//!
//! Everything here is pure so the controller can be exercised without a DOM;
//! the Leptos components only read these structs.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::types::{AnalysisResult, CategoryStyle, HistoryEntry};

/// Turn a snake-case token into Title Case words: `plastic_bottle` -> `Plastic Bottle`.
pub fn format_waste_type(token: &str) -> String {
    token
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Confidence in [0,1] as a whole percent.
pub fn confidence_percent(confidence: f64) -> u32 {
    let pct = (confidence * 100.0).round();
    if pct.is_finite() && pct > 0.0 {
        pct as u32
    } else {
        0
    }
}

/// Localized display of a history timestamp.
///
/// Offset timestamps are shifted into local time; naive ones are already
/// local. Anything unparseable is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return format_local(dt.with_timezone(&Local).naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return format_local(naive);
        }
    }
    raw.to_string()
}

fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// One bar in the ranked prediction list.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionBar {
    pub waste_type: String,
    pub label: String,
    pub percent: u32,
    /// Fill width in percent, within [0, 100].
    pub width: f64,
}

impl PredictionBar {
    fn new(waste_type: &str, confidence: f64) -> Self {
        let width = if confidence.is_finite() {
            (confidence * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            waste_type: waste_type.to_string(),
            label: format_waste_type(waste_type),
            percent: confidence_percent(confidence),
            width,
        }
    }
}

/// Everything the result section shows for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub label: String,
    pub confidence_percent: u32,
    pub category: String,
    pub style: CategoryStyle,
    pub disposal_guide: String,
    pub show_safety_notice: bool,
    /// Sorted by descending confidence.
    pub bars: Vec<PredictionBar>,
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let style = CategoryStyle::from_category(&result.category);

        let mut ranked: Vec<(&String, f64)> = result
            .all_predictions
            .iter()
            .flatten()
            .map(|(token, confidence)| (token, *confidence))
            .collect();
        // Stable sort over token-ordered input, so ties stay alphabetical.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        Self {
            label: format_waste_type(&result.waste_type),
            confidence_percent: confidence_percent(result.confidence),
            category: result.category.clone(),
            style,
            disposal_guide: result.disposal_guide.clone(),
            show_safety_notice: style.requires_safety_notice(),
            bars: ranked
                .into_iter()
                .map(|(token, confidence)| PredictionBar::new(token, confidence))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub label: String,
    pub timestamp: String,
    pub confidence_percent: u32,
}

/// The rendered history list, in the order the service returned it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryView {
    pub rows: Vec<HistoryRow>,
}

impl HistoryView {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        Self {
            rows: entries
                .iter()
                .map(|entry| HistoryRow {
                    label: format_waste_type(&entry.waste_type),
                    timestamp: format_timestamp(&entry.timestamp),
                    confidence_percent: confidence_percent(entry.confidence),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
