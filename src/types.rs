//! Wire types exchanged with the analysis service, plus the image payload
//! produced by the upload and camera paths.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of a single `/analyze` call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    /// Snake-case token, e.g. `recyclable_plastic`.
    pub waste_type: String,
    pub confidence: f64,
    /// Coarse bucket such as "Recyclable" or "Medical Waste".
    pub category: String,
    pub disposal_guide: String,
    /// Per-token confidences. Absent or `null` means no breakdown.
    #[serde(default)]
    pub all_predictions: Option<BTreeMap<String, f64>>,
}

/// One row of the service-side analysis log.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub waste_type: String,
    pub confidence: f64,
    pub timestamp: String,
}

/// Image bytes ready to be sent as the multipart `file` field.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl CapturedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// A camera snapshot, always encoded as JPEG.
    pub fn camera_snapshot(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "image/jpeg", "capture.jpg")
    }
}

/// Visual treatment of a result card, derived from its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStyle {
    Standard,
    Medical,
    Hazardous,
}

impl CategoryStyle {
    pub fn from_category(category: &str) -> Self {
        match category {
            "Medical Waste" => CategoryStyle::Medical,
            "Hazardous Waste" => CategoryStyle::Hazardous,
            _ => CategoryStyle::Standard,
        }
    }

    /// Extra class applied to the result card, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            CategoryStyle::Standard => None,
            CategoryStyle::Medical => Some("medical-waste"),
            CategoryStyle::Hazardous => Some("hazardous-waste"),
        }
    }

    pub fn requires_safety_notice(self) -> bool {
        !matches!(self, CategoryStyle::Standard)
    }
}
