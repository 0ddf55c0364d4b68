use crate::error::ApiError;
use shared::{CLASS_LABELS, PredictionResponse};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TumorStatisticsEntry {
    pub pixel_count: u64,
    pub percentage: f64,
}

/// A validated successful prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationResult {
    pub status: String,
    pub message: Option<String>,
    /// `Some(false)` when the service ran preprocessing only.
    pub model_loaded: Option<bool>,
    pub segmentation_mask: Option<String>,
    pub mask_image: Option<String>,
    pub overlay_image: Option<String>,
    pub modality_images: Vec<String>,
    pub comparison_images: Vec<String>,
    pub statistics_chart: Option<String>,
    /// Ordered by class index, unknown labels last.
    pub statistics: Vec<(String, TumorStatisticsEntry)>,
    pub processed_slices: u32,
    pub model_used: String,
    pub input_shape: Vec<u32>,
}

impl SegmentationResult {
    pub fn from_response(response: PredictionResponse) -> Result<Self, ApiError> {
        if response.success == Some(false) {
            return Err(rejected(&response, "service reported failure"));
        }
        let status = match (&response.status, response.success) {
            (Some(status), _) if status.eq_ignore_ascii_case("success") => status.clone(),
            (Some(status), _) => {
                return Err(rejected(&response, &format!("unexpected status \"{}\"", status)));
            }
            (None, Some(true)) => "success".to_string(),
            (None, _) => {
                return Err(ApiError::Validation(
                    "missing both `status` and `success`".into(),
                ));
            }
        };

        let raw_stats = response
            .class_statistics()
            .ok_or_else(|| ApiError::Validation("missing class statistics".into()))?;

        let mut statistics = Vec::with_capacity(raw_stats.len());
        for (label, stats) in raw_stats {
            if !stats.percentage.is_finite() || !(0.0..=100.0).contains(&stats.percentage) {
                return Err(ApiError::Validation(format!(
                    "percentage for \"{}\" out of range: {}",
                    label, stats.percentage
                )));
            }
            statistics.push((
                label.clone(),
                TumorStatisticsEntry {
                    pixel_count: stats.pixel_count,
                    percentage: stats.percentage,
                },
            ));
        }
        statistics.sort_by_key(|(label, _)| class_rank(label));

        Ok(Self {
            status,
            message: response.message.filter(|m| !m.trim().is_empty()),
            model_loaded: response.model_loaded,
            segmentation_mask: non_blank(response.segmentation_mask),
            mask_image: non_blank(response.mask_image),
            overlay_image: non_blank(response.overlay_image),
            modality_images: response.modality_images,
            comparison_images: response.comparison_images,
            statistics_chart: non_blank(response.statistics_chart),
            statistics,
            processed_slices: response.processed_slices.unwrap_or(0),
            model_used: response.model_used.unwrap_or_else(|| "unknown".into()),
            input_shape: response.input_shape,
        })
    }
}

/// Known classes sort by label index; anything else keeps map order after them.
fn class_rank(label: &str) -> usize {
    CLASS_LABELS
        .iter()
        .position(|(known, _)| known.eq_ignore_ascii_case(label))
        .unwrap_or(CLASS_LABELS.len())
}

pub fn class_color(label: &str) -> Option<&'static str> {
    CLASS_LABELS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(label))
        .map(|(_, color)| *color)
}

fn non_blank(reference: Option<String>) -> Option<String> {
    reference.filter(|r| !r.trim().is_empty())
}

/// A well-formed body in which the service declined the job. Its own reason is kept verbatim.
fn rejected(response: &PredictionResponse, fallback: &str) -> ApiError {
    let reason = [&response.detail, &response.message]
        .into_iter()
        .flatten()
        .find(|reason| !reason.trim().is_empty());
    match reason {
        Some(detail) => ApiError::Rejected {
            detail: detail.clone(),
        },
        None => ApiError::Validation(fallback.to_string()),
    }
}
