use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// MRI acquisition sequences accepted by the prediction endpoint.
///
/// The serialized form doubles as the multipart field name.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    Flair,
    T1ce,
}

impl Modality {
    pub fn label(self) -> &'static str {
        match self {
            Modality::Flair => "FLAIR",
            Modality::T1ce => "T1CE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Modality::Flair => "T2-FLAIR - Fluid Attenuated Inversion Recovery",
            Modality::T1ce => "T1CE - T1 with Gadolinium contrast enhancement",
        }
    }

    pub fn required(self) -> bool {
        true
    }
}

/// Segmentation classes in label-index order, with their display colours.
pub const CLASS_LABELS: [(&str, &str); 4] = [
    ("Non-tumor", "#000000"),
    ("Necrotic/Core", "#0000FF"),
    ("Edema", "#FFC0CB"),
    ("Enhancing Tumor", "#00FFFF"),
];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    #[serde(default)]
    pub framework: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelStatus {
    pub model_path: String,
    #[serde(alias = "model_exists")]
    pub exists: bool,
    #[serde(alias = "model_loaded")]
    pub loaded: bool,
    #[serde(default)]
    pub input_channels: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelInfo {
    pub model_loaded: bool,
    pub input_channels: u32,
    #[serde(default)]
    pub model_path: Option<String>,
    #[serde(default)]
    pub model_exists: Option<bool>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub output_classes: Option<u32>,
    #[serde(default)]
    pub target_size: Option<u32>,
    #[serde(default)]
    pub volume_slices: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ClassStatistics {
    pub pixel_count: u64,
    pub percentage: f64,
}

/// Raw body of `POST /api/predict/`.
///
/// The service has shipped two shapes (`status`/`tumor_stats`/`segmentation_mask`
/// and `success`/`statistics`/`mask_image`), so everything is optional here and
/// the client validates it into one canonical result.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PredictionResponse {
    pub success: Option<bool>,
    pub status: Option<String>,
    pub message: Option<String>,
    pub detail: Option<String>,
    pub model_loaded: Option<bool>,
    pub segmentation_mask: Option<String>,
    pub mask_image: Option<String>,
    pub overlay_image: Option<String>,
    pub modality_images: Vec<String>,
    pub comparison_images: Vec<String>,
    pub statistics_chart: Option<String>,
    pub statistics: Option<BTreeMap<String, ClassStatistics>>,
    pub tumor_stats: Option<BTreeMap<String, ClassStatistics>>,
    pub processed_slices: Option<u32>,
    pub input_shape: Vec<u32>,
    pub model_used: Option<String>,
}

impl PredictionResponse {
    /// Per-class statistics under whichever key the service used.
    pub fn class_statistics(&self) -> Option<&BTreeMap<String, ClassStatistics>> {
        self.statistics.as_ref().or(self.tumor_stats.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn modality_wire_names_match_multipart_fields() {
        let names: Vec<String> = Modality::iter().map(|m| m.as_ref().to_string()).collect();
        assert_eq!(names, vec!["flair", "t1ce"]);
        assert_eq!(Modality::from_str("t1ce").ok(), Some(Modality::T1ce));
        assert_eq!(Modality::T1ce.to_string(), "t1ce");
    }

    #[test]
    fn model_status_accepts_both_field_spellings() {
        let short: ModelStatus = serde_json::from_str(
            r#"{"model_path": "/m.pth", "exists": true, "loaded": false}"#,
        )
        .unwrap();
        let long: ModelStatus = serde_json::from_str(
            r#"{"model_path": "/m.pth", "model_exists": true, "model_loaded": false, "input_channels": 2}"#,
        )
        .unwrap();

        assert!(short.exists && !short.loaded);
        assert_eq!(short.input_channels, None);
        assert!(long.exists && !long.loaded);
        assert_eq!(long.input_channels, Some(2));
    }

    #[test]
    fn prediction_response_reads_tumor_stats_schema() {
        let body = r#"{
            "status": "success",
            "segmentation_mask": "/outputs/segmentation_ab12.nii.gz",
            "overlay_image": null,
            "tumor_stats": {"Edema": {"pixel_count": 10, "percentage": 2.5}},
            "processed_slices": 100,
            "input_shape": [240, 240, 155],
            "model_used": "unet.pth"
        }"#;
        let response: PredictionResponse = serde_json::from_str(body).unwrap();

        let stats = response.class_statistics().unwrap();
        assert_eq!(stats["Edema"].pixel_count, 10);
        assert_eq!(response.input_shape, vec![240, 240, 155]);
        assert!(response.modality_images.is_empty());
    }
}
