use crate::config::ApiConfig;
use crate::prediction::{SegmentationResult, class_color};

const MODALITY_CAPTIONS: [&str; 2] = ["FLAIR", "T1CE"];
const COMPARISON_CAPTIONS: [&str; 3] = ["Original", "Mask", "Overlay"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Modalities,
    Mask,
    Overlay,
    Comparison,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Modalities,
        ViewKind::Mask,
        ViewKind::Overlay,
        ViewKind::Comparison,
    ];

    pub fn tab_label(self) -> &'static str {
        match self {
            ViewKind::Modalities => "Modalities",
            ViewKind::Mask => "Mask",
            ViewKind::Overlay => "Overlay",
            ViewKind::Comparison => "Comparison",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Modalities => "Input Modalities",
            ViewKind::Mask => "Predicted Segmentation Mask",
            ViewKind::Overlay => "MRI with Tumor Overlay",
            ViewKind::Comparison => "Comparison View",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            ViewKind::Modalities => "No modality previews available",
            ViewKind::Mask => "No mask available (model not loaded)",
            ViewKind::Overlay => "No overlay available (model not loaded)",
            ViewKind::Comparison => "No comparison available (model not loaded)",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageTile {
    pub src: String,
    pub caption: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewContent {
    Images(Vec<ImageTile>),
    Unavailable(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub kind: ViewKind,
    pub content: ViewContent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatisticsRow {
    pub label: String,
    pub percentage: String,
    pub pixel_count: String,
    pub color: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultSummary {
    pub processed_slices: u32,
    pub model_used: String,
    pub input_shape: Option<String>,
    pub model_active: bool,
    pub message: Option<String>,
    pub mask_download: Option<String>,
    pub statistics_chart: Option<String>,
}

/// Everything the results panel shows, derived from one successful prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsView {
    pub summary: ResultSummary,
    pub views: [ResultView; 4],
    pub statistics: Vec<StatisticsRow>,
}

impl ResultsView {
    pub fn project(result: &SegmentationResult, config: &ApiConfig) -> Self {
        let views = ViewKind::ALL.map(|kind| {
            let tiles = match kind {
                ViewKind::Modalities => gallery(
                    config,
                    &result.modality_images,
                    &MODALITY_CAPTIONS,
                    "Modality",
                ),
                ViewKind::Mask => single(config, result.mask_image.as_deref(), "Segmentation Mask"),
                ViewKind::Overlay => single(config, result.overlay_image.as_deref(), "Overlay"),
                ViewKind::Comparison => gallery(
                    config,
                    &result.comparison_images,
                    &COMPARISON_CAPTIONS,
                    "Comparison",
                ),
            };
            let content = if tiles.is_empty() {
                ViewContent::Unavailable(kind.placeholder())
            } else {
                ViewContent::Images(tiles)
            };
            ResultView { kind, content }
        });

        let statistics = result
            .statistics
            .iter()
            .map(|(label, entry)| StatisticsRow {
                label: label.clone(),
                percentage: format!("{:.1}%", entry.percentage),
                pixel_count: group_thousands(entry.pixel_count),
                color: class_color(label),
            })
            .collect();

        let summary = ResultSummary {
            processed_slices: result.processed_slices,
            model_used: result.model_used.clone(),
            input_shape: format_shape(&result.input_shape),
            model_active: result.model_loaded.unwrap_or(true),
            message: result.message.clone(),
            mask_download: result
                .segmentation_mask
                .as_deref()
                .map(|r| config.resolve_asset(r)),
            statistics_chart: result
                .statistics_chart
                .as_deref()
                .map(|r| config.resolve_asset(r)),
        };

        Self {
            summary,
            views,
            statistics,
        }
    }

    pub fn view(&self, kind: ViewKind) -> &ResultView {
        self.views
            .iter()
            .find(|view| view.kind == kind)
            .unwrap_or(&self.views[0])
    }
}

fn gallery(
    config: &ApiConfig,
    images: &[String],
    captions: &[&str],
    fallback: &str,
) -> Vec<ImageTile> {
    images
        .iter()
        .enumerate()
        .map(|(idx, image)| ImageTile {
            src: config.resolve_asset(image),
            caption: captions
                .get(idx)
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("{} {}", fallback, idx + 1)),
        })
        .collect()
}

fn single(config: &ApiConfig, reference: Option<&str>, caption: &str) -> Vec<ImageTile> {
    reference
        .map(|r| ImageTile {
            src: config.resolve_asset(r),
            caption: caption.to_string(),
        })
        .into_iter()
        .collect()
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Megabytes with two decimals, as shown next to a selected file.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn format_shape(shape: &[u32]) -> Option<String> {
    if shape.is_empty() {
        return None;
    }
    Some(
        shape
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" × "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::TumorStatisticsEntry;

    fn config() -> ApiConfig {
        ApiConfig::with_base_url("http://localhost:8000")
    }

    fn result_with_stats() -> SegmentationResult {
        SegmentationResult {
            status: "success".into(),
            message: None,
            model_loaded: None,
            segmentation_mask: Some("/outputs/segmentation_7c.nii.gz".into()),
            mask_image: Some("/outputs/mask_7c.png".into()),
            overlay_image: Some("/outputs/overlay_7c.png".into()),
            modality_images: vec!["/outputs/flair_7c.png".into(), "/outputs/t1ce_7c.png".into()],
            comparison_images: vec![],
            statistics_chart: None,
            statistics: vec![
                (
                    "Non-tumor".into(),
                    TumorStatisticsEntry {
                        pixel_count: 900_000,
                        percentage: 90.0,
                    },
                ),
                (
                    "Edema".into(),
                    TumorStatisticsEntry {
                        pixel_count: 100_000,
                        percentage: 10.0,
                    },
                ),
            ],
            processed_slices: 100,
            model_used: "brats_unet.pth".into(),
            input_shape: vec![240, 240, 155],
        }
    }

    #[test]
    fn statistics_render_one_row_per_class() {
        let view = ResultsView::project(&result_with_stats(), &config());

        assert_eq!(
            view.statistics,
            vec![
                StatisticsRow {
                    label: "Non-tumor".into(),
                    percentage: "90.0%".into(),
                    pixel_count: "900,000".into(),
                    color: Some("#000000"),
                },
                StatisticsRow {
                    label: "Edema".into(),
                    percentage: "10.0%".into(),
                    pixel_count: "100,000".into(),
                    color: Some("#FFC0CB"),
                },
            ]
        );
    }

    #[test]
    fn missing_images_become_placeholders_in_every_slot() {
        let mut result = result_with_stats();
        result.mask_image = None;
        result.overlay_image = None;

        let view = ResultsView::project(&result, &config());

        let kinds: Vec<ViewKind> = view.views.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, ViewKind::ALL.to_vec());
        assert_eq!(
            view.view(ViewKind::Mask).content,
            ViewContent::Unavailable("No mask available (model not loaded)")
        );
        assert_eq!(
            view.view(ViewKind::Overlay).content,
            ViewContent::Unavailable("No overlay available (model not loaded)")
        );
        assert_eq!(
            view.view(ViewKind::Comparison).content,
            ViewContent::Unavailable("No comparison available (model not loaded)")
        );
        assert!(matches!(
            view.view(ViewKind::Modalities).content,
            ViewContent::Images(_)
        ));
    }

    #[test]
    fn image_references_resolve_against_base_url() {
        let view = ResultsView::project(&result_with_stats(), &config());

        assert_eq!(
            view.view(ViewKind::Overlay).content,
            ViewContent::Images(vec![ImageTile {
                src: "http://localhost:8000/outputs/overlay_7c.png".into(),
                caption: "Overlay".into(),
            }])
        );
        match &view.view(ViewKind::Modalities).content {
            ViewContent::Images(tiles) => {
                let captions: Vec<&str> = tiles.iter().map(|t| t.caption.as_str()).collect();
                assert_eq!(captions, vec!["FLAIR", "T1CE"]);
            }
            other => panic!("unexpected content {:?}", other),
        }
        assert_eq!(
            view.summary.mask_download.as_deref(),
            Some("http://localhost:8000/outputs/segmentation_7c.nii.gz")
        );
    }

    #[test]
    fn summary_reports_shape_and_mode() {
        let mut result = result_with_stats();
        result.model_loaded = Some(false);
        result.message = Some("Preprocessing only".into());

        let summary = ResultsView::project(&result, &config()).summary;

        assert_eq!(summary.input_shape.as_deref(), Some("240 × 240 × 155"));
        assert!(!summary.model_active);
        assert_eq!(summary.message.as_deref(), Some("Preprocessing only"));
    }

    #[test]
    fn extra_modality_images_get_numbered_captions() {
        let mut result = result_with_stats();
        result.modality_images.push("/outputs/extra_7c.png".into());

        let view = ResultsView::project(&result, &config());

        match &view.view(ViewKind::Modalities).content {
            ViewContent::Images(tiles) => {
                let captions: Vec<&str> = tiles.iter().map(|t| t.caption.as_str()).collect();
                assert_eq!(captions, vec!["FLAIR", "T1CE", "Modality 3"]);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(8_928_000), "8,928,000");
    }

    #[test]
    fn megabytes_have_two_decimals() {
        assert_eq!(format_megabytes(3 * 1024 * 1024 / 2), "1.50 MB");
    }
}
