use crate::error::ApiError;
use shared::{HealthStatus, ModelInfo, ModelStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Ready,
    Warning,
    Missing,
}

impl BadgeTone {
    pub fn class(self) -> &'static str {
        match self {
            BadgeTone::Ready => "status-badge ready",
            BadgeTone::Warning => "status-badge warning",
            BadgeTone::Missing => "status-badge missing",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusBadge {
    pub tone: BadgeTone,
    pub text: String,
}

impl StatusBadge {
    pub fn for_model(status: &ModelStatus) -> Self {
        match (status.exists, status.loaded) {
            (_, true) => Self {
                tone: BadgeTone::Ready,
                text: match status.input_channels {
                    Some(channels) => format!("Model loaded ({} channels)", channels),
                    None => "Model loaded".to_string(),
                },
            },
            (true, false) => Self {
                tone: BadgeTone::Warning,
                text: "Model found but not loaded".to_string(),
            },
            (false, false) => Self {
                tone: BadgeTone::Missing,
                text: "Model file missing".to_string(),
            },
        }
    }

    pub fn for_service(health: &HealthStatus) -> Self {
        let tone = if health.status.eq_ignore_ascii_case("healthy") {
            BadgeTone::Ready
        } else {
            BadgeTone::Warning
        };
        Self {
            tone,
            text: format!("{} v{}", health.service, health.version),
        }
    }
}

/// Advisory lookups never surface errors to the user: failures are logged and dropped.
pub fn settle<T>(what: &str, outcome: Result<T, ApiError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Failed to fetch {}: {}", what, err);
            None
        }
    }
}

/// Label/value pairs for the "About the model" card; absent fields are skipped.
pub fn model_info_rows(info: &ModelInfo) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        (
            "Status",
            if info.model_loaded {
                "Loaded".to_string()
            } else {
                "Not loaded".to_string()
            },
        ),
        ("Input channels", info.input_channels.to_string()),
    ];
    if let Some(classes) = info.output_classes {
        rows.push(("Output classes", classes.to_string()));
    }
    if let Some(size) = info.target_size {
        rows.push(("Target size", format!("{}×{}", size, size)));
    }
    if let Some(slices) = info.volume_slices {
        rows.push(("Volume slices", slices.to_string()));
    }
    if let Some(device) = &info.device {
        rows.push(("Device", device.clone()));
    }
    if let Some(path) = &info.model_path {
        rows.push(("Checkpoint", path.clone()));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_status(exists: bool, loaded: bool) -> ModelStatus {
        ModelStatus {
            model_path: "models/brats_unet.pth".into(),
            exists,
            loaded,
            input_channels: Some(2),
        }
    }

    #[test]
    fn loaded_model_reports_channels() {
        let badge = StatusBadge::for_model(&model_status(true, true));
        assert_eq!(badge.tone, BadgeTone::Ready);
        assert_eq!(badge.text, "Model loaded (2 channels)");
    }

    #[test]
    fn unloaded_and_missing_models_are_distinguished() {
        assert_eq!(
            StatusBadge::for_model(&model_status(true, false)).tone,
            BadgeTone::Warning
        );
        assert_eq!(
            StatusBadge::for_model(&model_status(false, false)).text,
            "Model file missing"
        );
    }

    #[test]
    fn service_badge_shows_name_and_version() {
        let badge = StatusBadge::for_service(&HealthStatus {
            status: "healthy".into(),
            service: "brain-tumor-segmentation-api".into(),
            version: "2.0.0".into(),
            framework: Some("pytorch".into()),
        });
        assert_eq!(badge.tone, BadgeTone::Ready);
        assert_eq!(badge.text, "brain-tumor-segmentation-api v2.0.0");
    }

    #[test]
    fn failed_lookup_settles_to_nothing() {
        let outcome: Result<ModelStatus, ApiError> =
            Err(ApiError::Network("connection refused".into()));
        assert_eq!(settle("model status", outcome), None);

        let ok = settle("model status", Ok(model_status(true, true)));
        assert_eq!(ok.map(|s| s.loaded), Some(true));
    }

    #[test]
    fn info_rows_skip_absent_fields() {
        let info = ModelInfo {
            model_loaded: false,
            input_channels: 2,
            model_path: None,
            model_exists: None,
            device: None,
            output_classes: Some(4),
            target_size: Some(128),
            volume_slices: None,
        };
        let rows = model_info_rows(&info);
        assert_eq!(
            rows,
            vec![
                ("Status", "Not loaded".to_string()),
                ("Input channels", "2".to_string()),
                ("Output classes", "4".to_string()),
                ("Target size", "128×128".to_string()),
            ]
        );
    }
}
