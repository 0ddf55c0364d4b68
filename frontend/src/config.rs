const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Large NIfTI uploads plus inference can take minutes.
pub const PREDICTION_TIMEOUT_MS: u32 = 600_000;
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u32,
    pub prediction_timeout_ms: u32,
}

impl ApiConfig {
    /// Reads `API_BASE_URL` at build time, falling back to the local service.
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL
        } else {
            trimmed
        };

        Self {
            base_url: base_url.to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            prediction_timeout_ms: PREDICTION_TIMEOUT_MS,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Resolves an asset reference returned by the service against the base URL.
    pub fn resolve_asset(&self, reference: &str) -> String {
        if is_absolute(reference) {
            reference.to_string()
        } else if reference.starts_with('/') {
            format!("{}{}", self.base_url, reference)
        } else {
            format!("{}/{}", self.base_url, reference)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("data:")
        || reference.starts_with("blob:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::with_base_url("https://seg.example.org/");
        assert_eq!(config.base_url, "https://seg.example.org");
        assert_eq!(config.endpoint("/predict/"), "https://seg.example.org/api/predict/");
    }

    #[test]
    fn blank_base_url_falls_back_to_local_service() {
        let config = ApiConfig::with_base_url("  ");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.prediction_timeout_ms, 600_000);
    }

    #[test]
    fn asset_references_resolve_against_base() {
        let config = ApiConfig::with_base_url("http://localhost:8000");
        assert_eq!(
            config.resolve_asset("/outputs/overlay_1a2b.png"),
            "http://localhost:8000/outputs/overlay_1a2b.png"
        );
        assert_eq!(
            config.resolve_asset("outputs/mask.png"),
            "http://localhost:8000/outputs/mask.png"
        );
        assert_eq!(
            config.resolve_asset("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
        assert_eq!(
            config.resolve_asset("https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
    }
}
