use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::prediction::SegmentationResult;
use crate::upload::PredictionRequest;
use futures::future::{Either, select};
use futures::pin_mut;
use gloo_file::File as GlooFile;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use shared::{HealthStatus, ModelInfo, ModelStatus, PredictionResponse};
use std::future::Future;
use web_sys::{AbortController, FormData};

/// Thin client for the segmentation service. One call, one round-trip; no retries.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health/").await
    }

    pub async fn model_status(&self) -> Result<ModelStatus, ApiError> {
        self.get_json("/health/model").await
    }

    pub async fn model_info(&self) -> Result<ModelInfo, ApiError> {
        self.get_json("/predict/model-info").await
    }

    /// Uploads every file in `request` as a multipart field named after its modality.
    ///
    /// Performs no validation of its own; the caller decides when a request is
    /// ready. `abort` lets the owner cancel the upload when it goes away; it is
    /// also triggered when the prediction deadline passes.
    pub async fn predict(
        &self,
        request: &PredictionRequest<GlooFile>,
        abort: Option<&AbortController>,
    ) -> Result<SegmentationResult, ApiError> {
        let form_data = FormData::new()
            .map_err(|e| ApiError::Network(format!("Could not create form data: {:?}", e)))?;
        for (modality, file) in request.files() {
            log::info!("[API] Attaching {} ({} bytes)", file.name(), file.size());
            let raw: &web_sys::File = file.as_ref();
            form_data
                .append_with_blob_and_filename(modality.as_ref(), raw, &file.name())
                .map_err(|e| {
                    ApiError::Network(format!("Could not attach {}: {:?}", modality.label(), e))
                })?;
        }

        let url = self.config.endpoint("/predict/");
        log::info!("[API] POST {}", url);
        let signal = abort.map(|controller| controller.signal());
        let request = Request::post(&url)
            .abort_signal(signal.as_ref())
            .body(form_data)?;
        let (status, body) =
            with_deadline(exchange(request), self.config.prediction_timeout_ms, abort).await?;

        log::info!("[API] Response: {} {}", status, url);
        decode_prediction(status, &body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        log::info!("[API] GET {}", url);

        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        let request = RequestBuilder::new(&url).abort_signal(signal.as_ref()).build()?;
        let (status, body) = with_deadline(
            exchange(request),
            self.config.request_timeout_ms,
            controller.as_ref(),
        )
        .await?;

        log::info!("[API] Response: {} {}", status, url);
        decode_json(status, &body)
    }
}

/// Sends the request and reads the whole body, so one deadline covers both.
async fn exchange(request: Request) -> Result<(u16, String), ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

/// Races `work` against a timer. On expiry the optional controller aborts the fetch.
async fn with_deadline<T, W>(
    work: W,
    timeout_ms: u32,
    controller: Option<&AbortController>,
) -> Result<T, ApiError>
where
    W: Future<Output = Result<T, ApiError>>,
{
    race_deadline(work, TimeoutFuture::new(timeout_ms), timeout_ms, controller).await
}

async fn race_deadline<T, W, D>(
    work: W,
    deadline: D,
    timeout_ms: u32,
    controller: Option<&AbortController>,
) -> Result<T, ApiError>
where
    W: Future<Output = Result<T, ApiError>>,
    D: Future<Output = ()>,
{
    pin_mut!(work, deadline);

    match select(work, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::error!("[API] Request exceeded {} ms", timeout_ms);
            if let Some(controller) = controller {
                controller.abort();
            }
            Err(ApiError::Timeout {
                after_ms: timeout_ms,
            })
        }
    }
}

pub fn decode_json<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        log::error!("[API] Response error: {} {}", status, body);
        return Err(ApiError::server(status, body.to_string()));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Validation(e.to_string()))
}

pub fn decode_prediction(status: u16, body: &str) -> Result<SegmentationResult, ApiError> {
    let response: PredictionResponse = decode_json(status, body)?;
    SegmentationResult::from_response(response)
}
