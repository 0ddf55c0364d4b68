mod api;
mod components;
mod config;
mod error;
mod orchestrator;
mod prediction;
mod results;
mod status;
mod upload;

use api::ApiClient;
use components::header::render_header;
use components::results::render_results;
use components::status_badge::{ModelInfoCard, ModelStatusBadge};
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use config::ApiConfig;
use error::ApiError;
use gloo_file::File as GlooFile;
use orchestrator::{Effect, Event, Orchestrator, OrchestratorState};
use prediction::SegmentationResult;
use results::ViewKind;
use shared::Modality;
use wasm_bindgen_futures::spawn_local;
use web_sys::AbortController;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // File operations
    SelectFile(Modality, Option<GlooFile>),
    RejectFile(Modality, String),
    SetDragging(Option<Modality>),

    // Prediction lifecycle
    Submit,
    PredictionResolved {
        generation: u64,
        outcome: Result<SegmentationResult, ApiError>,
    },
    Reset,

    // Results
    SelectView(ViewKind),
}

// Main component
pub struct Model {
    client: ApiClient,
    orchestrator: Orchestrator<GlooFile>,
    active_view: ViewKind,
    dragging: Option<Modality>,
    notice: Option<String>,
    in_flight: Option<AbortController>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = ApiConfig::from_env();
        log::info!("Using segmentation service at {}", config.base_url);

        Self {
            client: ApiClient::new(config),
            orchestrator: Orchestrator::new(),
            active_view: ViewKind::Modalities,
            dragging: None,
            notice: None,
            in_flight: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectFile(slot, file) => {
                self.notice = None;
                self.dragging = None;
                self.dispatch(ctx, Event::SetFile(slot, file));
                true
            }
            Msg::RejectFile(slot, name) => {
                log::warn!("Rejected {} for {}: not a NIfTI file", name, slot);
                self.dragging = None;
                self.notice = Some(format!(
                    "{} must be a NIfTI file (.nii or .nii.gz); skipped {}",
                    slot.label(),
                    name
                ));
                true
            }
            Msg::SetDragging(slot) => {
                let changed = self.dragging != slot;
                self.dragging = slot;
                changed
            }
            Msg::Submit => {
                self.notice = None;
                self.dispatch(ctx, Event::Submit);
                true
            }
            Msg::PredictionResolved {
                generation,
                outcome,
            } => {
                self.in_flight = None;
                self.active_view = ViewKind::Modalities;
                self.dispatch(ctx, Event::Resolved {
                    generation,
                    outcome,
                });
                true
            }
            Msg::Reset => {
                self.notice = None;
                self.dispatch(ctx, Event::Reset);
                true
            }
            Msg::SelectView(kind) => {
                let changed = self.active_view != kind;
                self.active_view = kind;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header(&self.client) }

                <main class="main-content">
                    <div class="model-status">
                        <ModelStatusBadge client={self.client.clone()} />
                    </div>
                    { render_error_message(self) }
                    {
                        match self.orchestrator.state() {
                            OrchestratorState::Succeeded(result) => render_results(self, ctx, result),
                            _ => render_upload_section(self, ctx),
                        }
                    }
                    <ModelInfoCard client={self.client.clone()} />
                </main>

                <footer class="app-footer">
                    <p>{"Brain Tumor Segmentation | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(controller) = self.in_flight.take() {
            log::info!("Aborting in-flight prediction");
            controller.abort();
        }
    }
}

impl Model {
    fn dispatch(&mut self, ctx: &Context<Self>, event: Event<GlooFile>) {
        if let Some(effect) = self.orchestrator.dispatch(event) {
            self.run_effect(ctx, effect);
        }
    }

    fn run_effect(&mut self, ctx: &Context<Self>, effect: Effect<GlooFile>) {
        match effect {
            Effect::Predict {
                generation,
                request,
            } => {
                let controller = AbortController::new().ok();
                self.in_flight = controller.clone();

                let client = self.client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let outcome = client.predict(&request, controller.as_ref()).await;
                    link.send_message(Msg::PredictionResolved {
                        generation,
                        outcome,
                    });
                });
            }
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
