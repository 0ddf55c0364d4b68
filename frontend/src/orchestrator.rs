use crate::error::ApiError;
use crate::prediction::SegmentationResult;
use crate::upload::{ModalityFileSet, PredictionRequest};
use shared::Modality;

pub const FALLBACK_FAILURE_MESSAGE: &str = "Prediction failed";

#[derive(Clone, Debug, PartialEq)]
pub enum OrchestratorState {
    Idle,
    Submitting,
    Succeeded(SegmentationResult),
    Failed(String),
}

pub enum Event<F> {
    SetFile(Modality, Option<F>),
    Submit,
    Resolved {
        generation: u64,
        outcome: Result<SegmentationResult, ApiError>,
    },
    Reset,
}

/// Work the owner must perform after a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<F> {
    Predict {
        generation: u64,
        request: PredictionRequest<F>,
    },
}

/// Submit/result state machine for one upload session.
///
/// The `Submitting` state is the only concurrency control: while it holds, no
/// second predict effect is ever emitted. Each submission carries a generation
/// number and resolutions for any other generation are dropped.
#[derive(Debug)]
pub struct Orchestrator<F> {
    files: ModalityFileSet<F>,
    state: OrchestratorState,
    generation: u64,
}

impl<F: Clone> Orchestrator<F> {
    pub fn new() -> Self {
        Self {
            files: ModalityFileSet::new(),
            state: OrchestratorState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    pub fn files(&self) -> &ModalityFileSet<F> {
        &self.files
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, OrchestratorState::Submitting)
    }

    /// Whether a submit event would start a prediction right now.
    pub fn can_submit(&self) -> bool {
        matches!(
            self.state,
            OrchestratorState::Idle | OrchestratorState::Failed(_)
        ) && self.files.is_complete()
    }

    pub fn can_edit_files(&self) -> bool {
        matches!(
            self.state,
            OrchestratorState::Idle | OrchestratorState::Failed(_)
        )
    }

    pub fn dispatch(&mut self, event: Event<F>) -> Option<Effect<F>> {
        match event {
            Event::SetFile(slot, file) => {
                if self.can_edit_files() {
                    self.files.set_file(slot, file);
                } else {
                    log::debug!("Ignoring file change for {} while {:?}", slot, self.state);
                }
                None
            }
            Event::Submit => self.submit(),
            Event::Resolved {
                generation,
                outcome,
            } => {
                self.resolve(generation, outcome);
                None
            }
            Event::Reset => {
                self.reset();
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Effect<F>> {
        if !self.can_submit() {
            return None;
        }
        let request = self.files.snapshot()?;

        self.generation += 1;
        self.state = OrchestratorState::Submitting;
        log::info!("Submitting prediction #{}", self.generation);
        Some(Effect::Predict {
            generation: self.generation,
            request,
        })
    }

    fn resolve(&mut self, generation: u64, outcome: Result<SegmentationResult, ApiError>) {
        if !self.is_submitting() || generation != self.generation {
            log::warn!(
                "Dropping stale prediction #{} (current #{})",
                generation,
                self.generation
            );
            return;
        }

        self.state = match outcome {
            Ok(result) => {
                log::info!("Prediction #{} succeeded", generation);
                OrchestratorState::Succeeded(result)
            }
            Err(err) => {
                match err.status_code() {
                    Some(status) => {
                        log::error!("Prediction #{} failed with HTTP {}: {}", generation, status, err)
                    }
                    None => log::error!("Prediction #{} failed: {}", generation, err),
                }
                OrchestratorState::Failed(failure_message(&err))
            }
        };
    }

    fn reset(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.files.reset();
        self.state = OrchestratorState::Idle;
    }
}

impl<F: Clone> Default for Orchestrator<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// User-facing text for a failed prediction: the service's own detail first,
/// then the client-side description, then a fixed fallback.
pub fn failure_message(err: &ApiError) -> String {
    if let Some(detail) = err.server_detail().filter(|d| !d.trim().is_empty()) {
        return detail.to_string();
    }
    err.description()
        .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string())
}
