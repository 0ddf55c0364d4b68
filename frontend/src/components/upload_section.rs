use super::super::{Model, Msg};
use super::modality_picker::render_modality_picker;
use super::utils::debounce;
use shared::Modality;
use strum::IntoEnumIterator;
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let submitting = model.orchestrator.is_submitting();

    html! {
        <div class="upload-section">
            <div class="section-header">
                <h2>{"Upload MRI Modalities"}</h2>
                <p class="subtitle">
                    {"Both modalities are required. Files should be in NIfTI format (.nii or .nii.gz)."}
                </p>
            </div>

            <div class="modality-grid">
                { for Modality::iter().map(|slot| render_modality_picker(model, ctx, slot)) }
            </div>

            { render_upload_status(model) }

            <div class="button-container">
                <button
                    id="predict-btn"
                    class="analyze-btn"
                    disabled={!model.orchestrator.can_submit()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                >
                    {
                        if submitting {
                            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</> }
                        } else {
                            html! { <><i class="fa-solid fa-brain"></i>{" Run Prediction"}</> }
                        }
                    }
                </button>
                <button
                    id="reset-btn"
                    class="analyze-btn outline"
                    disabled={submitting}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Reset)
                    })}
                >
                    <i class="fa-solid fa-rotate-left"></i>{" Reset"}
                </button>
            </div>
        </div>
    }
}

fn render_upload_status(model: &Model) -> Html {
    let missing = model.orchestrator.files().missing();

    html! {
        <div class="upload-status">
            <h4><i class="fa-solid fa-circle-info"></i>{" Upload Status"}</h4>
            { for model.orchestrator.files().iter().map(|(slot, file)| {
                let (class, text) = match file {
                    Some(file) => ("status-value selected", format!("✓ {}", file.name())),
                    None => ("status-value", "Not selected".to_string()),
                };
                html! {
                    <div class="status-row" key={slot.as_ref().to_string()}>
                        <span class="status-key">{ format!("{}:", slot.label()) }</span>
                        <span class={class}>{ text }</span>
                    </div>
                }
            })}
            if !missing.is_empty() {
                <p class="status-hint">
                    { format!(
                        "Still needed: {}",
                        missing.iter().map(|slot| slot.label()).collect::<Vec<_>>().join(", ")
                    ) }
                </p>
            }
        </div>
    }
}
