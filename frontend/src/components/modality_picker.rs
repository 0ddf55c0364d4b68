use super::super::{Model, Msg};
use super::utils::{click_element, first_file, is_nifti_name};
use crate::results::format_megabytes;
use gloo_file::File as GlooFile;
use shared::Modality;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

fn file_message(slot: Modality, picked: Option<web_sys::File>) -> Msg {
    match picked {
        Some(file) if is_nifti_name(&file.name()) => {
            Msg::SelectFile(slot, Some(GlooFile::from(file)))
        }
        Some(file) => Msg::RejectFile(slot, file.name()),
        None => Msg::SetDragging(None),
    }
}

pub fn render_modality_picker(model: &Model, ctx: &Context<Model>, slot: Modality) -> Html {
    let link = ctx.link();
    let editable = model.orchestrator.can_edit_files();

    if let Some(file) = model.orchestrator.files().get(slot) {
        return html! {
            <div class="modality-slot selected" key={slot.as_ref().to_string()}>
                <label>{ slot.label() }</label>
                <div class="file-card">
                    <i class="fa-solid fa-file-medical"></i>
                    <div class="file-details">
                        <p class="file-name" title={file.name()}>{ file.name() }</p>
                        <p class="file-size">{ format_megabytes(file.size()) }</p>
                    </div>
                    <button
                        class="remove-btn"
                        title={format!("Clear {}", slot.label())}
                        disabled={!editable}
                        onclick={link.callback(move |e: MouseEvent| {
                            e.stop_propagation();
                            Msg::SelectFile(slot, None)
                        })}
                    >
                        <i class="fa-solid fa-times"></i>
                    </button>
                </div>
            </div>
        };
    }

    let input_id = format!("file-input-{}", slot.as_ref());
    let handle_change = link.callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let picked = input.files().as_ref().and_then(first_file);
        input.set_value("");
        file_message(slot, picked)
    });

    let handle_drag_over = link.callback(move |e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(Some(slot))
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(None)
    });

    let handle_drop = link.callback(move |e: DragEvent| {
        e.prevent_default();
        let picked = e
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .as_ref()
            .and_then(first_file);
        file_message(slot, picked)
    });

    let trigger_file_input = {
        let input_id = input_id.clone();
        Callback::from(move |_: MouseEvent| click_element(&input_id))
    };
    let is_dragging = model.dragging == Some(slot);

    html! {
        <div class="modality-slot" key={slot.as_ref().to_string()}>
            <label for={input_id.clone()}>{ slot.label() }</label>
            <input
                type="file"
                id={input_id.clone()}
                accept=".nii,.nii.gz,.gz"
                style="display: none;"
                disabled={!editable}
                onchange={handle_change}
            />
            <div
                class={classes!("upload-area", is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={trigger_file_input}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{ if is_dragging { "Drop the file here" } else { "Drag & drop or click to upload" } }</p>
                    <p class="file-types">{ slot.description() }</p>
                </div>
            </div>
        </div>
    }
}
