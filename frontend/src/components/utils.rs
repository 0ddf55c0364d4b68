use super::super::Model;
use crate::orchestrator::OrchestratorState;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::FileList;
use yew::prelude::*;

const NIFTI_EXTENSIONS: [&str; 3] = [".nii", ".nii.gz", ".gz"];

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

pub fn is_nifti_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    NIFTI_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// First file of a picker or drop; one file per modality slot.
pub fn first_file(file_list: &FileList) -> Option<web_sys::File> {
    file_list.item(0)
}

pub fn click_element(id: &str) {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id));

    if let Some(html_input) = element.and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok()) {
        html_input.click();
    }
}

pub fn render_error_message(model: &Model) -> Html {
    let failure = match model.orchestrator.state() {
        OrchestratorState::Failed(message) => Some(message.as_str()),
        _ => None,
    };

    html! {
        <>
            if let Some(message) = failure {
                <div class="error-message" role="alert">
                    <i class="fa-solid fa-circle-exclamation"></i>
                    <div>
                        <h4>{"Prediction Failed"}</h4>
                        <p>{ message }</p>
                    </div>
                </div>
            }
            if let Some(notice) = &model.notice {
                <div class="warning-message" role="status">
                    <i class="fa-solid fa-triangle-exclamation"></i>
                    <p>{ notice }</p>
                </div>
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nifti_extensions_are_accepted() {
        assert!(is_nifti_name("BraTS20_Training_001_flair.nii"));
        assert!(is_nifti_name("BraTS20_Training_001_t1ce.NII.GZ"));
        assert!(is_nifti_name("volume.gz"));
    }

    #[test]
    fn other_files_are_rejected() {
        assert!(!is_nifti_name("flair.png"));
        assert!(!is_nifti_name("notes.nii.txt"));
        assert!(!is_nifti_name(""));
    }
}
