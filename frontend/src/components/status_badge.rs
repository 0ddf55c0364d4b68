use crate::api::ApiClient;
use crate::status::{StatusBadge, model_info_rows, settle};
use shared::ModelInfo;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub client: ApiClient,
}

/// Model availability, fetched once on mount. Failures only reach the log.
#[function_component(ModelStatusBadge)]
pub fn model_status_badge(props: &StatusProps) -> Html {
    let badge = use_state(|| None::<StatusBadge>);

    {
        let badge = badge.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Some(status) = settle("model status", client.model_status().await) {
                    log::info!("Model status: exists={} loaded={}", status.exists, status.loaded);
                    badge.set(Some(StatusBadge::for_model(&status)));
                }
            });
        });
    }

    match &*badge {
        Some(badge) => html! {
            <div class={badge.tone.class()}>
                <span class="status-dot"></span>
                { &badge.text }
            </div>
        },
        None => html! {},
    }
}

#[function_component(ServiceBadge)]
pub fn service_badge(props: &StatusProps) -> Html {
    let badge = use_state(|| None::<StatusBadge>);

    {
        let badge = badge.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Some(health) = settle("service health", client.health().await) {
                    badge.set(Some(StatusBadge::for_service(&health)));
                }
            });
        });
    }

    match &*badge {
        Some(badge) => html! {
            <div class={classes!(badge.tone.class(), "service-badge")}>{ &badge.text }</div>
        },
        None => html! {},
    }
}

#[function_component(ModelInfoCard)]
pub fn model_info_card(props: &StatusProps) -> Html {
    let info = use_state(|| None::<ModelInfo>);

    {
        let info = info.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Some(fetched) = settle("model info", client.model_info().await) {
                    info.set(Some(fetched));
                }
            });
        });
    }

    html! {
        <div class="info-card">
            <h4><i class="fa-solid fa-circle-info"></i>{" About the 2-Channel Model"}</h4>
            <p>
                {"This U-Net was trained on the BraTS 2020 dataset and segments tumor regions \
                  from the FLAIR and T1CE modalities."}
            </p>
            if let Some(info) = &*info {
                <dl class="model-info">
                    { for model_info_rows(info).into_iter().map(|(label, value)| html! {
                        <>
                            <dt>{ label }</dt>
                            <dd>{ value }</dd>
                        </>
                    })}
                </dl>
            }
        </div>
    }
}
