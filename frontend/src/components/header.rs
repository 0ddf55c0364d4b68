use super::status_badge::ServiceBadge;
use crate::api::ApiClient;
use yew::prelude::*;

/// Renders the application header
pub fn render_header(client: &ApiClient) -> Html {
    html! {
        <header class="app-header">
            <div class="brand">
                <span class="brand-mark">{"BTS"}</span>
                <div>
                    <h1><i class="fa-solid fa-brain"></i> {" Brain Tumor Segmentation"}</h1>
                    <p class="subtitle">{"Upload FLAIR and T1CE volumes to segment tumor regions"}</p>
                </div>
            </div>
            <ServiceBadge client={client.clone()} />
        </header>
    }
}
