use super::super::{Model, Msg};
use super::utils::debounce;
use crate::prediction::SegmentationResult;
use crate::results::{ResultSummary, ResultView, ResultsView, StatisticsRow, ViewContent, ViewKind};
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>, result: &SegmentationResult) -> Html {
    let view = ResultsView::project(result, model.client.config());
    let link = ctx.link().clone();

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2><i class="fa-solid fa-circle-check"></i>{" Prediction Complete"}</h2>
            </div>

            { render_summary(&view.summary) }

            <div class="tabs">
                <div class="tab-list" role="tablist">
                    { for ViewKind::ALL.iter().map(|&kind| {
                        let active = model.active_view == kind;
                        html! {
                            <button
                                role="tab"
                                class={classes!("tab-trigger", active.then_some("active"))}
                                onclick={ctx.link().callback(move |_| Msg::SelectView(kind))}
                            >
                                { kind.tab_label() }
                            </button>
                        }
                    })}
                </div>
                { render_view(view.view(model.active_view)) }
            </div>

            { render_statistics(&view.statistics, view.summary.statistics_chart.as_deref()) }

            <div class="button-container">
                <button
                    class="analyze-btn outline"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Reset)
                    })}
                >
                    <i class="fa-solid fa-rotate-left"></i>{" Start New Prediction"}
                </button>
            </div>
        </div>
    }
}

fn render_summary(summary: &ResultSummary) -> Html {
    html! {
        <>
            <div class="result-status">
                <span class={classes!("status-badge", if summary.model_active { "ready" } else { "warning" })}>
                    { if summary.model_active { "Model Active" } else { "Preprocessing Only" } }
                </span>
                if let Some(message) = &summary.message {
                    <span class="result-message">{ message }</span>
                }
            </div>
            <div class="summary-grid">
                <div class="summary-card">
                    <p class="summary-label">{"Processed Slices"}</p>
                    <p class="summary-value">{ summary.processed_slices }</p>
                </div>
                <div class="summary-card">
                    <p class="summary-label">{"Model Used"}</p>
                    <p class="summary-value" title={summary.model_used.clone()}>{ &summary.model_used }</p>
                </div>
                if let Some(shape) = &summary.input_shape {
                    <div class="summary-card">
                        <p class="summary-label">{"Input Shape"}</p>
                        <p class="summary-value">{ shape }</p>
                    </div>
                }
            </div>
            if let Some(href) = &summary.mask_download {
                <div class="mask-download">
                    <p>{"Segmentation mask saved. Download from:"}</p>
                    <a href={href.clone()} download="">{ href }</a>
                </div>
            }
        </>
    }
}

fn render_view(view: &ResultView) -> Html {
    let body = match &view.content {
        ViewContent::Images(tiles) => html! {
            <div class={classes!("image-grid", (tiles.len() == 1).then_some("single"))}>
                { for tiles.iter().map(|tile| html! {
                    <figure key={tile.src.clone()}>
                        <img src={tile.src.clone()} alt={tile.caption.clone()} />
                        <figcaption>{ &tile.caption }</figcaption>
                    </figure>
                })}
            </div>
        },
        ViewContent::Unavailable(placeholder) => html! {
            <p class="unavailable-preview">{ *placeholder }</p>
        },
    };

    html! {
        <div class="tab-content" role="tabpanel">
            <h3>{ view.kind.title() }</h3>
            { body }
        </div>
    }
}

fn render_statistics(rows: &[StatisticsRow], chart: Option<&str>) -> Html {
    if rows.is_empty() {
        return html! {};
    }

    html! {
        <div class="detailed-results">
            <h3><i class="fa-solid fa-chart-simple"></i>{" Tumor Region Statistics"}</h3>
            <table class="stats-table">
                <thead>
                    <tr>
                        <th>{"Region"}</th>
                        <th>{"Share"}</th>
                        <th>{"Pixels"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|row| html! {
                        <tr key={row.label.clone()}>
                            <td>
                                if let Some(color) = row.color {
                                    <span class="legend-swatch" style={format!("background-color: {}", color)}></span>
                                }
                                { &row.label }
                            </td>
                            <td class="result-value">{ &row.percentage }</td>
                            <td class="pixel-count">{ &row.pixel_count }</td>
                        </tr>
                    })}
                </tbody>
            </table>
            if let Some(src) = chart {
                <img class="stats-chart" src={src.to_string()} alt="Statistics Chart" />
            }
        </div>
    }
}
