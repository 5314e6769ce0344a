//! Explicit callback table wiring controls to chart outputs.
//!
//! Each [`Callback`] names the controls it listens to, the output it
//! renders, and a pure handler over the shared dataset and the current
//! [`Selection`]. Changing a control re-runs exactly the callbacks that list
//! it as an input.

use crate::data::aggregate::{outcome_counts_for_site, scatter_selection, success_counts_by_site};
use crate::data::filter::{Selection, SiteFilter};
use crate::data::model::LaunchDataset;
use crate::error::AggregateError;
use crate::figure::{Figure, PieFigure, ScatterFigure};

/// Interactive controls that can trigger callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SiteDropdown,
    PayloadSlider,
}

/// Chart slots a callback can render into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputTarget {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

pub type Handler = fn(&LaunchDataset, &Selection) -> Result<Figure, AggregateError>;

pub struct Callback {
    pub inputs: &'static [Control],
    pub output: OutputTarget,
    pub handler: Handler,
}

pub static CALLBACKS: &[Callback] = &[
    Callback {
        inputs: &[Control::SiteDropdown],
        output: OutputTarget::SuccessPieChart,
        handler: success_pie_chart,
    },
    Callback {
        inputs: &[Control::SiteDropdown, Control::PayloadSlider],
        output: OutputTarget::SuccessPayloadScatterChart,
        handler: success_payload_scatter_chart,
    },
];

/// Total successes per site for `ALL`, success/failure split otherwise.
pub fn success_pie_chart(
    dataset: &LaunchDataset,
    selection: &Selection,
) -> Result<Figure, AggregateError> {
    let figure = match &selection.site {
        SiteFilter::All => PieFigure::new(
            "Success Pie Chart for All Sites",
            success_counts_by_site(dataset),
        ),
        SiteFilter::Site(site) => PieFigure::new(
            format!("Success Failure Pie Chart for Launch Site {site}"),
            outcome_counts_for_site(dataset, site)?
                .into_iter()
                .map(|(outcome, n)| (outcome.to_string(), n)),
        ),
    };
    Ok(Figure::Pie(figure))
}

/// Payload against outcome, coloured by booster category, restricted to the
/// selected site and payload range.
pub fn success_payload_scatter_chart(
    dataset: &LaunchDataset,
    selection: &Selection,
) -> Result<Figure, AggregateError> {
    let title = match &selection.site {
        SiteFilter::All => "Payload vs. Outcome for All Sites".to_string(),
        SiteFilter::Site(site) => {
            if !dataset.has_site(site) {
                return Err(AggregateError::InvalidSite(site.clone()));
            }
            format!("Payload vs. Outcome for Launch Site {site}")
        }
    };
    let points = scatter_selection(dataset, &selection.site, selection.payload_range);
    Ok(Figure::Scatter(ScatterFigure::from_points(title, points)))
}

/// Run every callback listening to `changed`.
pub fn dispatch(
    dataset: &LaunchDataset,
    selection: &Selection,
    changed: Control,
) -> Vec<(OutputTarget, Result<Figure, AggregateError>)> {
    CALLBACKS
        .iter()
        .filter(|cb| cb.inputs.contains(&changed))
        .map(|cb| {
            log::debug!("{changed:?} changed, updating {:?}", cb.output);
            (cb.output, (cb.handler)(dataset, selection))
        })
        .collect()
}

/// Run every callback once, as on first render.
pub fn render_all(
    dataset: &LaunchDataset,
    selection: &Selection,
) -> Vec<(OutputTarget, Result<Figure, AggregateError>)> {
    CALLBACKS
        .iter()
        .map(|cb| (cb.output, (cb.handler)(dataset, selection)))
        .collect()
}
