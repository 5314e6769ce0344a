use std::collections::BTreeMap;
use std::sync::Arc;

use crate::callbacks::{self, Control, OutputTarget};
use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::aggregate::{matching_records, site_summary, SiteSummary};
use crate::data::filter::{PayloadRange, Selection, SiteFilter};
use crate::data::model::{LaunchDataset, LaunchRecord};
use crate::error::AggregateError;
use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, shared read-only with every callback.
    pub dataset: Arc<LaunchDataset>,

    /// Current control values.
    pub selection: Selection,

    /// Raw slider positions (kg); kept separately so the sliders can sit
    /// outside the dataset's observed range.
    pub payload_lo: f64,
    pub payload_hi: f64,

    pub slider: SliderConfig,

    /// Latest figure per output target.
    pub figures: BTreeMap<OutputTarget, Figure>,

    /// Colour per booster version category.
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<LaunchDataset>, slider: SliderConfig) -> Self {
        let mut state = Self {
            booster_colors: ColorMap::new(dataset.booster_categories().iter().cloned()),
            dataset,
            selection: Selection::default(),
            payload_lo: slider.min,
            payload_hi: slider.max,
            slider,
            figures: BTreeMap::new(),
            status_message: None,
        };
        state.reset_payload_range();
        state.render_all();
        state
    }

    /// Replace the dataset (File → Open), resetting controls and charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.booster_colors = ColorMap::new(dataset.booster_categories().iter().cloned());
        self.dataset = Arc::new(dataset);
        self.selection.site = SiteFilter::All;
        self.status_message = None;
        self.reset_payload_range();
        self.render_all();
    }

    /// Slider defaults to the observed payload bounds, clamped to the
    /// slider's own range.
    fn reset_payload_range(&mut self) {
        let (min, max) = (self.slider.min, self.slider.max);
        let (lo, hi) = self.dataset.payload_bounds().unwrap_or((min, max));
        let clamp = |v: f64| v.max(min).min(max);
        let (c_lo, c_hi) = (clamp(lo), clamp(hi));
        if (c_lo, c_hi) != (lo, hi) {
            log::warn!(
                "payload bounds {lo}..={hi} kg exceed slider range {min}..={max}; \
                 launches outside {c_lo}..={c_hi} are hidden"
            );
        }
        self.payload_lo = c_lo;
        self.payload_hi = c_hi;
        self.selection.payload_range =
            PayloadRange::new(c_lo, c_hi).unwrap_or_else(PayloadRange::unbounded);
    }

    /// Handle a new site dropdown value.
    pub fn select_site(&mut self, site: SiteFilter) {
        if self.selection.site == site {
            return;
        }
        self.selection.site = site;
        self.on_change(Control::SiteDropdown);
    }

    /// Handle slider movement; `lo <= hi` is kept by clamping the bound that
    /// did not move.
    pub fn set_payload_bounds(&mut self, lo: f64, hi: f64, lo_moved: bool) {
        let (lo, hi) = match (lo > hi, lo_moved) {
            (true, true) => (lo, lo),
            (true, false) => (hi, hi),
            (false, _) => (lo, hi),
        };
        self.payload_lo = lo;
        self.payload_hi = hi;
        match PayloadRange::new(lo, hi) {
            Some(range) if range != self.selection.payload_range => {
                self.selection.payload_range = range;
                self.on_change(Control::PayloadSlider);
            }
            _ => {}
        }
    }

    fn on_change(&mut self, control: Control) {
        let results = callbacks::dispatch(&self.dataset, &self.selection, control);
        self.apply(results);
    }

    fn render_all(&mut self) {
        let results = callbacks::render_all(&self.dataset, &self.selection);
        self.apply(results);
    }

    /// Store callback results; a failure replaces only its own chart.
    fn apply(&mut self, results: Vec<(OutputTarget, Result<Figure, AggregateError>)>) {
        self.status_message = None;
        for (target, result) in results {
            let figure = match result {
                Ok(fig) => fig,
                Err(e) => {
                    log::warn!("{target:?}: {e}");
                    self.status_message = Some(format!("Error: {e}"));
                    Figure::empty(e.to_string())
                }
            };
            self.figures.insert(target, figure);
        }
    }

    pub fn figure(&self, target: OutputTarget) -> Option<&Figure> {
        self.figures.get(&target)
    }

    /// Summary of the selected site for the top bar.
    pub fn summary(&self) -> SiteSummary {
        site_summary(&self.dataset, &self.selection.site)
    }

    /// Records currently shown in the scatter chart, in dataset order.
    pub fn scattered_records(&self) -> Vec<&LaunchRecord> {
        matching_records(&self.dataset, &self.selection.site, self.selection.payload_range)
            .collect()
    }

    pub fn scattered_count(&self) -> usize {
        matching_records(&self.dataset, &self.selection.site, self.selection.payload_range)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    fn dataset() -> LaunchDataset {
        let rec = |site: &str, outcome, payload, booster: &str| {
            LaunchRecord::new(0, site, outcome, payload, booster).unwrap()
        };
        LaunchDataset::from_records(vec![
            rec("A", Outcome::Success, 500.0, "v1.0"),
            rec("A", Outcome::Failure, 1500.0, "v1.1"),
            rec("B", Outcome::Success, 3000.0, "FT"),
        ])
    }

    fn state() -> AppState {
        AppState::new(Arc::new(dataset()), SliderConfig::default())
    }

    #[test]
    fn test_initial_render() {
        let s = state();
        assert_eq!((s.payload_lo, s.payload_hi), (500.0, 3000.0));
        assert!(matches!(s.figure(OutputTarget::SuccessPieChart), Some(Figure::Pie(_))));
        assert!(matches!(
            s.figure(OutputTarget::SuccessPayloadScatterChart),
            Some(Figure::Scatter(_))
        ));
        assert_eq!(s.scattered_count(), 3);
    }

    #[test]
    fn test_slider_clamps_and_filters() {
        let mut s = state();
        s.set_payload_bounds(4000.0, 3000.0, true);
        assert_eq!((s.payload_lo, s.payload_hi), (4000.0, 4000.0));
        assert_eq!(s.scattered_count(), 0);

        s.set_payload_bounds(500.0, 500.0, false);
        assert_eq!(s.scattered_records().len(), 1);
    }

    #[test]
    fn test_invalid_site_keeps_session_alive() {
        let mut s = state();
        s.select_site(SiteFilter::Site("nowhere".into()));
        assert!(s.status_message.is_some());
        assert!(matches!(
            s.figure(OutputTarget::SuccessPieChart),
            Some(Figure::Empty { .. })
        ));
        assert_eq!(s.dataset.len(), 3);

        s.select_site(SiteFilter::Site("A".into()));
        assert!(s.status_message.is_none());
        assert!(matches!(s.figure(OutputTarget::SuccessPieChart), Some(Figure::Pie(_))));
        assert_eq!(s.summary().launches, 2);
    }

    #[test]
    fn test_initial_range_clamped_to_slider() {
        let slider = SliderConfig {
            min: 1000.0,
            max: 2000.0,
            ..SliderConfig::default()
        };
        let s = AppState::new(Arc::new(dataset()), slider);
        assert_eq!((s.payload_lo, s.payload_hi), (1000.0, 2000.0));
        assert_eq!(
            s.selection.payload_range,
            PayloadRange::new(1000.0, 2000.0).unwrap()
        );
        assert_eq!(s.scattered_count(), 1);
    }

    #[test]
    fn test_table_rows_match_scatter_points() {
        let mut s = state();
        s.select_site(SiteFilter::Site("A".into()));
        s.set_payload_bounds(1000.0, 3000.0, true);

        let Some(Figure::Scatter(scatter)) = s.figure(OutputTarget::SuccessPayloadScatterChart)
        else {
            panic!("expected scatter figure");
        };
        let rows = s.scattered_records();
        assert_eq!(rows.len(), scatter.point_count());
        assert_eq!(rows[0].payload_mass, 1500.0);
    }
}
