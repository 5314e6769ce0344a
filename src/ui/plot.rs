use std::f64::consts::FRAC_PI_2;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::ColorMap;
use crate::figure::{Figure, PieFigure, ScatterFigure, Wedge};
use crate::state::AppState;

/// Largest arc drawn as one polygon; egui fills convex shapes only.
const MAX_ARC: f64 = FRAC_PI_2;
/// Segments per full turn when approximating the arc.
const ARC_RESOLUTION: f64 = 128.0;

// ---------------------------------------------------------------------------
// Figure dispatch
// ---------------------------------------------------------------------------

/// Render whatever figure currently occupies an output slot.
pub fn figure(ui: &mut Ui, id: &str, fig: Option<&Figure>, height: f32, state: &AppState) {
    match fig {
        Some(Figure::Pie(pie)) => pie_chart(ui, id, pie, height),
        Some(Figure::Scatter(scatter)) => scatter_chart(ui, id, scatter, height, state),
        Some(Figure::Empty { message }) => empty_chart(ui, message, height),
        None => empty_chart(ui, "", height),
    }
}

fn empty_chart(ui: &mut Ui, message: &str, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(message).color(Color32::RED));
        });
    });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Point on the unit circle, clockwise from twelve o'clock.
fn on_circle(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Convex polygons (centre + arc) that together fill one wedge.
pub fn wedge_polygons(wedge: &Wedge) -> Vec<Vec<[f64; 2]>> {
    let span = wedge.end - wedge.start;
    if span <= 0.0 {
        return Vec::new();
    }
    let pieces = (span / MAX_ARC).ceil().max(1.0) as usize;
    let piece_span = span / pieces as f64;
    let steps = ((piece_span / std::f64::consts::TAU) * ARC_RESOLUTION).ceil().max(1.0) as usize;

    (0..pieces)
        .map(|p| {
            let start = wedge.start + p as f64 * piece_span;
            let mut poly = vec![[0.0, 0.0]];
            poly.extend(
                (0..=steps).map(|s| on_circle(start + piece_span * s as f64 / steps as f64, 1.0)),
            );
            poly
        })
        .collect()
}

fn pie_chart(ui: &mut Ui, id: &str, pie: &PieFigure, height: f32) {
    ui.heading(&pie.title);

    let colors = ColorMap::new(pie.slices.iter().map(|s| s.label.clone()));
    let wedges = pie.wedges();

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            for (slice, wedge) in pie.slices.iter().zip(&wedges) {
                let color = colors.color_for(&slice.label);
                for poly in wedge_polygons(wedge) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(poly))
                            .fill_color(color)
                            .name(&slice.label),
                    );
                }
                if wedge.fraction > 0.0 {
                    let [x, y] = on_circle((wedge.start + wedge.end) / 2.0, 0.65);
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{:.1}%", wedge.fraction * 100.0))
                            .color(Color32::WHITE)
                            .strong(),
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, id: &str, scatter: &ScatterFigure, height: f32, state: &AppState) {
    ui.heading(&scatter.title);
    ui.label(RichText::new(format!("{} launches plotted", scatter.point_count())).weak());

    let range = state.selection.payload_range;

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(range.lo().max(state.slider.min))
        .include_x(range.hi().min(state.slider.max))
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.category)
                    .color(state.booster_colors.color_for(&series.category))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0);
                plot_ui.points(points);
            }
        });
}
