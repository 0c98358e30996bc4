use std::path::Path;

use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, log_grid_spacer};

use crate::data::model::CurvePoint;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Axis convention
// ---------------------------------------------------------------------------
//
// Grain-size curves use a logarithmic opening axis with the largest opening
// on the left. egui_plot has neither log nor reversed axes, so openings are
// plotted as `-log10(mm)` and tick labels are mapped back to millimetres.

/// Plot-space x for an opening; `None` for openings a log axis cannot show.
pub fn plot_x(opening_mm: f64) -> Option<f64> {
    (opening_mm > 0.0 && opening_mm.is_finite()).then(|| -opening_mm.log10())
}

/// Inverse of [`plot_x`].
pub fn opening_from_plot_x(x: f64) -> f64 {
    10f64.powf(-x)
}

/// Short label for an opening in millimetres.
pub fn format_opening(mm: f64) -> String {
    if mm >= 10.0 {
        format!("{mm:.0}")
    } else if mm >= 1.0 {
        format!("{mm:.2}")
    } else {
        format!("{mm:.3}")
    }
}

/// Curve points in plot space, skipping sieves with no positive opening.
pub fn plot_points(curve: &[CurvePoint]) -> Vec<[f64; 2]> {
    curve
        .iter()
        .filter_map(|&(opening, passing)| plot_x(opening).map(|x| [x, passing]))
        .collect()
}

// ---------------------------------------------------------------------------
// Distribution curve
// ---------------------------------------------------------------------------

/// Render the grain-size distribution curve of the selected test, or of
/// every successful test when overlay is on.
pub fn distribution_plot(ui: &mut Ui, state: &AppState) {
    let series: Vec<(String, &Path, &[CurvePoint])> = if state.overlay {
        state
            .tests
            .iter()
            .filter_map(|t| {
                t.analysis()
                    .map(|a| (state.curve_label(t), t.path.as_path(), a.curve.as_slice()))
            })
            .collect()
    } else {
        state
            .selected_test()
            .and_then(|t| {
                t.analysis()
                    .map(|a| (state.curve_label(t), t.path.as_path(), a.curve.as_slice()))
            })
            .into_iter()
            .collect()
    };

    if series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No distribution curve to show.");
        });
        return;
    }

    let omitted: usize = series
        .iter()
        .map(|(_, _, curve)| curve.iter().filter(|(o, _)| plot_x(*o).is_none()).count())
        .sum();
    if omitted > 0 {
        ui.weak(format!(
            "{omitted} sieve(s) with zero opening are listed in the table but not plotted."
        ));
    }

    Plot::new("distribution_plot")
        .legend(Legend::default())
        .x_axis_label("Opening (mm)")
        .y_axis_label("Percent passing (%)")
        .x_grid_spacer(log_grid_spacer(10))
        .x_axis_formatter(|mark: GridMark, _range| format_opening(opening_from_plot_x(mark.value)))
        .label_formatter(|name: &str, value: &PlotPoint| {
            let opening = format_opening(opening_from_plot_x(value.x));
            if name.is_empty() {
                format!("{opening} mm\n{:.2} %", value.y)
            } else {
                format!("{name}\n{opening} mm\n{:.2} %", value.y)
            }
        })
        .include_y(0.0)
        .include_y(100.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, path, curve) in &series {
                let color = if state.overlay {
                    state.color_map.color_for(path)
                } else {
                    Color32::LIGHT_BLUE
                };
                let points = plot_points(curve);

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(name)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(name)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn larger_openings_plot_further_left() {
        let coarse = plot_x(4.75).unwrap();
        let fine = plot_x(0.075).unwrap();
        assert!(coarse < fine);
    }

    #[test]
    fn axis_transform_round_trips() {
        let x = plot_x(2.0).unwrap();
        assert!((opening_from_plot_x(x) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_opening_is_not_plotted() {
        assert_eq!(plot_x(0.0), None);
        let points = plot_points(&[(4.75, 100.0), (0.0, 0.0)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0][1], 100.0);
    }

    #[test]
    fn opening_labels() {
        assert_eq!(format_opening(25.0), "25");
        assert_eq!(format_opening(4.75), "4.75");
        assert_eq!(format_opening(0.075), "0.075");
    }
}
