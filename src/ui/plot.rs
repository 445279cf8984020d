use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::period_color;
use crate::data::filter::aligned_by_offset;
use crate::data::model::Period;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Regional bar chart
// ---------------------------------------------------------------------------

/// Text shown instead of the bar chart when there is nothing to draw.
fn region_placeholder(state: &AppState) -> Option<&'static str> {
    if state.selection.years.is_empty() {
        Some("No year selected.")
    } else if state.views.regions.is_empty() {
        Some("No rows for the selected years.")
    } else {
        None
    }
}

/// Grouped bars: one group per region, one bar per selected year.
pub fn region_chart(ui: &mut Ui, state: &AppState) {
    if let Some(text) = region_placeholder(state) {
        ui.label(text);
        return;
    }
    let views = &state.views;

    let region_index: HashMap<&str, usize> = views
        .region_order
        .iter()
        .enumerate()
        .map(|(i, r)| (r.as_str(), i))
        .collect();
    let labels = views.region_order.clone();

    let years: Vec<i32> = state.selection.years.iter().copied().collect();
    let bar_width = 0.8 / years.len().max(1) as f64;

    Plot::new("region_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Region")
        .y_axis_label("Search volume")
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (slot, &year) in years.iter().enumerate() {
                let offset = (slot as f64 - (years.len() as f64 - 1.0) / 2.0) * bar_width;
                let bars: Vec<Bar> = views
                    .region_summary
                    .iter()
                    .filter(|((_, y), _)| *y == year)
                    .filter_map(|((region, _), &volume)| {
                        let x = *region_index.get(region.as_str())? as f64 + offset;
                        Some(Bar::new(x, volume).width(bar_width).name(region))
                    })
                    .collect();

                let chart = BarChart::new(bars)
                    .name(year)
                    .color(state.year_colors.color_for(year));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Weekly line charts
// ---------------------------------------------------------------------------

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Search volume over the selected week range.
pub fn timeline_chart(ui: &mut Ui, state: &AppState) {
    let points: PlotPoints = state
        .views
        .weeks
        .iter()
        .map(|w| [date_to_x(w.week), w.search_volume])
        .collect();

    Plot::new("timeline_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Week")
        .y_axis_label("Search volume")
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| x_to_label(mark.value))
        .label_formatter(|_name, value| format!("{}\n{:.1}", x_to_label(value.x), value.y))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Search volume")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
        });
}

/// Period B drawn over period A, both indexed by weeks since their start.
pub fn period_chart(ui: &mut Ui, state: &AppState) {
    let aligned = aligned_by_offset(&state.views.period_summary);

    Plot::new("period_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Weeks since period start")
        .y_axis_label("Search volume")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for period in [Period::A, Period::B] {
                let Some(series) = aligned.get(&period) else {
                    continue;
                };
                let points: PlotPoints = series
                    .iter()
                    .map(|&(offset, volume)| [offset as f64, volume])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(period.to_string())
                        .color(period_color(period))
                        .width(1.5),
                );
            }
        });
}
