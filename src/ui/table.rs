use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::period_color;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Summary tables
// ---------------------------------------------------------------------------

/// Region / year / total volume, ordered by region then year.
pub fn region_summary_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<(&str, i32, f64)> = state
        .views
        .region_summary
        .iter()
        .map(|((region, year), &volume)| (region.as_str(), *year, volume))
        .collect();

    ui.push_id("region_summary", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(TABLE_HEIGHT)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Region");
                });
                header.col(|ui| {
                    ui.strong("Year");
                });
                header.col(|ui| {
                    ui.strong("Search volume");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let (region, year, volume) = rows[row.index()];
                    row.col(|ui| {
                        ui.label(region);
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(year.to_string())
                                .color(state.year_colors.color_for(year)),
                        );
                    });
                    row.col(|ui| {
                        ui.label(format!("{volume:.1}"));
                    });
                });
            });
    });
}

/// Period / week / volume, period A first.
pub fn period_summary_table(ui: &mut Ui, state: &AppState) {
    if let Some(totals) = &state.views.period_totals {
        let mean = |m: Option<f64>| m.map(|v| format!("{v:.1}")).unwrap_or_else(|| "–".into());
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!(
                "A: total {:.1}, mean {}",
                totals.total_a,
                mean(totals.mean_a)
            ));
            ui.separator();
            ui.label(format!(
                "B: total {:.1}, mean {}",
                totals.total_b,
                mean(totals.mean_b)
            ));
            if let Some(change) = totals.change {
                ui.separator();
                ui.strong(format!("change {:+.1} %", change * 100.0));
            }
        });
    }

    let rows: Vec<_> = state
        .views
        .period_summary
        .iter()
        .map(|(&(period, week), &volume)| (period, week, volume))
        .collect();

    ui.push_id("period_summary", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(TABLE_HEIGHT)
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Period");
                });
                header.col(|ui| {
                    ui.strong("Week");
                });
                header.col(|ui| {
                    ui.strong("Search volume");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let (period, week, volume) = rows[row.index()];
                    row.col(|ui| {
                        ui.label(RichText::new(period.to_string()).color(period_color(period)));
                    });
                    row.col(|ui| {
                        ui.label(week.format("%Y-%m-%d").to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{volume:.1}"));
                    });
                });
            });
    });
}
