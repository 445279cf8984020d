use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::export::export_summaries;
use crate::data::DataContext;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            year_selector(ui, state);
            ui.separator();
            week_range_selector(ui, state);
            ui.separator();
            period_selector(ui, state);
        });

    // Recompute views after any widget changes.
    state.recompute();
}

fn year_selector(ui: &mut Ui, state: &mut AppState) {
    let years: Vec<i32> = state.data.years().iter().copied().collect();
    let header_text = format!("Years  ({}/{})", state.selection.years.len(), years.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("years")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_years();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_years();
                }
            });

            for year in years {
                let mut checked = state.selection.years.contains(&year);
                let text = RichText::new(year.to_string()).color(state.year_colors.color_for(year));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_year(year);
                }
            }
        });
}

fn week_range_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Weeks");
    let len = state.data.week_count();
    let labels: Vec<String> = (0..=len).map(|i| state.week_label(i)).collect();
    let selection = &mut state.selection;

    // A range must start on an existing week.
    let last = len.saturating_sub(1);
    let end = selection.week_end.min(last);
    ui.add(
        egui::Slider::new(&mut selection.week_start, 0..=end)
            .text("from")
            .custom_formatter(|v, _| label_at(&labels, v)),
    );
    let start = selection.week_start;
    ui.add(
        egui::Slider::new(&mut selection.week_end, start..=len)
            .text("to (excl.)")
            .custom_formatter(|v, _| label_at(&labels, v)),
    );
    ui.label(format!(
        "{} weeks",
        selection.week_end.saturating_sub(selection.week_start)
    ));
}

fn period_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Compare periods");
    let len = state.data.week_count();
    let labels: Vec<String> = (0..=len).map(|i| state.week_label(i)).collect();
    let [i0, i1, i2] = &mut state.selection.period_bounds;

    let upper = (*i1).min(len.saturating_sub(1));
    ui.add(
        egui::Slider::new(&mut *i0, 0..=upper)
            .text("A starts")
            .custom_formatter(|v, _| label_at(&labels, v)),
    );
    let (lower, upper) = (*i0, *i2);
    ui.add(
        egui::Slider::new(&mut *i1, lower..=upper)
            .text("B starts")
            .custom_formatter(|v, _| label_at(&labels, v)),
    );
    let lower = *i1;
    ui.add(
        egui::Slider::new(&mut *i2, lower..=len)
            .text("B ends (excl.)")
            .custom_formatter(|v, _| label_at(&labels, v)),
    );
}

fn label_at(labels: &[String], value: f64) -> String {
    labels.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, config: &mut DashboardConfig) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state, config);
                ui.close_menu();
            }
            if ui.button("Export summary…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} region rows over {} years, {} weeks",
            state.data.regions.len(),
            state.data.years().len(),
            state.data.week_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Reload from another folder. A failed load keeps the current data.
pub fn open_folder_dialog(state: &mut AppState, config: &mut DashboardConfig) {
    let folder = rfd::FileDialog::new()
        .set_title("Open trend exports folder")
        .set_directory(&config.data_dir)
        .pick_folder();

    let Some(folder) = folder else {
        return;
    };

    let candidate = config.with_data_dir(folder);
    match DataContext::load(&candidate) {
        Ok(data) => {
            log::info!(
                "Loaded {} region rows and {} weeks from {}",
                data.regions.len(),
                data.week_count(),
                candidate.data_dir.display()
            );
            state.set_data(data);
            *config = candidate;
        }
        Err(e) => {
            log::error!("Failed to load folder: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .set_file_name("summary.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_summaries(
            &path,
            &state.views.region_summary,
            &state.views.period_summary,
        ) {
            log::error!("Failed to export summary: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
