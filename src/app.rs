use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::DataContext;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrendsDashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl TrendsDashboardApp {
    pub fn new(data: DataContext, config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(data),
            config,
        }
    }
}

impl eframe::App for TrendsDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut self.config);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and summaries ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Search volume by region");
                    plot::region_chart(ui, &self.state);
                    table::region_summary_table(ui, &self.state);

                    ui.separator();
                    ui.heading("Search trend over time");
                    plot::timeline_chart(ui, &self.state);

                    ui.separator();
                    ui.heading("Period comparison");
                    plot::period_chart(ui, &self.state);
                    table::period_summary_table(ui, &self.state);
                });
        });
    }
}
