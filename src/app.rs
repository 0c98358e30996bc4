use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::batch::analyze_files;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RustySieveApp {
    pub state: AppState,
}

impl RustySieveApp {
    /// Start with the given files already analysed.
    pub fn with_files(paths: &[PathBuf]) -> Self {
        let mut app = Self::default();
        if !paths.is_empty() {
            app.state.add_tests(analyze_files(paths));
        }
        app
    }
}

impl eframe::App for RustySieveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Files dropped onto the window are analysed like opened ones.
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.state.add_tests(analyze_files(&dropped));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: loaded files ----
        egui::SidePanel::left("tests_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + curve ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results_view(ui, &self.state);
        });
    }
}

/// Table and curve of the selected test, or its error in place of results.
fn results_view(ui: &mut Ui, state: &AppState) {
    let Some(test) = state.selected_test() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open or drop a sieve test file  (File → Open…)");
        });
        return;
    };

    ui.heading(format!("Grain-size distribution curve – {}", test.name));
    ui.separator();

    match &test.outcome {
        Ok(analysis) => {
            ScrollArea::vertical()
                .id_salt("results_table")
                .max_height(ui.available_height() * 0.4)
                .show(ui, |ui: &mut Ui| {
                    table::distribution_table(ui, &analysis.rows);
                });
            ui.separator();
            plot::distribution_plot(ui, state);
        }
        Err(msg) => {
            ui.label(RichText::new("This file could not be processed.").strong());
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    }
}
