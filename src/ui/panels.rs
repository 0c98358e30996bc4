use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::batch::analyze_files;
use crate::data::export::export_csv;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – loaded files
// ---------------------------------------------------------------------------

/// Render the left panel: loaded sieve tests and the input format help.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sieve tests");
    ui.separator();

    if state.tests.is_empty() {
        ui.label("No files loaded.");
    }

    let mut to_select = None;
    let mut to_remove = None;

    ScrollArea::vertical()
        .auto_shrink([false, true])
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui: &mut Ui| {
            for (idx, test) in state.tests.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    let (mark, mark_color) = if test.is_ok() {
                        ("✔", state.color_map.color_for(&test.path))
                    } else {
                        ("✖", Color32::RED)
                    };
                    ui.label(RichText::new(mark).color(mark_color));

                    let is_selected = state.selected == Some(idx);
                    if ui
                        .selectable_label(is_selected, &test.name)
                        .on_hover_text(test.path.display().to_string())
                        .clicked()
                    {
                        to_select = Some(idx);
                    }
                    if ui.small_button("🗙").on_hover_text("Remove").clicked() {
                        to_remove = Some(idx);
                    }
                });
            }
        });

    if let Some(idx) = to_select {
        state.select(idx);
    }
    if let Some(idx) = to_remove {
        state.remove(idx);
    }

    ui.separator();
    format_help(ui);
}

/// Collapsible description of the expected input file.
fn format_help(ui: &mut Ui) {
    egui::CollapsingHeader::new(RichText::new("Example file").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let example = [
                ["Sieve", "Opening", "Retained mass"],
                ["4", "4.75", "0"],
                ["10", "2.00", "20"],
                ["20", "0.85", "40"],
                ["...", "...", "..."],
            ];
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().at_least(50.0), 3)
                .header(18.0, |mut header| {
                    for title in example[0] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for cells in &example[1..] {
                        body.row(16.0, |mut row| {
                            for cell in cells {
                                row.col(|ui| {
                                    ui.label(*cell);
                                });
                            }
                        });
                    }
                });

            ui.add_space(4.0);
            ui.label("• Files must be .csv, .xls/.xlsx, .json or .parquet.");
            ui.label(
                "• The first three columns hold the sieve, opening (mm) and retained \
                 mass (g), whatever their names.",
            );
            ui.label("• Either a point or a comma may be used as decimal separator.");
            ui.label("• Rows go from the coarsest to the finest sieve.");
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_files_dialog(state);
                ui.close_menu();
            }
            let can_export = state.selected_test().is_some_and(|t| t.is_ok());
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.tests.is_empty(), egui::Button::new("Clear"))
                .clicked()
            {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.tests.is_empty() {
            ui.label(format!(
                "{} file(s) loaded, {} analysed",
                state.tests.len(),
                state.successful_count()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.overlay, "Overlay curves")
            .clicked()
        {
            state.overlay = !state.overlay;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open sieve tests")
        .add_filter(
            "Supported files",
            &["csv", "txt", "xls", "xlsx", "xlsm", "ods", "json", "parquet", "pq"],
        )
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("Spreadsheet", &["xls", "xlsx", "xlsm", "ods"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_files();

    if let Some(paths) = files {
        log::info!("Analysing {} file(s)", paths.len());
        state.add_tests(analyze_files(&paths));
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(test) = state.selected_test() else {
        return;
    };
    let Some(analysis) = test.analysis() else {
        return;
    };

    let stem = test
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sieve_test".to_string());

    let target = rfd::FileDialog::new()
        .set_title("Export distribution table")
        .set_file_name(format!("{stem}_distribution.csv"))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = target {
        let result = export_csv(&path, &analysis.rows);
        if let Err(e) = result {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
