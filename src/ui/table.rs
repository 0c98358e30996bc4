use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::DistributionRow;

const HEADERS: [&str; 5] = [
    "Sieve",
    "Opening (mm)",
    "Retained mass (g)",
    "Cumulative mass (g)",
    "Percent passing (%)",
];

/// Render the augmented sieve table.
pub fn distribution_table(ui: &mut Ui, rows: &[DistributionRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::right_to_left(Align::Center))
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(110.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(18.0, |mut table_row| {
                    for cell in row_cells(row) {
                        table_row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

/// Display strings for one row, in [`HEADERS`] order.
pub fn row_cells(row: &DistributionRow) -> [String; 5] {
    [
        row.sieve.to_string(),
        row.opening_mm.to_string(),
        row.retained_mass_g.to_string(),
        format!("{:.2}", row.cumulative_mass_g),
        format!("{:.2}", row.percent_passing),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SieveId;

    #[test]
    fn derived_cells_use_two_decimals() {
        let row = DistributionRow {
            sieve: SieveId::Number(200.0),
            opening_mm: 0.075,
            retained_mass_g: 12.0,
            cumulative_mass_g: 487.5,
            percent_passing: 3.0,
        };
        assert_eq!(row_cells(&row), ["200", "0.075", "12", "487.50", "3.00"]);
    }

    #[test]
    fn retained_mass_keeps_entered_precision() {
        let row = DistributionRow {
            sieve: SieveId::Number(4.0),
            opening_mm: 4.75,
            retained_mass_g: 0.333,
            cumulative_mass_g: 0.33,
            percent_passing: 0.0,
        };
        assert_eq!(row_cells(&row)[2], "0.333");
    }
}
