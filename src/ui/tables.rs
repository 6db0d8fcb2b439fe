use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::distribution::DistributionSummary;

const ROW_HEIGHT: f32 = 18.0;

/// Value / Count / Percentage table for one distribution.
pub fn distribution_table(ui: &mut Ui, id: &str, summary: &DistributionSummary) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder().at_least(120.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(80.0))
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong(summary.column.label());
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
                header.col(|ui| {
                    ui.strong("Percentage");
                });
            })
            .body(|mut body| {
                for row in &summary.rows {
                    body.row(ROW_HEIGHT, |mut cells| {
                        cells.col(|ui| {
                            ui.label(&row.value);
                        });
                        cells.col(|ui| {
                            ui.label(row.count.to_string());
                        });
                        cells.col(|ui| {
                            ui.label(format!("{}%", row.percentage));
                        });
                    });
                }
            });
    });
}
