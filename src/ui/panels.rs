use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::SCENARIO_FILTER_COLUMNS;
use crate::data::compare::Comparison;
use crate::data::distribution::DistributionSummary;
use crate::data::filter::Selection;
use crate::data::model::Column;
use crate::data::scenario::DAY_MODEL_COLUMNS;
use crate::state::{AppState, ScenarioId, Session};
use crate::ui::{plot, tables};

const HIGH_COLOR: Color32 = Color32::from_rgb(76, 175, 80);
const LOW_COLOR: Color32 = Color32::from_rgb(229, 115, 115);
const MODEL_COLOR: Color32 = Color32::from_rgb(100, 149, 237);

/// Selector changes collected while rendering, applied afterwards.
enum SelectionAction {
    Toggle(Column, String),
    All(Column),
    None(Column),
}

// ---------------------------------------------------------------------------
// Side panels – scenario filter widgets
// ---------------------------------------------------------------------------

/// Render one scenario's filter selectors.
pub fn scenario_filters(ui: &mut Ui, state: &mut AppState, id: ScenarioId) {
    ui.heading(format!("{} Filters", id.title()));
    ui.separator();

    let Some(session) = state.session.as_mut() else {
        ui.label("No dataset loaded.");
        return;
    };
    let dataset = Arc::clone(&session.dataset);
    let mut changed: Option<(Column, Selection)> = None;

    for column in SCENARIO_FILTER_COLUMNS {
        if !dataset.has_column(column) {
            continue;
        }
        let current = session.scenario(id).filters.get(column).display().to_string();

        ui.label(column.label());
        egui::ComboBox::from_id_salt((id.index(), column.header()))
            .selected_text(&current)
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui: &mut Ui| {
                for option in dataset.selector_options(column) {
                    let shown = if option.is_empty() { " " } else { option.as_str() };
                    if ui.selectable_label(current == option, shown).clicked() {
                        changed = Some((column, Selection::parse(&option)));
                    }
                }
            });
        ui.add_space(4.0);
    }

    ui.separator();
    if ui.button("Reset filters").clicked() {
        session.reset_filters(id);
    }

    if let Some((column, selection)) = changed {
        log::debug!("{}: {} = {:?}", id.title(), column, selection);
        session.set_filter(id, column, selection);
    }
}

// ---------------------------------------------------------------------------
// Central panel – scenario results
// ---------------------------------------------------------------------------

/// Render one scenario's summaries.
pub fn scenario_results(ui: &mut Ui, session: &mut Session, id: ScenarioId) {
    ui.heading(format!("{} Results", id.title()));

    let scenario = session.scenario(id);
    if let Some(err) = &scenario.error {
        ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
        return;
    }
    let Some(report) = &scenario.report else {
        return;
    };
    let outcomes = match &report.outcomes {
        Some(outcomes) if !report.is_empty() => outcomes,
        _ => {
            no_data(ui, &format!("No data found for {} filters.", id.title()));
            return;
        }
    };

    let salt = id.index();

    ui.add_space(6.0);
    ui.strong("Outcome Frequencies");
    for (i, day) in outcomes.days.iter().enumerate() {
        ui.label(RichText::new(format!("{}. {}", i + 1, day.day)).strong());
        for row in &day.outcomes {
            ui.label(format!(
                "    {} / Count: {} ({}%)",
                row.sequence, row.count, row.percentage
            ));
        }
        ui.label(
            RichText::new(format!(
                "    Outcomes in {} - {} ({}% of total)",
                day.day, day.total, day.percentage
            ))
            .italics(),
        );
    }

    ui.add_space(6.0);
    ui.strong("Outcome Distribution");
    plot::outcome_chart(ui, &format!("outcomes_{salt}"), outcomes);

    ui.add_space(6.0);
    ui.strong("Dataset Summary");
    ui.label(format!("Number of datasets: {}", outcomes.total));

    ui.add_space(6.0);
    ui.strong("End High/Low session possibilities");
    if outcomes.end_high_low.is_empty() {
        no_data(ui, "No End High/Low values.");
    } else {
        tables::distribution_table(ui, &format!("end_hl_{salt}"), &outcomes.end_high_low);
    }

    let mut actions = Vec::new();

    ui.add_space(6.0);
    ui.separator();
    ui.strong("High Day / Low Day");
    for column in [Column::HighDay, Column::LowDay] {
        value_selector(ui, session, id, column, &mut actions);
    }
    if report.high_low.is_empty() {
        no_data(ui, "No rows match the selected High/Low days.");
    } else {
        let joint = &report.high_low;
        distribution_block(ui, &format!("high_{salt}"), &joint.high, HIGH_COLOR);
        distribution_block(ui, &format!("low_{salt}"), &joint.low, LOW_COLOR);
    }

    for (column, summary) in DAY_MODEL_COLUMNS.into_iter().zip(&report.day_models) {
        ui.add_space(6.0);
        ui.separator();
        ui.strong(column.label());
        value_selector(ui, session, id, column, &mut actions);
        if summary.is_empty() {
            no_data(ui, &format!("No {} values selected.", column.label()));
        } else {
            let block_id = format!("{}_{salt}", column.header());
            distribution_block(ui, &block_id, summary, MODEL_COLOR);
        }
    }

    for action in actions {
        match action {
            SelectionAction::Toggle(column, value) => {
                session.toggle_allowed(id, column, &value)
            }
            SelectionAction::All(column) => session.select_all(id, column),
            SelectionAction::None(column) => session.select_none(id, column),
        }
    }
}

fn distribution_block(ui: &mut Ui, id: &str, summary: &DistributionSummary, color: Color32) {
    tables::distribution_table(ui, &format!("{id}_table"), summary);
    plot::distribution_chart(ui, &format!("{id}_chart"), summary, color);
}

/// Collapsible checkbox list choosing which values of `column` are counted.
fn value_selector(
    ui: &mut Ui,
    session: &Session,
    id: ScenarioId,
    column: Column,
    actions: &mut Vec<SelectionAction>,
) {
    let Some(all_values) = session.dataset.unique_values.get(&column) else {
        return;
    };
    let selected = session.scenario(id).selections.allowed(column);
    let header_text = format!(
        "{}  ({}/{})",
        column.label(),
        selected.len(),
        all_values.len()
    );

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt((id.index(), column.header(), "values"))
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    actions.push(SelectionAction::All(column));
                }
                if ui.small_button("None").clicked() {
                    actions.push(SelectionAction::None(column));
                }
            });

            for value in all_values {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    actions.push(SelectionAction::Toggle(column, value.clone()));
                }
            }
        });
}

fn no_data(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::from_rgb(230, 160, 40)));
}

// ---------------------------------------------------------------------------
// Comparison sections
// ---------------------------------------------------------------------------

pub fn comparison(ui: &mut Ui, comparison: &Comparison) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Comparison");
        ui.label(format!(
            "Scenario 1: {}% ({} datasets)",
            comparison.rel_pct_a, comparison.count_a
        ));
        ui.label(format!(
            "Scenario 2: {}% ({} datasets)",
            comparison.rel_pct_b, comparison.count_b
        ));

        ui.separator();
        ui.heading("Percentage of occurrence");
        ui.label(format!(
            "Scenario 1: {}% of total ({} datasets from {})",
            comparison.occ_pct_a, comparison.count_a, comparison.full_total
        ));
        ui.label(format!(
            "Scenario 2: {}% of total ({} datasets from {})",
            comparison.occ_pct_b, comparison.count_b, comparison.full_total
        ));
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
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} rows loaded, {} / {} in scenarios",
                session.dataset.len(),
                session.comparison.count_a,
                session.comparison.count_b
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sequence data")
        .add_filter("Supported files", &["csv", "txt", "json"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        // Failures are logged and kept in the status line by `load`.
        if state.load(&path).is_ok() {
            log::info!("Opened {}", path.display());
        }
    }
}
