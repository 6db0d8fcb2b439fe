use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::distribution::DistributionSummary;
use crate::data::outcome::OutcomeSummary;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Percentage per outcome, one bar per label, coloured by end day.
pub fn outcome_chart(ui: &mut Ui, id: &str, summary: &OutcomeSummary) {
    let colors = ColorMap::new(summary.days.iter().map(|d| d.day.as_str()));
    let labels: Vec<String> = summary.outcomes.iter().map(|o| o.outcome.clone()).collect();

    let charts: Vec<BarChart> = summary
        .days
        .iter()
        .map(|day| {
            let bars = day
                .outcomes
                .iter()
                .map(|o| {
                    let x = labels.iter().position(|l| *l == o.outcome).unwrap_or(0);
                    Bar::new(x as f64, o.percentage)
                        .name(format!("{} ({}%)", o.outcome, o.percentage))
                        .fill(colors.color_for(&day.day))
                        .width(0.7)
                })
                .collect();
            BarChart::new(bars)
                .name(&day.day)
                .color(colors.color_for(&day.day))
        })
        .collect();

    percentage_plot(ui, id, "Outcome", labels, charts);
}

/// Percentage per value of one distribution.
pub fn distribution_chart(ui: &mut Ui, id: &str, summary: &DistributionSummary, color: Color32) {
    let labels: Vec<String> = summary.rows.iter().map(|r| r.value.clone()).collect();
    let bars = summary
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.percentage)
                .name(format!("{} ({}%)", r.value, r.percentage))
                .fill(color)
                .width(0.7)
        })
        .collect();
    let chart = BarChart::new(bars)
        .name(summary.column.label())
        .color(color);

    percentage_plot(ui, id, summary.column.label(), labels, vec![chart]);
}

fn percentage_plot(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    labels: Vec<String>,
    charts: Vec<BarChart>,
) {
    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Percentage")
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
