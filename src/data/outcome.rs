use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::distribution::{value_counts, DistributionSummary};
use super::model::{Column, Record, MISSING_LABEL};
use super::percent::apportion;

/// Decimal places of outcome and day-group percentages.
pub const OUTCOME_DECIMALS: u32 = 1;
/// Decimal places of the End High/Low breakdown.
pub const END_HIGH_LOW_DECIMALS: u32 = 2;

/// Ordering key given to labels without a day token.
const UNKNOWN_DAY_ORDER: u32 = 99;

static DAY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Day (\d)").expect("day token pattern is valid"));
static SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Day \d (.*)").expect("sequence pattern is valid"));

/// One distinct `End Day` + `End point seq` combination.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRow {
    pub outcome: String,
    pub end_day: String,
    pub sequence: String,
    pub count: usize,
    pub percentage: f64,
}

/// Outcomes sharing an end day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: String,
    pub outcomes: Vec<OutcomeRow>,
    pub total: usize,
    /// Share of the whole subset.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeSummary {
    /// Rows summarised.
    pub total: usize,
    /// One row per outcome label, labels ascending.
    pub outcomes: Vec<OutcomeRow>,
    /// Outcomes grouped by end day, days ascending with unknown last.
    pub days: Vec<DayGroup>,
    pub end_high_low: DistributionSummary,
}

/// Composite label of one record; missing cells render as `Unknown`.
pub fn outcome_label(record: &Record) -> String {
    format!("{} {}", record.end_day, record.end_point_seq)
}

/// Split an outcome label into its `Day N` token (or `Unknown`) and the
/// remaining sequence text.
pub fn split_outcome(label: &str) -> (String, String) {
    let day = DAY_TOKEN
        .find(label)
        .map(|m| m.as_str().to_string());
    match day {
        Some(day) => {
            let sequence = SEQUENCE
                .captures(label)
                .and_then(|c| c.get(1))
                .map_or_else(|| label.to_string(), |m| m.as_str().to_string());
            (day, sequence)
        }
        None => (MISSING_LABEL.to_string(), label.to_string()),
    }
}

/// Display order of a day label: its digit, unknown last.
pub fn day_order(day: &str) -> u32 {
    DAY_TOKEN
        .captures(day)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(UNKNOWN_DAY_ORDER)
}

/// Group rows by outcome.  Returns `None` for an empty input, which callers
/// report as "no data".
///
/// Outcome and day-group percentages are each apportioned so they add up to
/// exactly 100.
pub fn summarize_outcomes(rows: &[&Record]) -> Option<OutcomeSummary> {
    if rows.is_empty() {
        return None;
    }
    let total = rows.len();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for rec in rows {
        *counts.entry(outcome_label(rec)).or_insert(0) += 1;
    }

    let group_counts: Vec<usize> = counts.values().copied().collect();
    let shares = apportion(&group_counts, OUTCOME_DECIMALS);
    let outcomes: Vec<OutcomeRow> = counts
        .into_iter()
        .zip(shares)
        .map(|((outcome, count), percentage)| {
            let (end_day, sequence) = split_outcome(&outcome);
            OutcomeRow {
                outcome,
                end_day,
                sequence,
                count,
                percentage,
            }
        })
        .collect();

    let mut by_day: BTreeMap<(u32, String), Vec<OutcomeRow>> = BTreeMap::new();
    for row in &outcomes {
        by_day
            .entry((day_order(&row.end_day), row.end_day.clone()))
            .or_default()
            .push(row.clone());
    }
    let day_totals: Vec<usize> = by_day
        .values()
        .map(|group| group.iter().map(|o| o.count).sum())
        .collect();
    let day_shares = apportion(&day_totals, OUTCOME_DECIMALS);
    let days = by_day
        .into_iter()
        .zip(day_totals.into_iter().zip(day_shares))
        .map(|(((_, day), outcomes), (day_total, percentage))| DayGroup {
            day,
            outcomes,
            total: day_total,
            percentage,
        })
        .collect();

    Some(OutcomeSummary {
        total,
        outcomes,
        days,
        end_high_low: value_counts(rows, Column::EndHighLow, END_HIGH_LOW_DECIMALS),
    })
}
