use std::collections::{BTreeMap, BTreeSet};

use super::distribution::{
    joint_high_low, summarize_distribution, DistributionSummary, JointDistribution,
};
use super::error::InvalidColumnError;
use super::filter::{apply, FilterSpec, FilteredSubset};
use super::model::{Column, Dataset};
use super::outcome::{summarize_outcomes, OutcomeSummary};

/// Per-day model columns shown as distributions.
pub const DAY_MODEL_COLUMNS: [Column; 4] = [
    Column::Day2Model,
    Column::Day3Model,
    Column::Day4Model,
    Column::Day5Model,
];

/// Every column with a user-chosen allowed value set.
pub const DISTRIBUTION_COLUMNS: [Column; 6] = [
    Column::HighDay,
    Column::LowDay,
    Column::Day2Model,
    Column::Day3Model,
    Column::Day4Model,
    Column::Day5Model,
];

// ---------------------------------------------------------------------------
// DistributionSelections
// ---------------------------------------------------------------------------

/// Allowed values per distribution column for one scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionSelections {
    allowed: BTreeMap<Column, BTreeSet<String>>,
}

impl DistributionSelections {
    /// Everything present is allowed.
    pub fn all_of(dataset: &Dataset) -> Self {
        DistributionSelections {
            allowed: DISTRIBUTION_COLUMNS
                .into_iter()
                .map(|c| (c, dataset.distinct(c)))
                .collect(),
        }
    }

    pub fn allowed(&self, column: Column) -> &BTreeSet<String> {
        static NONE: BTreeSet<String> = BTreeSet::new();
        self.allowed.get(&column).unwrap_or(&NONE)
    }

    pub fn set_allowed(&mut self, column: Column, values: BTreeSet<String>) {
        self.allowed.insert(column, values);
    }

    /// Flip membership of one value.
    pub fn toggle(&mut self, column: Column, value: &str) {
        let set = self.allowed.entry(column).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// ScenarioReport
// ---------------------------------------------------------------------------

/// Everything one scenario shows.  Summaries are `None` / empty when the
/// subset has no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub subset: FilteredSubset,
    pub outcomes: Option<OutcomeSummary>,
    pub high_low: JointDistribution,
    pub day_models: Vec<DistributionSummary>,
}

impl ScenarioReport {
    pub fn len(&self) -> usize {
        self.subset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subset.is_empty()
    }
}

/// Run one scenario from filters to summaries.
pub fn evaluate(
    dataset: &Dataset,
    filters: &FilterSpec,
    selections: &DistributionSelections,
) -> Result<ScenarioReport, InvalidColumnError> {
    let subset = apply(dataset, filters)?;
    let rows = subset.records(dataset);

    let outcomes = summarize_outcomes(&rows);
    let high_low = joint_high_low(
        &rows,
        selections.allowed(Column::HighDay),
        selections.allowed(Column::LowDay),
    );
    let day_models = DAY_MODEL_COLUMNS
        .into_iter()
        .map(|col| summarize_distribution(&rows, col, selections.allowed(col)))
        .collect();

    log::debug!(
        "Scenario evaluated: {} of {} rows, {} outcome groups",
        subset.len(),
        dataset.len(),
        outcomes.as_ref().map_or(0, |o| o.outcomes.len())
    );

    Ok(ScenarioReport {
        subset,
        outcomes,
        high_low,
        day_models,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Selection;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let records = vec![
            Record::default()
                .with(Column::Confirmation, "Yes")
                .with(Column::EndDay, "Day 2")
                .with(Column::EndPointSeq, "High")
                .with(Column::HighDay, "Day 2")
                .with(Column::LowDay, "Day 1")
                .with(Column::Day2Model, "RX"),
            Record::default()
                .with(Column::Confirmation, "No")
                .with(Column::EndDay, "Day 3")
                .with(Column::EndPointSeq, "Low")
                .with(Column::HighDay, "Day 1")
                .with(Column::LowDay, "Day 3")
                .with(Column::Day2Model, "DX"),
            Record::default()
                .with(Column::Confirmation, "Yes")
                .with(Column::EndDay, "Day 3")
                .with(Column::EndPointSeq, "Low")
                .with(Column::HighDay, "Day 2")
                .with(Column::LowDay, "Day 3")
                .with(Column::Day2Model, "RX"),
        ];
        let columns = [
            Column::Confirmation,
            Column::EndDay,
            Column::EndPointSeq,
            Column::HighDay,
            Column::LowDay,
            Column::Day2Model,
        ];
        Dataset::from_records(records, columns.into_iter().collect())
    }

    #[test]
    fn default_selections_allow_everything_present() {
        let ds = dataset();
        let sel = DistributionSelections::all_of(&ds);
        assert_eq!(sel.allowed(Column::Day2Model).len(), 2);
        assert!(sel.allowed(Column::Day5Model).is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = DistributionSelections::all_of(&dataset());
        sel.toggle(Column::Day2Model, "RX");
        assert!(!sel.allowed(Column::Day2Model).contains("RX"));
        sel.toggle(Column::Day2Model, "RX");
        assert!(sel.allowed(Column::Day2Model).contains("RX"));
    }

    #[test]
    fn evaluate_builds_every_summary() {
        let ds = dataset();
        let filters = FilterSpec::new().with(Column::Confirmation, Selection::parse("Yes"));
        let report = evaluate(&ds, &filters, &DistributionSelections::all_of(&ds)).unwrap();

        assert_eq!(report.len(), 2);
        let outcomes = report.outcomes.as_ref().unwrap();
        assert_eq!(outcomes.days.len(), 2);
        assert_eq!(report.high_low.high.count_of("Day 2"), Some(2));
        assert_eq!(report.day_models.len(), 4);
        assert_eq!(report.day_models[0].count_of("RX"), Some(2));
        assert!(report.day_models[3].is_empty());
    }

    #[test]
    fn no_matches_is_a_valid_report() {
        let ds = dataset();
        let filters = FilterSpec::new().with(Column::Confirmation, Selection::parse("Maybe"));
        let report = evaluate(&ds, &filters, &DistributionSelections::all_of(&ds)).unwrap();
        assert!(report.is_empty());
        assert!(report.outcomes.is_none());
        assert!(report.high_low.is_empty());
    }

    #[test]
    fn deselected_values_drop_out_of_distributions() {
        let ds = dataset();
        let mut sel = DistributionSelections::all_of(&ds);
        sel.set_allowed(Column::LowDay, BTreeSet::from(["Day 3".to_string()]));
        let report = evaluate(&ds, &FilterSpec::new(), &sel).unwrap();
        assert_eq!(report.high_low.low.total, 2);
        assert_eq!(report.high_low.high.count_of("Day 2"), Some(1));
        assert_eq!(report.high_low.high.count_of("Day 1"), Some(1));
    }

    #[test]
    fn invalid_column_propagates() {
        let ds = dataset();
        let filters = FilterSpec::new().with(Column::StartSession, Selection::parse("NY"));
        assert!(evaluate(&ds, &filters, &DistributionSelections::all_of(&ds)).is_err());
    }
}
