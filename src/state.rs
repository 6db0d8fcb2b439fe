use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::data::compare::{compare, Comparison};
use crate::data::filter::{FilterSpec, Selection};
use crate::data::loader::load_file;
use crate::data::model::{Column, Dataset};
use crate::data::scenario::{evaluate, DistributionSelections, ScenarioReport};

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    First,
    Second,
}

impl ScenarioId {
    pub const BOTH: [ScenarioId; 2] = [ScenarioId::First, ScenarioId::Second];

    pub fn index(self) -> usize {
        match self {
            ScenarioId::First => 0,
            ScenarioId::Second => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScenarioId::First => "Scenario 1",
            ScenarioId::Second => "Scenario 2",
        }
    }
}

/// One independent set of filters and what they currently produce.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub id: ScenarioId,
    pub filters: FilterSpec,
    pub selections: DistributionSelections,
    /// Latest evaluation; `None` when the filters are invalid.
    pub report: Option<ScenarioReport>,
    pub error: Option<String>,
}

impl Scenario {
    fn new(id: ScenarioId, dataset: &Dataset) -> Self {
        Scenario {
            id,
            filters: FilterSpec::new(),
            selections: DistributionSelections::all_of(dataset),
            report: None,
            error: None,
        }
    }

    fn refresh(&mut self, dataset: &Dataset) {
        match evaluate(dataset, &self.filters, &self.selections) {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                log::warn!("{}: {e}", self.id.title());
                self.report = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Rows in the current subset (0 while the filters are invalid).
    pub fn count(&self) -> usize {
        self.report.as_ref().map_or(0, ScenarioReport::len)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's view of a loaded dataset.  The dataset itself is shared
/// read-only; everything else belongs to the session.
#[derive(Debug, Clone)]
pub struct Session {
    pub dataset: Arc<Dataset>,
    pub scenarios: [Scenario; 2],
    pub comparison: Comparison,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let scenarios = ScenarioId::BOTH.map(|id| Scenario::new(id, &dataset));
        let mut session = Session {
            dataset,
            scenarios,
            comparison: Comparison::default(),
        };
        session.refresh();
        session
    }

    pub fn scenario(&self, id: ScenarioId) -> &Scenario {
        &self.scenarios[id.index()]
    }

    /// Re-run both scenarios and the comparison from scratch.
    pub fn refresh(&mut self) {
        for scenario in &mut self.scenarios {
            scenario.refresh(&self.dataset);
        }
        self.recompare();
    }

    fn refresh_one(&mut self, id: ScenarioId) {
        self.scenarios[id.index()].refresh(&self.dataset);
        self.recompare();
    }

    fn recompare(&mut self) {
        let [a, b] = &self.scenarios;
        self.comparison = compare(a.count(), b.count(), self.dataset.len());
    }

    pub fn set_filter(&mut self, id: ScenarioId, column: Column, selection: Selection) {
        self.scenarios[id.index()].filters.set(column, selection);
        self.refresh_one(id);
    }

    pub fn reset_filters(&mut self, id: ScenarioId) {
        self.scenarios[id.index()].filters.clear();
        self.refresh_one(id);
    }

    /// Toggle one value of a distribution column's allowed set.
    pub fn toggle_allowed(&mut self, id: ScenarioId, column: Column, value: &str) {
        self.scenarios[id.index()].selections.toggle(column, value);
        self.refresh_one(id);
    }

    pub fn select_all(&mut self, id: ScenarioId, column: Column) {
        let all = self.dataset.distinct(column);
        self.scenarios[id.index()].selections.set_allowed(column, all);
        self.refresh_one(id);
    }

    pub fn select_none(&mut self, id: ScenarioId, column: Column) {
        self.scenarios[id.index()]
            .selections
            .set_allowed(column, Default::default());
        self.refresh_one(id);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Active session (None until a dataset loads).
    pub session: Option<Session>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and start a fresh session on it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.status_message = if dataset.is_empty() {
            log::warn!("Loaded dataset has no rows");
            Some("Loaded file has no rows".to_string())
        } else {
            None
        };
        self.session = Some(Session::new(Arc::new(dataset)));
    }

    /// Load `path`, replacing the current session on success.  A failed
    /// load keeps no partial data and leaves the error in the status line.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let result = load_file(path).with_context(|| format!("loading {}", path.display()));
        match result {
            Ok(dataset) => {
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.session = None;
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let records: Vec<Record> = (0..20)
            .map(|i| {
                Record::default()
                    .with(Column::Confirmation, if i < 7 { "Yes" } else { "No" })
                    .with(Column::Model, if i >= 17 { "RX" } else { "DX" })
                    .with(Column::EndDay, if i % 2 == 0 { "Day 2" } else { "Day 3" })
                    .with(Column::EndPointSeq, "High")
                    .with(Column::Day2Model, if i % 4 == 0 { "UX" } else { "DG" })
            })
            .collect();
        let columns = BTreeSet::from([
            Column::Confirmation,
            Column::Model,
            Column::EndDay,
            Column::EndPointSeq,
            Column::Day2Model,
        ]);
        Dataset::from_records(records, columns)
    }

    #[test]
    fn fresh_session_shows_whole_dataset_twice() {
        let session = Session::new(Arc::new(dataset()));
        assert_eq!(session.scenario(ScenarioId::First).count(), 20);
        assert_eq!(session.scenario(ScenarioId::Second).count(), 20);
        assert_eq!(session.comparison.rel_pct_a, 50.0);
        assert_eq!(session.comparison.occ_pct_b, 100.0);
    }

    #[test]
    fn filters_feed_the_comparison() {
        let mut session = Session::new(Arc::new(dataset()));
        session.set_filter(ScenarioId::First, Column::Confirmation, Selection::parse("Yes"));
        session.set_filter(ScenarioId::Second, Column::Model, Selection::parse("RX"));
        session.set_filter(ScenarioId::Second, Column::Confirmation, Selection::parse("No"));

        let c = session.comparison;
        assert_eq!((c.count_a, c.count_b, c.full_total), (7, 3, 20));
        assert_eq!((c.rel_pct_a, c.rel_pct_b), (70.0, 30.0));
        assert_eq!((c.occ_pct_a, c.occ_pct_b), (35.0, 15.0));

        session.reset_filters(ScenarioId::Second);
        assert_eq!(session.scenario(ScenarioId::Second).count(), 20);
    }

    #[test]
    fn scenarios_do_not_share_selections() {
        let mut session = Session::new(Arc::new(dataset()));
        session.select_none(ScenarioId::First, Column::Day2Model);

        let first = session.scenario(ScenarioId::First).report.as_ref().unwrap();
        let second = session.scenario(ScenarioId::Second).report.as_ref().unwrap();
        assert!(first.day_models[0].is_empty());
        assert_eq!(second.day_models[0].total, 20);

        session.toggle_allowed(ScenarioId::First, Column::Day2Model, "UX");
        let first = session.scenario(ScenarioId::First).report.as_ref().unwrap();
        assert_eq!(first.day_models[0].count_of("UX"), Some(5));
        assert_eq!(first.day_models[0].rows[0].percentage, 100.0);

        session.select_all(ScenarioId::First, Column::Day2Model);
        let first = session.scenario(ScenarioId::First).report.as_ref().unwrap();
        assert_eq!(first.day_models[0].total, 20);
    }

    #[test]
    fn invalid_column_is_reported_on_the_scenario() {
        let mut session = Session::new(Arc::new(dataset()));
        session.set_filter(ScenarioId::First, Column::StartDay, Selection::parse("Monday"));
        let first = session.scenario(ScenarioId::First);
        assert!(first.report.is_none());
        assert!(first.error.as_deref().unwrap().contains("Start Day"));
        assert_eq!(session.comparison.count_a, 0);
    }

    #[test]
    fn header_only_dataset_loads_with_a_notice() {
        let mut state = AppState::default();
        state.set_dataset(Dataset::from_records(Vec::new(), BTreeSet::from([Column::Model])));
        let session = state.session.as_ref().unwrap();
        assert!(session.scenario(ScenarioId::First).report.as_ref().unwrap().is_empty());
        assert_eq!(session.comparison.occ_pct_a, 0.0);
        assert!(state.status_message.as_deref().unwrap().contains("no rows"));

        state.set_dataset(dataset());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_load_keeps_no_session() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert!(state.load(Path::new("missing/WDRR_seq_CSV.csv")).is_err());
        assert!(state.session.is_none());
        assert!(state.status_message.unwrap().contains("not found"));
    }
}
