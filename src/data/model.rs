use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::error::InvalidColumnError;

/// Text shown wherever a missing cell has to be rendered.
pub const MISSING_LABEL: &str = "Unknown";

// ---------------------------------------------------------------------------
// CellValue – a single categorical cell
// ---------------------------------------------------------------------------

/// One categorical cell of the source table.
///
/// Missing cells are explicit instead of being stringified into the label
/// they end up in; they render as [`MISSING_LABEL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellValue {
    Text(String),
    #[default]
    Missing,
}

impl CellValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Missing => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "{MISSING_LABEL}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Column – the fixed set of fields the dashboard understands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Confirmation,
    ConfTrueFalse,
    Model,
    StartDay,
    StartHighLow,
    StartPointSeq,
    StartSession,
    EndDay,
    EndPointSeq,
    EndHighLow,
    HighDay,
    LowDay,
    Day2Model,
    Day3Model,
    Day4Model,
    Day5Model,
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::Confirmation,
        Column::ConfTrueFalse,
        Column::Model,
        Column::StartDay,
        Column::StartHighLow,
        Column::StartPointSeq,
        Column::StartSession,
        Column::EndDay,
        Column::EndPointSeq,
        Column::EndHighLow,
        Column::HighDay,
        Column::LowDay,
        Column::Day2Model,
        Column::Day3Model,
        Column::Day4Model,
        Column::Day5Model,
    ];

    /// Source headers that map to this column, in order of preference.
    ///
    /// The source sheet carries two `Start High/Low` columns; the one used for
    /// the starting point is the second, which pandas-style deduplication
    /// names `Start High/Low.1`.
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Column::Confirmation => &["Confirmation"],
            Column::ConfTrueFalse => &["Conf True/False"],
            Column::Model => &["Model"],
            Column::StartDay => &["Start Day"],
            Column::StartHighLow => &["Start High/Low.1", "Start High/Low"],
            Column::StartPointSeq => &["Start point seq"],
            Column::StartSession => &["Start session"],
            Column::EndDay => &["End Day"],
            Column::EndPointSeq => &["End point seq"],
            Column::EndHighLow => &["End High/Low"],
            Column::HighDay => &["High Day"],
            Column::LowDay => &["Low Day"],
            Column::Day2Model => &["Day 2 Model"],
            Column::Day3Model => &["Day 3 Model"],
            Column::Day4Model => &["Day 4 Model"],
            Column::Day5Model => &["Day 5 Model"],
        }
    }

    /// Canonical header name.
    pub fn header(self) -> &'static str {
        self.headers()[0]
    }

    /// Human-readable label used by the selectors.
    pub fn label(self) -> &'static str {
        match self {
            Column::Confirmation => "Confirmation",
            Column::ConfTrueFalse => "Confirmation True/False",
            Column::Model => "Model (Tuesday RDR-Wednesday ODR)",
            Column::StartDay => "Start Day",
            Column::StartHighLow => "Starting Point High/Low",
            Column::StartPointSeq => "Starting Point Sequence",
            Column::StartSession => "Starting Point Session",
            Column::EndDay => "End Day",
            Column::EndPointSeq => "End Point Sequence",
            Column::EndHighLow => "End High/Low",
            Column::HighDay => "High Day",
            Column::LowDay => "Low Day",
            Column::Day2Model => "Day 2 Model",
            Column::Day3Model => "Day 3 Model",
            Column::Day4Model => "Day 4 Model",
            Column::Day5Model => "Day 5 Model",
        }
    }

    /// Whether the selector for this column offers the blank "no filter"
    /// entry in addition to "All".
    pub fn offers_blank_sentinel(self) -> bool {
        matches!(
            self,
            Column::StartSession | Column::StartHighLow | Column::HighDay | Column::LowDay
        )
    }

    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.headers().contains(&header))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = InvalidColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_header(s).ok_or_else(|| InvalidColumnError::unknown(s))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// One trading sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub confirmation: CellValue,
    pub conf_true_false: CellValue,
    pub model: CellValue,
    pub start_day: CellValue,
    pub start_high_low: CellValue,
    pub start_point_seq: CellValue,
    pub start_session: CellValue,
    pub end_day: CellValue,
    pub end_point_seq: CellValue,
    pub end_high_low: CellValue,
    pub high_day: CellValue,
    pub low_day: CellValue,
    pub day2_model: CellValue,
    pub day3_model: CellValue,
    pub day4_model: CellValue,
    pub day5_model: CellValue,
}

impl Record {
    pub fn get(&self, column: Column) -> &CellValue {
        match column {
            Column::Confirmation => &self.confirmation,
            Column::ConfTrueFalse => &self.conf_true_false,
            Column::Model => &self.model,
            Column::StartDay => &self.start_day,
            Column::StartHighLow => &self.start_high_low,
            Column::StartPointSeq => &self.start_point_seq,
            Column::StartSession => &self.start_session,
            Column::EndDay => &self.end_day,
            Column::EndPointSeq => &self.end_point_seq,
            Column::EndHighLow => &self.end_high_low,
            Column::HighDay => &self.high_day,
            Column::LowDay => &self.low_day,
            Column::Day2Model => &self.day2_model,
            Column::Day3Model => &self.day3_model,
            Column::Day4Model => &self.day4_model,
            Column::Day5Model => &self.day5_model,
        }
    }

    fn get_mut(&mut self, column: Column) -> &mut CellValue {
        match column {
            Column::Confirmation => &mut self.confirmation,
            Column::ConfTrueFalse => &mut self.conf_true_false,
            Column::Model => &mut self.model,
            Column::StartDay => &mut self.start_day,
            Column::StartHighLow => &mut self.start_high_low,
            Column::StartPointSeq => &mut self.start_point_seq,
            Column::StartSession => &mut self.start_session,
            Column::EndDay => &mut self.end_day,
            Column::EndPointSeq => &mut self.end_point_seq,
            Column::EndHighLow => &mut self.end_high_low,
            Column::HighDay => &mut self.high_day,
            Column::LowDay => &mut self.low_day,
            Column::Day2Model => &mut self.day2_model,
            Column::Day3Model => &mut self.day3_model,
            Column::Day4Model => &mut self.day4_model,
            Column::Day5Model => &mut self.day5_model,
        }
    }

    pub fn set(&mut self, column: Column, value: CellValue) {
        *self.get_mut(column) = value;
    }

    /// Builder-style setter for assembling fixtures.
    #[cfg(test)]
    pub fn with(mut self, column: Column, value: impl Into<CellValue>) -> Self {
        self.set(column, value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed table plus per-column indices.  Never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All rows, in source order.
    pub records: Vec<Record>,
    /// Columns that were present in the source headers.
    pub columns: BTreeSet<Column>,
    /// For each present column the sorted set of distinct non-missing values.
    pub unique_values: BTreeMap<Column, BTreeSet<String>>,
}

impl Dataset {
    /// Build column indices from loaded records.
    pub fn from_records(records: Vec<Record>, columns: BTreeSet<Column>) -> Self {
        let mut unique_values: BTreeMap<Column, BTreeSet<String>> = columns
            .iter()
            .map(|&c| (c, BTreeSet::new()))
            .collect();

        for rec in &records {
            for (&col, values) in unique_values.iter_mut() {
                if let Some(v) = rec.get(col).as_str() {
                    values.insert(v.to_string());
                }
            }
        }

        Dataset {
            records,
            columns,
            unique_values,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Sorted distinct non-missing values of a column (empty when absent).
    pub fn distinct(&self, column: Column) -> BTreeSet<String> {
        self.unique_values.get(&column).cloned().unwrap_or_default()
    }

    /// Entries offered by a filter selector: "All", optionally the blank
    /// sentinel, then every distinct value in ascending order.
    pub fn selector_options(&self, column: Column) -> Vec<String> {
        let mut options = Vec::new();
        if column.offers_blank_sentinel() {
            options.push(String::new());
        }
        options.push(super::filter::ALL.to_string());
        if let Some(values) = self.unique_values.get(&column) {
            options.extend(values.iter().cloned());
        }
        options
    }
}
