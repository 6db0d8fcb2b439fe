use std::collections::BTreeMap;

use super::error::InvalidColumnError;
use super::model::{Column, Dataset, Record};

/// Selector entry meaning "no constraint on this column".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Selection: what a single selector currently holds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// Keep rows whose cell equals this value exactly.
    Only(String),
}

impl Selection {
    /// Interpret a selector entry; both "All" and the blank entry are
    /// unconstrained.
    pub fn parse(entry: &str) -> Self {
        match entry {
            "" | ALL => Selection::All,
            value => Selection::Only(value.to_string()),
        }
    }

    /// Label for the selector button.
    pub fn display(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(v) => v,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSpec: one scenario's selector state
// ---------------------------------------------------------------------------

/// Per-column selection state for one scenario.  Columns absent from the
/// map are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    entries: BTreeMap<Column, Selection>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: Column, selection: Selection) {
        self.entries.insert(column, selection);
    }

    /// Builder-style variant of [`FilterSpec::set`].
    #[cfg(test)]
    pub fn with(mut self, column: Column, selection: Selection) -> Self {
        self.set(column, selection);
        self
    }

    pub fn get(&self, column: Column) -> &Selection {
        const UNCONSTRAINED: &Selection = &Selection::All;
        self.entries.get(&column).unwrap_or(UNCONSTRAINED)
    }

    /// Constrained entries only.
    pub fn constraints(&self) -> impl Iterator<Item = (Column, &str)> {
        self.entries.iter().filter_map(|(&col, sel)| match sel {
            Selection::Only(v) => Some((col, v.as_str())),
            Selection::All => None,
        })
    }

    /// Drop every constraint.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// FilteredSubset
// ---------------------------------------------------------------------------

/// Rows of a dataset that pass a [`FilterSpec`], as ascending row indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredSubset {
    pub indices: Vec<usize>,
}

impl FilteredSubset {
    /// Every row of the dataset.
    #[cfg(test)]
    pub fn whole(dataset: &Dataset) -> Self {
        FilteredSubset {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Borrow the selected rows in dataset order.
    pub fn records<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        self.indices.iter().map(|&i| &dataset.records[i]).collect()
    }
}

/// Return the rows that pass every constrained entry of `spec`.
///
/// A row passes a constraint when its cell equals the selected value
/// exactly; a missing cell never passes.  Constraining a column the dataset
/// does not have is an error rather than a silent no-op.
pub fn apply(
    dataset: &Dataset,
    spec: &FilterSpec,
) -> Result<FilteredSubset, InvalidColumnError> {
    let constraints: Vec<(Column, &str)> = spec.constraints().collect();

    if let Some(&(col, _)) = constraints
        .iter()
        .find(|(col, _)| !dataset.has_column(*col))
    {
        return Err(InvalidColumnError::absent(col.header()));
    }

    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            constraints
                .iter()
                .all(|&(col, wanted)| rec.get(col).as_str() == Some(wanted))
        })
        .map(|(i, _)| i)
        .collect();

    Ok(FilteredSubset { indices })
}
