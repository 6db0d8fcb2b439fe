use std::collections::{BTreeMap, BTreeSet};

use super::model::{Column, Record};
use super::percent::percentage;

/// Decimal places used by restricted distributions.
pub const DISTRIBUTION_DECIMALS: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Count and share of each distinct value of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub column: Column,
    /// Rows counted (the denominator of every percentage).
    pub total: usize,
    /// Ordered by count descending, then value ascending.
    pub rows: Vec<ValueCount>,
}

impl DistributionSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.rows.iter().find(|r| r.value == value).map(|r| r.count)
    }
}

/// High Day and Low Day counted over rows that pass both membership filters.
#[derive(Debug, Clone, PartialEq)]
pub struct JointDistribution {
    pub high: DistributionSummary,
    pub low: DistributionSummary,
}

impl JointDistribution {
    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.low.is_empty()
    }
}

/// Rows whose `column` value is one of `allowed`.  Missing cells are never
/// members.
pub fn restrict<'a>(
    rows: &[&'a Record],
    column: Column,
    allowed: &BTreeSet<String>,
) -> Vec<&'a Record> {
    rows.iter()
        .copied()
        .filter(|rec| rec.get(column).as_str().is_some_and(|v| allowed.contains(v)))
        .collect()
}

/// Value counts over every non-missing cell of `column`.
pub fn value_counts(rows: &[&Record], column: Column, decimals: u32) -> DistributionSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in rows {
        if let Some(v) = rec.get(column).as_str() {
            *counts.entry(v).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();
    let mut out: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
            percentage: percentage(count, total, decimals),
        })
        .collect();
    // BTreeMap order already sorts by value; the stable sort keeps it for ties.
    out.sort_by(|a, b| b.count.cmp(&a.count));

    DistributionSummary {
        column,
        total,
        rows: out,
    }
}

/// Distribution of `column` over the rows whose value is in `allowed`.
/// Percentages are relative to the restricted total.
pub fn summarize_distribution(
    rows: &[&Record],
    column: Column,
    allowed: &BTreeSet<String>,
) -> DistributionSummary {
    value_counts(&restrict(rows, column, allowed), column, DISTRIBUTION_DECIMALS)
}

/// Restrict on the high column, then on the low column, and count both.
pub fn joint_high_low(
    rows: &[&Record],
    high_allowed: &BTreeSet<String>,
    low_allowed: &BTreeSet<String>,
) -> JointDistribution {
    let highs = restrict(rows, Column::HighDay, high_allowed);
    let restricted = restrict(&highs, Column::LowDay, low_allowed);
    JointDistribution {
        high: value_counts(&restricted, Column::HighDay, DISTRIBUTION_DECIMALS),
        low: value_counts(&restricted, Column::LowDay, DISTRIBUTION_DECIMALS),
    }
}
