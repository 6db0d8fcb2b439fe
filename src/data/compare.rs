use super::percent::percentage;

/// Decimal places of every comparison percentage.
pub const COMPARISON_DECIMALS: u32 = 1;

/// Scenario sizes against each other and against the whole dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Comparison {
    pub count_a: usize,
    pub count_b: usize,
    pub full_total: usize,
    /// Share of the two subsets combined.
    pub rel_pct_a: f64,
    pub rel_pct_b: f64,
    /// Share of the full dataset.
    pub occ_pct_a: f64,
    pub occ_pct_b: f64,
}

/// Both denominators are floored at 1, so two empty subsets compare as 0%.
pub fn compare(count_a: usize, count_b: usize, full_total: usize) -> Comparison {
    let combined = (count_a + count_b).max(1);
    let full = full_total.max(1);
    Comparison {
        count_a,
        count_b,
        full_total,
        rel_pct_a: percentage(count_a, combined, COMPARISON_DECIMALS),
        rel_pct_b: percentage(count_b, combined, COMPARISON_DECIMALS),
        occ_pct_a: percentage(count_a, full, COMPARISON_DECIMALS),
        occ_pct_b: percentage(count_b, full, COMPARISON_DECIMALS),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn seven_and_three_out_of_twenty() {
        let c = compare(7, 3, 20);
        assert_eq!(c.rel_pct_a, 70.0);
        assert_eq!(c.rel_pct_b, 30.0);
        assert_eq!(c.occ_pct_a, 35.0);
        assert_eq!(c.occ_pct_b, 15.0);
    }

    #[test]
    fn two_empty_subsets_are_zero() {
        let c = compare(0, 0, 20);
        assert_eq!(
            (c.rel_pct_a, c.rel_pct_b, c.occ_pct_a, c.occ_pct_b),
            (0.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn relative_shares_sum_to_one_hundred() {
        for (a, b) in [(1, 2), (1, 6), (5, 0), (13, 17), (2, 7)] {
            let c = compare(a, b, 50);
            assert_abs_diff_eq!(c.rel_pct_a + c.rel_pct_b, 100.0, epsilon = 0.1 + 1e-9);
        }
    }

    #[test]
    fn occurrence_of_three_in_ten() {
        let c = compare(3, 10, 10);
        assert_eq!(c.occ_pct_a, 30.0);
        assert_eq!(c.occ_pct_b, 100.0);
    }
}
