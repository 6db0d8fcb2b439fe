/// Round to `decimals` places, ties to even (numpy's `round`).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

/// `part / whole * 100`, rounded.  A zero `whole` yields 0.
pub fn percentage(part: usize, whole: usize, decimals: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, decimals)
}

/// Share of each part in the sum of `parts`, at `decimals` places, adding up
/// to exactly 100.
///
/// Largest remainder apportionment: every share is first truncated to the
/// last decimal, then the leftover units go one each to the shares with the
/// largest truncated remainder.  Equal remainders favour the earlier part.
/// All zeros when `parts` sums to 0.
pub fn apportion(parts: &[usize], decimals: u32) -> Vec<f64> {
    let whole: u128 = parts.iter().map(|&p| p as u128).sum();
    if whole == 0 {
        return vec![0.0; parts.len()];
    }
    let scale = 10u128.pow(decimals);
    let target = 100 * scale;

    let mut units: Vec<u128> = Vec::with_capacity(parts.len());
    let mut remainders: Vec<(u128, usize)> = Vec::with_capacity(parts.len());
    for (i, &part) in parts.iter().enumerate() {
        let scaled = part as u128 * target;
        units.push(scaled / whole);
        remainders.push((scaled % whole, i));
    }

    let leftover = target - units.iter().sum::<u128>();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(leftover as usize) {
        units[i] += 1;
    }

    units
        .into_iter()
        .map(|u| u as f64 / scale as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn ties_go_to_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn percentage_of_zero_is_zero() {
        assert_eq!(percentage(0, 0, 1), 0.0);
        assert_eq!(percentage(1, 3, 1), 33.3);
        assert_eq!(percentage(2, 3, 2), 66.67);
    }

    #[test]
    fn apportion_keeps_exact_shares() {
        assert_eq!(apportion(&[6, 4], 1), vec![60.0, 40.0]);
        assert_eq!(apportion(&[1, 1, 2], 2), vec![25.0, 25.0, 50.0]);
        assert_eq!(apportion(&[0, 0], 1), vec![0.0, 0.0]);
        assert!(apportion(&[], 1).is_empty());
    }

    #[test]
    fn apportion_hands_leftover_units_to_largest_remainders() {
        // 100 / 6 = 16.666..: independent rounding would give 6 x 16.7.
        let shares = apportion(&[1; 6], 1);
        assert_eq!(shares, vec![16.7, 16.7, 16.7, 16.7, 16.6, 16.6]);
        assert_abs_diff_eq!(shares.iter().sum::<f64>(), 100.0, epsilon = 1e-9);

        // Three equal remainders compete for two leftover units; the last loses.
        let shares = apportion(&[1, 2, 2, 2], 1);
        assert_eq!(shares, vec![14.3, 28.6, 28.6, 28.5]);
        assert_abs_diff_eq!(shares.iter().sum::<f64>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn apportion_sums_to_one_hundred_for_many_groups() {
        for n in 1..=40 {
            let parts: Vec<usize> = (1..=n).collect();
            let sum: f64 = apportion(&parts, 1).iter().sum();
            assert_abs_diff_eq!(sum, 100.0, epsilon = 1e-9);
        }
    }
}
