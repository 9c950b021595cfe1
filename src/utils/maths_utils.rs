use argminmax::ArgMinMax;
use itertools::Itertools;

/// (min, max) of a non-empty, NaN-free slice. Returns `None` for an empty slice.
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    let (min_index, max_index) = vec.argminmax();
    Some((vec[min_index], vec[max_index]))
}

/// Percentage change vs. the previous element, `* 100`.
/// The first element has no predecessor so its value is `None`.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(None);
    }
    out.extend(
        values
            .iter()
            .tuple_windows()
            .map(|(prev, cur)| Some((cur - prev) / prev * 100.0)),
    );
    out
}

/// Trailing simple moving average over `window` elements (current one included).
/// Positions with fewer than `window` elements available are `None`.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut out = vec![None; values.len().min(window - 1)];
    out.extend(
        values
            .windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
    );
    out
}

/// Arithmetic mean of the defined values, `None` if there are none.
pub fn mean_defined(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Quantile `q` (0..=1) of an ascending slice, interpolating linearly between
/// the two nearest ranks. `None` for an empty slice.
pub fn linear_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = q.clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some(sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn min_max_of_levels() {
        assert_eq!(get_min_max(&[105.0, 100.0, 103.5]), Some((100.0, 105.0)));
        assert_eq!(get_min_max(&[42.0]), Some((42.0, 42.0)));
        assert_eq!(get_min_max(&[]), None);
    }

    #[test]
    fn pct_change_first_is_undefined() {
        let changes = pct_change(&[100.0, 102.0, 99.0]);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0], None);
        assert!(approx_eq(changes[1].unwrap(), 2.0));
        assert!(approx_eq(changes[2].unwrap(), -2.941176470588235));
        assert!(pct_change(&[]).is_empty());
    }

    #[test]
    fn trailing_mean_waits_for_full_window() {
        let values: Vec<f64> = (1..=5).map(f64::from).collect();
        let means = trailing_mean(&values, 3);
        assert_eq!(means, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);

        // Shorter than the window: nothing defined, length preserved
        assert_eq!(trailing_mean(&values[..2], 3), vec![None, None]);
    }

    #[test]
    fn quantiles_interpolate_between_ranks() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(linear_quantile(&values, 0.25), Some(1.75));
        assert_eq!(linear_quantile(&values, 0.5), Some(2.5));
        assert_eq!(linear_quantile(&values, 0.75), Some(3.25));
        assert_eq!(linear_quantile(&[7.0], 0.25), Some(7.0));
        assert_eq!(linear_quantile(&[], 0.5), None);
    }

    #[test]
    fn mean_skips_undefined() {
        assert_eq!(mean_defined([None, Some(2.0), Some(4.0)]), Some(3.0));
        assert_eq!(mean_defined([None, None]), None);
    }
}
