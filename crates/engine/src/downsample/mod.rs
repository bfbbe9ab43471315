//! Chart series reduction.
//!
//! Long daily series are trimmed to a bounded point count before charting.
//! The default strategy keeps every day with movement and strides through
//! the flat days; ledgers are bursty, and the non-zero days are the signal.

use crate::aggregate::DailyBucket;

/// Reduces daily series to a bounded number of points.
pub struct Downsampler;

impl Downsampler {
    /// Smart downsampling: retain all signal-bearing points.
    ///
    /// Points with any non-zero category value are always kept; the
    /// remaining budget is filled by evenly striding through the all-zero
    /// points, and the result is re-sorted chronologically. When the
    /// non-zero points alone exceed `target`, the target is exceeded rather
    /// than dropping signal. That overshoot is the accepted trade-off.
    #[must_use]
    pub fn downsample(buckets: Vec<DailyBucket>, target: usize) -> Vec<DailyBucket> {
        if buckets.len() <= target {
            return buckets;
        }

        let (active, quiet): (Vec<(usize, &DailyBucket)>, Vec<(usize, &DailyBucket)>) = buckets
            .iter()
            .enumerate()
            .partition(|(_, b)| b.has_activity());

        let budget = target.saturating_sub(active.len());
        let mut keep: Vec<usize> = active.iter().map(|(i, _)| *i).collect();

        if budget > 0 && !quiet.is_empty() {
            let step = quiet.len().div_ceil(budget);
            keep.extend(quiet.iter().step_by(step).map(|(i, _)| *i));
        }

        keep.sort_unstable();
        keep.into_iter().map(|i| buckets[i].clone()).collect()
    }

    /// Stride downsampling: fixed step, always keeping the final point.
    ///
    /// A simpler fallback for scopes where signal density is uniformly
    /// high and the smart strategy degenerates to "keep everything".
    #[must_use]
    pub fn downsample_stride(buckets: Vec<DailyBucket>, target: usize) -> Vec<DailyBucket> {
        if buckets.len() <= target || target == 0 {
            return buckets;
        }

        let step = buckets.len().div_ceil(target);
        let last_index = buckets.len() - 1;
        let mut kept: Vec<DailyBucket> = buckets
            .iter()
            .enumerate()
            .filter(|(i, _)| i % step == 0)
            .map(|(_, b)| b.clone())
            .collect();

        // The final balance must always survive the reduction.
        if (last_index % step) != 0 {
            kept.push(buckets[last_index].clone());
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn bucket(day_offset: u64, production: Decimal) -> DailyBucket {
        DailyBucket {
            date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(day_offset))
                .unwrap(),
            production,
            adjustments: Decimal::ZERO,
            disbursements: Decimal::ZERO,
            billing: Decimal::ZERO,
            provisions: Decimal::ZERO,
            wip_balance: production,
        }
    }

    fn series(spec: &[(u64, i64)]) -> Vec<DailyBucket> {
        spec.iter()
            .map(|(offset, amount)| bucket(*offset, Decimal::new(*amount, 0)))
            .collect()
    }

    #[test]
    fn test_short_series_unchanged() {
        let buckets = series(&[(0, 10), (1, 0), (2, 20)]);
        let result = Downsampler::downsample(buckets.clone(), 10);
        assert_eq!(result, buckets);
    }

    #[test]
    fn test_nonzero_points_always_kept() {
        // 3 active days scattered in 30 quiet ones.
        let mut spec: Vec<(u64, i64)> = (0..33).map(|i| (i, 0)).collect();
        spec[5].1 = 100;
        spec[17].1 = -40;
        spec[29].1 = 25;
        let buckets = series(&spec);

        let result = Downsampler::downsample(buckets, 10);

        let active_dates: Vec<_> = result
            .iter()
            .filter(|b| b.has_activity())
            .map(|b| b.date)
            .collect();
        assert_eq!(active_dates.len(), 3);
        assert!(result.len() <= 10);
    }

    #[test]
    fn test_target_exceeded_rather_than_dropping_signal() {
        let spec: Vec<(u64, i64)> = (0..50).map(|i| (i, 1 + i64::try_from(i).unwrap())).collect();
        let buckets = series(&spec);

        // Every point is signal; all 50 survive a target of 10.
        let result = Downsampler::downsample(buckets, 10);
        assert_eq!(result.len(), 50);
    }

    #[test]
    fn test_output_is_chronological() {
        let mut spec: Vec<(u64, i64)> = (0..40).map(|i| (i, 0)).collect();
        spec[35].1 = 7;
        spec[2].1 = 3;
        let buckets = series(&spec);

        let result = Downsampler::downsample(buckets, 8);
        let mut sorted = result.clone();
        sorted.sort_by_key(|b| b.date);
        assert_eq!(result, sorted);
    }

    #[test]
    fn test_stride_keeps_last_point() {
        let spec: Vec<(u64, i64)> = (0..100).map(|i| (i, 1)).collect();
        let buckets = series(&spec);
        let last_date = buckets.last().unwrap().date;

        let result = Downsampler::downsample_stride(buckets, 12);
        assert!(result.len() <= 13);
        assert_eq!(result.last().unwrap().date, last_date);
    }

    #[test]
    fn test_stride_short_series_unchanged() {
        let buckets = series(&[(0, 1), (1, 2)]);
        let result = Downsampler::downsample_stride(buckets.clone(), 5);
        assert_eq!(result, buckets);
    }

    #[test]
    fn test_zero_target_keeps_signal_only() {
        let buckets = series(&[(0, 0), (1, 5), (2, 0)]);
        let result = Downsampler::downsample(buckets, 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].production, dec!(5));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(150))]

        /// Every signal-bearing bucket survives, order is preserved, and
        /// the output length is bounded by max(target, signal count).
        #[test]
        fn prop_downsample_fidelity(
            values in prop::collection::vec(-50i64..50, 0..200),
            target in 0usize..120,
        ) {
            let spec: Vec<(u64, i64)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (u64::try_from(i).unwrap(), *v))
                .collect();
            let buckets = series(&spec);
            let signal_dates: Vec<_> = buckets
                .iter()
                .filter(|b| b.has_activity())
                .map(|b| b.date)
                .collect();

            let result = Downsampler::downsample(buckets, target);

            // Non-zero points all present.
            for date in &signal_dates {
                prop_assert!(result.iter().any(|b| b.date == *date));
            }

            // Chronological order.
            for pair in result.windows(2) {
                prop_assert!(pair[0].date < pair[1].date);
            }

            // Bounded size.
            prop_assert!(result.len() <= target.max(signal_dates.len()));
        }
    }
}
