/*!
Reductions applied to the replicate samples of a single data point.

All the deviations are population deviations (divided by `n`), which is what the plots
historically used.
*/

/// Marker stored in place of a mean or an error when a data point has no samples.
pub const NO_DATA: f64 = -1.0;

/// Distance, in inter-quartile ranges, past which a sample is drawn as an outlier.
pub const WHISKER_RANGE: f64 = 1.5;

/// Arithmetic mean. The caller guarantees `samples` is not empty.
pub fn average(samples: &[f64]) -> f64 {
    debug_assert!(!samples.is_empty());
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation. The caller guarantees `samples` is not empty.
pub fn standard_deviation(samples: &[f64]) -> f64 {
    let mean = average(samples);
    let variance = samples
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / samples.len() as f64;
    variance.sqrt()
}

pub fn empty_safe_average(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        NO_DATA
    } else {
        average(samples)
    }
}

pub fn empty_safe_std(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        NO_DATA
    } else {
        standard_deviation(samples)
    }
}

/// Percentile of already sorted samples, linearly interpolated between the closest ranks.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    let fraction = rank - low as f64;
    sorted[low] + (sorted[high] - sorted[low]) * fraction
}

/// Five number summary of a sample set, plus the samples falling outside the whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStatistics {
    pub lower_whisker: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStatistics {
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let lower_quartile = percentile_sorted(&sorted, 0.25);
        let median = percentile_sorted(&sorted, 0.5);
        let upper_quartile = percentile_sorted(&sorted, 0.75);
        let iqr = upper_quartile - lower_quartile;
        let low_fence = lower_quartile - WHISKER_RANGE * iqr;
        let high_fence = upper_quartile + WHISKER_RANGE * iqr;

        // Whiskers stop at the most extreme samples still inside the fences.
        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&x| x >= low_fence)
            .unwrap_or(lower_quartile);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= high_fence)
            .unwrap_or(upper_quartile);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < low_fence || x > high_fence)
            .collect();

        Some(BoxStatistics {
            lower_whisker,
            lower_quartile,
            median,
            upper_quartile,
            upper_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn population_formulas() {
        let ms = [1.0, 2.0, 3.0];
        assert!(close(average(&ms), 2.0));
        assert!(close(standard_deviation(&ms), (2.0f64 / 3.0).sqrt()));
        assert!((standard_deviation(&ms) - 0.816).abs() < 1e-3);
    }

    #[test]
    fn single_sample_has_no_deviation() {
        assert!(close(average(&[5.0]), 5.0));
        assert!(close(standard_deviation(&[5.0]), 0.0));
    }

    #[test]
    fn empty_samples_give_sentinel() {
        assert_eq!(empty_safe_average(&[]), NO_DATA);
        assert_eq!(empty_safe_std(&[]), NO_DATA);
        assert!(close(empty_safe_average(&[4.0, 6.0]), 5.0));
        assert!(close(empty_safe_std(&[4.0, 6.0]), 1.0));
    }

    #[test]
    fn quartiles_interpolate() {
        let stats = BoxStatistics::from_samples(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!(close(stats.lower_quartile, 1.75));
        assert!(close(stats.median, 2.5));
        assert!(close(stats.upper_quartile, 3.25));
        assert!(close(stats.lower_whisker, 1.0));
        assert!(close(stats.upper_whisker, 4.0));
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn far_sample_is_an_outlier() {
        let stats = BoxStatistics::from_samples(&[10.0, 11.0, 12.0, 13.0, 100.0]).unwrap();
        assert!(close(stats.median, 12.0));
        assert!(close(stats.upper_whisker, 13.0));
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn no_box_without_samples() {
        assert!(BoxStatistics::from_samples(&[]).is_none());
    }
}
