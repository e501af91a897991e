//! Outlier-aware averages over historical monthly amounts
//!
//! Two policies exist and they are intentionally not interchangeable:
//!
//! - [`IqrTrim`] feeds the current-month budget comparison.
//! - [`ThresholdTrim`] feeds the per-category and per-tier history views.
//!
//! Both operate only on the history used to compute the statistic. Displayed
//! month series always include every month.

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Interquartile-range trim.
///
/// Quartiles are read straight off the sorted values at indices `n / 4` and
/// `3n / 4`; there is no interpolation. Values outside
/// `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]` are dropped. With two or fewer values
/// nothing is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct IqrTrim;

impl IqrTrim {
    /// Values that survive the trim, in input order
    pub fn kept(values: &[f64]) -> Vec<f64> {
        let n = values.len();
        if n <= 2 {
            return values.to_vec();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = sorted[n / 4];
        let q3 = sorted[3 * n / 4];
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;

        values
            .iter()
            .copied()
            .filter(|v| *v >= lower && *v <= upper)
            .collect()
    }

    /// Mean of the kept values
    pub fn average(values: &[f64]) -> f64 {
        mean(&Self::kept(values))
    }
}

/// Result of a [`ThresholdTrim`] pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdAverage {
    /// Mean of every value
    pub average: f64,
    /// Mean after dropping values above `2 * average`
    pub average_excluding_extremes: f64,
    /// How many values were dropped
    pub excluded: usize,
}

/// Single-pass threshold trim at twice the untrimmed mean.
///
/// The threshold is computed once from the full data set; the pass is not
/// repeated. If every value would be dropped, the untrimmed mean is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdTrim;

impl ThresholdTrim {
    pub fn apply(values: &[f64]) -> ThresholdAverage {
        let average = mean(values);
        let threshold = 2.0 * average;

        let kept: Vec<f64> = values.iter().copied().filter(|v| *v <= threshold).collect();
        let excluded = values.len() - kept.len();

        let average_excluding_extremes = if kept.is_empty() {
            average
        } else {
            mean(&kept)
        };

        ThresholdAverage {
            average,
            average_excluding_extremes,
            excluded,
        }
    }
}
