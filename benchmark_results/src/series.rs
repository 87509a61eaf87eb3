use crate::statistics::{NO_DATA, empty_safe_average, empty_safe_std};
use itertools::{Itertools, izip};

/**
Raw measurements of one variant across the swept problem size.

`sizes[i]` owns the replicate samples `samples[i]`, and, for memory benchmarks, the garbage
collector call counts `calls[i]` gathered by the same runs.
*/
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    pub sizes: Vec<u64>,
    pub samples: Vec<Vec<f64>>,
    pub calls: Option<Vec<Vec<f64>>>,
}

/**
Per size mean and error, kept as parallel arrays.

Every array has the same length and index `i` always designates the same data point.
A data point without samples carries [`NO_DATA`] as its mean and error until
[`AggregatedSeries::filter_out_empty_records`] drops it.
*/
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSeries {
    pub sizes: Vec<u64>,
    pub means: Vec<f64>,
    pub errors: Vec<f64>,
    pub samples: Vec<Vec<f64>>,
    pub mean_calls: Option<Vec<f64>>,
}

impl RawSeries {
    /// Once a series carries GC calls, sizes pushed without them get an empty call set.
    pub fn push(&mut self, size: u64, samples: Vec<f64>) {
        self.sizes.push(size);
        self.samples.push(samples);
        if let Some(calls) = &mut self.calls {
            calls.push(Vec::new());
        }
    }

    pub fn push_with_calls(&mut self, size: u64, samples: Vec<f64>, calls: Vec<f64>) {
        let previous = self.sizes.len();
        self.sizes.push(size);
        self.samples.push(samples);
        self.calls
            .get_or_insert_with(|| vec![Vec::new(); previous])
            .push(calls);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn aggregate(self) -> AggregatedSeries {
        debug_assert_eq!(self.sizes.len(), self.samples.len());
        if let Some(calls) = &self.calls {
            debug_assert_eq!(self.sizes.len(), calls.len());
        }
        let means = self.samples.iter().map(|s| empty_safe_average(s)).collect();
        let errors = self.samples.iter().map(|s| empty_safe_std(s)).collect();
        let mean_calls = self
            .calls
            .map(|calls| calls.iter().map(|c| empty_safe_average(c)).collect());
        AggregatedSeries {
            sizes: self.sizes,
            means,
            errors,
            samples: self.samples,
            mean_calls,
        }
    }

    /// Aggregated series with the empty data points already removed.
    pub fn into_points(self) -> AggregatedSeries {
        self.aggregate().filter_out_empty_records()
    }
}

impl AggregatedSeries {
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn filter_out_empty_records(self) -> Self {
        let len = self.sizes.len();
        let has_calls = self.mean_calls.is_some();
        let calls: Vec<Option<f64>> = match self.mean_calls {
            Some(calls) => calls.into_iter().map(Some).collect(),
            None => vec![None; len],
        };

        let (sizes, means, errors, samples, calls): (
            Vec<u64>,
            Vec<f64>,
            Vec<f64>,
            Vec<Vec<f64>>,
            Vec<Option<f64>>,
        ) = izip!(self.sizes, self.means, self.errors, self.samples, calls)
            .filter(|(_size, mean, _error, _samples, _calls)| *mean != NO_DATA)
            .multiunzip();

        AggregatedSeries {
            sizes,
            means,
            errors,
            samples,
            mean_calls: has_calls.then(|| calls.into_iter().flatten().collect()),
        }
    }

    /// `(size, mean)` pairs, in size order of the source.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.sizes
            .iter()
            .zip(self.means.iter())
            .map(|(size, mean)| (*size as f64, *mean))
    }

    pub fn last_point(&self) -> Option<(f64, f64)> {
        self.points().last()
    }

    /// Same series with means, errors and samples divided by `divisor`, used for unit changes.
    pub fn scaled(mut self, divisor: f64) -> Self {
        self.means.iter_mut().for_each(|m| *m /= divisor);
        self.errors.iter_mut().for_each(|e| *e /= divisor);
        self.samples
            .iter_mut()
            .flat_map(|s| s.iter_mut())
            .for_each(|x| *x /= divisor);
        self
    }
}
