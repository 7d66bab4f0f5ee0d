//! Distribution (histogram) data model.
//!
//! A [`Distribution`] summarizes many samples by aggregate statistics and a
//! run of contiguous buckets. The first bucket is unbounded below and the last
//! is unbounded above.

use std::fmt;
use thiserror::Error;

/// One bucket of a distribution and the number of samples that fell in it.
///
/// `None` means the bucket is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeCount {
    /// Inclusive lower bound, absent for the first bucket.
    pub lower: Option<f64>,
    /// Exclusive upper bound, absent for the last bucket.
    pub upper: Option<f64>,
    /// The number of samples within the range.
    pub count: u64,
}

impl RangeCount {
    /// Creates a bucket.
    #[must_use]
    pub fn new(lower: Option<f64>, upper: Option<f64>, count: u64) -> Self {
        Self {
            lower,
            upper,
            count,
        }
    }
}

/// Which side of a bucket a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    /// The inclusive lower bound.
    Lower,
    /// The exclusive upper bound.
    Upper,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}

/// Ways in which a distribution can be malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// An interior bucket lacks a bound.
    #[error("Bucket {index} is missing its {side} bound")]
    MissingBound {
        /// Position of the offending bucket.
        index: usize,
        /// The absent bound.
        side: BoundSide,
    },

    /// The first bucket has a lower bound or the last bucket has an upper bound.
    #[error("Bucket {index} must not have a {side} bound")]
    UnexpectedBound {
        /// Position of the offending bucket.
        index: usize,
        /// The bound that should be absent.
        side: BoundSide,
    },

    /// A bucket's lower bound is not below its upper bound.
    #[error("Bucket {index} has lower bound {lower} not below upper bound {upper}")]
    InvertedBucket {
        /// Position of the offending bucket.
        index: usize,
        /// The lower bound.
        lower: f64,
        /// The upper bound.
        upper: f64,
    },

    /// Adjacent buckets do not share a boundary.
    #[error("Bucket {index} ends at {upper} but the next bucket starts at {lower}")]
    Discontiguous {
        /// Position of the first of the two buckets.
        index: usize,
        /// Upper bound of bucket `index`.
        upper: f64,
        /// Lower bound of bucket `index + 1`.
        lower: f64,
    },

    /// Bucket counts do not add up to the distribution count.
    #[error("Bucket counts sum to {actual}, expected {expected}")]
    CountMismatch {
        /// The distribution's `count`.
        expected: u64,
        /// The sum of all bucket counts.
        actual: u128,
    },

    /// `min <= median <= max` or `min <= average <= max` does not hold.
    #[error("Statistics out of order: min {min}, median {median}, average {average}, max {max}")]
    StatisticsOutOfOrder {
        /// The minimum.
        min: f64,
        /// The median.
        median: f64,
        /// The average.
        average: f64,
        /// The maximum.
        max: f64,
    },

    /// A distribution with no samples carries buckets or non-zero statistics.
    #[error("Empty distribution must have no buckets and zero statistics")]
    NonDegenerateEmpty,

    /// `n` boundaries need exactly `n + 1` counts.
    #[error("{bounds} bucket boundaries need {} counts, got {counts}", .bounds + 1)]
    ShapeMismatch {
        /// Number of boundaries supplied.
        bounds: usize,
        /// Number of counts supplied.
        counts: usize,
    },
}

/// A distribution of values.
///
/// # Example
///
/// ```
/// use messages::models::Distribution;
///
/// let dist = Distribution::from_buckets(&[5.0, 10.0], &[2, 3, 1])
///     .unwrap()
///     .with_statistics(1.0, 12.0, 6.5, 7.0, 39.0);
///
/// assert_eq!(dist.count, 6);
/// assert_eq!(dist.ranges[0].lower, None);
/// assert_eq!(dist.ranges[2].upper, None);
/// assert!(dist.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    /// The minimum value.
    pub min: f64,
    /// The maximum value.
    pub max: f64,
    /// The average value.
    pub average: f64,
    /// The approximate median value.
    pub median: f64,
    /// The sum of all values.
    pub sum: f64,
    /// The total number of values.
    pub count: u64,
    /// The number of values within each range, ascending.
    pub ranges: Vec<RangeCount>,
}

impl Distribution {
    /// The distribution of zero samples: no buckets, every statistic `0.0`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds contiguous buckets from `n` ascending boundaries and `n + 1`
    /// counts. `count` is set to the sum of `counts`; statistics start at zero.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::ShapeMismatch`] if `counts` does not have
    /// exactly one more element than `bounds`.
    pub fn from_buckets(bounds: &[f64], counts: &[u64]) -> Result<Self, DistributionError> {
        if counts.len() != bounds.len() + 1 {
            return Err(DistributionError::ShapeMismatch {
                bounds: bounds.len(),
                counts: counts.len(),
            });
        }

        let ranges = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let lower = i.checked_sub(1).map(|prev| bounds[prev]);
                let upper = bounds.get(i).copied();
                RangeCount::new(lower, upper, count)
            })
            .collect();

        Ok(Self {
            count: counts.iter().fold(0, |acc: u64, c| acc.saturating_add(*c)),
            ranges,
            ..Self::default()
        })
    }

    /// Sets the aggregate statistics.
    #[must_use]
    pub fn with_statistics(
        mut self,
        min: f64,
        max: f64,
        average: f64,
        median: f64,
        sum: f64,
    ) -> Self {
        self.min = min;
        self.max = max;
        self.average = average;
        self.median = median;
        self.sum = sum;
        self
    }

    /// Returns true if no samples were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Checks bucket layout, counts and statistics.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant:
    /// - the first bucket has no lower bound, the last no upper bound, and all
    ///   other bounds are present
    /// - each bucket's lower bound is below its upper bound
    /// - each bucket's upper bound equals the next bucket's lower bound
    /// - bucket counts sum to `count`
    /// - `min <= median <= max` and `min <= average <= max`
    /// - an empty distribution has no buckets and zero statistics
    pub fn validate(&self) -> Result<(), DistributionError> {
        if self.is_empty() {
            let degenerate = self.ranges.is_empty()
                && [self.min, self.max, self.average, self.median, self.sum]
                    .iter()
                    .all(|v| *v == 0.0);
            return if degenerate {
                Ok(())
            } else {
                Err(DistributionError::NonDegenerateEmpty)
            };
        }

        let last = self.ranges.len().saturating_sub(1);
        for (index, range) in self.ranges.iter().enumerate() {
            check_bound(index, BoundSide::Lower, range.lower, index == 0)?;
            check_bound(index, BoundSide::Upper, range.upper, index == last)?;

            if let (Some(lower), Some(upper)) = (range.lower, range.upper) {
                if !(lower < upper) {
                    return Err(DistributionError::InvertedBucket {
                        index,
                        lower,
                        upper,
                    });
                }
            }
        }

        for (index, pair) in self.ranges.windows(2).enumerate() {
            if let (Some(upper), Some(lower)) = (pair[0].upper, pair[1].lower) {
                if upper != lower {
                    return Err(DistributionError::Discontiguous {
                        index,
                        upper,
                        lower,
                    });
                }
            }
        }

        let actual: u128 = self.ranges.iter().map(|r| u128::from(r.count)).sum();
        if actual != u128::from(self.count) {
            return Err(DistributionError::CountMismatch {
                expected: self.count,
                actual,
            });
        }

        let ordered = self.min <= self.median
            && self.median <= self.max
            && self.min <= self.average
            && self.average <= self.max;
        if !ordered {
            return Err(DistributionError::StatisticsOutOfOrder {
                min: self.min,
                median: self.median,
                average: self.average,
                max: self.max,
            });
        }

        Ok(())
    }
}

fn check_bound(
    index: usize,
    side: BoundSide,
    bound: Option<f64>,
    outer: bool,
) -> Result<(), DistributionError> {
    match (bound, outer) {
        (Some(_), true) => Err(DistributionError::UnexpectedBound { index, side }),
        (None, false) => Err(DistributionError::MissingBound { index, side }),
        _ => Ok(()),
    }
}
